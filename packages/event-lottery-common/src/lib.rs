pub mod draw;
pub mod types;

pub use draw::{derive_seed, draw, fair_permutation};
pub use types::{NotificationEntry, NotificationKind, SelectionStatus};
