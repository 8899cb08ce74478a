use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};
use event_lottery_common::types::SelectionStatus;

pub const CONFIG: Item<HubConfig> = Item::new("config");
pub const HUB_STATE: Item<HubStateInfo> = Item::new("hub_state");
pub const EVENTS: Map<u64, EventInfo> = Map::new("events");

/// Per-event entrant collections, keyed (event_id, entrant). An entrant
/// address lives in at most one of these four maps per event at any time.
pub const WAITLIST: Map<(u64, &Addr), WaitlistEntry> = Map::new("waitlist");
pub const SELECTED: Map<(u64, &Addr), SelectedEntry> = Map::new("selected");
pub const ENROLLED: Map<(u64, &Addr), EnrolledEntry> = Map::new("enrolled");
pub const CANCELLED: Map<(u64, &Addr), CancelledEntry> = Map::new("cancelled");

#[cw_serde]
pub struct HubConfig {
    pub admin: Addr,
    /// Notification hub contract receiving outcome pushes
    pub notification_hub: Addr,
}

#[cw_serde]
pub struct HubStateInfo {
    pub next_event_id: u64,
    pub total_events: u64,
    pub total_draws_completed: u64,
    pub total_entrants_selected: u64,
}

#[cw_serde]
pub struct EventInfo {
    pub id: u64,
    pub organizer: Addr,
    pub name: String,
    pub description: String,
    pub registration_start: Timestamp,
    pub registration_end: Timestamp,
    /// None = unlimited waitlist capacity
    pub max_participants: Option<u32>,
    /// Denormalized count of waitlist entries. Display and capacity-gate
    /// state only; draws always recount from the WAITLIST map.
    pub waitlist_count: u32,
    /// Number of draws already held, mixed into each draw seed
    pub draws_held: u64,
    pub created_at: Timestamp,
}

impl EventInfo {
    pub fn is_waitlist_full(&self) -> bool {
        matches!(self.max_participants, Some(max) if self.waitlist_count >= max)
    }

    pub fn is_registration_open(&self, now: Timestamp) -> bool {
        now >= self.registration_start && now < self.registration_end
    }
}

#[cw_serde]
pub struct WaitlistEntry {
    pub joined_at: Timestamp,
}

#[cw_serde]
pub struct SelectedEntry {
    /// Carried over from the waitlist entry the draw consumed
    pub joined_at: Timestamp,
    pub selected_at: Timestamp,
    pub status: SelectionStatus,
}

#[cw_serde]
pub struct EnrolledEntry {
    pub joined_at: Timestamp,
    pub selected_at: Timestamp,
    pub enrolled_at: Timestamp,
}

#[cw_serde]
pub struct CancelledEntry {
    pub joined_at: Timestamp,
    pub selected_at: Timestamp,
    pub cancelled_at: Timestamp,
    pub reason: CancelReason,
    /// Flips false→true exactly once, when a replacement draw consumes this
    /// slot. Never reverts.
    pub replacement_filled: bool,
}

#[cw_serde]
pub enum CancelReason {
    /// The entrant declined the invitation themselves
    Declined,
    /// The organizer cancelled the entrant's pending invitation
    Removed,
}
