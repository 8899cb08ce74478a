use cosmwasm_schema::{cw_serde, QueryResponses};
use event_lottery_common::types::NotificationEntry;

use crate::state::{NotificationConfig, StoredNotification};

#[cw_serde]
pub struct InstantiateMsg {
    /// Contracts allowed to push notifications
    pub publishers: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Store one notification per entry. Publishers only.
    PushBatch {
        notifications: Vec<NotificationEntry>,
    },
    /// Update publisher list (admin only).
    UpdatePublishers {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(NotificationConfig)]
    Config {},

    /// One recipient's notification feed, oldest first.
    #[returns(NotificationsResponse)]
    Notifications {
        address: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Number of notifications ever stored for one recipient.
    #[returns(u64)]
    NotificationCount { address: String },

    #[returns(u64)]
    TotalPushed {},
}

#[cw_serde]
pub struct NotificationsResponse {
    pub notifications: Vec<StoredNotification>,
}
