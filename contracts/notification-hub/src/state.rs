use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};
use event_lottery_common::types::NotificationKind;

pub const CONFIG: Item<NotificationConfig> = Item::new("config");

/// Per-recipient notification store, keyed (recipient, id). Ids are assigned
/// per recipient from NEXT_NOTIFICATION_ID, so one recipient's feed is an
/// append-only sequence.
pub const NOTIFICATIONS: Map<(&Addr, u64), StoredNotification> = Map::new("notifications");
pub const NEXT_NOTIFICATION_ID: Map<&Addr, u64> = Map::new("next_notification_id");
pub const TOTAL_PUSHED: Item<u64> = Item::new("total_pushed");

#[cw_serde]
pub struct NotificationConfig {
    pub admin: Addr,
    /// Contracts allowed to push notifications
    pub publishers: Vec<Addr>,
}

#[cw_serde]
pub struct StoredNotification {
    pub id: u64,
    pub event_id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub send_time: Timestamp,
}
