use cosmwasm_schema::cw_serde;

/// Outcome category carried by every notification record.
#[cw_serde]
pub enum NotificationKind {
    LotteryWon,
    LotteryLost,
    Waitlisted,
}

/// Response state of a selected entrant's invitation.
#[cw_serde]
pub enum SelectionStatus {
    Pending,
    Accepted,
    Declined,
}

/// One notification addressed to one recipient, as pushed by the event hub
/// into the notification hub's store.
#[cw_serde]
pub struct NotificationEntry {
    /// Recipient's bech32 address
    pub recipient: String,
    pub event_id: u64,
    pub kind: NotificationKind,
    pub message: String,
}
