use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp};
use event_lottery_common::types::{NotificationEntry, SelectionStatus};

use crate::state::{CancelReason, EventInfo, HubConfig, HubStateInfo};

#[cw_serde]
pub struct InstantiateMsg {
    pub notification_hub: String,
}

#[cw_serde]
pub struct CreateEventParams {
    pub name: String,
    pub description: String,
    pub registration_start: Timestamp,
    pub registration_end: Timestamp,
    /// None = unlimited waitlist capacity
    pub max_participants: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a new event. The sender becomes its organizer.
    CreateEvent { params: CreateEventParams },
    /// Update an event's details. Organizer only. Lowering the capacity does
    /// not evict entrants already waiting; it only gates new joins and draws.
    UpdateEvent {
        event_id: u64,
        description: Option<String>,
        registration_start: Option<Timestamp>,
        registration_end: Option<Timestamp>,
        max_participants: Option<u32>,
    },
    /// Join an event's waitlist during its registration window.
    JoinWaitlist { event_id: u64 },
    /// Leave an event's waitlist voluntarily.
    LeaveWaitlist { event_id: u64 },
    /// Draw `count` winners from the waitlist. Organizer only.
    DrawLottery { event_id: u64, count: u32 },
    /// Draw `count` replacements for cancelled-but-unfilled slots.
    /// Organizer only.
    DrawReplacements { event_id: u64, count: u32 },
    /// Accept a pending invitation: selected → enrolled.
    AcceptSelection { event_id: u64 },
    /// Decline a pending invitation: selected → cancelled, opening a
    /// replacement slot.
    DeclineSelection { event_id: u64 },
    /// Cancel an entrant's pending invitation. Organizer only.
    RemoveSelected { event_id: u64, entrant: String },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        notification_hub: Option<String>,
    },
}

/// Execute message for the notification hub contract.
#[cw_serde]
pub enum NotificationExecuteMsg {
    PushBatch {
        notifications: Vec<NotificationEntry>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(HubConfig)]
    Config {},
    #[returns(HubStateInfo)]
    HubState {},
    #[returns(EventInfo)]
    Event { event_id: u64 },
    #[returns(EventsResponse)]
    Events {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(WaitlistResponse)]
    Waitlist {
        event_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(SelectedResponse)]
    Selected {
        event_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(EnrolledResponse)]
    Enrolled {
        event_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(CancelledResponse)]
    Cancelled {
        event_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Which collection, if any, an entrant currently occupies.
    #[returns(EntrantStatusResponse)]
    EntrantStatus { event_id: u64, entrant: String },
    /// Live recounts of all four entrant collections.
    #[returns(EntrantCountsResponse)]
    EntrantCounts { event_id: u64 },
    /// Number of cancelled slots not yet consumed by a replacement draw.
    #[returns(ReplacementSlotsResponse)]
    ReplacementSlots { event_id: u64 },
}

#[cw_serde]
pub struct EventsResponse {
    pub events: Vec<EventInfo>,
}

#[cw_serde]
pub struct WaitlistMember {
    pub address: Addr,
    pub joined_at: Timestamp,
}

#[cw_serde]
pub struct WaitlistResponse {
    pub entrants: Vec<WaitlistMember>,
}

#[cw_serde]
pub struct SelectedMember {
    pub address: Addr,
    pub joined_at: Timestamp,
    pub selected_at: Timestamp,
    pub status: SelectionStatus,
}

#[cw_serde]
pub struct SelectedResponse {
    pub entrants: Vec<SelectedMember>,
}

#[cw_serde]
pub struct EnrolledMember {
    pub address: Addr,
    pub joined_at: Timestamp,
    pub selected_at: Timestamp,
    pub enrolled_at: Timestamp,
}

#[cw_serde]
pub struct EnrolledResponse {
    pub entrants: Vec<EnrolledMember>,
}

#[cw_serde]
pub struct CancelledMember {
    pub address: Addr,
    pub cancelled_at: Timestamp,
    pub reason: CancelReason,
    pub replacement_filled: bool,
}

#[cw_serde]
pub struct CancelledResponse {
    pub entrants: Vec<CancelledMember>,
}

#[cw_serde]
pub enum EntrantPhase {
    Waitlisted,
    Selected,
    Enrolled,
    Cancelled,
}

#[cw_serde]
pub struct EntrantStatusResponse {
    pub phase: Option<EntrantPhase>,
}

#[cw_serde]
pub struct EntrantCountsResponse {
    pub waiting: u32,
    pub selected: u32,
    pub enrolled: u32,
    pub cancelled: u32,
}

#[cw_serde]
pub struct ReplacementSlotsResponse {
    pub available: u32,
}
