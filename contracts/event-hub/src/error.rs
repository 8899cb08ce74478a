use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("event {event_id} not found")]
    EventNotFound { event_id: u64 },

    #[error("event name must not be empty")]
    EmptyEventName,

    #[error("registration start must be before registration end")]
    InvalidRegistrationWindow,

    #[error("max participants must be greater than zero when set")]
    ZeroCapacity,

    #[error("registration for event {event_id} has not opened yet (opens at {opens_at})")]
    RegistrationNotStarted { event_id: u64, opens_at: u64 },

    #[error("registration for event {event_id} has closed (closed at {closed_at})")]
    RegistrationClosed { event_id: u64, closed_at: u64 },

    #[error("waitlist for event {event_id} is full (capacity {capacity})")]
    WaitlistFull { event_id: u64, capacity: u32 },

    #[error("already on the waitlist for event {event_id}")]
    AlreadyOnWaitlist { event_id: u64 },

    #[error("already selected for event {event_id}")]
    AlreadySelected { event_id: u64 },

    #[error("already enrolled in event {event_id}")]
    AlreadyEnrolled { event_id: u64 },

    #[error("cancelled entrants cannot rejoin event {event_id}")]
    PreviouslyCancelled { event_id: u64 },

    #[error("not on the waitlist for event {event_id}")]
    NotOnWaitlist { event_id: u64 },

    #[error("no pending selection for event {event_id}")]
    NoPendingSelection { event_id: u64 },

    #[error("no pending selection for {entrant} in event {event_id}")]
    SelectionNotFound { event_id: u64, entrant: String },

    #[error("draw count must be greater than zero")]
    ZeroDrawCount,

    #[error("waitlist for event {event_id} is empty")]
    EmptyWaitlist { event_id: u64 },

    #[error("cannot draw {requested} winners from a waitlist of {available}")]
    DrawExceedsWaitlist { requested: u32, available: u32 },

    #[error("cannot draw {requested} winners above the capacity of {capacity}")]
    DrawExceedsCapacity { requested: u32, capacity: u32 },

    #[error("no unfilled replacement slots for event {event_id}")]
    NoReplacementSlots { event_id: u64 },

    #[error("cannot draw {requested} replacements, only {available} available")]
    ReplacementExceedsAvailable { requested: u32, available: u32 },

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}
