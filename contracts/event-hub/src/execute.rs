use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Env, Event, MessageInfo, Order, Response, StdResult, Storage,
    SubMsg, Timestamp, WasmMsg,
};
use event_lottery_common::draw;
use event_lottery_common::types::{NotificationEntry, NotificationKind, SelectionStatus};

use crate::error::ContractError;
use crate::msg::{CreateEventParams, NotificationExecuteMsg};
use crate::state::{
    CancelReason, CancelledEntry, EnrolledEntry, EventInfo, SelectedEntry, WaitlistEntry,
    CANCELLED, CONFIG, ENROLLED, EVENTS, HUB_STATE, SELECTED, WAITLIST,
};

/// Reply id for the notification push submessage. Delivery is best-effort:
/// the reply handler swallows failures so a dead notification hub can never
/// roll back a committed draw.
pub const NOTIFY_REPLY_ID: u64 = 1;

fn load_event(storage: &dyn Storage, event_id: u64) -> Result<EventInfo, ContractError> {
    EVENTS
        .may_load(storage, event_id)?
        .ok_or(ContractError::EventNotFound { event_id })
}

/// Full waitlist snapshot for one event, ascending by address. Draws always
/// read this, never the event's cached `waitlist_count`.
fn load_waitlist(storage: &dyn Storage, event_id: u64) -> StdResult<Vec<(Addr, WaitlistEntry)>> {
    WAITLIST
        .prefix(event_id)
        .range(storage, None, None, Order::Ascending)
        .collect()
}

/// Cancelled slots not yet consumed by a replacement draw, ascending by
/// address. The ascending order makes "first available" deterministic.
fn load_unfilled_slots(
    storage: &dyn Storage,
    event_id: u64,
) -> StdResult<Vec<(Addr, CancelledEntry)>> {
    let slots = CANCELLED
        .prefix(event_id)
        .range(storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(slots
        .into_iter()
        .filter(|(_, slot)| !slot.replacement_filled)
        .collect())
}

fn notify_submsg(
    notification_hub: &Addr,
    notifications: Vec<NotificationEntry>,
) -> Result<SubMsg, ContractError> {
    let msg = WasmMsg::Execute {
        contract_addr: notification_hub.to_string(),
        msg: to_json_binary(&NotificationExecuteMsg::PushBatch { notifications })?,
        funds: vec![],
    };
    Ok(SubMsg::reply_on_error(msg, NOTIFY_REPLY_ID))
}

fn won_message(event_name: &str) -> String {
    format!("You have won the lottery for {}!", event_name)
}

fn lost_message(event_name: &str) -> String {
    format!("You were not selected in the lottery for {}.", event_name)
}

fn waitlisted_message(event_name: &str) -> String {
    format!("You have joined the waitlist for {}.", event_name)
}

/// Create a new event. The sender becomes its organizer.
pub fn create_event(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: CreateEventParams,
) -> Result<Response, ContractError> {
    let CreateEventParams {
        name,
        description,
        registration_start,
        registration_end,
        max_participants,
    } = params;

    if name.trim().is_empty() {
        return Err(ContractError::EmptyEventName);
    }
    if registration_start >= registration_end {
        return Err(ContractError::InvalidRegistrationWindow);
    }
    if max_participants == Some(0) {
        return Err(ContractError::ZeroCapacity);
    }

    let mut state = HUB_STATE.load(deps.storage)?;
    let event_id = state.next_event_id;
    state.next_event_id += 1;
    state.total_events += 1;

    let event = EventInfo {
        id: event_id,
        organizer: info.sender.clone(),
        name: name.clone(),
        description,
        registration_start,
        registration_end,
        max_participants,
        waitlist_count: 0,
        draws_held: 0,
        created_at: env.block.time,
    };
    EVENTS.save(deps.storage, event_id, &event)?;
    HUB_STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "create_event")
        .add_attribute("event_id", event_id.to_string())
        .add_event(
            Event::new("lottery_event_created")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("organizer", info.sender.to_string())
                .add_attribute("name", name)
                .add_attribute(
                    "max_participants",
                    max_participants.map_or("unlimited".to_string(), |m| m.to_string()),
                )
                .add_attribute("registration_end", registration_end.seconds().to_string()),
        ))
}

/// Update an event's details. Organizer only.
pub fn update_event(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    event_id: u64,
    description: Option<String>,
    registration_start: Option<Timestamp>,
    registration_end: Option<Timestamp>,
    max_participants: Option<u32>,
) -> Result<Response, ContractError> {
    let mut event = load_event(deps.storage, event_id)?;
    if info.sender != event.organizer {
        return Err(ContractError::Unauthorized {
            reason: "only the organizer can update the event".to_string(),
        });
    }

    if let Some(description) = description {
        event.description = description;
    }
    if let Some(start) = registration_start {
        event.registration_start = start;
    }
    if let Some(end) = registration_end {
        event.registration_end = end;
    }
    if event.registration_start >= event.registration_end {
        return Err(ContractError::InvalidRegistrationWindow);
    }
    if let Some(capacity) = max_participants {
        if capacity == 0 {
            return Err(ContractError::ZeroCapacity);
        }
        event.max_participants = Some(capacity);
    }

    EVENTS.save(deps.storage, event_id, &event)?;

    Ok(Response::new()
        .add_attribute("action", "update_event")
        .add_attribute("event_id", event_id.to_string()))
}

/// Join an event's waitlist. Rejected outside the registration window, when
/// the waitlist is at capacity, or when the sender already holds a record in
/// any of the four entrant collections.
pub fn join_waitlist(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
) -> Result<Response, ContractError> {
    let mut event = load_event(deps.storage, event_id)?;

    let now = env.block.time;
    if !event.is_registration_open(now) {
        return Err(if now < event.registration_start {
            ContractError::RegistrationNotStarted {
                event_id,
                opens_at: event.registration_start.seconds(),
            }
        } else {
            ContractError::RegistrationClosed {
                event_id,
                closed_at: event.registration_end.seconds(),
            }
        });
    }
    if event.is_waitlist_full() {
        return Err(ContractError::WaitlistFull {
            event_id,
            capacity: event.max_participants.unwrap_or_default(),
        });
    }

    // At most one membership per entrant per event
    let key = (event_id, &info.sender);
    if WAITLIST.has(deps.storage, key) {
        return Err(ContractError::AlreadyOnWaitlist { event_id });
    }
    if SELECTED.has(deps.storage, key) {
        return Err(ContractError::AlreadySelected { event_id });
    }
    if ENROLLED.has(deps.storage, key) {
        return Err(ContractError::AlreadyEnrolled { event_id });
    }
    if CANCELLED.has(deps.storage, key) {
        return Err(ContractError::PreviouslyCancelled { event_id });
    }

    WAITLIST.save(deps.storage, key, &WaitlistEntry { joined_at: now })?;
    event.waitlist_count += 1;
    EVENTS.save(deps.storage, event_id, &event)?;

    let config = CONFIG.load(deps.storage)?;
    let notifications = vec![NotificationEntry {
        recipient: info.sender.to_string(),
        event_id,
        kind: NotificationKind::Waitlisted,
        message: waitlisted_message(&event.name),
    }];

    Ok(Response::new()
        .add_submessage(notify_submsg(&config.notification_hub, notifications)?)
        .add_attribute("action", "join_waitlist")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("entrant", info.sender.to_string())
        .add_event(
            Event::new("lottery_waitlist_joined")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("entrant", info.sender.to_string())
                .add_attribute("waitlist_count", event.waitlist_count.to_string()),
        ))
}

/// Leave an event's waitlist voluntarily.
pub fn leave_waitlist(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    event_id: u64,
) -> Result<Response, ContractError> {
    let mut event = load_event(deps.storage, event_id)?;

    let key = (event_id, &info.sender);
    if !WAITLIST.has(deps.storage, key) {
        return Err(ContractError::NotOnWaitlist { event_id });
    }
    WAITLIST.remove(deps.storage, key);

    event.waitlist_count = event.waitlist_count.saturating_sub(1);
    EVENTS.save(deps.storage, event_id, &event)?;

    Ok(Response::new()
        .add_attribute("action", "leave_waitlist")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("entrant", info.sender.to_string())
        .add_event(
            Event::new("lottery_waitlist_left")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("entrant", info.sender.to_string())
                .add_attribute("waitlist_count", event.waitlist_count.to_string()),
        ))
}

/// Draw `count` winners uniformly at random from the waitlist. Organizer only.
///
/// The whole pipeline runs in this one execution:
/// 1. Validate the requested count against the live waitlist and capacity
/// 2. Shuffle the waitlist snapshot with a seeded Fisher–Yates permutation
/// 3. Move each winner waitlist → selected (status pending), losers untouched
/// 4. Push one won/lost notification per entrant, best-effort
///
/// All storage writes apply atomically with the execution; a failure before
/// the end leaves no partial state.
pub fn draw_lottery(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
    count: u32,
) -> Result<Response, ContractError> {
    let mut event = load_event(deps.storage, event_id)?;
    if info.sender != event.organizer {
        return Err(ContractError::Unauthorized {
            reason: "only the organizer can draw the lottery".to_string(),
        });
    }
    if count == 0 {
        return Err(ContractError::ZeroDrawCount);
    }

    let waitlist = load_waitlist(deps.storage, event_id)?;
    if waitlist.is_empty() {
        return Err(ContractError::EmptyWaitlist { event_id });
    }
    if count as usize > waitlist.len() {
        return Err(ContractError::DrawExceedsWaitlist {
            requested: count,
            available: waitlist.len() as u32,
        });
    }
    if let Some(capacity) = event.max_participants {
        if count > capacity {
            return Err(ContractError::DrawExceedsCapacity {
                requested: count,
                capacity,
            });
        }
    }

    let seed = draw::derive_seed(
        event_id,
        event.draws_held,
        env.block.time.nanos(),
        env.block.height,
        info.sender.as_str(),
    );
    let (winner_indices, loser_indices) = draw::draw(&seed, waitlist.len(), count as usize);

    let now = env.block.time;
    let mut notifications = Vec::with_capacity(waitlist.len());
    for &index in &winner_indices {
        let (address, entry) = &waitlist[index];
        SELECTED.save(
            deps.storage,
            (event_id, address),
            &SelectedEntry {
                joined_at: entry.joined_at,
                selected_at: now,
                status: SelectionStatus::Pending,
            },
        )?;
        WAITLIST.remove(deps.storage, (event_id, address));
        notifications.push(NotificationEntry {
            recipient: address.to_string(),
            event_id,
            kind: NotificationKind::LotteryWon,
            message: won_message(&event.name),
        });
    }
    // Losers = snapshot − winners; they stay on the waitlist
    for &index in &loser_indices {
        let (address, _) = &waitlist[index];
        notifications.push(NotificationEntry {
            recipient: address.to_string(),
            event_id,
            kind: NotificationKind::LotteryLost,
            message: lost_message(&event.name),
        });
    }

    event.waitlist_count = event
        .waitlist_count
        .saturating_sub(winner_indices.len() as u32);
    event.draws_held += 1;
    EVENTS.save(deps.storage, event_id, &event)?;

    let mut state = HUB_STATE.load(deps.storage)?;
    state.total_draws_completed += 1;
    state.total_entrants_selected += winner_indices.len() as u64;
    HUB_STATE.save(deps.storage, &state)?;

    let config = CONFIG.load(deps.storage)?;
    Ok(Response::new()
        .add_submessage(notify_submsg(&config.notification_hub, notifications)?)
        .add_attribute("action", "draw_lottery")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("winners", winner_indices.len().to_string())
        .add_event(
            Event::new("lottery_draw_result")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("winners", winner_indices.len().to_string())
                .add_attribute("losers", loser_indices.len().to_string())
                .add_attribute("seed", hex::encode(seed))
                .add_attribute("timestamp", now.seconds().to_string()),
        ))
}

/// Draw `count` replacements from the waitlist to backfill cancelled slots.
/// Organizer only.
///
/// Identical random selection to the main draw, but bounded by the number of
/// cancelled-but-unfilled slots; each replacement consumes exactly one slot
/// (first available, ascending address order), and a filled slot is never
/// re-consumed. Only winners are notified: the remaining waitlist is
/// unaffected by a backfill.
pub fn draw_replacements(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
    count: u32,
) -> Result<Response, ContractError> {
    let mut event = load_event(deps.storage, event_id)?;
    if info.sender != event.organizer {
        return Err(ContractError::Unauthorized {
            reason: "only the organizer can draw replacements".to_string(),
        });
    }
    if count == 0 {
        return Err(ContractError::ZeroDrawCount);
    }

    let slots = load_unfilled_slots(deps.storage, event_id)?;
    if slots.is_empty() {
        return Err(ContractError::NoReplacementSlots { event_id });
    }
    let waitlist = load_waitlist(deps.storage, event_id)?;
    if waitlist.is_empty() {
        return Err(ContractError::EmptyWaitlist { event_id });
    }
    let available = slots.len().min(waitlist.len());
    if count as usize > available {
        return Err(ContractError::ReplacementExceedsAvailable {
            requested: count,
            available: available as u32,
        });
    }

    let seed = draw::derive_seed(
        event_id,
        event.draws_held,
        env.block.time.nanos(),
        env.block.height,
        info.sender.as_str(),
    );
    let (winner_indices, _) = draw::draw(&seed, waitlist.len(), count as usize);

    let now = env.block.time;
    let mut notifications = Vec::with_capacity(winner_indices.len());
    for &index in &winner_indices {
        let (address, entry) = &waitlist[index];
        SELECTED.save(
            deps.storage,
            (event_id, address),
            &SelectedEntry {
                joined_at: entry.joined_at,
                selected_at: now,
                status: SelectionStatus::Pending,
            },
        )?;
        WAITLIST.remove(deps.storage, (event_id, address));
        notifications.push(NotificationEntry {
            recipient: address.to_string(),
            event_id,
            kind: NotificationKind::LotteryWon,
            message: won_message(&event.name),
        });
    }

    // Consume one slot per replacement drawn
    for (slot_address, slot) in slots.iter().take(winner_indices.len()) {
        let consumed = CancelledEntry {
            replacement_filled: true,
            ..slot.clone()
        };
        CANCELLED.save(deps.storage, (event_id, slot_address), &consumed)?;
    }

    event.waitlist_count = event
        .waitlist_count
        .saturating_sub(winner_indices.len() as u32);
    event.draws_held += 1;
    EVENTS.save(deps.storage, event_id, &event)?;

    let mut state = HUB_STATE.load(deps.storage)?;
    state.total_draws_completed += 1;
    state.total_entrants_selected += winner_indices.len() as u64;
    HUB_STATE.save(deps.storage, &state)?;

    let config = CONFIG.load(deps.storage)?;
    Ok(Response::new()
        .add_submessage(notify_submsg(&config.notification_hub, notifications)?)
        .add_attribute("action", "draw_replacements")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("replacements", winner_indices.len().to_string())
        .add_event(
            Event::new("lottery_replacement_result")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("replacements", winner_indices.len().to_string())
                .add_attribute("slots_consumed", winner_indices.len().to_string())
                .add_attribute("seed", hex::encode(seed))
                .add_attribute("timestamp", now.seconds().to_string()),
        ))
}

/// Accept a pending invitation: selected → enrolled.
pub fn accept_selection(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
) -> Result<Response, ContractError> {
    load_event(deps.storage, event_id)?;

    let key = (event_id, &info.sender);
    let entry = SELECTED
        .may_load(deps.storage, key)?
        .ok_or(ContractError::NoPendingSelection { event_id })?;

    ENROLLED.save(
        deps.storage,
        key,
        &EnrolledEntry {
            joined_at: entry.joined_at,
            selected_at: entry.selected_at,
            enrolled_at: env.block.time,
        },
    )?;
    SELECTED.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("action", "accept_selection")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("entrant", info.sender.to_string())
        .add_event(
            Event::new("lottery_selection_accepted")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("entrant", info.sender.to_string()),
        ))
}

/// Decline a pending invitation: selected → cancelled. The cancelled record
/// starts unfilled and becomes a replacement slot.
pub fn decline_selection(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
) -> Result<Response, ContractError> {
    load_event(deps.storage, event_id)?;

    let key = (event_id, &info.sender);
    let entry = SELECTED
        .may_load(deps.storage, key)?
        .ok_or(ContractError::NoPendingSelection { event_id })?;

    CANCELLED.save(
        deps.storage,
        key,
        &CancelledEntry {
            joined_at: entry.joined_at,
            selected_at: entry.selected_at,
            cancelled_at: env.block.time,
            reason: CancelReason::Declined,
            replacement_filled: false,
        },
    )?;
    SELECTED.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("action", "decline_selection")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("entrant", info.sender.to_string())
        .add_event(
            Event::new("lottery_selection_declined")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("entrant", info.sender.to_string()),
        ))
}

/// Cancel an entrant's pending invitation. Organizer only. Opens a
/// replacement slot, same as a decline.
pub fn remove_selected(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
    entrant: String,
) -> Result<Response, ContractError> {
    let event = load_event(deps.storage, event_id)?;
    if info.sender != event.organizer {
        return Err(ContractError::Unauthorized {
            reason: "only the organizer can remove a selected entrant".to_string(),
        });
    }

    let entrant_addr = deps.api.addr_validate(&entrant)?;
    let key = (event_id, &entrant_addr);
    let entry = SELECTED
        .may_load(deps.storage, key)?
        .ok_or_else(|| ContractError::SelectionNotFound {
            event_id,
            entrant: entrant.clone(),
        })?;

    CANCELLED.save(
        deps.storage,
        key,
        &CancelledEntry {
            joined_at: entry.joined_at,
            selected_at: entry.selected_at,
            cancelled_at: env.block.time,
            reason: CancelReason::Removed,
            replacement_filled: false,
        },
    )?;
    SELECTED.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("action", "remove_selected")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("entrant", entrant)
        .add_event(
            Event::new("lottery_selection_removed")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("entrant", entrant_addr.to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    notification_hub: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(hub) = notification_hub {
        config.notification_hub = deps.api.addr_validate(&hub)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
