use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    CancelledMember, CancelledResponse, EnrolledMember, EnrolledResponse, EntrantCountsResponse,
    EntrantPhase, EntrantStatusResponse, EventsResponse, ReplacementSlotsResponse, SelectedMember,
    SelectedResponse, WaitlistMember, WaitlistResponse,
};
use crate::state::{CANCELLED, CONFIG, ENROLLED, EVENTS, HUB_STATE, SELECTED, WAITLIST};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_hub_state(deps: Deps) -> StdResult<Binary> {
    let state = HUB_STATE.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_event(deps: Deps, event_id: u64) -> StdResult<Binary> {
    let event = EVENTS.load(deps.storage, event_id)?;
    to_json_binary(&event)
}

pub fn query_events(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let events: Vec<_> = EVENTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, event)| event)
        .collect();

    to_json_binary(&EventsResponse { events })
}

pub fn query_waitlist(
    deps: Deps,
    event_id: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let entrants: Vec<_> = WAITLIST
        .prefix(event_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(address, entry)| WaitlistMember {
            address,
            joined_at: entry.joined_at,
        })
        .collect();

    to_json_binary(&WaitlistResponse { entrants })
}

pub fn query_selected(
    deps: Deps,
    event_id: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let entrants: Vec<_> = SELECTED
        .prefix(event_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(address, entry)| SelectedMember {
            address,
            joined_at: entry.joined_at,
            selected_at: entry.selected_at,
            status: entry.status,
        })
        .collect();

    to_json_binary(&SelectedResponse { entrants })
}

pub fn query_enrolled(
    deps: Deps,
    event_id: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let entrants: Vec<_> = ENROLLED
        .prefix(event_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(address, entry)| EnrolledMember {
            address,
            joined_at: entry.joined_at,
            selected_at: entry.selected_at,
            enrolled_at: entry.enrolled_at,
        })
        .collect();

    to_json_binary(&EnrolledResponse { entrants })
}

pub fn query_cancelled(
    deps: Deps,
    event_id: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let entrants: Vec<_> = CANCELLED
        .prefix(event_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(address, entry)| CancelledMember {
            address,
            cancelled_at: entry.cancelled_at,
            reason: entry.reason,
            replacement_filled: entry.replacement_filled,
        })
        .collect();

    to_json_binary(&CancelledResponse { entrants })
}

pub fn query_entrant_status(deps: Deps, event_id: u64, entrant: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&entrant)?;
    let key = (event_id, &addr);

    let phase = if WAITLIST.has(deps.storage, key) {
        Some(EntrantPhase::Waitlisted)
    } else if SELECTED.has(deps.storage, key) {
        Some(EntrantPhase::Selected)
    } else if ENROLLED.has(deps.storage, key) {
        Some(EntrantPhase::Enrolled)
    } else if CANCELLED.has(deps.storage, key) {
        Some(EntrantPhase::Cancelled)
    } else {
        None
    };

    to_json_binary(&EntrantStatusResponse { phase })
}

pub fn query_entrant_counts(deps: Deps, event_id: u64) -> StdResult<Binary> {
    // Live recounts from the collections, not the cached waitlist_count
    let waiting = WAITLIST
        .prefix(event_id)
        .keys(deps.storage, None, None, Order::Ascending)
        .count() as u32;
    let selected = SELECTED
        .prefix(event_id)
        .keys(deps.storage, None, None, Order::Ascending)
        .count() as u32;
    let enrolled = ENROLLED
        .prefix(event_id)
        .keys(deps.storage, None, None, Order::Ascending)
        .count() as u32;
    let cancelled = CANCELLED
        .prefix(event_id)
        .keys(deps.storage, None, None, Order::Ascending)
        .count() as u32;

    to_json_binary(&EntrantCountsResponse {
        waiting,
        selected,
        enrolled,
        cancelled,
    })
}

pub fn query_replacement_slots(deps: Deps, event_id: u64) -> StdResult<Binary> {
    let available = CANCELLED
        .prefix(event_id)
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|r| r.ok())
        .filter(|(_, slot)| !slot.replacement_filled)
        .count() as u32;

    to_json_binary(&ReplacementSlotsResponse { available })
}
