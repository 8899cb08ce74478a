use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::NotificationsResponse;
use crate::state::{CONFIG, NEXT_NOTIFICATION_ID, NOTIFICATIONS, TOTAL_PUSHED};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_notifications(
    deps: Deps,
    address: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let notifications: Vec<_> = NOTIFICATIONS
        .prefix(&addr)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, notification)| notification)
        .collect();

    to_json_binary(&NotificationsResponse { notifications })
}

pub fn query_notification_count(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let count = NEXT_NOTIFICATION_ID
        .may_load(deps.storage, &addr)?
        .unwrap_or(0);
    to_json_binary(&count)
}

pub fn query_total_pushed(deps: Deps) -> StdResult<Binary> {
    let total = TOTAL_PUSHED.load(deps.storage)?;
    to_json_binary(&total)
}
