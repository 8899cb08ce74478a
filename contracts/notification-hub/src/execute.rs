use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response};
use event_lottery_common::types::NotificationEntry;

use crate::error::ContractError;
use crate::state::{StoredNotification, CONFIG, NEXT_NOTIFICATION_ID, NOTIFICATIONS, TOTAL_PUSHED};

/// Store one notification per batch entry. Only registered publisher
/// contracts can call this. Each entry is addressed independently; a batch
/// never merges or dedupes across recipients.
pub fn push_batch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    notifications: Vec<NotificationEntry>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.publishers.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only registered publishers can push notifications".to_string(),
        });
    }
    if notifications.is_empty() {
        return Err(ContractError::EmptyBatch);
    }

    let count = notifications.len() as u64;
    for entry in notifications {
        let recipient = deps.api.addr_validate(&entry.recipient)?;
        let id = NEXT_NOTIFICATION_ID
            .may_load(deps.storage, &recipient)?
            .unwrap_or(0);
        let stored = StoredNotification {
            id,
            event_id: entry.event_id,
            kind: entry.kind,
            message: entry.message,
            send_time: env.block.time,
        };
        NOTIFICATIONS.save(deps.storage, (&recipient, id), &stored)?;
        NEXT_NOTIFICATION_ID.save(deps.storage, &recipient, &(id + 1))?;
    }

    let total = TOTAL_PUSHED.load(deps.storage)?;
    TOTAL_PUSHED.save(deps.storage, &(total + count))?;

    Ok(Response::new()
        .add_attribute("action", "push_batch")
        .add_attribute("count", count.to_string())
        .add_event(
            Event::new("lottery_notifications_pushed")
                .add_attribute("publisher", info.sender.to_string())
                .add_attribute("count", count.to_string()),
        ))
}

/// Update publisher list. Admin only.
pub fn update_publishers(
    deps: DepsMut,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update publishers".to_string(),
        });
    }

    for addr in add {
        let publisher = deps.api.addr_validate(&addr)?;
        if !config.publishers.contains(&publisher) {
            config.publishers.push(publisher);
        }
    }
    for addr in remove {
        let publisher = deps.api.addr_validate(&addr)?;
        config.publishers.retain(|p| p != &publisher);
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_publishers")
        .add_attribute("publishers", config.publishers.len().to_string()))
}
