use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult, SubMsgResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{HubConfig, HubStateInfo, CONFIG, HUB_STATE};

const CONTRACT_NAME: &str = "crates.io:event-lottery-hub";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = HubConfig {
        admin: info.sender.clone(),
        notification_hub: deps.api.addr_validate(&msg.notification_hub)?,
    };
    CONFIG.save(deps.storage, &config)?;

    let state = HubStateInfo {
        next_event_id: 0,
        total_events: 0,
        total_draws_completed: 0,
        total_entrants_selected: 0,
    };
    HUB_STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "event-hub")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateEvent { params } => execute::create_event(deps, env, info, params),
        ExecuteMsg::UpdateEvent {
            event_id,
            description,
            registration_start,
            registration_end,
            max_participants,
        } => execute::update_event(
            deps,
            env,
            info,
            event_id,
            description,
            registration_start,
            registration_end,
            max_participants,
        ),
        ExecuteMsg::JoinWaitlist { event_id } => execute::join_waitlist(deps, env, info, event_id),
        ExecuteMsg::LeaveWaitlist { event_id } => {
            execute::leave_waitlist(deps, env, info, event_id)
        }
        ExecuteMsg::DrawLottery { event_id, count } => {
            execute::draw_lottery(deps, env, info, event_id, count)
        }
        ExecuteMsg::DrawReplacements { event_id, count } => {
            execute::draw_replacements(deps, env, info, event_id, count)
        }
        ExecuteMsg::AcceptSelection { event_id } => {
            execute::accept_selection(deps, env, info, event_id)
        }
        ExecuteMsg::DeclineSelection { event_id } => {
            execute::decline_selection(deps, env, info, event_id)
        }
        ExecuteMsg::RemoveSelected { event_id, entrant } => {
            execute::remove_selected(deps, env, info, event_id, entrant)
        }
        ExecuteMsg::UpdateConfig {
            admin,
            notification_hub,
        } => execute::update_config(deps, env, info, admin, notification_hub),
    }
}

/// Handle the notification push submessage outcome. Delivery is best-effort:
/// a failed push is recorded as an attribute and otherwise ignored, so it can
/// never roll back the draw that triggered it.
#[entry_point]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        execute::NOTIFY_REPLY_ID => {
            let response = Response::new().add_attribute("action", "notify_reply");
            Ok(match msg.result {
                SubMsgResult::Err(err) => response
                    .add_attribute("delivered", "false")
                    .add_attribute("error", err),
                SubMsgResult::Ok(_) => response.add_attribute("delivered", "true"),
            })
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::HubState {} => query::query_hub_state(deps),
        QueryMsg::Event { event_id } => query::query_event(deps, event_id),
        QueryMsg::Events { start_after, limit } => query::query_events(deps, start_after, limit),
        QueryMsg::Waitlist {
            event_id,
            start_after,
            limit,
        } => query::query_waitlist(deps, event_id, start_after, limit),
        QueryMsg::Selected {
            event_id,
            start_after,
            limit,
        } => query::query_selected(deps, event_id, start_after, limit),
        QueryMsg::Enrolled {
            event_id,
            start_after,
            limit,
        } => query::query_enrolled(deps, event_id, start_after, limit),
        QueryMsg::Cancelled {
            event_id,
            start_after,
            limit,
        } => query::query_cancelled(deps, event_id, start_after, limit),
        QueryMsg::EntrantStatus { event_id, entrant } => {
            query::query_entrant_status(deps, event_id, entrant)
        }
        QueryMsg::EntrantCounts { event_id } => query::query_entrant_counts(deps, event_id),
        QueryMsg::ReplacementSlots { event_id } => {
            query::query_replacement_slots(deps, event_id)
        }
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
