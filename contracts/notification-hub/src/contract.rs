use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{NotificationConfig, CONFIG, TOTAL_PUSHED};

const CONTRACT_NAME: &str = "crates.io:event-lottery-notifications";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let publishers = msg
        .publishers
        .iter()
        .map(|p| deps.api.addr_validate(p))
        .collect::<StdResult<Vec<_>>>()?;

    let config = NotificationConfig {
        admin: info.sender.clone(),
        publishers,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_PUSHED.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "notification-hub")
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
        ExecuteMsg::PushBatch { notifications } => {
            execute::push_batch(deps, env, info, notifications)
        }
        ExecuteMsg::UpdatePublishers { add, remove } => {
            execute::update_publishers(deps, info, add, remove)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Notifications {
            address,
            start_after,
            limit,
        } => query::query_notifications(deps, address, start_after, limit),
        QueryMsg::NotificationCount { address } => query::query_notification_count(deps, address),
        QueryMsg::TotalPushed {} => query::query_total_pushed(deps),
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
