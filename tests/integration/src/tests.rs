//! Integration tests for the event lottery protocol.
//!
//! These tests exercise the contract entry points directly using
//! `cosmwasm_std::testing` mocks. Each contract is tested via its
//! `instantiate` / `execute` / `query` entry points.
//!
//! The event hub pushes notifications to the notification hub through a
//! fire-and-forget submessage; here the submessage is relayed by hand, the
//! way the chain would deliver it, so both ends of the boundary are covered.
//!
//! Run:
//! ```bash
//! cargo test -p event-lottery-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    from_json, Addr, Binary, CosmosMsg, MemoryStorage, OwnedDeps, Reply, Response, SubMsgResult,
    WasmMsg,
};
use event_lottery_common::types::{NotificationKind, SelectionStatus};

use event_lottery_hub::msg::{
    CancelledResponse, CreateEventParams, EntrantPhase, EntrantStatusResponse,
    ExecuteMsg as HubExecuteMsg, QueryMsg as HubQueryMsg, ReplacementSlotsResponse,
    SelectedMember, SelectedResponse, WaitlistMember, WaitlistResponse,
};
use event_lottery_notifications::msg::{
    ExecuteMsg as NotifExecuteMsg, InstantiateMsg as NotifInstantiateMsg, NotificationsResponse,
    QueryMsg as NotifQueryMsg,
};
use event_lottery_notifications::state::StoredNotification;

type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Setup helpers ───

fn setup_notification_hub(deps: &mut MockDeps, publishers: Vec<String>) {
    let admin = deps.api.addr_make("admin");
    let info = message_info(&admin, &[]);
    event_lottery_notifications::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        info,
        NotifInstantiateMsg { publishers },
    )
    .unwrap();
}

fn setup_event_hub(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let notification_hub = deps.api.addr_make("notification_hub_contract");
    let info = message_info(&admin, &[]);
    event_lottery_hub::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        info,
        event_lottery_hub::msg::InstantiateMsg {
            notification_hub: notification_hub.to_string(),
        },
    )
    .unwrap();
}

fn create_event(deps: &mut MockDeps, max_participants: Option<u32>) -> u64 {
    let organizer = deps.api.addr_make("organizer");
    let now = mock_env().block.time;
    let info = message_info(&organizer, &[]);
    let res = event_lottery_hub::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::CreateEvent {
            params: CreateEventParams {
                name: "Community Dinner".to_string(),
                description: "Seats assigned by lottery".to_string(),
                registration_start: now.minus_seconds(3600),
                registration_end: now.plus_seconds(86400),
                max_participants,
            },
        },
    )
    .unwrap();
    res.attributes[1].value.parse().unwrap()
}

fn join(deps: &mut MockDeps, event_id: u64, name: &str) -> Response {
    let entrant = deps.api.addr_make(name);
    let info = message_info(&entrant, &[]);
    event_lottery_hub::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::JoinWaitlist { event_id },
    )
    .unwrap()
}

/// Deliver the hub's notification submessage to the notification hub, the
/// way the chain would: decode the wrapped WasmMsg::Execute and run it
/// against the notification contract with the hub as sender.
fn relay_notifications(
    res: &Response,
    notif_deps: &mut MockDeps,
    publisher: &Addr,
) -> Result<Response, event_lottery_notifications::error::ContractError> {
    assert_eq!(res.messages.len(), 1);
    let msg: NotifExecuteMsg = match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => from_json(msg).unwrap(),
        other => panic!("unexpected message: {:?}", other),
    };
    let info = message_info(publisher, &[]);
    event_lottery_notifications::contract::execute(notif_deps.as_mut(), mock_env(), info, msg)
}

// ─── Query helpers ───

fn query_waitlist(deps: &MockDeps, event_id: u64) -> Vec<WaitlistMember> {
    let res: WaitlistResponse = from_json(
        event_lottery_hub::contract::query(
            deps.as_ref(),
            mock_env(),
            HubQueryMsg::Waitlist {
                event_id,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    res.entrants
}

fn query_selected(deps: &MockDeps, event_id: u64) -> Vec<SelectedMember> {
    let res: SelectedResponse = from_json(
        event_lottery_hub::contract::query(
            deps.as_ref(),
            mock_env(),
            HubQueryMsg::Selected {
                event_id,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    res.entrants
}

fn notifications_for(deps: &MockDeps, address: &Addr) -> Vec<StoredNotification> {
    let res: NotificationsResponse = from_json(
        event_lottery_notifications::contract::query(
            deps.as_ref(),
            mock_env(),
            NotifQueryMsg::Notifications {
                address: address.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    res.notifications
}

fn total_pushed(deps: &MockDeps) -> u64 {
    from_json(
        event_lottery_notifications::contract::query(
            deps.as_ref(),
            mock_env(),
            NotifQueryMsg::TotalPushed {},
        )
        .unwrap(),
    )
    .unwrap()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_lottery_flow() {
    let mut hub_deps = mock_dependencies();
    let mut notif_deps = mock_dependencies();
    let mock_api = MockApi::default();
    let hub_contract = mock_api.addr_make("event_hub_contract");

    setup_notification_hub(&mut notif_deps, vec![hub_contract.to_string()]);
    setup_event_hub(&mut hub_deps);

    let event_id = create_event(&mut hub_deps, None);

    // 1. Five entrants join; each join pushes a waitlisted notification
    let names = ["alice", "bob", "carol", "dave", "erin"];
    for name in names {
        let res = join(&mut hub_deps, event_id, name);
        relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();
    }
    assert_eq!(query_waitlist(&hub_deps, event_id).len(), 5);
    assert_eq!(total_pushed(&notif_deps), 5);

    // 2. Organizer draws 2 winners
    let organizer = mock_api.addr_make("organizer");
    let info = message_info(&organizer, &[]);
    let res = event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::DrawLottery { event_id, count: 2 },
    )
    .unwrap();
    relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();

    // 3. Two selected as pending, three remain waiting, disjoint sets
    let selected = query_selected(&hub_deps, event_id);
    let waitlist = query_waitlist(&hub_deps, event_id);
    assert_eq!(selected.len(), 2);
    assert_eq!(waitlist.len(), 3);
    for member in &selected {
        assert_eq!(member.status, SelectionStatus::Pending);
        assert!(!waitlist.iter().any(|w| w.address == member.address));
    }

    // 4. Every entrant heard back exactly once: 2 won, 3 lost
    let mut won = 0;
    let mut lost = 0;
    for name in names {
        let addr = mock_api.addr_make(name);
        let feed = notifications_for(&notif_deps, &addr);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].kind, NotificationKind::Waitlisted);
        match feed[1].kind {
            NotificationKind::LotteryWon => won += 1,
            NotificationKind::LotteryLost => lost += 1,
            NotificationKind::Waitlisted => panic!("duplicate waitlisted notification"),
        }
    }
    assert_eq!(won, 2);
    assert_eq!(lost, 3);
    assert_eq!(total_pushed(&notif_deps), 10);

    // 5. A winner accepts and ends up enrolled
    let winner = selected[0].address.clone();
    let info = message_info(&winner, &[]);
    event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::AcceptSelection { event_id },
    )
    .unwrap();

    let status: EntrantStatusResponse = from_json(
        event_lottery_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            HubQueryMsg::EntrantStatus {
                event_id,
                entrant: winner.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(status.phase, Some(EntrantPhase::Enrolled));
}

#[test]
fn test_replacement_flow() {
    let mut hub_deps = mock_dependencies();
    let mut notif_deps = mock_dependencies();
    let mock_api = MockApi::default();
    let hub_contract = mock_api.addr_make("event_hub_contract");

    setup_notification_hub(&mut notif_deps, vec![hub_contract.to_string()]);
    setup_event_hub(&mut hub_deps);

    let event_id = create_event(&mut hub_deps, None);

    for name in ["alice", "bob", "carol"] {
        let res = join(&mut hub_deps, event_id, name);
        relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();
    }

    let organizer = mock_api.addr_make("organizer");
    let info = message_info(&organizer, &[]);
    let res = event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::DrawLottery { event_id, count: 2 },
    )
    .unwrap();
    relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();

    // Both winners decline, opening two replacement slots
    let winners: Vec<Addr> = query_selected(&hub_deps, event_id)
        .iter()
        .map(|m| m.address.clone())
        .collect();
    for winner in &winners {
        let info = message_info(winner, &[]);
        event_lottery_hub::contract::execute(
            hub_deps.as_mut(),
            mock_env(),
            info,
            HubExecuteMsg::DeclineSelection { event_id },
        )
        .unwrap();
    }

    let slots: ReplacementSlotsResponse = from_json(
        event_lottery_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            HubQueryMsg::ReplacementSlots { event_id },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(slots.available, 2);

    // Two more entrants join the pool
    for name in ["dave", "erin"] {
        let res = join(&mut hub_deps, event_id, name);
        relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();
    }
    assert_eq!(query_waitlist(&hub_deps, event_id).len(), 3);

    // Replacement draw backfills both slots
    let info = message_info(&organizer, &[]);
    let res = event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::DrawReplacements { event_id, count: 2 },
    )
    .unwrap();
    relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();

    assert_eq!(query_selected(&hub_deps, event_id).len(), 2);
    assert_eq!(query_waitlist(&hub_deps, event_id).len(), 1);

    // Both cancelled slots flipped to filled exactly once
    let cancelled: CancelledResponse = from_json(
        event_lottery_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            HubQueryMsg::Cancelled {
                event_id,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(cancelled.entrants.len(), 2);
    assert!(cancelled.entrants.iter().all(|s| s.replacement_filled));

    let slots: ReplacementSlotsResponse = from_json(
        event_lottery_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            HubQueryMsg::ReplacementSlots { event_id },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(slots.available, 0);

    // Only winners were notified by the backfill: the loser population of
    // the original draw is not recomputed. Totals: 5 waitlisted, 4 won,
    // 1 lost across the whole history.
    let mut lost = 0;
    let mut won = 0;
    for name in ["alice", "bob", "carol", "dave", "erin"] {
        let addr = mock_api.addr_make(name);
        for notification in notifications_for(&notif_deps, &addr) {
            match notification.kind {
                NotificationKind::LotteryWon => won += 1,
                NotificationKind::LotteryLost => lost += 1,
                NotificationKind::Waitlisted => {}
            }
        }
    }
    assert_eq!(won, 4);
    assert_eq!(lost, 1);
    assert_eq!(total_pushed(&notif_deps), 10);

    // A filled slot is never re-consumed
    let info = message_info(&organizer, &[]);
    let err = event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::DrawReplacements { event_id, count: 1 },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("NoReplacementSlots"),
        "Expected NoReplacementSlots, got: {:?}",
        err
    );
}

#[test]
fn test_failed_validation_leaves_stores_untouched() {
    let mut hub_deps = mock_dependencies();
    let mut notif_deps = mock_dependencies();
    let mock_api = MockApi::default();
    let hub_contract = mock_api.addr_make("event_hub_contract");

    setup_notification_hub(&mut notif_deps, vec![hub_contract.to_string()]);
    setup_event_hub(&mut hub_deps);

    let event_id = create_event(&mut hub_deps, None);
    for name in ["alice", "bob", "carol"] {
        let res = join(&mut hub_deps, event_id, name);
        relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap();
    }

    // Asking for more winners than entrants is rejected up front
    let organizer = mock_api.addr_make("organizer");
    let info = message_info(&organizer, &[]);
    let err = event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::DrawLottery { event_id, count: 5 },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("DrawExceedsWaitlist"),
        "Expected DrawExceedsWaitlist, got: {:?}",
        err
    );

    // No membership moved, no outcome notification written
    assert_eq!(query_waitlist(&hub_deps, event_id).len(), 3);
    assert!(query_selected(&hub_deps, event_id).is_empty());
    assert_eq!(total_pushed(&notif_deps), 3);
}

#[test]
fn test_notification_failure_does_not_roll_back_draw() {
    let mut hub_deps = mock_dependencies();
    let mut notif_deps = mock_dependencies();
    let mock_api = MockApi::default();
    let hub_contract = mock_api.addr_make("event_hub_contract");

    // The hub was never registered as a publisher, so every push is refused
    setup_notification_hub(&mut notif_deps, vec![]);
    setup_event_hub(&mut hub_deps);

    let event_id = create_event(&mut hub_deps, None);
    let res = join(&mut hub_deps, event_id, "alice");
    let err = relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap_err();
    assert!(format!("{:?}", err).contains("Unauthorized"));

    let organizer = mock_api.addr_make("organizer");
    let info = message_info(&organizer, &[]);
    let res = event_lottery_hub::contract::execute(
        hub_deps.as_mut(),
        mock_env(),
        info,
        HubExecuteMsg::DrawLottery { event_id, count: 1 },
    )
    .unwrap();
    let err = relay_notifications(&res, &mut notif_deps, &hub_contract).unwrap_err();

    // Feed the delivery failure back into the hub's reply handler, the way
    // the chain would; it must swallow the error
    let reply_msg = Reply {
        id: event_lottery_hub::execute::NOTIFY_REPLY_ID,
        payload: Binary::default(),
        gas_used: 0,
        result: SubMsgResult::Err(err.to_string()),
    };
    event_lottery_hub::contract::reply(hub_deps.as_mut(), mock_env(), reply_msg).unwrap();

    // The draw stayed committed; the notification store stayed empty
    assert_eq!(query_selected(&hub_deps, event_id).len(), 1);
    assert!(query_waitlist(&hub_deps, event_id).is_empty());
    assert_eq!(total_pushed(&notif_deps), 0);
}
