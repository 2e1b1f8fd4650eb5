//! Action authorization and invocation integration tests

use std::sync::Arc;
use std::time::Duration;

use iot_actions::{
    Action, ActionCatalog, ArgumentList, Caller, Error, NodeId, SecurityLevel, Session,
    SessionKind, SessionRegistry, spawn_invoke,
};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::{args, join_args, remote_caller, test_action};

#[test]
fn arity_error_iff_length_differs() {
    for arity in 0..4_u8 {
        let action = test_action("dim", SecurityLevel::NONE, arity);
        for len in 0..6_usize {
            let items: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let result = action.invoke(&remote_caller(SecurityLevel::NONE), &ArgumentList::from(items));

            let is_arity_error = matches!(result, Err(Error::ArgumentCount { .. }));
            assert_eq!(is_arity_error, len != usize::from(arity), "arity {arity}, len {len}");
        }
    }
}

#[test]
fn two_argument_action_with_one_argument() {
    let action = test_action("dim", SecurityLevel::NONE, 2);

    let err = action
        .invoke(&remote_caller(SecurityLevel::NONE), &args(&["50"]))
        .unwrap_err();
    assert!(matches!(err, Error::ArgumentCount { expected: 2, got: 1 }));
    assert!(err.is_request_error());
}

#[test]
fn key_pair_action_clearance() {
    let action = test_action("unlock", SecurityLevel::KEY_PAIR, 0);

    assert!(!action.is_caller_authorized(SecurityLevel::ONE_TIME_CODE));
    assert!(action.is_caller_authorized(SecurityLevel::KEY_PAIR));
    assert!(action.is_caller_authorized(SecurityLevel::LOCAL_ONLY));

    assert!(matches!(
        action.invoke_without_args(&remote_caller(SecurityLevel::ONE_TIME_CODE)),
        Err(Error::AuthorizationDenied(_))
    ));
    assert!(
        action
            .invoke_without_args(&remote_caller(SecurityLevel::KEY_PAIR))
            .is_ok()
    );
}

#[test]
fn clearance_is_monotonic() {
    for required in [0_u8, 1, 2, 5, 10] {
        let action = test_action("x", SecurityLevel::new(required), 0);
        for held in 0..=20_u8 {
            assert_eq!(
                action.is_caller_authorized(SecurityLevel::new(held)),
                held >= required,
                "required {required}, held {held}"
            );
        }
    }
}

#[test]
fn default_allow_with_empty_lists() {
    let action = test_action("status", SecurityLevel::NONE, 0);
    assert!(action.is_node_authorized(&NodeId::from("any-node")));
}

#[test]
fn node_policy_truth_table() {
    let node = NodeId::from("lamp");

    for allow_by_default in [true, false] {
        for whitelisted in [true, false] {
            for blacklisted in [true, false] {
                let action = Action::builder("x", Uuid::new_v4(), join_args)
                    .allow_by_default(allow_by_default)
                    .build();
                if whitelisted {
                    action.allow_node(node.clone());
                }
                if blacklisted {
                    action.deny_node(node.clone());
                }

                let expected = !blacklisted && (whitelisted || allow_by_default);
                assert_eq!(
                    action.is_node_authorized(&node),
                    expected,
                    "default {allow_by_default}, white {whitelisted}, black {blacklisted}"
                );
            }
        }
    }
}

#[test]
fn node_in_both_lists_is_denied() {
    let action = Action::builder("x", Uuid::new_v4(), join_args)
        .whitelist([NodeId::from("hub")])
        .blacklist([NodeId::from("hub")])
        .build();

    assert!(!action.is_node_authorized(&NodeId::from("hub")));
}

#[test]
fn invoke_enforces_node_and_locality() {
    let action = Action::builder("reboot", Uuid::new_v4(), join_args)
        .allow_by_default(false)
        .whitelist([NodeId::from("panel")])
        .local(true)
        .build();

    // Unknown node
    assert!(matches!(
        action.invoke_without_args(&Caller::local("hub", SecurityLevel::NONE)),
        Err(Error::AuthorizationDenied(_))
    ));
    // Listed node but remote
    assert!(matches!(
        action.invoke_without_args(&Caller::remote("panel", SecurityLevel::NONE)),
        Err(Error::AuthorizationDenied(_))
    ));
    assert!(
        action
            .invoke_without_args(&Caller::local("panel", SecurityLevel::NONE))
            .is_ok()
    );
}

#[test]
fn json_payload_to_invocation() {
    let action = test_action("scene", SecurityLevel::NONE, 2);
    let payload = json!(["living_room", "evening"]);

    let decoded = ArgumentList::from_json(&payload).unwrap();
    let out = action
        .invoke(&remote_caller(SecurityLevel::NONE), &decoded)
        .unwrap();
    assert_eq!(out, "living_room,evening");
}

#[test]
fn session_scenario() {
    let session = Session::with_kind(42, SessionKind::Info);
    assert_eq!(session.id(), 42);
    assert_eq!(session.kind(), SessionKind::Info);
    assert!(session.last_active_at().is_none());
}

#[test]
fn catalog_lookup_and_invoke_within_session() {
    let mut catalog = ActionCatalog::new();
    let action = catalog
        .register(test_action("dim", SecurityLevel::ONE_TIME_CODE, 1))
        .unwrap();

    let mut sessions = SessionRegistry::new();
    let session = sessions.open(7, SessionKind::Action).unwrap();

    let out = catalog
        .invoke(&action.id(), &remote_caller(SecurityLevel::KEY_PAIR), &args(&["40"]))
        .unwrap();
    assert_eq!(out, "40");

    let now = session.started_at() + chrono::Duration::seconds(1);
    sessions.touch(7, now).unwrap();
    let touched = sessions.get(7).unwrap();
    assert_eq!(touched.last_active_at(), Some(now));
    assert_eq!(touched.started_at(), session.started_at());
}

#[test]
fn admin_changes_between_invocations() {
    let action = test_action("status", SecurityLevel::NONE, 0);
    let caller = remote_caller(SecurityLevel::NONE);

    assert!(action.invoke_without_args(&caller).is_ok());

    action.deny_node("hub");
    assert!(action.invoke_without_args(&caller).is_err());

    action.remove_from_blacklist(&NodeId::from("hub"));
    assert!(action.invoke_without_args(&caller).is_ok());
}

#[tokio::test]
async fn concurrent_invocations_share_one_action() {
    let action = Arc::new(test_action("echo", SecurityLevel::NONE, 1));

    let mut calls = tokio::task::JoinSet::new();
    for i in 0..16 {
        let action = Arc::clone(&action);
        calls.spawn(async move {
            let arg = i.to_string();
            let out = spawn_invoke(
                action,
                remote_caller(SecurityLevel::NONE),
                args(&[arg.as_str()]),
                Some(Duration::from_secs(5)),
            )
            .await
            .unwrap();
            assert_eq!(out, arg);
        });
    }

    while let Some(joined) = calls.join_next().await {
        joined.unwrap();
    }
}
