use super::*;

use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use serde_json::json;

use crate::controllers::test_support::Fixture;
use crate::net::transport::Method;
use crate::state::notify::NotificationKind;

const TOKENS: &str = "/machine/token";

fn token(id: i64, serial: &str) -> Value {
    json!({
        "id": id,
        "serial": serial,
        "application": "ssh",
        "machine_id": "7",
        "resolver": "hosts",
        "hostname": "db",
        "type": "sshkey",
        "options": {"user": "root"}
    })
}

fn controller(fx: &Fixture) -> MachineController {
    MachineController::new(fx.services.clone(), Store::default())
}

fn details(fx: &Fixture, tokens: Value) -> MachineController {
    fx.transport.ok(Method::Get, TOKENS, tokens);
    fx.transport
        .ok(Method::Get, "/application/", json!({"ssh": {"options": {"user": {"type": "str"}}}, "offline": {}}));
    let ctrl = controller(fx);
    block_on(ctrl.show_details("7", "hosts"));
    ctrl
}

#[test]
fn list_machines_filters_by_resolver() {
    let fx = Fixture::new();
    fx.transport
        .ok(Method::Get, "/machine/", json!([{"id": "7", "hostname": "db", "ip": "10.0.0.7", "resolver_name": "hosts"}]));
    let ctrl = controller(&fx);

    block_on(ctrl.list_machines(Some("hosts".to_owned())));

    let state = ctrl.store().get();
    assert_eq!(state.machines.len(), 1);
    assert_eq!(state.machines[0].hostname, "db");
    assert_eq!(state.resolver.as_deref(), Some("hosts"));
    let req = fx.transport.last(Method::Get, "/machine/").expect("request");
    assert_eq!(req.query, vec![("resolver".to_owned(), "hosts".to_owned())]);
}

#[test]
fn empty_resolver_lists_everything() {
    let fx = Fixture::new();
    fx.transport.ok(Method::Get, "/machine/", json!([]));
    let ctrl = controller(&fx);

    block_on(ctrl.list_machines(Some(String::new())));

    assert!(fx.transport.last(Method::Get, "/machine/").expect("request").query.is_empty());
    assert_eq!(ctrl.store().get().resolver, None);
}

#[test]
fn details_load_tokens_and_applications() {
    let fx = Fixture::new();
    let ctrl = details(&fx, json!([token(1, "S1"), token(2, "S2")]));

    let state = ctrl.store().get();
    assert_eq!(state.selected, Some(("7".to_owned(), "hosts".to_owned())));
    assert_eq!(state.tokens.len(), 2);
    assert_eq!(state.tokens[0].token_type.as_deref(), Some("sshkey"));
    assert_eq!(state.application_names(), vec!["offline", "ssh"]);
    let req = fx.transport.last(Method::Get, TOKENS).expect("request");
    assert_eq!(
        req.query,
        vec![("machineid".to_owned(), "7".to_owned()), ("resolver".to_owned(), "hosts".to_owned())]
    );
}

#[test]
fn paged_token_answer_is_accepted() {
    let fx = Fixture::new();
    let ctrl = details(&fx, json!({"tokens": [token(3, "S3")], "count": 1}));
    assert_eq!(ctrl.store().get().tokens[0].serial, "S3");
}

#[test]
fn attach_fills_machine_and_relists_once() {
    let fx = Fixture::new();
    let ctrl = details(&fx, json!([]));
    fx.transport.ok(Method::Post, TOKENS, json!(5));
    let before = fx.transport.count(Method::Get, TOKENS);

    block_on(ctrl.attach(AttachTokenParams {
        serial: "S9".to_owned(),
        application: "ssh".to_owned(),
        ..AttachTokenParams::default()
    }));

    assert_eq!(fx.transport.count(Method::Get, TOKENS), before + 1);
    let body = fx.transport.last(Method::Post, TOKENS).and_then(|r| r.body).expect("body");
    assert_eq!(body["machineid"], "7");
    assert_eq!(body["resolver"], "hosts");
    assert_eq!(fx.notes(NotificationKind::Info), vec![MSG_ATTACHED]);
}

#[test]
fn detach_uses_composite_key_and_shows_server_list() {
    let fx = Fixture::new();
    fx.transport
        .ok(Method::Get, TOKENS, json!([token(1, "S1"), token(2, "S2")]))
        .ok(Method::Get, TOKENS, json!([token(2, "S2"), token(4, "S4")]));
    fx.transport.ok(Method::Get, "/application/", json!({}));
    fx.transport.ok(Method::Delete, "/machine/token/S1/ssh/1", json!(1));
    let ctrl = controller(&fx);
    block_on(ctrl.show_details("7", "hosts"));

    let key = ctrl.store().get().tokens[0].key();
    block_on(ctrl.detach(&key));

    assert_eq!(fx.transport.count(Method::Delete, "/machine/token/S1/ssh/1"), 1);
    assert_eq!(fx.transport.count(Method::Get, TOKENS), 2);
    let serials: Vec<String> = ctrl.store().get().tokens.into_iter().map(|t| t.serial).collect();
    assert_eq!(serials, vec!["S2", "S4"]);
}

#[test]
fn failed_detach_does_not_relist() {
    let fx = Fixture::new();
    let ctrl = details(&fx, json!([token(1, "S1")]));
    fx.transport.reply(Method::Delete, "/machine/token/S1/ssh/1", 404, json!({}));

    block_on(ctrl.detach(&MachineTokenKey {
        serial: "S1".to_owned(),
        application: "ssh".to_owned(),
        mtid: 1,
    }));

    assert_eq!(fx.transport.count(Method::Get, TOKENS), 1);
    assert_eq!(fx.auth.errors().len(), 1);
}

#[test]
fn save_options_posts_and_relists_once() {
    let fx = Fixture::new();
    let ctrl = details(&fx, json!([token(1, "S1")]));
    fx.transport.ok(Method::Post, "/machine/tokenoption", json!(1));
    let mut params = TokenOptionParams {
        serial: "S1".to_owned(),
        application: "ssh".to_owned(),
        mtid: Some(1),
        ..TokenOptionParams::default()
    };
    params.options.insert("user".to_owned(), "admin".to_owned());

    block_on(ctrl.save_options(params));

    let body = fx
        .transport
        .last(Method::Post, "/machine/tokenoption")
        .and_then(|r| r.body)
        .expect("body");
    assert_eq!(body["user"], "admin");
    assert_eq!(body["mtid"], 1);
    assert_eq!(fx.transport.count(Method::Get, TOKENS), 2);
    assert_eq!(fx.notes(NotificationKind::Info), vec![MSG_OPTIONS_SAVED]);
}

#[test]
fn reload_refreshes_the_mounted_view() {
    let fx = Fixture::new();
    let ctrl = details(&fx, json!([]));
    let mut pool = LocalPool::new();
    pool.spawner()
        .spawn_local(ctrl.bind_reload(&fx.services.bus))
        .expect("spawn");
    pool.run_until_stalled();

    fx.services.bus.reload();
    pool.run_until_stalled();

    assert_eq!(fx.transport.count(Method::Get, TOKENS), 2);
    assert_eq!(fx.transport.count(Method::Get, "/machine/"), 0);
}

#[test]
fn reload_on_list_view_relists_machines_with_same_filter() {
    let fx = Fixture::new();
    fx.transport.ok(Method::Get, "/machine/", json!([]));
    let ctrl = controller(&fx);
    block_on(ctrl.list_machines(Some("hosts".to_owned())));

    block_on(ctrl.refresh());

    assert_eq!(fx.transport.count(Method::Get, "/machine/"), 2);
    let req = fx.transport.last(Method::Get, "/machine/").expect("request");
    assert_eq!(req.query, vec![("resolver".to_owned(), "hosts".to_owned())]);
}
