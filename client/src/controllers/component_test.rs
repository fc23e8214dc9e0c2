use super::*;

use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use serde_json::json;

use crate::controllers::test_support::Fixture;
use crate::net::transport::Method;

fn controller(fx: &Fixture) -> ComponentController {
    ComponentController::new(fx.services.clone(), Store::default())
}

#[test]
fn client_type_view_lists_on_mount() {
    let fx = Fixture::new();
    fx.transport.ok(
        Method::Get,
        "/client/",
        json!({"PAM": [{"hostname": "web01", "ip": "10.0.0.3", "lastseen": "2024-05-01 10:00"}], "RADIUS": []}),
    );
    let ctrl = controller(&fx);

    block_on(ctrl.mount(CLIENT_TYPE_PATH));

    let state = ctrl.store().get();
    assert_eq!(state.client_types.len(), 2);
    assert_eq!(state.client_types["PAM"][0].hostname.as_deref(), Some("web01"));
    assert!(!state.loading);
}

#[test]
fn parent_view_does_not_list() {
    let fx = Fixture::new();
    let ctrl = controller(&fx);

    block_on(ctrl.mount("/component"));

    assert!(fx.transport.requests().is_empty());
}

#[test]
fn each_reload_lists_once() {
    let fx = Fixture::new();
    fx.transport.ok(Method::Get, "/client/", json!({}));
    let ctrl = controller(&fx);
    let mut pool = LocalPool::new();
    pool.spawner()
        .spawn_local(ctrl.bind_reload(&fx.services.bus))
        .expect("spawn");

    for expected in 1..=3 {
        fx.services.bus.reload();
        pool.run_until_stalled();
        assert_eq!(fx.transport.count(Method::Get, "/client/"), expected);
    }
}
