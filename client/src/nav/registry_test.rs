use super::*;

fn registry() -> StateRegistry {
    StateRegistry::new("", &VersionSuffix::new("2.0", 5))
}

fn matched(resolution: Resolution) -> StateMatch {
    match resolution {
        Resolution::Matched(m) => m,
        Resolution::Redirect { from, to, .. } => panic!("expected match, got redirect {from} -> {to}"),
    }
}

// =============================================================
// Table
// =============================================================

#[test]
fn built_in_table_is_consistent() {
    registry().validate().expect("state table");
}

#[test]
fn child_urls_include_parent_prefix() {
    let reg = registry();
    assert_eq!(reg.state("component.clienttype").expect("state").url, "/component/clienttype");
    assert_eq!(reg.state("machine.list").expect("state").url, "/machine/list?resolver");
    assert_eq!(
        reg.state("machine.details").expect("state").url,
        "/machine/details/{machineid}/{machineresolver}"
    );
    assert_eq!(reg.state("config.edumfaserver.list").expect("state").url, "/config/edumfaserver/list");
    assert_eq!(reg.state("reset").expect("state").url, "/reset/{user}/{recoverycode}");
}

#[test]
fn template_urls_are_cache_busted_under_instance() {
    let reg = StateRegistry::new("/edumfa", &VersionSuffix::new("2.0", 5));
    assert_eq!(
        reg.template_url("machine.list"),
        Some("/edumfa/static/components/machine/views/machine.list.html?v=2.0")
    );
    assert_eq!(
        reg.template_url("component"),
        Some("/edumfa/static/components/components/views/component.html?v=2.0")
    );
    assert_eq!(reg.template_url("nope"), None);
}

#[test]
fn every_template_carries_the_same_suffix() {
    let suffix = VersionSuffix::new("", 5);
    let reg = StateRegistry::new("", &suffix);
    for state in reg.states() {
        assert!(state.template_url.ends_with(suffix.as_str()), "{}", state.name);
    }
}

#[test]
fn validate_rejects_orphan_states() {
    let defs = [StateDef { name: "a.b", url: "/b", area: "a", view: "b", controller: None }];
    let reg = StateRegistry::from_defs("", &VersionSuffix::new("1", 5), &defs, &[]);
    assert_eq!(
        reg.validate(),
        Err(NavError::MissingParent { state: "a.b".to_owned(), parent: "a".to_owned() })
    );
}

#[test]
fn validate_rejects_default_child_with_params() {
    let defs = [
        StateDef { name: "a", url: "/a", area: "a", view: "a", controller: None },
        StateDef { name: "a.item", url: "/{id}", area: "a", view: "a.item", controller: None },
    ];
    let reg = StateRegistry::from_defs("", &VersionSuffix::new("1", 5), &defs, &[("a", "a.item")]);
    assert!(matches!(reg.validate(), Err(NavError::InvalidDefault { .. })));
}

// =============================================================
// Default-child redirects
// =============================================================

#[test]
fn parent_paths_redirect_to_their_default_child() {
    let reg = registry();
    for (path, target, url) in [
        ("/component", "component.clienttype", "/component/clienttype"),
        ("/machine", "machine.list", "/machine/list"),
        ("/config/edumfaserver", "config.edumfaserver.list", "/config/edumfaserver/list"),
        ("/config", "config.edumfaserver.list", "/config/edumfaserver/list"),
        ("/component/", "component.clienttype", "/component/clienttype"),
    ] {
        match reg.resolve(path).expect("resolve") {
            Resolution::Redirect { to, url: href, .. } => {
                assert_eq!(to, target, "{path}");
                assert_eq!(href, url, "{path}");
                assert_ne!(href.trim_end_matches('/'), path.trim_end_matches('/'));
            }
            Resolution::Matched(m) => panic!("{path} stayed on {}", m.state),
        }
    }
}

#[test]
fn redirect_reports_originating_state() {
    let reg = registry();
    let resolution = reg.resolve("/config").expect("resolve");
    assert!(matches!(resolution, Resolution::Redirect { ref from, .. } if from == "config"));
}

#[test]
fn default_children_resolve_without_redirect() {
    let reg = registry();
    let m = matched(reg.resolve("/component/clienttype").expect("resolve"));
    assert_eq!(m.state, "component.clienttype");
    assert_eq!(m.controller, Some(ControllerKind::Component));
}

#[test]
fn recovery_has_no_default_child() {
    let reg = registry();
    assert_eq!(reg.default_child("recovery"), None);
    assert_eq!(matched(reg.resolve("/recovery").expect("resolve")).state, "recovery");
}

// =============================================================
// Parameters
// =============================================================

#[test]
fn details_path_params_are_extracted_and_decoded() {
    let reg = registry();
    let m = matched(reg.resolve("/machine/details/host%201/hosts").expect("resolve"));
    assert_eq!(m.state, "machine.details");
    assert_eq!(m.param("machineid"), Some("host 1"));
    assert_eq!(m.param("machineresolver"), Some("hosts"));
}

#[test]
fn declared_query_params_are_extracted() {
    let reg = registry();
    let m = matched(reg.resolve("/machine/list?resolver=ldap+hosts&ignored=1").expect("resolve"));
    assert_eq!(m.state, "machine.list");
    assert_eq!(m.param("resolver"), Some("ldap hosts"));
    assert_eq!(m.param("ignored"), None);
}

#[test]
fn reset_link_carries_user_and_code() {
    let reg = registry();
    let m = matched(reg.resolve("/reset/alice/ABC123").expect("resolve"));
    assert_eq!(m.state, "reset");
    assert_eq!(m.controller, Some(ControllerKind::Recovery));
    assert_eq!(m.param("user"), Some("alice"));
    assert_eq!(m.param("recoverycode"), Some("ABC123"));
}

#[test]
fn edit_and_new_routes_resolve() {
    let reg = registry();
    let m = matched(reg.resolve("/config/edumfaserver/edit/srv1").expect("resolve"));
    assert_eq!(m.state, "config.edumfaserver.edit");
    assert_eq!(m.param("identifier"), Some("srv1"));
    let m = matched(reg.resolve("/config/edumfaserver/new").expect("resolve"));
    assert_eq!(m.state, "config.edumfaserver.new");
}

#[test]
fn most_specific_state_wins() {
    let defs = [
        StateDef { name: "a", url: "/a", area: "a", view: "a", controller: None },
        StateDef { name: "a.item", url: "/{id}", area: "a", view: "a.item", controller: None },
        StateDef { name: "a.new", url: "/new", area: "a", view: "a.new", controller: None },
    ];
    let reg = StateRegistry::from_defs("", &VersionSuffix::new("1", 5), &defs, &[]);
    assert_eq!(matched(reg.resolve("/a/new").expect("resolve")).state, "a.new");
    assert_eq!(matched(reg.resolve("/a/other").expect("resolve")).state, "a.item");
}

#[test]
fn unknown_paths_do_not_match() {
    let reg = registry();
    assert_eq!(reg.resolve("/nowhere"), Err(NavError::NoMatch("/nowhere".to_owned())));
    assert!(reg.resolve("/machine/details/only-one").is_err());
}

// =============================================================
// href
// =============================================================

#[test]
fn href_encodes_path_params() {
    let reg = registry();
    assert_eq!(
        reg.href("machine.details", &[("machineid", "a/b"), ("machineresolver", "r 1")]).expect("href"),
        "/machine/details/a%2Fb/r%201"
    );
    assert_eq!(
        reg.href("config.edumfaserver.edit", &[("identifier", "srv1")]).expect("href"),
        "/config/edumfaserver/edit/srv1"
    );
}

#[test]
fn href_appends_declared_query_params_only_when_given() {
    let reg = registry();
    assert_eq!(reg.href("machine.list", &[]).expect("href"), "/machine/list");
    assert_eq!(reg.href("machine.list", &[("resolver", "ldap hosts")]).expect("href"), "/machine/list?resolver=ldap+hosts");
}

#[test]
fn href_reports_missing_params_and_unknown_states() {
    let reg = registry();
    assert_eq!(
        reg.href("reset", &[("user", "bob")]),
        Err(NavError::MissingParam { state: "reset".to_owned(), param: "recoverycode".to_owned() })
    );
    assert_eq!(reg.href("nope", &[]), Err(NavError::UnknownState("nope".to_owned())));
}

#[test]
fn href_and_resolve_agree() {
    let reg = registry();
    let url = reg
        .href("machine.details", &[("machineid", "db server"), ("machineresolver", "hosts")])
        .expect("href");
    let m = matched(reg.resolve(&url).expect("resolve"));
    assert_eq!(m.param("machineid"), Some("db server"));
}
