use super::*;

use crate::version::VersionSuffix;

fn registry() -> StateRegistry {
    StateRegistry::new("", &VersionSuffix::new("3.10", 5))
}

#[test]
fn parent_states_continue_to_their_default_child() {
    let registry = registry();
    assert_eq!(redirect_target(&registry, "/machine").as_deref(), Some("/machine/list"));
    assert_eq!(redirect_target(&registry, "/component").as_deref(), Some("/component/clienttype"));
}

#[test]
fn redirect_chains_end_at_a_leaf() {
    let registry = registry();
    assert_eq!(redirect_target(&registry, "/config").as_deref(), Some("/config/edumfaserver/list"));
    assert_eq!(
        redirect_target(&registry, "/config/edumfaserver/").as_deref(),
        Some("/config/edumfaserver/list")
    );
}

#[test]
fn leaf_states_and_unknown_paths_do_not_redirect() {
    let registry = registry();
    assert_eq!(redirect_target(&registry, "/machine/list"), None);
    assert_eq!(redirect_target(&registry, "/nowhere"), None);
}
