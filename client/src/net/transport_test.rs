use super::*;

use serde_json::json;

#[test]
fn full_url_without_query_is_unchanged() {
    assert_eq!(HttpRequest::get("/machine/".to_owned()).full_url(), "/machine/");
}

#[test]
fn full_url_encodes_query_pairs() {
    let req = HttpRequest::get("/machine/token".to_owned()).with_query(vec![
        ("machineid".to_owned(), "db 1".to_owned()),
        ("resolver".to_owned(), "a&b".to_owned()),
    ]);
    assert_eq!(req.full_url(), "/machine/token?machineid=db+1&resolver=a%26b");
}

#[test]
fn post_carries_body_and_delete_does_not() {
    let post = HttpRequest::post("/recover".to_owned(), json!({"user": "alice"}));
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.body, Some(json!({"user": "alice"})));

    let delete = HttpRequest::delete("/edumfaserver/srv1".to_owned());
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(delete.body, None);
}

#[test]
fn success_is_any_2xx() {
    for (status, ok) in [(200, true), (204, true), (299, true), (301, false), (401, false), (500, false)] {
        assert_eq!(HttpResponse { status, body: Value::Null }.is_success(), ok, "{status}");
    }
}

#[test]
fn parse_body_handles_empty_json_and_text() {
    assert_eq!(parse_body(""), Value::Null);
    assert_eq!(parse_body("  \n"), Value::Null);
    assert_eq!(parse_body(r#"{"result": {"status": true}}"#), json!({"result": {"status": true}}));
    assert_eq!(parse_body("<html>Bad Gateway</html>"), json!("<html>Bad Gateway</html>"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_transport_is_unavailable_natively() {
    let result = futures::executor::block_on(BrowserTransport.send(HttpRequest::get("/client/".to_owned())));
    assert!(matches!(result, Err(ApiError::Transport(_))));
}
