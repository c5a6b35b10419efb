//! End-to-end runs of the edge handler over JSON events.

use host_forwarder::edge::{handle_event_json, EventError};
use host_forwarder::{EmptyHostPolicy, HeaderForwarder};
use serde_json::{json, Value};

mod common;

fn run(forwarder: HeaderForwarder, headers: Value) -> Value {
    let output = handle_event_json(&forwarder, &common::viewer_request(headers)).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn host_is_copied() {
    let request = run(
        HeaderForwarder::default(),
        json!({"host": {"value": "example.com"}}),
    );

    assert_eq!(
        request["headers"],
        json!({
            "host": {"value": "example.com"},
            "x-forwarded-host": {"value": "example.com"}
        })
    );
    assert_eq!(request["method"], "GET");
    assert_eq!(request["uri"], "/index.html");
}

#[test]
fn no_host_returns_request_unchanged() {
    let request = run(HeaderForwarder::default(), json!({}));
    assert_eq!(request["headers"], json!({}));

    let request = run(
        HeaderForwarder::default(),
        json!({"accept": {"value": "text/html"}}),
    );
    assert_eq!(request["headers"], json!({"accept": {"value": "text/html"}}));
}

#[test]
fn null_host_returns_request_unchanged() {
    let headers = json!({
        "host": null,
        "x-forwarded-host": {"value": "upstream.com"}
    });
    let request = run(HeaderForwarder::default(), headers.clone());
    assert_eq!(request["headers"], headers);
}

#[test]
fn stale_forwarded_host_is_replaced() {
    let request = run(
        HeaderForwarder::default(),
        json!({
            "host": {"value": "a.com"},
            "x-forwarded-host": {"value": "stale.com"}
        }),
    );
    assert_eq!(request["headers"]["x-forwarded-host"], json!({"value": "a.com"}));
}

#[test]
fn applying_twice_matches_once() {
    let forwarder = HeaderForwarder::default();
    let once = run(forwarder, json!({"host": {"value": "example.com"}}));

    let again = handle_event_json(&forwarder, &json!({"request": once}).to_string()).unwrap();
    let twice: Value = serde_json::from_str(&again).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn empty_host_follows_policy() {
    let headers = json!({"host": {"value": ""}});

    let default = run(HeaderForwarder::default(), headers.clone());
    assert_eq!(default["headers"]["x-forwarded-host"], json!({"value": ""}));

    let skipped = run(HeaderForwarder::new(EmptyHostPolicy::Skip), headers.clone());
    assert_eq!(skipped["headers"], headers);

    let forwarded = run(HeaderForwarder::new(EmptyHostPolicy::Forward), headers);
    assert_eq!(forwarded["headers"]["x-forwarded-host"], json!({"value": ""}));
}

#[test]
fn request_without_header_map() {
    let output = handle_event_json(
        &HeaderForwarder::default(),
        r#"{"request": {"method": "GET", "uri": "/"}}"#,
    )
    .unwrap();
    let request: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(request, json!({"method": "GET", "uri": "/"}));
}

#[test]
fn malformed_event_is_an_error() {
    let err = handle_event_json(&HeaderForwarder::default(), "not json").unwrap_err();
    assert!(matches!(err, EventError::Decode(_)));
}
