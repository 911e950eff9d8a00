//! End-to-end tests: capture file in, report text out

use beacon_summary::domain::{DetectionError, SourceFormat};
use beacon_summary::infra::Config;
use beacon_summary::services::Pipeline;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

const HOST: &str = "hilton.data.adobedc.net";

fn capture_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn page_view(page: &str) -> Value {
    json!({
        "xdm": {"eventType": "analytics.track"},
        "data": {"__adobe": {"analytics": {"pageName": page}}}
    })
}

fn bridge(timestamp: i64, payload: Value) -> Value {
    json!({
        "timestamp": timestamp,
        "payload": {"ACPExtensionEventName": "Edge Bridge Request", "ACPExtensionEventData": payload}
    })
}

fn charles_call(host: &str, body_text: &str) -> Value {
    json!({"host": host, "method": "POST", "request": {"body": {"text": body_text}}})
}

#[test]
fn test_assurance_events_sorted_by_timestamp() {
    let capture = json!({"events": [
        bridge(30, page_view("Thirty")),
        {"timestamp": 15, "payload": {"ACPExtensionEventName": "Lifecycle Start"}},
        bridge(10, page_view("Ten")),
        bridge(20, page_view("Twenty"))
    ]});
    let file = capture_file(&capture);

    let report = Pipeline::new(Config::default()).summarize_file(file.path()).unwrap();

    assert_eq!(report.format(), SourceFormat::Assurance);
    assert_eq!(
        report.lines(),
        [
            "Page: Ten; previous page unknown",
            "Page: Twenty; previous page unknown",
            "Page: Thirty; previous page unknown"
        ]
    );
}

#[test]
fn test_charles_skips_malformed_and_foreign_calls() {
    let body = json!({"events": [
        {"xdm": {"eventType": "application.close"}},
        page_view("Home")
    ]})
    .to_string();
    let capture = json!([
        charles_call(HOST, &body),
        charles_call(HOST, "{\"events\": [truncated"),
        charles_call("api.example.com", &body)
    ]);
    let file = capture_file(&capture);

    let report = Pipeline::new(Config::default()).summarize_file(file.path()).unwrap();

    assert_eq!(report.format(), SourceFormat::Charles);
    assert_eq!(report.to_text(), "Application Close\nPage: Home; previous page unknown");
}

#[test]
fn test_launch_rendering_end_to_end() {
    let launch = json!({"xdm": {
        "eventType": "application.launch",
        "application": {"name": "MyApp", "version": "2.1"},
        "environment": {"operatingSystem": "iOS", "operatingSystemVersion": "17.0"},
        "device": {"model": "iPhone15"}
    }});
    let capture = json!({"events": [bridge(1, launch)]});

    let report = Pipeline::new(Config::default()).summarize_value(&capture).unwrap();

    assert_eq!(report.to_text(), "Launch: MyApp 2.1, iOS 17.0, Model: iPhone15");
}

#[test]
fn test_link_rendering_end_to_end() {
    let link = json!({
        "xdm": {"eventType": "analytics.track"},
        "data": {"__adobe": {"analytics": {
            "linkName": "Book Now",
            "contextData": {"hm.page.previous": "Home"}
        }}}
    });
    let body = json!({ "events": [link] }).to_string();
    let capture = json!([charles_call(HOST, &body)]);

    let report = Pipeline::new(Config::default()).summarize_value(&capture).unwrap();

    assert_eq!(report.to_text(), "Link: Book Now; previous page Home");
}

#[test]
fn test_max_events_caps_both_formats() {
    let body = json!({"events": [page_view("A"), page_view("B"), page_view("C")]}).to_string();
    let charles = json!([charles_call(HOST, &body), charles_call(HOST, &body)]);
    let assurance = json!({"events": [
        bridge(3, page_view("C")),
        bridge(2, page_view("B")),
        bridge(1, page_view("A"))
    ]});

    let uncapped = Pipeline::new(Config::default());
    let capped = Pipeline::new(Config::default().with_max_events(2));

    assert_eq!(uncapped.summarize_value(&charles).unwrap().lines().len(), 6);
    assert_eq!(capped.summarize_value(&charles).unwrap().lines().len(), 2);

    let report = capped.summarize_value(&assurance).unwrap();
    assert_eq!(
        report.lines(),
        ["Page: B; previous page unknown", "Page: C; previous page unknown"]
    );
}

#[test]
fn test_detection_failures_surface() {
    let pipeline = Pipeline::new(Config::default());

    let not_json = pipeline.summarize_bytes(b"PK\x03\x04").unwrap_err();
    assert!(matches!(not_json, DetectionError::NotJson(_)));

    let no_bridge = pipeline
        .summarize_value(&json!({"events": [{"payload": {"ACPExtensionEventName": "Other"}}]}))
        .unwrap_err();
    assert_eq!(no_bridge.to_string(), "events present but none are Edge Bridge Request");

    let no_host = pipeline.summarize_value(&json!([{"host": "example.com"}])).unwrap_err();
    assert_eq!(no_host.to_string(), "no entries match target host");

    let other_root = pipeline.summarize_value(&json!({"log": {"entries": []}})).unwrap_err();
    assert_eq!(other_root.to_string(), "root is neither object-with-events nor list");
}

#[test]
fn test_unreadable_file() {
    let dir = tempdir().unwrap();
    let err = Pipeline::new(Config::default())
        .summarize_file(dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, DetectionError::Unreadable(_)));
}

#[test]
fn test_configured_host_drives_detection_and_extraction() {
    let body = json!({ "events": [page_view("Custom")] }).to_string();
    let capture = json!([charles_call("collect.example.org", &body)]);

    let default_pipeline = Pipeline::new(Config::default());
    assert!(default_pipeline.summarize_value(&capture).is_err());

    let pipeline = Pipeline::new(Config::default().with_target_host("collect.example.org"));
    let report = pipeline.summarize_value(&capture).unwrap();
    assert_eq!(report.to_text(), "Page: Custom; previous page unknown");
}
