//! Event classification and one-line rendering
//!
//! `classify` is pure and total: any JSON value wrapped as a
//! [`CanonicalEvent`] yields a summary line, missing fields degrade to
//! placeholders.

use crate::domain::path::{non_empty, ValueExt};
use crate::domain::types::{CanonicalEvent, EventType};
use std::borrow::Cow;

/// Rendered in place of a missing launch field
pub const MISSING_FIELD: &str = "unknown";

/// Summary line for one canonical event
pub fn classify(event: &CanonicalEvent) -> String {
    match event.event_type() {
        EventType::Launch => render_launch(event),
        EventType::Track => render_track(event),
        EventType::Close => "Application Close".to_string(),
        other => format!("Unhandled event type: {}", other.label()),
    }
}

/// `Launch: {name} {version}, {os} {os version}, Model: {model}`
pub fn render_launch(event: &CanonicalEvent) -> String {
    let xdm = event.payload();
    let field = |path: &[&str]| xdm.text_at(path).unwrap_or(Cow::Borrowed(MISSING_FIELD));

    format!(
        "Launch: {} {}, {} {}, Model: {}",
        field(&["xdm", "application", "name"]),
        field(&["xdm", "application", "version"]),
        field(&["xdm", "environment", "operatingSystem"]),
        field(&["xdm", "environment", "operatingSystemVersion"]),
        field(&["xdm", "device", "model"]),
    )
}

/// Page view, link click, or the unknown-track fallback
pub fn render_track(event: &CanonicalEvent) -> String {
    let analytics = event.analytics();
    let lookup = |path: &[&str]| non_empty(analytics.and_then(|a| a.text_at(path)));
    let context = |key: &str| lookup(&["contextData", key]);

    let page_name = lookup(&["pageName"]).or_else(|| context("hm.page.name"));
    let previous_page = context("hm.page.previous");
    let previous_page = previous_page.as_deref().unwrap_or(MISSING_FIELD);

    if let Some(page_name) = page_name {
        format!("Page: {}; previous page {}", page_name, previous_page)
    } else if let Some(link_name) = lookup(&["linkName"]) {
        format!("Link: {}; previous page {}", link_name, previous_page)
    } else {
        "Unknown analytics TRACK event".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn event(value: Value) -> CanonicalEvent {
        CanonicalEvent::new(value)
    }

    fn track(analytics: Value) -> CanonicalEvent {
        event(json!({
            "xdm": {"eventType": "analytics.track"},
            "data": {"__adobe": {"analytics": analytics}}
        }))
    }

    #[test]
    fn test_launch_full() {
        let e = event(json!({"xdm": {
            "eventType": "application.launch",
            "application": {"name": "MyApp", "version": "2.1"},
            "environment": {"operatingSystem": "iOS", "operatingSystemVersion": "17.0"},
            "device": {"model": "iPhone15"}
        }}));
        assert_eq!(classify(&e), "Launch: MyApp 2.1, iOS 17.0, Model: iPhone15");
    }

    #[test]
    fn test_launch_missing_fields() {
        let e = event(json!({"xdm": {
            "eventType": "application.launch",
            "application": {"name": "MyApp", "version": 3},
            "device": "flat"
        }}));
        assert_eq!(classify(&e), "Launch: MyApp 3, unknown unknown, Model: unknown");
    }

    #[test]
    fn test_track_page_name() {
        let e = track(json!({
            "pageName": "Search",
            "contextData": {"hm.page.name": "Ignored", "hm.page.previous": "Home"}
        }));
        assert_eq!(classify(&e), "Page: Search; previous page Home");
    }

    #[test]
    fn test_track_page_from_context_data() {
        let e = track(json!({"contextData": {"hm.page.name": "Rooms"}}));
        assert_eq!(classify(&e), "Page: Rooms; previous page unknown");
    }

    #[test]
    fn test_track_empty_page_name_falls_back() {
        let e = track(json!({
            "pageName": "",
            "contextData": {"hm.page.name": "Rooms", "hm.page.previous": ""}
        }));
        assert_eq!(classify(&e), "Page: Rooms; previous page unknown");
    }

    #[test]
    fn test_track_link() {
        let e = track(json!({
            "linkName": "Book Now",
            "contextData": {"hm.page.previous": "Home"}
        }));
        assert_eq!(classify(&e), "Link: Book Now; previous page Home");
    }

    #[test]
    fn test_track_unknown() {
        assert_eq!(classify(&track(json!({}))), "Unknown analytics TRACK event");
        let bare = event(json!({"xdm": {"eventType": "analytics.track"}}));
        assert_eq!(classify(&bare), "Unknown analytics TRACK event");
    }

    #[test]
    fn test_close() {
        let e = event(json!({"xdm": {"eventType": "application.close"}}));
        assert_eq!(classify(&e), "Application Close");
    }

    #[test]
    fn test_unhandled_types() {
        let other = event(json!({"xdm": {"eventType": "commerce.purchases"}}));
        assert_eq!(classify(&other), "Unhandled event type: commerce.purchases");
        assert_eq!(classify(&event(json!({}))), "Unhandled event type: Unknown");
    }

    #[test]
    fn test_classify_is_total() {
        for value in [
            json!(null),
            json!(1),
            json!("application.launch"),
            json!([{"xdm": {"eventType": "application.launch"}}]),
            json!({"xdm": null}),
            json!({"xdm": {"eventType": 7}}),
            json!({"xdm": {"eventType": "analytics.track"}, "data": {"__adobe": []}}),
        ] {
            let line = classify(&event(value));
            assert!(!line.is_empty());
        }
        assert_eq!(
            classify(&event(json!({"xdm": {"eventType": 7}}))),
            "Unhandled event type: 7"
        );
    }
}
