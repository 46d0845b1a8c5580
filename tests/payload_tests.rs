use aiq_deeplink::deeplink::{DeepLink, DeepLinkParser};
use aiq_deeplink::payload::{DEEP_LINK_KEY, NotificationData, Payload, extract_field};
use serde_json::json;

fn payload(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("test payload must be an object, got {other}"),
    }
}

#[test]
fn extracts_string_field() {
    let data = payload(json!({"deep_link": "aiq://test/results/123"}));
    assert_eq!(
        extract_field(&data, DEEP_LINK_KEY),
        Some("aiq://test/results/123")
    );
}

#[test]
fn empty_string_is_still_extracted() {
    let data = payload(json!({"deep_link": ""}));
    assert_eq!(extract_field(&data, DEEP_LINK_KEY), Some(""));
}

#[test]
fn missing_key_yields_nothing() {
    let data = payload(json!({}));
    assert_eq!(extract_field(&data, DEEP_LINK_KEY), None);
}

#[test]
fn non_string_values_yield_nothing() {
    for value in [
        json!(123),
        json!(1.5),
        json!(true),
        json!(null),
        json!(["aiq://settings"]),
        json!({"url": "aiq://settings"}),
    ] {
        let data = payload(json!({ "deep_link": value.clone() }));
        assert_eq!(
            extract_field(&data, DEEP_LINK_KEY),
            None,
            "value {value} must not extract"
        );
    }
}

#[test]
fn notification_data_reads_type_and_deep_link() {
    let data = NotificationData::from_payload(&payload(json!({
        "type": "test_completed",
        "deep_link": "aiq://test/results/123",
        "aps": {"alert": {"title": "Results ready"}},
    })));
    assert_eq!(data.notification_type.as_deref(), Some("test_completed"));
    assert_eq!(data.deep_link.as_deref(), Some("aiq://test/results/123"));
}

#[test]
fn target_follows_payload_scenarios() {
    let parser = DeepLinkParser::default();
    let cases = [
        (
            json!({"deep_link": "aiq://test/results/123"}),
            Some(DeepLink::TestResults { id: 123 }),
        ),
        (
            json!({"deep_link": "aiq://test/resume/789"}),
            Some(DeepLink::ResumeTest { session_id: 789 }),
        ),
        (json!({"deep_link": "aiq://settings"}), Some(DeepLink::Settings)),
        (
            json!({"deep_link": "https://aiq.app/test/results/999"}),
            Some(DeepLink::TestResults { id: 999 }),
        ),
        (json!({"deep_link": "invalid-url"}), Some(DeepLink::Invalid)),
        (json!({"deep_link": ""}), Some(DeepLink::Invalid)),
        (json!({"deep_link": 123}), None),
        (json!({}), None),
        (
            json!({"deep_link": "aiq://test/results/123?source=push#x"}),
            Some(DeepLink::TestResults { id: 123 }),
        ),
    ];

    for (raw, expected) in cases {
        let data = NotificationData::from_payload(&payload(raw.clone()));
        assert_eq!(data.target(&parser), expected, "payload: {raw}");
    }
}

#[test]
fn payload_without_deep_link_has_no_default_target() {
    let data = NotificationData::from_payload(&payload(json!({"type": "test_reminder"})));
    assert_eq!(data.deep_link, None);
    assert_eq!(data.target(&DeepLinkParser::default()), None);
}
