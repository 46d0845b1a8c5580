use serde_json::{Map, Value};

use crate::deeplink::{DeepLink, DeepLinkParser};

pub const TYPE_KEY: &str = "type";
pub const DEEP_LINK_KEY: &str = "deep_link";

/// Custom data of a push notification, as delivered: untyped JSON values.
pub type Payload = Map<String, Value>;

/// Returns the value under `key` only when it is a JSON string.
///
/// Numbers, booleans, nulls, arrays and nested objects all read as absent.
/// An empty string is still a string.
pub fn extract_field<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationData {
    pub notification_type: Option<String>,
    pub deep_link: Option<String>,
}

impl NotificationData {
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            notification_type: extract_field(payload, TYPE_KEY).map(str::to_string),
            deep_link: extract_field(payload, DEEP_LINK_KEY).map(str::to_string),
        }
    }

    /// `None` when the payload carries no text deep link; no fallback target
    /// is substituted.
    pub fn target(&self, parser: &DeepLinkParser) -> Option<DeepLink> {
        self.deep_link.as_deref().map(|uri| parser.parse_str(uri))
    }
}
