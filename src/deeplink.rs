use std::fmt::{Display, Formatter};

use anyhow::{Result, anyhow, bail};
use serde::Serialize;
use url::Url;

pub const DEFAULT_SCHEME: &str = "aiq";
pub const DEFAULT_WEB_DOMAIN: &str = "aiq.app";

/// Navigation target decoded from a notification deep link.
///
/// The set is closed: every URL resolves to exactly one variant, with
/// `Invalid` standing in for anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "target", rename_all = "camelCase")]
pub enum DeepLink {
    TestResults {
        id: u64,
    },
    ResumeTest {
        #[serde(rename = "sessionId")]
        session_id: u64,
    },
    Settings,
    Invalid,
}

impl DeepLink {
    /// Routing path without scheme or domain, e.g. `test/results/123`.
    pub fn path(&self) -> Option<String> {
        match self {
            Self::TestResults { id } => Some(format!("test/results/{id}")),
            Self::ResumeTest { session_id } => Some(format!("test/resume/{session_id}")),
            Self::Settings => Some("settings".to_string()),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl Display for DeepLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TestResults { id } => write!(f, "testResults({id})"),
            Self::ResumeTest { session_id } => write!(f, "resumeTest({session_id})"),
            Self::Settings => write!(f, "settings"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub scheme: String,
    pub web_domain: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            web_domain: DEFAULT_WEB_DOMAIN.to_string(),
        }
    }
}

impl LinkConfig {
    pub fn custom_scheme_url(&self, link: &DeepLink) -> Option<Url> {
        let path = link.path()?;
        Url::parse(&format!("{}://{path}", self.scheme)).ok()
    }

    pub fn universal_url(&self, link: &DeepLink) -> Option<Url> {
        let path = link.path()?;
        Url::parse(&format!("https://{}/{path}", self.web_domain)).ok()
    }
}

#[derive(Debug, Clone, Copy)]
enum RouteKind {
    TestResults,
    ResumeTest,
    Settings,
}

impl RouteKind {
    fn takes_id(self) -> bool {
        !matches!(self, Self::Settings)
    }

    fn build(self, id: Option<u64>) -> DeepLink {
        match (self, id) {
            (Self::TestResults, Some(id)) => DeepLink::TestResults { id },
            (Self::ResumeTest, Some(session_id)) => DeepLink::ResumeTest { session_id },
            (Self::Settings, None) => DeepLink::Settings,
            _ => DeepLink::Invalid,
        }
    }
}

// Shared by the custom-scheme and universal-link forms. Prefixes are mutually
// exclusive, so table order does not affect the outcome.
const ROUTES: &[(&[&str], RouteKind)] = &[
    (&["test", "results"], RouteKind::TestResults),
    (&["test", "resume"], RouteKind::ResumeTest),
    (&["settings"], RouteKind::Settings),
];

#[derive(Debug, Clone, Default)]
pub struct DeepLinkParser {
    config: LinkConfig,
}

impl DeepLinkParser {
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, url: &Url) -> DeepLink {
        self.resolve(url).unwrap_or(DeepLink::Invalid)
    }

    pub fn parse_str(&self, uri: &str) -> DeepLink {
        match Url::parse(uri) {
            Ok(url) => self.parse(&url),
            Err(_) => DeepLink::Invalid,
        }
    }

    /// Classifies `url`, explaining why it was rejected. Never yields
    /// `Ok(DeepLink::Invalid)`.
    pub fn resolve(&self, url: &Url) -> Result<DeepLink> {
        let Some(segments) = self.routing_segments(url) else {
            bail!(
                "Unsupported deep-link origin `{}`. Expected `{}://` or `https://{}/`",
                origin_label(url),
                self.config.scheme,
                self.config.web_domain
            );
        };

        for (prefix, kind) in ROUTES {
            if !has_prefix(&segments, prefix) {
                continue;
            }
            let rest = &segments[prefix.len()..];
            let route = prefix.join("/");
            if !kind.takes_id() {
                if !rest.is_empty() {
                    bail!("Unexpected trailing segments after `{route}`");
                }
                return Ok(kind.build(None));
            }
            let [raw_id] = rest else {
                bail!(
                    "Route `{route}` expects exactly one identifier segment, got {}",
                    rest.len()
                );
            };
            let id = parse_identifier(raw_id)?;
            return Ok(kind.build(Some(id)));
        }

        if segments.is_empty() {
            bail!("Deep link has no routing path");
        }
        bail!("Unknown deep-link route `{}`", segments.join("/"))
    }

    /// Normalized routing key: host plus path for the custom scheme, path only
    /// for universal links. Query and fragment never take part.
    pub fn routing_segments(&self, url: &Url) -> Option<Vec<String>> {
        let scheme = url.scheme();
        let head = if scheme.eq_ignore_ascii_case(&self.config.scheme) {
            url.host_str().unwrap_or_default()
        } else if scheme == "https" {
            if !self.is_registered_web_origin(url) {
                return None;
            }
            ""
        } else {
            return None;
        };

        let segments = std::iter::once(head)
            .chain(url.path().split('/'))
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Some(segments)
    }

    // Exact origin only: no userinfo, no explicit port.
    fn is_registered_web_origin(&self, url: &Url) -> bool {
        url.username().is_empty()
            && url.password().is_none()
            && url.port().is_none()
            && url
                .host_str()
                .is_some_and(|host| host.eq_ignore_ascii_case(&self.config.web_domain))
    }
}

/// Parses with the default `aiq` scheme and `aiq.app` domain.
pub fn parse(url: &Url) -> DeepLink {
    DeepLinkParser::default().parse(url)
}

fn has_prefix(segments: &[String], prefix: &[&str]) -> bool {
    segments.len() >= prefix.len()
        && segments.iter().zip(prefix).all(|(segment, expected)| segment == expected)
}

fn parse_identifier(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Identifier must be a non-negative integer, got: {raw}");
    }
    raw.parse::<u64>()
        .map_err(|_| anyhow!("Identifier is out of range for u64: {raw}"))
}

fn origin_label(url: &Url) -> String {
    match url.host_str() {
        Some(host) if !host.is_empty() => match url.port() {
            Some(port) => format!("{}://{host}:{port}", url.scheme()),
            None => format!("{}://{host}", url.scheme()),
        },
        _ => format!("{}:", url.scheme()),
    }
}
