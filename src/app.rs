use std::path::{Path, PathBuf};

use anyhow::Result;
use url::Url;

use crate::deeplink::{DeepLink, DeepLinkParser, LinkConfig};
use crate::io::payload_reader::parse_payload_file;
use crate::logging::AppLogger;
use crate::payload::{DEEP_LINK_KEY, NotificationData, Payload};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_dir: PathBuf,
    pub verbose: bool,
    pub links: LinkConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            verbose: false,
            links: LinkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub notification_type: Option<String>,
    pub deep_link: Option<String>,
    /// `None` means the payload had no usable deep link and navigation is skipped.
    pub target: Option<DeepLink>,
    pub rejection: Option<String>,
}

pub fn route_payload(
    payload: &Payload,
    parser: &DeepLinkParser,
    logger: &AppLogger,
) -> RouteOutcome {
    let data = NotificationData::from_payload(payload);
    logger.info(&format!(
        "notification received: type={}",
        data.notification_type.as_deref().unwrap_or("unknown")
    ));

    let Some(uri) = data.deep_link else {
        if payload.contains_key(DEEP_LINK_KEY) {
            logger.warn(&format!(
                "`{DEEP_LINK_KEY}` is present but not a string; skipping"
            ));
        } else {
            logger.info(&format!("no `{DEEP_LINK_KEY}` in payload; skipping navigation"));
        }
        return RouteOutcome {
            notification_type: data.notification_type,
            deep_link: None,
            target: None,
            rejection: None,
        };
    };

    RouteOutcome {
        notification_type: data.notification_type,
        ..route_uri(&uri, parser, logger)
    }
}

pub fn route_uri(uri: &str, parser: &DeepLinkParser, logger: &AppLogger) -> RouteOutcome {
    let (target, rejection) = classify(uri, parser);
    match &rejection {
        Some(reason) => {
            logger.warn(&format!("deep link `{uri}` resolved to invalid: {reason}"));
        }
        None => logger.info(&format!("deep link `{uri}` resolved to {target}")),
    }
    RouteOutcome {
        notification_type: None,
        deep_link: Some(uri.to_string()),
        target: Some(target),
        rejection,
    }
}

pub fn run_from_payload_file(path: &Path, config: &AppConfig) -> Result<RouteOutcome> {
    let logger = AppLogger::new(&config.log_dir, config.verbose)?;
    logger.info(&format!("reading payload: {}", path.display()));
    let payload = match parse_payload_file(path) {
        Ok(payload) => payload,
        Err(err) => {
            logger.error(&format!("{err:#}"));
            return Err(err);
        }
    };
    let parser = DeepLinkParser::new(config.links.clone());
    Ok(route_payload(&payload, &parser, &logger))
}

pub fn run_from_uri(uri: &str, config: &AppConfig) -> Result<RouteOutcome> {
    let logger = AppLogger::new(&config.log_dir, config.verbose)?;
    let parser = DeepLinkParser::new(config.links.clone());
    Ok(route_uri(uri, &parser, &logger))
}

fn classify(uri: &str, parser: &DeepLinkParser) -> (DeepLink, Option<String>) {
    let url = match Url::parse(uri) {
        Ok(url) => url,
        Err(err) => return (DeepLink::Invalid, Some(format!("malformed URL: {err}"))),
    };
    match parser.resolve(&url) {
        Ok(target) => (target, None),
        Err(err) => (DeepLink::Invalid, Some(format!("{err:#}"))),
    }
}
