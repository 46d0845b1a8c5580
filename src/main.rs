use std::io::Read;
use std::path::{Path, PathBuf};

use aiq_deeplink::app::{
    AppConfig, RouteOutcome, route_payload, run_from_payload_file, run_from_uri,
};
use aiq_deeplink::deeplink::{DEFAULT_SCHEME, DEFAULT_WEB_DOMAIN, DeepLinkParser, LinkConfig};
use aiq_deeplink::io::payload_reader::parse_payload_content;
use aiq_deeplink::io::route_report::render_route_report;
use aiq_deeplink::logging::AppLogger;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aiq-deeplink")]
#[command(about = "Decode push-notification deep links into navigation targets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a single deep-link URI
    Parse(ParseArgs),
    /// Route a notification payload (JSON object); `-` reads stdin
    Payload(PayloadArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    #[arg(long, default_value = DEFAULT_SCHEME)]
    scheme: String,
    #[arg(long, default_value = DEFAULT_WEB_DOMAIN)]
    web_domain: String,
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
    #[arg(long)]
    verbose: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    uri: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct PayloadArgs {
    path: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse(args) => {
            let config = to_config(&args.common);
            run_from_uri(&args.uri, &config)
                .and_then(|outcome| print_outcome(&outcome, &args.common))
        }
        Commands::Payload(args) => {
            let config = to_config(&args.common);
            route_payload_arg(&args.path, &config)
                .and_then(|outcome| print_outcome(&outcome, &args.common))
        }
    };

    if let Err(err) = result {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn to_config(args: &CommonArgs) -> AppConfig {
    AppConfig {
        log_dir: args.log_dir.clone(),
        verbose: args.verbose,
        links: LinkConfig {
            scheme: args.scheme.clone(),
            web_domain: args.web_domain.clone(),
        },
    }
}

fn route_payload_arg(path: &Path, config: &AppConfig) -> Result<RouteOutcome> {
    if path.as_os_str() != "-" {
        return run_from_payload_file(path, config);
    }
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read payload from stdin")?;
    let payload = parse_payload_content(&content)?;
    let logger = AppLogger::new(&config.log_dir, config.verbose)?;
    let parser = DeepLinkParser::new(config.links.clone());
    Ok(route_payload(&payload, &parser, &logger))
}

fn print_outcome(outcome: &RouteOutcome, args: &CommonArgs) -> Result<()> {
    if args.json {
        let rendered = serde_json::to_string_pretty(&serde_json::json!({
            "type": outcome.notification_type,
            "deepLink": outcome.deep_link,
            "target": outcome.target,
            "reason": outcome.rejection,
        }))?;
        println!("{rendered}");
    } else {
        print!("{}", render_route_report(outcome));
    }
    Ok(())
}
