//! A terminal client for the DLS tournament platform.
//!
//! Without a command the client opens the full-screen UI. With one, it
//! fetches the requested data, prints it, and exits.

use anyhow::{Context, Result};
use dlst::ApiClient;
use dlst_client::{
    commands::{execute, parse_command},
    config::ClientConfig,
    logging,
    tui_app::TuiApp,
};
use pico_args::Arguments;
use std::path::PathBuf;

const HELP: &str = "\
Browse DLS tournaments from the terminal

USAGE:
  dlst_client [OPTIONS] [COMMAND]

OPTIONS:
  --server URL          API origin  [env: DLST_API_URL]
  --log-file PATH       Log file    [env: DLST_LOG_FILE, default: dlst_client.log]

FLAGS:
  -h, --help            Print help information

COMMANDS:
  announcements         Latest announcements
  tournaments           Open tournaments
  teams                 Registered teams
  standings [ID]        Overall standings, or one tournament's
  fixtures ID           Fixtures of a tournament
  rules                 Tournament rules

With no command the interactive UI starts.
";

struct Args {
    server_url: Option<String>,
    log_file: Option<PathBuf>,
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs
            .opt_value_from_str("--server")
            .context("Invalid --server")?,
        log_file: pargs
            .opt_value_from_os_str("--log-file", |s| {
                Ok::<_, std::convert::Infallible>(PathBuf::from(s))
            })
            .context("Invalid --log-file")?,
        command: pargs
            .finish()
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.server_url, args.log_file)
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    logging::init(&config.log_file)?;
    tracing::info!(api_url = %config.api_url, "client starting");

    let api = ApiClient::new(config.api_url.clone());

    if !args.command.is_empty() {
        let command = parse_command(&args.command.join(" "))?;
        tracing::debug!(?command, "running one-shot command");
        let output = execute(&api, command)
            .await
            .with_context(|| format!("Request to {} failed", config.api_url))?;
        println!("{output}");
        return Ok(());
    }

    // Initialize terminal
    let terminal = ratatui::init();

    let tui_app = TuiApp::new(api, config.dismiss_delay);
    let result = tui_app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
