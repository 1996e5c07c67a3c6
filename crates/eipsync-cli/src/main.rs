//! # eipsync CLI Entry Point
//!
//! Invoked by the NAC platform's workflow engine once per endpoint event,
//! with attribute name/value pairs as positional arguments:
//!
//! ```text
//! eipsync Mac 00:11:22:33:44:55 Group Guest Status Accept SwitchPort ge.1.1
//! ```
//!
//! The process exit status and a one-line message on stderr tell the caller
//! how the invocation ended.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use eipsync_cli::logging::init_tracing;
use eipsync_cli::{drive, Invocation, Outcome, Settings, SyncError, EXIT_OK};
use eipsync_client::{IpamClient, NacClient};
use eipsync_core::PatternExtractor;

/// Mirror NAC session attributes onto an IPAM reservation and push the
/// IPAM-assigned end-system group back to the NAC platform.
#[derive(Parser, Debug)]
#[command(name = "eipsync", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML settings file. Without it settings come from the environment.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Per-request timeout in seconds for both remote systems.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Skip TLS certificate verification.
    #[arg(long)]
    insecure: bool,

    /// Attribute name/value pairs, e.g. `Mac <mac> Status Accept`.
    #[arg(value_name = "KEY VALUE", trailing_var_arg = true)]
    pairs: Vec<String>,
}

/// Map a command-line parse failure to a sync error.
///
/// Help and version requests are not failures and yield `None`.
fn usage_error(err: &clap::Error) -> Option<SyncError> {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        kind => Some(SyncError::Usage {
            message: kind.to_string(),
        }),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match usage_error(&err) {
            None => {
                println!("{}", err.render());
                return ExitCode::from(EXIT_OK);
            }
            Some(e) => {
                eprintln!("{}", err.render());
                eprintln!("{}", e.signal());
                return ExitCode::from(e.exit_code());
            }
        },
    };

    let settings = Settings::load(cli.config.as_deref());
    let (debug, file_log) = match &settings {
        Ok(s) => (s.debug, s.log_file.clone()),
        Err(_) => (false, None),
    };
    let log_file = cli.log_file.clone().or(file_log);
    if let Err(e) = init_tracing(cli.verbose, debug, log_file.as_deref()) {
        eprintln!("{e:#}; logging to stderr");
        if let Err(e) = init_tracing(cli.verbose, debug, None) {
            eprintln!("{e:#}");
        }
    }

    match execute(cli, settings).await {
        Ok(outcome) => {
            if let Outcome::AlreadyCorrect { group } = &outcome {
                tracing::info!(%group, "no group change needed");
                eprintln!("Already correct group");
            }
            ExitCode::from(EXIT_OK)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                code = e.exit_code(),
                system = ?e.remote_system(),
                "sync failed"
            );
            eprintln!("{}", e.signal());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute(
    cli: Cli,
    settings: Result<Settings, eipsync_cli::SettingsError>,
) -> Result<Outcome, SyncError> {
    // Token problems are reported ahead of configuration problems.
    let invocation = Invocation::new(cli.pairs)?;

    let mut settings = settings?;
    if let Some(secs) = cli.timeout {
        settings = settings.with_timeout(secs);
    }
    if cli.insecure {
        settings = settings.with_insecure_tls();
    }
    if settings.ipam.accept_invalid_certs || settings.nac.accept_invalid_certs {
        tracing::warn!("TLS certificate verification disabled");
    }

    let ipam = IpamClient::new(&settings.ipam)?;
    let nac = NacClient::new(&settings.nac)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = drive(invocation, &ipam, &nac, &PatternExtractor, &mut out).await?;
    out.flush()?;
    Ok(outcome)
}
