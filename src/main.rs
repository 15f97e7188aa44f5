//! League Custom Tracker API: entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the data source
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Serve HTTP until shutdown

use tokio_util::sync::CancellationToken;
use tracing::info;

use league_tracker::{config, error, http, logger, source};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), error::AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let mut config = config::load(args.config_path.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        service = %config.service_name,
        bind = %config.server.bind,
        source = %config.source.provider,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let data_source = source::build(&config.source)?;

    // Shared shutdown token. Ctrl-C cancels it, the server watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    print_startup_summary(&config, data_source.name());

    http::serve(&config.server, data_source, shutdown).await
}

fn print_startup_summary(config: &config::Config, source_name: &str) {
    println!("{} v{}", config.service_name, env!("CARGO_PKG_VERSION"));
    println!("  listening: http://{}", config.server.bind);
    println!("  source:    {source_name}");
    println!("  cors:      {}", config.server.cors_origins.join(", "));
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    bind: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut bind = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: league-tracker [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -b, --bind <ADDR>          Listen address (default: 0.0.0.0:8000)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => config_path = Some(required_value(&arg, iter.next())),
            "-b" | "--bind" => bind = Some(required_value(&arg, iter.next())),
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a => match verbosity_flag(a) {
                Some(n) => verbosity = verbosity.saturating_add(n),
                None => eprintln!("warning: ignoring unknown argument '{a}'"),
            },
        }
    }

    CliArgs {
        log_level: logger::level_for_verbosity(verbosity),
        config_path,
        bind,
    }
}

/// Number of `v`s in a `-v`/`-vv`/… flag, saturating at `u8::MAX`.
fn verbosity_flag(arg: &str) -> Option<u8> {
    let vs = arg.strip_prefix('-')?;
    if vs.is_empty() || !vs.chars().all(|c| c == 'v') {
        return None;
    }
    Some(u8::try_from(vs.len()).unwrap_or(u8::MAX))
}

fn required_value(flag: &str, value: Option<String>) -> String {
    match value {
        Some(v) => v,
        None => {
            eprintln!("error: {flag} requires a value");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags_count_vs() {
        assert_eq!(verbosity_flag("-v"), Some(1));
        assert_eq!(verbosity_flag("-vvv"), Some(3));
        assert_eq!(verbosity_flag("-"), None);
        assert_eq!(verbosity_flag("-x"), None);
        assert_eq!(verbosity_flag("--verbose"), None);
    }

    #[test]
    fn long_verbosity_flag_saturates() {
        let flag = format!("-{}", "v".repeat(256));
        assert_eq!(verbosity_flag(&flag), Some(u8::MAX));
        assert_eq!(logger::level_for_verbosity(u8::MAX), Some("trace"));
    }
}
