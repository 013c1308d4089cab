use std::path::PathBuf;
use std::sync::Arc;

use hl_core::models::LookupConfig;
use hl_core::services::collector::WaitOptions;
use hl_core::services::config_loader;
use hl_core::services::local_pool::LocalWorkerPool;
use hl_core::services::orchestrator::Orchestrator;
use hl_core::services::registry::ServiceRegistry;
use hl_core::LookupError;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse CLI args
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let debug = take_flag(&mut args, "--debug");
    let config_dir = take_value(&mut args, "--config").map(PathBuf::from);

    let _guard = if debug {
        Some(setup_debug_logging())
    } else {
        None
    };

    if args.is_empty() {
        eprintln!("usage: hl-cli [--debug] [--config <dir>] <host> [service...]");
        std::process::exit(2);
    }
    let host = args.remove(0);
    let services = args;
    tracing::debug!(host = %host, services = ?services, "lookup requested");

    let config_path = config_dir.unwrap_or_else(|| PathBuf::from("."));
    let config = match config_loader::load(&config_path) {
        Ok(config) => config,
        Err(LookupError::ConfigNotFound(_)) => LookupConfig::default(),
        Err(e) => return Err(e.into()),
    };

    let registry = ServiceRegistry::new(config.services.clone());
    let pool = Arc::new(LocalWorkerPool::new(config.clone()));
    let orchestrator =
        Orchestrator::new(registry, pool).with_wait_options(WaitOptions::from_config(&config));

    let response = orchestrator.lookup(&host, &services).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    match args.iter().position(|a| a == flag) {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    }
}

fn take_value(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let i = args.iter().position(|a| a == flag)?;
    if i + 1 >= args.len() {
        return None;
    }
    args.remove(i);
    Some(args.remove(i))
}

/// Configure file-based tracing to `.hostlens-debug.log` in CWD.
/// Returns the guard that must be held alive for the duration of the program.
fn setup_debug_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", ".hostlens-debug.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_flag_removes_the_flag() {
        let mut args = vec!["--debug".to_string(), "8.8.8.8".to_string()];
        assert!(take_flag(&mut args, "--debug"));
        assert_eq!(args, vec!["8.8.8.8"]);
        assert!(!take_flag(&mut args, "--debug"));
    }

    #[test]
    fn take_value_removes_flag_and_value() {
        let mut args = vec![
            "--config".to_string(),
            "/etc/hostlens".to_string(),
            "8.8.8.8".to_string(),
        ];
        assert_eq!(take_value(&mut args, "--config").as_deref(), Some("/etc/hostlens"));
        assert_eq!(args, vec!["8.8.8.8"]);
    }

    #[test]
    fn take_value_without_value_returns_none() {
        let mut args = vec!["--config".to_string()];
        assert_eq!(take_value(&mut args, "--config"), None);
    }
}
