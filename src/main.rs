//! Profile Sweep main entry point
//!
//! This is the command-line interface for the Profile Sweep prober.

use clap::Parser;
use profile_sweep::config::{load_config_with_hash, validate, Config};
use profile_sweep::output::ConsoleReporter;
use profile_sweep::probe::run_sweep;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Profile Sweep: an exhaustive short-identifier profile prober
///
/// Profile Sweep requests the profile page for every identifier of a fixed
/// length over a fixed alphabet, at most a fixed number at a time, and
/// appends every profile it finds to a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "profile-sweep")]
#[command(version = "1.0.0")]
#[command(about = "An exhaustive short-identifier profile prober", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be probed without probing
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_sweep(&config).await?;
    }

    Ok(())
}

/// Loads the configuration file, or validated defaults when none is given
fn load(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("profile_sweep=info,warn"),
            1 => EnvFilter::new("profile_sweep=debug,info"),
            2 => EnvFilter::new("profile_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be probed
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use profile_sweep::IdentifierSpace;

    let space = IdentifierSpace::new(&config.probe.alphabet, config.probe.length)?;

    println!("=== Profile Sweep Dry Run ===\n");

    println!("Probe:");
    println!("  Base URL: {}", config.probe.base_url);
    println!(
        "  Alphabet: {} ({} symbols)",
        config.probe.alphabet,
        space.alphabet().len()
    );
    println!("  Length: {}", space.length());

    println!("\nDispatch:");
    println!("  Max concurrent: {}", config.dispatch.max_concurrent);
    println!("  Request timeout: {}ms", config.dispatch.request_timeout);
    println!("  Timeout backoff: {}ms", config.dispatch.timeout_backoff);

    println!("\nExtractor:");
    println!("  Not-found marker: {}", config.extractor.not_found_marker);
    println!("  Name selector: {}", config.extractor.name_selector);
    println!("  Level selector: {}", config.extractor.level_selector);
    println!("  Level label: {}", config.extractor.level_label);

    println!("\nHTTP:");
    println!(
        "  User agent: {}",
        config.http.user_agent.as_deref().unwrap_or("(client default)")
    );

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would probe {} identifiers", space.len());
    println!("  First: {}{}", config.probe.base_url, space.first());
    println!("  Last: {}{}", config.probe.base_url, space.last());

    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use profile_sweep::output::{load_statistics, print_statistics};
    use profile_sweep::storage::open_store;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let store = open_store(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main sweep
async fn handle_sweep(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting sweep: {} slots, {}ms deadline, {}ms timeout backoff",
        config.dispatch.max_concurrent,
        config.dispatch.request_timeout,
        config.dispatch.timeout_backoff
    );

    match run_sweep(config, Arc::new(ConsoleReporter)).await {
        Ok(summary) => {
            tracing::info!(
                "Sweep completed: {} of {} identifiers matched",
                summary.count(profile_sweep::TaskOutcome::Stored),
                summary.dispatched
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Sweep failed: {}", e);
            Err(e.into())
        }
    }
}
