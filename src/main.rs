use gitstack::cache::repo_key;
use gitstack::cli::commands::{CliArgs, Commands, LocalArgs, ProfileArgs, RepoArgs, SignaturesArgs};
use gitstack::cli::output::{OutputFormat, OutputFormatter, StackOutput};
use gitstack::present::{StackPresenter, StackTarget, StackView};
use gitstack::progress::{LoggingHandler, ProgressBarHandler, ProgressHandler};
use gitstack::source::{GitHubSource, LocalSource, RepoRef};
use gitstack::util::logging::{init_logging, parse_level, LoggingConfig};
use gitstack::{
    GitstackConfig, ProfileScanner, ScanCache, ScanOptions, ScanOrchestrator, SignatureRegistry,
    StackSession, NAME, VERSION,
};

use chrono::{DateTime, Utc};
use clap::Parser;
use std::env;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, warn, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Repo(repo_args) => handle_repo(repo_args, args.quiet).await,
        Commands::Profile(profile_args) => handle_profile(profile_args, args.quiet).await,
        Commands::Local(local_args) => handle_local(local_args, args.quiet).await,
        Commands::Signatures(signature_args) => handle_signatures(signature_args),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("GITSTACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let use_json = env::var("GITSTACK_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..LoggingConfig::default()
    });
}

/// Logs intermediate views; the final result is printed by the command handler.
struct CliPresenter;

impl StackPresenter for CliPresenter {
    fn show_stack(&self, view: &StackView) {
        info!(
            stack_target = %view.target,
            technologies = view.technologies.len(),
            partial = view.is_partial,
            "Stack updated"
        );
    }

    fn show_empty(&self, target: &StackTarget, scanned: usize) {
        info!(stack_target = %target, scanned, "No technologies detected");
    }

    fn show_rate_limited(&self, target: &StackTarget, reset: Option<DateTime<Utc>>) {
        match reset {
            Some(reset) => warn!(stack_target = %target, reset = %reset, "Rate limit exhausted"),
            None => warn!(stack_target = %target, "Rate limit exhausted"),
        }
    }
}

fn load_config(no_cache: bool) -> Option<GitstackConfig> {
    let default_config = GitstackConfig::default();
    let config = GitstackConfig {
        cache_enabled: !no_cache && default_config.cache_enabled,
        ..default_config
    };
    if no_cache {
        debug!("Persistent cache disabled");
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your GITSTACK_* environment variables.");
        return None;
    }
    debug!("Configuration: {}", config);
    Some(config)
}

fn progress_handler(quiet: bool) -> Arc<dyn ProgressHandler> {
    if quiet {
        Arc::new(LoggingHandler)
    } else {
        Arc::new(ProgressBarHandler::new())
    }
}

fn build_orchestrator(config: &GitstackConfig, quiet: bool) -> Option<Arc<ScanOrchestrator>> {
    let source = match GitHubSource::from_config(config) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to initialize GitHub client: {:#}", e);
            return None;
        }
    };
    if !source.is_authenticated() {
        info!("No token configured, using the unauthenticated request quota");
    }

    let orchestrator = ScanOrchestrator::new(
        Arc::new(source),
        Arc::new(SignatureRegistry::with_defaults()),
        Arc::new(ScanCache::from_config(config)),
    )
    .with_progress(progress_handler(quiet));
    Some(Arc::new(orchestrator))
}

fn print_output(format: OutputFormat, output: &StackOutput) -> i32 {
    match OutputFormatter::new(format).format(output) {
        Ok(text) => {
            println!("{}", text.trim_end());
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

async fn handle_repo(args: &RepoArgs, quiet: bool) -> i32 {
    let Some(repo) = RepoRef::parse(&args.repository) else {
        error!("Invalid repository '{}', expected OWNER/REPO", args.repository);
        return 1;
    };
    let Some(config) = load_config(args.no_cache) else {
        return 1;
    };
    let Some(orchestrator) = build_orchestrator(&config, quiet) else {
        return 1;
    };

    if args.refresh {
        debug!(repo = %repo, "Discarding cached result");
        orchestrator.cache().invalidate(&repo_key(&repo.owner, &repo.name));
    }

    info!("Detecting stack of {}", repo);
    let session = StackSession::new(orchestrator, Arc::new(CliPresenter), config.profile_delay());
    let mut outcome = session.show_repository(&repo, &args.visible).await;

    let code = print_output(args.format.into(), &StackOutput::from_repository(&outcome));

    if let Some(refresh) = outcome.refresh.take() {
        match refresh.await {
            Ok(report) => info!(technologies = report.technologies.len(), "Cached result refreshed"),
            Err(e) => warn!("Background refresh failed: {}", e),
        }
    }

    code
}

async fn handle_profile(args: &ProfileArgs, quiet: bool) -> i32 {
    let Some(config) = load_config(args.no_cache) else {
        return 1;
    };
    let Some(orchestrator) = build_orchestrator(&config, quiet) else {
        return 1;
    };

    info!("Aggregating stack of account {}", args.user);
    let scanner = ProfileScanner::new(orchestrator, config.profile_delay());
    let presenter = CliPresenter;
    let mut report = scanner.scan(&args.user, &presenter).await;

    if args.more && report.can_scan_more() {
        report = scanner.scan_more(&report, &presenter).await;
    }

    print_output(args.format.into(), &StackOutput::from_profile(&report))
}

async fn handle_local(args: &LocalArgs, quiet: bool) -> i32 {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return 1;
            }
        },
    };

    let source = match LocalSource::new(&path) {
        Ok(source) => source,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };
    let repo = source.repo_ref();
    info!("Detecting stack of {}", source.root().display());

    let config = GitstackConfig::default();
    let orchestrator = ScanOrchestrator::new(
        Arc::new(source),
        Arc::new(SignatureRegistry::with_defaults()),
        Arc::new(ScanCache::in_memory(config.ttl_policy())),
    )
    .with_progress(progress_handler(quiet));

    let options = ScanOptions {
        write_cache: false,
        ..ScanOptions::default()
    };
    let report = orchestrator.scan(&repo, &[], options).await;

    print_output(args.format.into(), &StackOutput::from_scan(&report))
}

fn handle_signatures(args: &SignaturesArgs) -> i32 {
    let registry = SignatureRegistry::with_defaults();
    match OutputFormatter::new(args.format.into()).format_signatures(&registry) {
        Ok(text) => {
            println!("{}", text.trim_end());
            0
        }
        Err(e) => {
            error!("Failed to format signatures: {:#}", e);
            1
        }
    }
}
