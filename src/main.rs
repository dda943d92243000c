use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ggpm::cli::args::{extract_packages, is_install_command};
use ggpm::cli::detector::{self, PackageManager};
use ggpm::cli::runner::run_package_manager;
use ggpm::config::GateConfig;
use ggpm::validation::{PackageValidator, ProjectError, ValidationResult};

#[derive(Parser)]
#[command(name = "ggpm")]
#[command(
    version,
    about = "Package manager wrapper that blocks versions published too recently",
    after_help = "Configure the threshold in .npmrc with: minimum-release-age=7"
)]
struct Cli {
    /// Package manager to forward to (detected from the binary name or lockfile when omitted)
    #[arg(long, value_enum)]
    manager: Option<PackageManager>,

    /// Validate every dependency in ./package.json and exit
    #[arg(long)]
    check: bool,

    /// Minimum release age in days, overriding .npmrc
    #[arg(long, value_name = "DAYS")]
    minimum_age: Option<i64>,

    /// Registry base URL, overriding .npmrc
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Arguments for the package manager (e.g. `install lodash`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref())?;

    let code = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))?;

    std::process::exit(code);
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;

    let mut config = GateConfig::load(&cwd);
    if let Some(days) = cli.minimum_age {
        config.minimum_age_days = days;
    }
    if let Some(url) = cli.registry {
        config.registry_url = url.trim_end_matches('/').to_string();
    }
    let validator = PackageValidator::from_config(config);

    if cli.check {
        return Ok(match validator.validate_all_packages_in_project(&cwd).await {
            Ok(_) => {
                println!("All packages meet the minimum age requirement");
                0
            }
            Err(ProjectError::PackagesTooRecent(result)) => {
                print_failures(&result);
                eprintln!("Some packages do not meet the minimum age requirement");
                1
            }
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        });
    }

    if is_install_command(&cli.args) {
        let packages = extract_packages(&cli.args);
        if !packages.is_empty() {
            let result = validator.validate_packages(&packages).await;
            if !result.is_valid() {
                print_failures(&result);
                eprintln!("Installation blocked by packages that are too recent");
                return Ok(1);
            }
            println!("All packages are valid, proceeding with installation...");
        }
    }

    if cli.args.is_empty() {
        return Ok(0);
    }

    let manager = match cli.manager.or_else(wrapper_manager) {
        Some(manager) => manager,
        None => detector::detect(&cwd).await,
    };

    Ok(run_package_manager(manager, &cli.args).await?)
}

/// Package manager implied by the name this binary was invoked as
fn wrapper_manager() -> Option<PackageManager> {
    let argv0 = std::env::args_os().next()?;
    let name = Path::new(&argv0).file_stem()?.to_str()?.to_string();
    PackageManager::from_wrapper_name(&name)
}

fn print_failures(result: &ValidationResult) {
    for package in result.failed_packages() {
        match &package.suggested_version {
            Some(suggested) => eprintln!(
                "  {}@{} is too recent, consider {}@{}",
                package.name, package.requested_version, package.name, suggested
            ),
            None => eprintln!(
                "  {}@{} failed validation and no older version qualifies",
                package.name, package.requested_version
            ),
        }
    }
}
