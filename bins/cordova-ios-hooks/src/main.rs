//! Cordova iOS hooks CLI
//!
//! Cordova runs executable hooks with the project root as the first
//! argument. Register the binary from `config.xml` through a one-line
//! wrapper script:
//!
//! ```xml
//! <platform name="ios">
//!     <hook type="before_prepare" src="hooks/ios-before-prepare.sh" />
//! </platform>
//! ```
//!
//! where `hooks/ios-before-prepare.sh` runs
//! `exec cordova-ios-hooks before-prepare "$1"`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cordova_hooks_cli::logger::ConsoleLogger;
use cordova_hooks_cli::output::{display_or, Status};
use cordova_hooks_core::config::Config;
use cordova_hooks_core::config_xml::{ConfigXml, ProjectConfig, StaticProjectName};
use cordova_hooks_core::context::HookContext;
use cordova_hooks_core::error::{exit_codes, ErrorReport};
use cordova_hooks_core::logger::HookLogger;
use cordova_hooks_ios::platform::{PlatformProbe, IOS_PLATFORM};
use cordova_hooks_ios::{EntitlementsRenamer, IosPlatform};
use cordova_hooks_telemetry::{TelemetryConfig, Timer};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cordova-ios-hooks")]
#[command(about = "Build hooks for the iOS platform of Cordova projects")]
#[command(version)]
struct Cli {
    /// Hook config file path (default: .cordova-hooks.toml in the project root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase diagnostic output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename the .entitlements file after a project name change
    #[command(name = "before-prepare")]
    BeforePrepare {
        /// Cordova project root (default: current directory)
        project_root: Option<PathBuf>,
        /// Use this project name instead of reading config.xml
        #[arg(long)]
        project_name: Option<String>,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the detected iOS platform layout without changing anything
    Inspect {
        /// Cordova project root (default: current directory)
        project_root: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let exit_code = match &cli.command {
        Commands::BeforePrepare {
            project_root,
            project_name,
            json,
        } => run_before_prepare(&cli, project_root.as_deref(), project_name.as_deref(), *json),
        Commands::Inspect { project_root, json } => {
            run_inspect(&cli, project_root.as_deref(), *json)
        }
    };

    std::process::exit(exit_code);
}

/// Context, settings and logging shared by every subcommand
struct Session {
    context: HookContext,
    config: Config,
}

impl Session {
    /// Problems are reported through `logger`. Only an unresolvable project
    /// root yields `None`; a broken hook config falls back to defaults.
    fn start(cli: &Cli, project_root: Option<&Path>, logger: &dyn HookLogger) -> Option<Self> {
        let context = match HookContext::from_env(project_root) {
            Ok(context) => context,
            Err(e) => {
                logger.warn(&format!("Cannot determine the project root: {}", e));
                return None;
            }
        };

        let config = match Config::load(cli.config.as_deref(), &context.project_root) {
            Ok(config) => config,
            Err(e) => {
                logger.warn(&format!("Ignoring hook configuration: {}", e));
                Config::default()
            }
        };

        let telemetry = TelemetryConfig {
            log_level: config.schema.logging.level.clone(),
            json: config.schema.logging.json,
            ..TelemetryConfig::default()
        }
        .with_verbosity(cli.verbose, cli.quiet);

        if let Err(e) = cordova_hooks_telemetry::init_with_config(telemetry) {
            logger.warn(&e.to_string());
        }

        tracing::debug!(
            root = %context.project_root.display(),
            platforms = ?context.platforms,
            cordova = ?context.cordova_version,
            config = ?config.path,
            "Hook session started"
        );

        Some(Self { context, config })
    }

    fn platform(&self) -> IosPlatform {
        IosPlatform::with_config(&self.context.project_root, &self.config.schema.ios)
    }

    fn project_config(&self, project_name: Option<&str>) -> Box<dyn ProjectConfig> {
        match project_name {
            Some(name) => Box::new(StaticProjectName::new(name)),
            None => Box::new(ConfigXml::new(&self.context.project_root)),
        }
    }
}

fn run_before_prepare(
    cli: &Cli,
    project_root: Option<&Path>,
    project_name: Option<&str>,
    json: bool,
) -> i32 {
    let logger = ConsoleLogger::new(cli.quiet || json);

    let Some(session) = Session::start(cli, project_root, &logger) else {
        return exit_codes::SUCCESS;
    };

    if !session.context.targets_platform(IOS_PLATFORM) {
        tracing::debug!(platforms = ?session.context.platforms, "Not an iOS build, skipping");
        return exit_codes::SUCCESS;
    }

    let config = session.project_config(project_name);
    let timer = Timer::start("before_prepare");
    let report = EntitlementsRenamer::new(session.platform(), &*config, &logger).run();
    timer.stop();

    if json {
        print_json(&report);
    }

    // A hook failure must never fail the Cordova build
    exit_codes::SUCCESS
}

#[derive(Serialize)]
struct InspectReport {
    context: HookContext,
    config_path: Option<PathBuf>,
    platform: PlatformProbe,
    manifest: PathBuf,
    configured_name: Option<String>,
    config_error: Option<ErrorReport>,
}

fn run_inspect(cli: &Cli, project_root: Option<&Path>, json: bool) -> i32 {
    let logger = ConsoleLogger::new(cli.quiet);

    let Some(session) = Session::start(cli, project_root, &logger) else {
        return exit_codes::FAILURE;
    };

    let manifest = ConfigXml::new(&session.context.project_root);
    let (configured_name, config_error) = match manifest.project_name() {
        Ok(name) => (Some(name), None),
        Err(e) => (None, Some(e.to_report())),
    };

    let report = InspectReport {
        platform: session.platform().probe(),
        config_path: session.config.path.clone(),
        manifest: manifest.path().to_path_buf(),
        context: session.context,
        configured_name,
        config_error,
    };

    if json {
        print_json(&report);
        return exit_codes::SUCCESS;
    }

    Status::header("iOS platform");
    Status::field("Project root", &report.context.project_root.display().to_string());
    Status::field("Platform dir", &report.platform.platform_dir.display().to_string());
    Status::field("Platform present", if report.platform.exists { "yes" } else { "no" });
    Status::field(
        "Project folder",
        display_or(report.platform.project_folder.as_deref(), "(none)"),
    );
    Status::field(
        "Fixed folder",
        if report.platform.fixed_project_folder { "yes" } else { "no" },
    );
    Status::field(
        "Xcode project name",
        display_or(Some(report.platform.old_project_name.as_str()), "(none)"),
    );
    Status::field("Manifest", &report.manifest.display().to_string());
    Status::field(
        "config.xml name",
        display_or(report.configured_name.as_deref(), "(unavailable)"),
    );

    if let Some(error) = &report.config_error {
        Status::warning(&format!("[{}] {}", error.code_str, error.message));
    }

    exit_codes::SUCCESS
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{}", out),
        Err(e) => Status::error(&format!("Failed to serialize report: {}", e)),
    }
}
