//! intent-bridge - Deep-link intent resolver with browser fallback
//!
//! This is the binary entry point. All logic lives in the library.

use std::io;
use std::path::{Path, PathBuf};

use bridge_app::IntentChannel;
use bridge_host::adb_unavailable_message;
use clap::{Parser, Subcommand};
use intent_bridge::{config, FailurePolicy, HostPlatform, Locale};

/// intent-bridge - Resolve intent URLs on an Android device with browser fallback
#[derive(Parser, Debug)]
#[command(name = "intent-bridge")]
#[command(about = "Resolve deep-link intent URLs with browser fallback", long_about = None)]
struct Args {
    /// Project directory containing .intent-bridge/config.toml
    #[arg(long, value_name = "PATH", global = true)]
    project: Option<PathBuf>,

    /// Explicit config file (overrides --project lookup)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Simulate the device using [dry_run] settings instead of adb
    #[arg(long, global = true)]
    dry_run: bool,

    /// Return failures to the caller instead of showing notices
    #[arg(long, global = true)]
    strict: bool,

    /// Notice language (ko, en)
    #[arg(long, value_name = "LOCALE", global = true)]
    locale: Option<Locale>,

    /// adb device serial
    #[arg(long, value_name = "SERIAL", global = true)]
    serial: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Handle one URL as a `handleIntent` call and print the response
    Resolve {
        /// intent: URI or plain URL
        url: String,
    },
    /// Decode a URL and print the resulting intent
    Parse {
        /// intent: URI or plain URL
        url: String,
    },
    /// Read JSON method calls from stdin, one per line
    Serve,
    /// Write a default .intent-bridge/config.toml
    Init,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = bridge_core::logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    // Get project path from args or use current directory
    let project = args
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    match &args.command {
        Command::Parse { url } => {
            intent_bridge::run_parse(url, &mut io::stdout().lock())?;
        }
        Command::Init => {
            let path = config::init_config_dir(&project)?;
            eprintln!("Config: {}", path.display());
        }
        Command::Resolve { url } => {
            let mut channel = build_channel(&args, &project)?;
            let response = intent_bridge::run_resolve(
                &mut channel,
                url,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )?;
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Command::Serve => {
            let mut channel = build_channel(&args, &project)?;
            let stdin = io::stdin();
            let stats = intent_bridge::serve(
                &mut channel,
                stdin.lock(),
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )?;
            tracing::info!("serve finished: {:?}", stats);
        }
    }

    Ok(())
}

/// Load settings, apply CLI overrides, and bind the channel to a host platform
fn build_channel(args: &Args, project: &Path) -> color_eyre::Result<IntentChannel<HostPlatform>> {
    let mut settings = intent_bridge::load_settings(project, args.config.as_deref())?;
    if args.strict {
        settings.channel.failure_policy = FailurePolicy::Strict;
    }
    if let Some(locale) = args.locale {
        settings.notices.locale = locale;
    }
    if args.serial.is_some() {
        settings.adb.serial = args.serial.clone();
    }

    let platform = match HostPlatform::from_settings(&settings, args.dry_run) {
        Ok(platform) => platform,
        Err(e) if e.is_fatal() => {
            eprintln!("❌ {}", e);
            eprintln!("   {}", adb_unavailable_message());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(IntentChannel::from_settings(platform, &settings))
}
