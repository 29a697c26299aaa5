//! tendpatch agent
//!
//! Applies one patch task to the local host across apt, yum and zypper.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use kameo::actor::Spawn;
use kameo::error::SendError;
use tendpatch_core::{
    CoreError, PatchActor, PatchActorArgs, PatchRunner, PatchTaskConfig, RunPatchTask, TaskContext,
};
use tendpatch_exec::LocalExecutor;
use tendpatch_pkg::{Backend, CapabilityProber, PathProber, SystemUpdateExecutor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{Config, LogFormat};

#[derive(Parser)]
#[command(name = "tendpatch")]
#[command(about = "Apply OS package updates with apt, yum and zypper", long_about = None)]
struct Cli {
    /// Agent config file (overrides TENDPATCH_CONFIG and the default paths)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a patch task to this host
    Run {
        /// Patch task file (TOML); all defaults when omitted
        #[arg(long)]
        task: Option<PathBuf>,
        /// Simulate, whatever the task file says
        #[arg(long)]
        dry_run: bool,
        /// Abort after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Show which package backends are usable on this host
    Probe {
        /// Print the raw capability facts as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load_default(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Commands::Run {
            task,
            dry_run,
            timeout,
        } => run(&config, task.as_deref(), dry_run, timeout).await,
        Commands::Probe { json } => probe(json),
    }
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.agent.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.agent.log_format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(
    config: &Config,
    task_path: Option<&Path>,
    dry_run: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let mut task = match task_path {
        Some(path) => PatchTaskConfig::load(path)?,
        None => PatchTaskConfig::default(),
    };
    task.dry_run |= dry_run;

    let mut ctx = TaskContext::new();
    if let Some(secs) = timeout {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    let executor = SystemUpdateExecutor::new(Arc::new(LocalExecutor::new()), config.agent.use_sudo);
    let runner = PatchRunner::new(Arc::new(PathProber::from_env()), Arc::new(executor))
        .with_policy(config.retry.policy());
    let actor_ref = PatchActor::spawn(PatchActorArgs { runner });

    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling patch task");
            canceller.cancel();
        }
    });

    info!(dry_run = task.dry_run, "running patch task");
    let outcome = actor_ref.ask(RunPatchTask { task, ctx }).await;

    if let Err(e) = actor_ref.stop_gracefully().await {
        warn!(error = ?e, "patch actor did not stop cleanly");
    }

    match outcome {
        Ok(()) => {
            info!("patch task completed");
            Ok(())
        }
        Err(SendError::HandlerError(err)) => Err(err.into()),
        Err(err) => Err(CoreError::ActorError(format!("{err:?}")).into()),
    }
}

fn probe(json: bool) -> Result<()> {
    let capabilities = PathProber::from_env().capabilities();

    if json {
        println!("{}", serde_json::to_string_pretty(&capabilities)?);
        return Ok(());
    }

    let usable = capabilities.usable_backends();
    for backend in Backend::ALL {
        let status = if usable.contains(&backend) {
            "usable"
        } else {
            "not present"
        };
        let name = backend.to_string();
        println!("{name:<8} {status}");
    }
    if usable.is_empty() {
        println!("no supported package manager found; `run` would do nothing");
    }
    Ok(())
}
