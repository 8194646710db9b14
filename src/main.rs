//! gpubus CLI - manual driver for the GPU management daemon.
//!
//! Exposes each daemon operation as a subcommand, for bring-up and
//! debugging against a live (or staging) daemon. Overrides acquired by
//! this process are dropped when it exits.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

use gpubus::GpubusError;
use gpubus::config::Config;
use gpubus::services::gpu::{ConfigId, ConfigRegister, DeviceId, GpuError, GpuService, GpuServiceConfig};
use gpubus::tracing_config;

#[derive(Parser)]
#[command(name = "gpubus", version, about = "Client for the GPU management daemon")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to the gpubus log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Acquire a frequency override for a device
    Acquire {
        /// Device index
        device: u32,
    },
    /// Apply a min/max/boost frequency override, in MHz
    ///
    /// Acquires the override first when this process does not hold one.
    SetFreq {
        /// Device index
        device: u32,
        /// Minimum frequency
        min: u32,
        /// Maximum frequency
        max: u32,
        /// Boost frequency
        boost: u32,
    },
    /// Force a device back to daemon frequency control
    ///
    /// A fresh process never holds an override, so this acquires one
    /// first and then releases it, clearing any lingering override for
    /// the device.
    Release {
        /// Device index
        device: u32,
    },
    /// Register a performance configuration from a register file
    Register {
        /// Device index
        device: u32,
        /// Configuration UUID
        uuid: String,
        /// TOML file with mux/boolean/flex register lists
        file: PathBuf,
    },
    /// Unregister a performance configuration
    Unregister {
        /// Device index
        device: u32,
        /// Configuration id returned by register
        config: u32,
    },
    /// Show daemon availability and the configured endpoint
    Status {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Register lists as laid out in a configuration file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RegisterFile {
    mux: Vec<RegisterEntry>,
    boolean: Vec<RegisterEntry>,
    flex: Vec<RegisterEntry>,
}

#[derive(Debug, Deserialize)]
struct RegisterEntry {
    offset: u32,
    value: u32,
}

impl RegisterEntry {
    fn to_registers(entries: &[RegisterEntry]) -> Vec<ConfigRegister> {
        entries
            .iter()
            .map(|entry| ConfigRegister::new(entry.offset, entry.value))
            .collect()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _guard = if cli.log_file {
        Some(tracing_config::init_with_file()?)
    } else {
        tracing_config::init()?;
        None
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let gpu = GpuService::start(GpuServiceConfig::from(&config)).await?;

    if let Err(error) = run_command(&gpu, &config, cli.command).await {
        eprintln!("error: {error}");
        let transient = error
            .downcast_ref::<GpuError>()
            .is_some_and(GpuError::suggests_retry);
        if transient {
            eprintln!("the failure looks transient; retrying may succeed");
        }
        process::exit(1);
    }

    Ok(())
}

async fn run_command(
    gpu: &GpuService,
    config: &Config,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Acquire { device } => {
            gpu.acquire_frequency_override(DeviceId(device)).await?;
            info!(device, "frequency override acquired");
        }
        Command::SetFreq {
            device,
            min,
            max,
            boost,
        } => {
            let device = DeviceId(device);
            if !gpu.is_frequency_acquired(device).await {
                gpu.acquire_frequency_override(device).await?;
            }
            gpu.set_frequency(device, min, max, boost).await?;
            info!(%device, min, max, boost, "frequency override applied");
        }
        Command::Release { device } => {
            let device = DeviceId(device);
            if !gpu.is_frequency_acquired(device).await {
                gpu.acquire_frequency_override(device).await?;
            }
            gpu.release_frequency_override(device).await?;
            info!(%device, "frequency override released");
        }
        Command::Register { device, uuid, file } => {
            let registers = load_register_file(&file)?;
            let config_id = gpu
                .register_configuration(
                    DeviceId(device),
                    &uuid,
                    &RegisterEntry::to_registers(&registers.mux),
                    &RegisterEntry::to_registers(&registers.boolean),
                    &RegisterEntry::to_registers(&registers.flex),
                )
                .await?;
            println!("{config_id}");
        }
        Command::Unregister { device, config } => {
            gpu.unregister_configuration(DeviceId(device), ConfigId(config)).await?;
            info!(device, config, "performance configuration unregistered");
        }
        Command::Status { json } => {
            let available = gpu.query_service_available().await;
            if json {
                let status = serde_json::json!({
                    "available": available,
                    "bus": config.bus.kind,
                    "service": config.bus.service,
                    "manager_path": config.bus.manager_path,
                });
                println!("{status}");
            } else {
                println!(
                    "daemon {} at {} ({:?} bus): {}",
                    config.bus.service,
                    config.bus.manager_path,
                    config.bus.kind,
                    if available { "available" } else { "unavailable" }
                );
            }
        }
    }

    Ok(())
}

fn load_register_file(path: &PathBuf) -> Result<RegisterFile, GpubusError> {
    let contents = fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| GpubusError::toml_parse(e, Some(path.as_path())))
}
