//! Area calculator binary.
//!
//! Runs the gRPC server (`run`, the default), validates configuration (`check`),
//! or acts as a client against a running server (`calculate`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use area_calculator::config::{AppConfig, CliOverrides};
use area_calculator::{host, logging};
use area_calculator_sdk::{
    AreaCalculatorClientV1, AreaCalculatorGrpcClient, GrpcClientConfig, ShapeMessage,
};

/// Area Calculator - gRPC service computing areas of geometric shapes
#[derive(Parser)]
#[command(name = "area-calculator")]
#[command(about = "Area Calculator - gRPC service computing areas of geometric shapes")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run {
        /// Listen address override, e.g. 0.0.0.0:50051
        #[arg(long)]
        listen: Option<String>,
    },
    /// Validate configuration and exit
    Check,
    /// Send shapes to a running server and print their areas
    Calculate {
        /// Server URI
        #[arg(long, default_value = "http://127.0.0.1:50051")]
        endpoint: String,

        /// Send all shapes in one CalculateMulti call
        #[arg(long)]
        multi: bool,

        /// Connect timeout and per-call deadline in milliseconds
        #[arg(long, default_value_t = 1000)]
        timeout_ms: u64,

        /// Shapes as <kind>=<dims>, e.g. square=3 rectangle=3,4 triangle=3,4,5
        #[arg(required = true, num_args = 1..)]
        shapes: Vec<ShapeMessage>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let listen = match &cli.command {
        Some(Commands::Run { listen }) => listen.clone(),
        _ => None,
    };

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        listen,
        verbose: cli.verbose,
    });

    logging::init_logging(&config.logging);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run { listen: None }) {
        Commands::Run { .. } => host::run(&config).await,
        Commands::Check => check_config(&config),
        Commands::Calculate {
            endpoint,
            multi,
            timeout_ms,
            shapes,
        } => calculate(endpoint, multi, Duration::from_millis(timeout_ms), shapes).await,
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.listen_socket_addr()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

/// Client settings for `calculate`: `timeout` bounds both the connect and each
/// call, with no retries.
fn cli_client_config(timeout: Duration) -> GrpcClientConfig {
    GrpcClientConfig::new("area-calculator-cli")
        .with_connect_timeout(timeout)
        .with_rpc_timeout(timeout)
        .with_max_retries(0)
}

async fn calculate(
    endpoint: String,
    multi: bool,
    timeout: Duration,
    shapes: Vec<ShapeMessage>,
) -> Result<()> {
    let client = AreaCalculatorGrpcClient::connect(endpoint, cli_client_config(timeout)).await?;

    let areas = if multi {
        tracing::info!(count = shapes.len(), "requesting areas for multiple shapes");
        client.calculate_multi(shapes).await?.value
    } else {
        let mut areas = Vec::with_capacity(shapes.len());
        for shape in shapes {
            tracing::info!(shape = %shape, "requesting area for one shape");
            areas.extend(client.calculate_one(shape).await?.value);
        }
        areas
    };

    for area in areas {
        println!("Area: {area}");
    }
    Ok(())
}
