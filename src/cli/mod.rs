//! Command-line interface for dna-analyzer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **serve**: Start the HTTP analysis service
//! - **analyze**: Analyze a single sequence locally and print the result
//!
//! ## Usage
//!
//! ```text
//! # Start the service on 0.0.0.0:8000
//! dna-analyzer serve
//!
//! # Analyze one sequence, JSON output
//! dna-analyzer analyze ACGTTGCA --format json
//!
//! # Pipe a sequence in, reproducible predictions, no simulated latency
//! echo acgt | dna-analyzer analyze - --seed 42 --latency-ms 0
//! ```

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{
    BackendConfig, ServiceConfig, DEFAULT_ADDRESS, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT,
};

pub mod analyze;

#[derive(Parser)]
#[command(name = "dna-analyzer")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Analyze DNA sequences with a pluggable scoring backend")]
#[command(
    long_about = "dna-analyzer validates a nucleotide sequence, computes sequence metrics such as GC content, and asks a scoring backend for predictive annotations.\n\nWithout a loadable model the service runs in mock mode, returning randomized placeholder predictions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(ServeArgs),

    /// Analyze a single sequence and print the result
    Analyze(analyze::AnalyzeArgs),
}

/// Options shared by every command that initializes a scoring backend
#[derive(clap::Args, Clone, Debug)]
pub struct BackendArgs {
    /// Scoring model to load; without one the mock backend is used
    #[arg(long)]
    pub model: Option<String>,

    /// Seed for the mock backend's random predictions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated inference latency of the mock backend, in milliseconds
    #[arg(long, default_value = "500")]
    pub latency_ms: u64,
}

impl BackendArgs {
    #[must_use]
    pub fn to_config(&self) -> BackendConfig {
        BackendConfig {
            model: self.model.clone(),
            seed: self.seed,
            mock_latency: Duration::from_millis(self.latency_ms),
        }
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, env = "HOST", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    #[command(flatten)]
    pub backend: BackendArgs,

    /// Maximum time for a single backend call, in seconds
    #[arg(long, default_value = "10")]
    pub backend_timeout_secs: u64,

    /// Maximum time for a whole HTTP request, in seconds
    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    /// Maximum number of requests processed concurrently
    #[arg(long, default_value = "100")]
    pub max_concurrency: usize,
}

impl ServeArgs {
    #[must_use]
    pub fn to_config(&self) -> ServiceConfig {
        ServiceConfig {
            address: self.address.clone(),
            port: self.port,
            backend: self.backend.to_config(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            backend_timeout: Duration::from_secs(self.backend_timeout_secs),
            max_concurrency: self.max_concurrency.max(1),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
