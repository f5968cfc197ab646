use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use fenceline::commands;
use fenceline::config::Config;
use fenceline::cost::{FenceCondition, RanchProfile};

#[derive(Parser)]
#[command(name = "fenceline")]
#[command(
  about = "Fenceline - Virtual Fencing Assistant\nLifetime cost comparison and answers for GPS-collar livestock containment"
)]
#[command(version)]
struct Cli {
  /// Path to a JSON rates file overriding the built-in calibration constants
  #[arg(short, long, global = true, env = "FENCELINE_CONFIG")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

/// Ranch parameters for a comparison
#[derive(Args)]
struct ProfileArgs {
  /// Ranch size in acres
  #[arg(long)]
  acres: f64,
  /// Miles of exterior fencing
  #[arg(long)]
  fence_miles: f64,
  /// Number of cattle to collar
  #[arg(long, default_value_t = 0.0)]
  cattle: f64,
  /// Condition of the existing fence
  #[arg(long, value_enum, default_value_t = FenceCondition::Good)]
  condition: FenceCondition,
  /// Whether the ranch runs rotational grazing
  #[arg(long)]
  rotational: bool,
  /// Current annual fence maintenance spend in dollars
  #[arg(long, default_value_t = 0.0)]
  maintenance: f64,
}

impl ProfileArgs {
  fn into_profile(self) -> RanchProfile {
    RanchProfile {
      ranch_size_acres: self.acres,
      exterior_fence_miles: self.fence_miles,
      cattle_count: self.cattle,
      fence_condition: self.condition,
      uses_rotational_grazing: self.rotational,
      annual_maintenance_cost: self.maintenance,
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Ask a free-text question about virtual fencing
  Ask {
    /// Question text (space-separated)
    #[arg(required = true)]
    query: Vec<String>,
  },
  /// Compare lifetime costs of virtual vs. metal fencing
  Compare {
    #[command(flatten)]
    profile: ProfileArgs,
  },
  /// List the canned question topics
  Topics,
  /// Show one canned answer by its exact title
  Show {
    /// Entry title, e.g. "Cost of VF"
    title: String,
  },
}

fn run(cli: Cli) -> Result<()> {
  let config = Config::load(cli.config.as_deref())?;

  match cli.command {
    Commands::Ask { query } => commands::ask(&query),
    Commands::Compare { profile } => commands::compare(&profile.into_profile(), &config),
    Commands::Topics => commands::topics(),
    Commands::Show { title } => commands::show(&title),
  }
}

fn main() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

  let cli = Cli::parse();

  if let Err(e) = run(cli) {
    drover::error(&format!("{e:#}"));
    std::process::exit(1);
  }
}
