use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fleet_launch::{
    Builder, Result,
    config::EnvSnapshot,
    descriptor::FleetDescriptor,
    template::ShareDir,
    topology::TopologyBuilder,
};

#[derive(Parser)]
#[command(name = "fleet-launch")]
#[command(about = "Resolve the robot fleet launch topology from the environment")]
struct Cli {
    /// Override the package share directory
    #[arg(long, value_name = "DIR")]
    share_dir: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_logger(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fleet_launch=debug")
    } else {
        EnvFilter::new("fleet_launch=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let snapshot = EnvSnapshot::capture();
    let descriptor = FleetDescriptor::parse(&snapshot)?;

    let mut builder = TopologyBuilder::new(descriptor);
    if let Some(dir) = cli.share_dir {
        builder = builder.with_share_dir(ShareDir::new(dir));
    }
    let plan = builder.build()?;

    let rendered = if cli.compact {
        plan.to_json()?
    } else {
        plan.to_json_pretty()?
    };
    println!("{rendered}");
    Ok(())
}
