//! twarc-user - account metadata from an export archive
//!
//! `aggregate` reads an unpacked export directory and writes the merged
//! record as a JSON snapshot. `summary` merges snapshots and prints the
//! derived view.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use twarc_common::config::load_config;
use twarc_common::logging::init_logging;
use twarc_common::DirArchive;
use twarc_user::{Aggregator, UserData, UserLoadObject};

/// Command-line arguments for twarc-user
#[derive(Parser, Debug)]
#[command(name = "twarc-user")]
#[command(about = "Merge export-archive account metadata into one record")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to $TWARC_CONFIG, then the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides RUST_LOG and the config file)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate an unpacked export directory into a JSON snapshot
    Aggregate {
        /// Export directory (defaults to `archive_dir` from the config file)
        archive_dir: Option<PathBuf>,

        /// Write the snapshot here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge snapshots in order and print the resulting record's summary
    Summary {
        /// Snapshot or partial-load JSON files, applied left to right
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, origin) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_logging(args.log_level.as_deref(), &config.logging)?;
    origin.log();

    match args.command {
        Command::Aggregate { archive_dir, output } => {
            let archive_dir = archive_dir
                .or(config.archive_dir.clone())
                .context("No archive directory given and none configured")?;
            info!("Aggregating archive at {}", archive_dir.display());

            let archive = DirArchive::new(&archive_dir);
            let (user, report) = Aggregator::new(config.aggregation).run(&archive).await;
            for category in report.defaulted() {
                warn!(
                    extractor = category.extractor,
                    category = category.category,
                    "Category defaulted"
                );
            }

            let json = serde_json::to_string_pretty(&user.dump())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Snapshot written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Summary { snapshots } => {
            let mut user = UserData::new();
            for path in &snapshots {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let part: UserLoadObject = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                user.load_part(part)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
            }

            print_summary(&user);
        }
    }

    Ok(())
}

fn print_summary(user: &UserData) {
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();

    println!("screen name:      {}", user.screen_name());
    println!("display name:     {}", user.name());
    println!("id:               {}", user.id());
    println!("email:            {}", or_dash(user.email_address()));
    println!("phone:            {}", or_dash(user.phone_number()));
    println!("timezone:         {}", or_dash(user.timezone()));
    println!("creation ip:      {}", or_dash(user.account_creation_ip()));
    println!("verified:         {}", user.verified());
    println!("age:              {:?}", user.age().age);
    println!("screen names:     {}", user.screen_name_history().len());
    println!("applications:     {}", user.authorized_applications().len());
    println!("login ips:        {}", user.last_logins().len());
    println!(
        "devices:          {} push, {} messaging",
        user.devices().push_devices.len(),
        user.devices().messaging_devices.len()
    );
    println!(
        "interests:        {}",
        user.personalization().interests.names.len()
    );
}
