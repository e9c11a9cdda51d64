use anyhow::Context;
use clap::Parser;
use gradebook::core::seed::sample_service;
use gradebook::core::{ConfigProvider, Storage};
use gradebook::utils::logger;
use gradebook::{GradebookConfig, LocalStorage};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Populate the gradebook with sample data")]
struct Args {
    /// Path to a TOML configuration file (defaults to gradebook.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Gradebook data file to write (overrides the configuration file)
    #[arg(long)]
    data_file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = GradebookConfig::resolve(args.config.as_deref(), args.data_file.as_deref(), None)
        .context("Failed to resolve configuration")?;

    logger::init_cli_logger(&config, args.verbose);

    println!("Creating sample gradebook data...");
    let document = sample_service()?.to_document();

    let storage = LocalStorage::new(config.data_path());
    storage
        .save(&document)
        .context("Failed to save sample data")?;

    println!("Sample data created successfully!");
    println!("Created {} students", document.students.len());
    println!("Created {} courses", document.courses.len());
    println!("Created {} enrollments", document.enrollments.len());
    println!("Data saved to {}", storage.location().display());

    Ok(())
}
