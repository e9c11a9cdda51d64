use clap::{CommandFactory, Parser};
use gradebook::core::ConfigProvider;
use gradebook::utils::error::{ErrorSeverity, GradebookError};
use gradebook::utils::logger::{self, REPORTED_TARGET};
use gradebook::{CliConfig, GradebookEngine, LocalStorage};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            return exit_code(&e);
        }
    };

    logger::init_cli_logger(&config, cli.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let storage = LocalStorage::new(config.data_path());
    let mut engine = match GradebookEngine::open(storage) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(target: REPORTED_TARGET, "Failed to initialize gradebook: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            return exit_code(&e);
        }
    };

    let Some(command) = cli.command else {
        if let Err(e) = CliConfig::command().print_help() {
            tracing::error!("Cannot print help: {}", e);
        }
        return ExitCode::SUCCESS;
    };

    match engine.dispatch(&command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                target: REPORTED_TARGET,
                "Error in {}: {} (Category: {:?}, Severity: {:?})",
                command.name(),
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.user_friendly_message());
            return exit_code(&e);
        }
    }

    if let Err(e) = engine.persist() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        return exit_code(&e);
    }

    ExitCode::SUCCESS
}

fn exit_code(e: &GradebookError) -> ExitCode {
    match e.severity() {
        ErrorSeverity::Medium => ExitCode::from(2), // 已執行但未儲存
        ErrorSeverity::High => ExitCode::from(1),
    }
}
