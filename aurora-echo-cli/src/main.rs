use anyhow::Result;
use aurora_echo_orchestrations::PromotionError;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod prompt;

use cli::{Args, Mode};
use commands::promote::PromoteArgs;
use config::Config;

/// Initialize tracing to `<home>/echo.log`. Stdout belongs to the operator
/// echo lines, so nothing is logged there.
fn initialize_tracing(home: &Path) -> Result<WorkerGuard> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,\
         aurora_echo_cli=debug,\
         aurora_echo_orchestrations=debug"
            .into()
    });

    std::fs::create_dir_all(home)?;
    let file_appender = tracing_appender::rolling::never(home, "echo.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_writer(file_writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(args: Args, config: &Config) -> Result<()> {
    match args.mode {
        Mode::Promote {
            aws_account_number,
            region,
            managed_name,
            hosted_zone_ids,
            record_set,
            ttl,
            interactive,
        } => {
            let args = PromoteArgs {
                aws_account_number,
                region,
                managed_name,
                hosted_zone_ids,
                record_set,
                ttl,
                interactive,
            };
            commands::promote::run_promote(config, args).await
        }
        Mode::Status {
            aws_account_number,
            region,
            managed_name,
            output,
        } => commands::status::run_status(config, aws_account_number, region, managed_name, output).await,
    }
}

/// Exit code for a failed run: the promotion error's own code, 2 otherwise
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PromotionError>()
        .map_or(2, PromotionError::exit_code)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::from(2);
        }
    };

    // Dropping the guard stops file logging
    let _guard = match initialize_tracing(&config.home) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: file logging disabled ({}): {:#}", config.home.display(), err);
            None
        }
    };

    match run(args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{:#}", err), "Command failed");
            match err.downcast_ref::<PromotionError>() {
                Some(promotion) => eprintln!("{}: {}", promotion.kind(), promotion),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::from(exit_code(&err))
        }
    }
}
