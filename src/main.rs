use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use scheduler_core::presentation::cli::commands::{
    DependencyShowCommand, DependencyTestCommand, DependencyUpdateCommand, FeatureCommand,
    QueueCommand, ScheduleCommand, WillRunCommand,
};
use scheduler_core::presentation::cli::{Cli, Commands, DependencyCommand};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("scheduler_core=debug,info")
    } else {
        EnvFilter::new("scheduler_core=info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Schedule { job_limit } => ScheduleCommand::execute(job_limit).await,
        Commands::Queue { clear_start } => QueueCommand::execute(clear_start).await,
        Commands::Dependency(DependencyCommand::Update { job_id, spec }) => {
            DependencyUpdateCommand::execute(job_id, &spec).await
        }
        Commands::Dependency(DependencyCommand::Test { job_id }) => {
            DependencyTestCommand::execute(job_id).await
        }
        Commands::Dependency(DependencyCommand::Show { job_id }) => {
            DependencyShowCommand::execute(job_id).await
        }
        Commands::Feature { constraint } => FeatureCommand::execute(&constraint).await,
        Commands::WillRun { job_id } => WillRunCommand::execute(job_id).await,
    }
}
