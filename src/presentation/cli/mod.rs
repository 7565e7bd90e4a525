pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "schedulerd")]
#[command(author = "Scheduler Core Team")]
#[command(version = "0.1.0")]
#[command(about = "Cluster workload manager scheduling core", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run one dispatch pass over the pending queue")]
    Schedule {
        #[arg(long, default_value_t = 100, help = "Max queue entries considered this pass")]
        job_limit: usize,
    },

    #[command(about = "Build and print the current job queue without dispatching")]
    Queue {
        #[arg(long, help = "Zero out each pending job's start-time bookkeeping before evaluating it")]
        clear_start: bool,
    },

    #[command(subcommand, about = "Inspect or rewrite a job's dependency list")]
    Dependency(DependencyCommand),

    #[command(about = "Parse and validate a feature constraint expression")]
    Feature {
        #[arg(help = "Raw constraint expression, e.g. gpu&ssd*2")]
        constraint: String,
    },

    #[command(about = "Predict when a pending job would start")]
    WillRun {
        #[arg(help = "Job id to predict a start time for")]
        job_id: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum DependencyCommand {
    #[command(about = "Replace a job's dependency list")]
    Update {
        job_id: u32,
        #[arg(help = "Comma-separated dependency list, e.g. afterok:3,after:4")]
        spec: String,
    },
    #[command(about = "Report whether a job's dependencies are currently satisfied")]
    Test { job_id: u32 },
    #[command(about = "Print a job's dependency list in canonical form")]
    Show { job_id: u32 },
}
