use anyhow::Result;
use clap::Parser;
use container_bench::cli::args::{Cli, Commands};
use container_bench::cli::commands::cases::execute_cases;
use container_bench::cli::commands::run::{execute_run, RunConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            items,
            output,
            json,
            force,
            quiet,
        } => {
            execute_run(RunConfig {
                items,
                output,
                json,
                force,
                quiet,
            })
            .await
        }
        Commands::Cases => execute_cases(),
    }
}
