use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "container_bench")]
#[command(about = "Benchmarks std container types across a fixed catalogue of operations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full benchmark catalogue and print or save the report
    Run {
        /// Base item count every case derives its parameters from
        #[arg(short, long, default_value = "5600")]
        items: i64,

        /// Output file path for the report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the report as pretty JSON instead of plain text
        #[arg(long)]
        json: bool,

        /// Force overwrite existing output file without warning
        #[arg(short, long)]
        force: bool,

        /// Suppress the progress ticker
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the benchmark catalogue in execution order
    Cases,
}
