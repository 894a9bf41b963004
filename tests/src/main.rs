pub mod mock_store;
pub mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "integration-tests")]
#[command(about = "Integration and stress testing tool for the traffic accounting subsystem")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run integration scenarios
    Integration,
    /// Run the concurrency stress suite
    Stress {
        /// Number of concurrent writer tasks
        #[arg(short, long, default_value = "64")]
        tasks: usize,

        /// Increments performed by each task
        #[arg(short, long, default_value = "100000")]
        increments: u64,

        /// Output report file path
        #[arg(short, long, default_value = "stress-report.md")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = accounting::init_tracing(None, "integration-tests.log", "info");

    let cli = Cli::parse();

    match cli.command {
        Commands::Integration => {
            tracing::info!("Running integration scenarios");
            let results = integration_tests::run_all_tests().await?;
            if results.failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Stress {
            tasks,
            increments,
            output,
        } => {
            tracing::info!("Running stress suite: {} tasks x {} increments", tasks, increments);
            let results = stress_tests::run_stress_tests(tasks, increments).await?;
            report::generate_report(&results, &output)?;
            tracing::info!("Stress report generated: {}", output);
            if results.lost_updates > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
