use clap::Parser;
use itu_compliance::cli::{Args, commands};
use itu_compliance::report;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Polars display settings go into the environment before any thread is spawned
    report::apply_table_format();

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    // Run the command, racing it against Ctrl-C
    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, aborting compliance run");
                Err(anyhow::anyhow!("Run interrupted by user"))
            }
        }
    });

    // Exit with appropriate code
    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
