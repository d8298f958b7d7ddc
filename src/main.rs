use anyhow::Result;
use clap::Parser;
use data_processing::cli::{execute_run, Cli, Commands, RunConfig};
use data_processing::logging::{default_filter, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(default_filter(cli.verbose, cli.quiet))?;

    let exit_code = match cli.command {
        Commands::Run {
            preset,
            workers,
            tasks,
            publish_timeout_ms,
            signal_timeout_ms,
            queue_capacity,
            min_delay_ms,
            max_delay_ms,
            format,
            strict,
        } => {
            let config = RunConfig {
                preset,
                workers,
                tasks,
                publish_timeout_ms,
                signal_timeout_ms,
                queue_capacity,
                min_delay_ms,
                max_delay_ms,
                format,
                strict,
                quiet: cli.quiet,
            };
            execute_run(config).await?
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
