//! ChatPy terminal client entry point.
//!
//! Binary name: `chatpy`
//!
//! Parses CLI arguments, sets up tracing, then runs the interactive chat
//! widget against the configured backend.

mod cli;

use clap::Parser;
use clap_complete::generate;

use chatpy_observe::tracing_setup::{directives_for_verbosity, init_tracing, shutdown_tracing};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(directives_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Chat {
            base_url,
            config,
            timeout,
        } => {
            let settings = cli::chat::settings::ChatSettings {
                base_url,
                config_path: config,
                timeout_secs: timeout,
            };
            cli::chat::loop_runner::run_chat(settings).await
        }

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "chatpy", &mut std::io::stdout());
            Ok(())
        }
    };

    shutdown_tracing();
    result
}
