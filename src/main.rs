use recipebox::app::AppContext;
use recipebox::cli::{parse_args, run_cli_command, usage, CliCommand};
use recipebox::config::ClientConfig;
use recipebox::logging::init_tracing;

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = parse_args(std::env::args());
    if let CliCommand::Invalid(reason) = &command {
        eprintln!("error: {}\n\n{}", reason, usage());
        std::process::exit(2);
    }

    let config = ClientConfig::from_env();
    tracing::debug!("Using API at {}", config.base_url);
    let context = AppContext::production(config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let output = runtime.block_on(run_cli_command(command, &context))?;
    print!("{}", output);
    Ok(())
}
