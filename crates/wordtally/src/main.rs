//! wordtally CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use wordtally::{Cli, Commands, GlobalArgs, commands};
use wordtally_core::Config;
use wordtally_core::config::ConfigSources;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.global.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(command) = cli.command else {
        return Ok(());
    };

    let (config, sources) = cli.global.load_config()?;
    let _guard = init_logging(&cli.global, &config)?;
    tracing::debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        json = cli.global.json,
        config_files = sources.files().count(),
        "starting"
    );

    let result = dispatch(command, &cli.global, &config, &sources);
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

fn init_logging(
    global: &GlobalArgs,
    config: &Config,
) -> anyhow::Result<observability::ObservabilityGuard> {
    let settings = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf()),
    );
    let file_level = global.log_level.unwrap_or(config.log_level);
    observability::init_observability(
        &settings,
        observability::console_filter(global.quiet, global.verbose),
        observability::env_filter(global.quiet, global.verbose, file_level.as_str()),
    )
    .context("failed to initialize logging")
}

fn dispatch(
    command: Commands,
    global: &GlobalArgs,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let top = config.top_words;
    let max_input = config.input_limit();
    match command {
        Commands::Analyze(args) => commands::analyze::cmd_analyze(args, global.json, top, max_input),
        Commands::Shell(args) => commands::shell::cmd_shell(args, top, max_input),
        Commands::Info(args) => commands::info::cmd_info(args, global.json, config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to create async runtime for MCP server")?
            .block_on(commands::serve::cmd_serve(args, config)),
    }
}
