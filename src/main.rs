//! PromptCraft binary entry point

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use promptcraft::cli::{self, Cli, Commands, RunContext};
use promptcraft_core::GenerationError;
use promptcraft_core::config::ConfigManager;
use promptcraft_core::config::api_keys::{get_api_key, load_dotenv};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,promptcraft=info,promptcraft_core=info";
const VERBOSE_LOG_FILTER: &str = "info,promptcraft=debug,promptcraft_core=debug";

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args).await {
        match err.downcast_ref::<GenerationError>() {
            Some(generation_error) => cli::render::print_generation_error(generation_error),
            None => eprintln!("{} {err:#}", style("Error:").red().bold()),
        }
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    load_dotenv();

    let workspace = std::env::current_dir().context("Failed to determine current directory")?;
    let manager = ConfigManager::load_with_override(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(path) = manager.config_path() {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }
    let config = manager.into_config();
    let api_sources = config.api.key_sources();
    let ctx = RunContext::new(config, args.model, args.temperature);

    match args.command.unwrap_or(Commands::Interactive) {
        Commands::Enhance(enhance) => {
            let api_key = get_api_key(&api_sources)?;
            cli::handle_enhance_command(&ctx, api_key, &enhance).await?;
        }
        Commands::Variations(enhance) => {
            let api_key = get_api_key(&api_sources)?;
            cli::handle_variations_command(&ctx, api_key, &enhance).await?;
        }
        Commands::Compose(enhance) => {
            cli::handle_compose_command(&ctx, &enhance).await?;
        }
        Commands::Presets => {
            cli::handle_presets_command()?;
        }
        Commands::Interactive => {
            let api_key = get_api_key(&api_sources)?;
            cli::handle_interactive_command(ctx, api_key).await?;
        }
        Commands::Init { force } => {
            cli::handle_init_command(&workspace, force)?;
        }
    }

    Ok(())
}
