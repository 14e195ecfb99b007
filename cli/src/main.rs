//! CLI entrypoint for assistant-dispatch
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use dispatch_application::{LlmGateway, ResolveTurnInput, ResolveTurnUseCase};
use dispatch_domain::{ToolSchemaCompiler, validate_catalog};
use dispatch_infrastructure::{
    ConfigLoader, FileConfig, FixtureGateway, JsonlConversationLogger, ProviderKind, load_catalog,
    load_history,
};
use dispatch_presentation::{Cli, ConsoleFormatter, OutputFormat};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Failed to load configuration")?
    };

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        println!();
        println!(
            "{}",
            toml::to_string_pretty(&config).context("Failed to render configuration")?
        );
        return Ok(());
    }

    let resolver_config = config
        .to_resolver_config()
        .context("Invalid configuration")?;

    // === Catalog ===
    let tasks = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => Vec::new(),
    };

    let issues = validate_catalog(&tasks);
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_issues(&issues));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Task catalog has errors");
    }

    if cli.schema_only {
        let compiled = ToolSchemaCompiler::new(resolver_config.required_policy).compile(&tasks);
        println!("{}", ConsoleFormatter::format_schema(&compiled));
        return Ok(());
    }

    let message = match cli.message.clone() {
        Some(m) => m,
        None => bail!("A message is required. Use --schema-only to only compile the catalog."),
    };

    let history = match &cli.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };

    // === Dependency Injection ===
    let gateway = build_gateway(&cli, &config)?;

    let mut use_case = ResolveTurnUseCase::new(gateway, resolver_config);
    if !config.resolver.recovery {
        use_case = use_case.with_recovery_strategies(Vec::new());
    }
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!("Conversation log: {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling turn");
            ctrl_c.cancel();
        }
    });

    let input = ResolveTurnInput::new(config.assistant.to_context(), message)
        .with_tasks(tasks)
        .with_history(history);

    match use_case.execute_with_cancellation(input, &cancel).await {
        Ok(reply) => {
            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_reply(&reply)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_reply_json(&reply)),
            }
            Ok(())
        }
        Err(e) => {
            match cli.output {
                OutputFormat::Text => eprint!("{}", ConsoleFormatter::format_failure(&e)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_failure_json(&e)),
            }
            std::process::exit(1);
        }
    }
}

fn build_gateway(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn LlmGateway>> {
    if let Some(path) = &cli.fixture {
        return Ok(Arc::new(FixtureGateway::from_file(path)));
    }

    match config.provider.kind {
        ProviderKind::Fixture => match &config.provider.fixture.path {
            Some(path) => Ok(Arc::new(FixtureGateway::from_file(path))),
            None => bail!("provider.kind = \"fixture\" requires provider.fixture.path"),
        },
        ProviderKind::Gemini => gemini_gateway(config),
    }
}

#[cfg(feature = "gemini")]
fn gemini_gateway(config: &FileConfig) -> Result<Arc<dyn LlmGateway>> {
    Ok(Arc::new(dispatch_infrastructure::GeminiGateway::new(
        &config.provider.gemini,
    )))
}

#[cfg(not(feature = "gemini"))]
fn gemini_gateway(_config: &FileConfig) -> Result<Arc<dyn LlmGateway>> {
    bail!("This build has no Gemini support. Rebuild with `--features gemini` or use --fixture.")
}
