mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::Console;
use mcsapi_api::{HttpServiceClient, PlayerUuid};
use mcsapi_core::commands::Argument;
use mcsapi_core::{
    IdentityCache, MojangResolver, PlayerTranslations, ServiceBridge, ServiceConfig, Translations,
};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// LCLPNetwork service console
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the config file. Missing keys are filled in with defaults.
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,

    /// Player to act as.
    #[arg(long)]
    player: Option<PlayerUuid>,

    /// Client locale used when the player has no network language.
    #[arg(long)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change the preferred network language.
    Language { lang: Option<String> },
    /// List the languages the network accepts.
    Languages,
    /// Request a link to connect the account on the website, or redeem a
    /// token from the website.
    Link { token: Option<String> },
    /// Show the statistics of the player or of another one given by name or uuid.
    Stats { target: Option<String> },
    /// Check whether the player is a network operator.
    Operator,
    /// List the players ranked highest by a property.
    Top {
        property: String,
        #[arg(default_value_t = 10)]
        count: u32,
    },
}

fn main() -> ExitCode {
    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "mcsapi.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("MCSAPI_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stderr))
        .with_env_filter(env_filter)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let config = ServiceConfig::load(&args.config)?;

    let translations = Arc::new(Translations::new(config.default_language.clone()));
    match translations.load_dir(&config.translations_dir) {
        Ok(count) => info!("Loaded {} translations", count),
        Err(err) => warn!("Translations unavailable: {:#}", err),
    }

    let cache = Arc::new(IdentityCache::new());
    let client = Arc::new(HttpServiceClient::new(
        &config.api_host,
        &config.api_token,
        config.request_timeout(),
    )?);
    let resolver = Arc::new(MojangResolver::new(config.request_timeout())?);
    let console = Arc::new(Console::new(
        PlayerTranslations::new(Arc::clone(&cache), translations),
        args.locale,
    ));
    let bridge = ServiceBridge::new(&config, client, cache, resolver, console.clone(), console);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(execute(&bridge, args.player, args.command))
}

async fn execute(bridge: &ServiceBridge, player: Option<PlayerUuid>, command: Command) -> Result<bool> {
    let player = || player.context("--player is required for this command");

    match command {
        Command::Language { lang } => {
            let player = player()?;
            if lang.is_some() {
                bridge.start().await;
            }
            run_command(bridge, "language", player, lang).await
        }
        Command::Languages => {
            if !bridge.start().await {
                return Ok(false);
            }
            for lang in bridge.cache().registered_languages().unwrap_or_default() {
                anstream::println!("{}", lang);
            }
            Ok(true)
        }
        Command::Link { token: None } => run_command(bridge, "mclink", player()?, None).await,
        Command::Link { token: Some(token) } => {
            let player = player()?;
            bridge.process_link_token(player, &token).await?;
            anstream::println!("{} linked", player.green());
            Ok(true)
        }
        Command::Stats { target } => run_command(bridge, "stats", player()?, target).await,
        Command::Operator => {
            let player = player()?;
            let operator = bridge.is_operator(player).await?;
            if operator {
                anstream::println!("{} is a network {}", player, "operator".green());
            } else {
                anstream::println!("{} is not a network operator", player);
            }
            Ok(true)
        }
        Command::Top { property, count } => {
            for (rank, record) in bridge.top(&property, count).await?.iter().enumerate() {
                anstream::println!("{:>3}. {}", (rank + 1).yellow(), record.uuid);
            }
            Ok(true)
        }
    }
}

async fn run_command(
    bridge: &ServiceBridge,
    name: &str,
    player: PlayerUuid,
    arg: Option<String>,
) -> Result<bool> {
    let args = arg.into_iter().map(Argument::from).collect();
    Ok(bridge.execute(name, player, args)?.await)
}
