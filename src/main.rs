use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use whisp_quest::application::{
    AnalysisCache, AnalyzeMoodUseCase, SpiritChatUseCase, SpiritGossipUseCase,
    SpiritProfileService, UpstreamHealth,
};
use whisp_quest::domain::ports::ChatPort;
use whisp_quest::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, ConfigSource, HuggingFaceClassifier, OpenAiChatClient,
    TextureCache, source_from_config,
};
use whisp_quest::presentation::{AppState, serve};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, ConfigSource)> {
    let args = CliArgs::parse();

    let loader = match ConfigLoader::new() {
        Ok(loader) => loader,
        Err(_) if args.config.is_some() => ConfigLoader::with_dir(PathBuf::from(".")),
        Err(e) => return Err(e).wrap_err("cannot locate configuration directory"),
    };
    let (mut config, source) = loader
        .load_config(args.config.as_deref())
        .wrap_err("failed to load configuration")?;
    config.merge_with_args(args);

    Ok((config, source))
}

fn build_state(config: &AppConfig) -> Result<AppState> {
    let upstream = &config.upstream;
    let timeout = Duration::from_secs(upstream.timeout_secs);

    let classifier = Arc::new(HuggingFaceClassifier::new(
        upstream.classifier_url.clone(),
        upstream.classifier_token.clone(),
        timeout,
    )?);
    let chat: Arc<dyn ChatPort> = Arc::new(OpenAiChatClient::new(
        upstream.openai_base_url.clone(),
        upstream.openai_model.clone(),
        upstream.openai_api_key.clone(),
        timeout,
    )?);

    let health = Arc::new(UpstreamHealth::new());
    let analysis_cache = Arc::new(AnalysisCache::new(
        config.analysis_cache.capacity,
        Duration::from_secs(config.analysis_cache.ttl_secs),
    ));
    let profiles = SpiritProfileService::new(Arc::clone(&chat), Arc::clone(&health));
    let textures = Arc::new(TextureCache::new(source_from_config(&config.textures)?));

    Ok(AppState {
        analyze: Arc::new(AnalyzeMoodUseCase::new(
            classifier,
            profiles,
            Arc::clone(&analysis_cache),
            Arc::clone(&health),
        )),
        gossip: Arc::new(SpiritGossipUseCase::new(Arc::clone(&chat))),
        chat: Arc::new(SpiritChatUseCase::new(chat, Arc::clone(&health))),
        analysis_cache,
        health,
        textures,
        openai_configured: config.openai_configured(),
    })
}

async fn preload_textures(cache: &TextureCache, locators: &[String]) {
    if locators.is_empty() {
        return;
    }
    match cache.preload(locators.iter().map(String::as_str)).await {
        Ok(()) => info!(count = cache.size(), "Textures preloaded"),
        Err(e) => warn!(error = %e, cached = cache.size(), "Texture preload incomplete"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let (config, config_source) = load_config()?;
    init_logging(&config)?;
    config_source.log();

    info!(version = whisp_quest::VERSION, "Starting {}", whisp_quest::NAME);
    if !config.openai_configured() {
        warn!("OPENAI_API_KEY is not set, spirits will use fixed dialogue");
    }

    let state = build_state(&config)?;
    preload_textures(&state.textures, &config.textures.preload).await;

    let addr = config
        .server
        .socket_addr()
        .wrap_err_with(|| format!("invalid bind address {}", config.server.host))?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    serve(listener, state).await?;

    Ok(())
}
