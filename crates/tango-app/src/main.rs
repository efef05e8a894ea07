use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tango_app::profile::{
    add_profile_from_default, data_root, init_user_config, load_user_profile, state_dir,
};
use tango_app::{AppController, AppState};
use tango_config::Config;
use tango_core::{FileStore, Persistence};
use tango_generator::GeminiClient;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tango", about = "Vocabulary flashcards generated on demand")]
struct Args {
    /// Profile to load from the profiles folder
    #[arg(long, default_value = "main")]
    profile: String,

    /// Use this folder instead of the per-user data folder
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Forget saved cards, position and timer before starting
    #[arg(long)]
    reset: bool,

    /// Do not request illustrations
    #[arg(long)]
    no_images: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

fn load_config(args: &Args, root: &std::path::Path) -> anyhow::Result<Config> {
    init_user_config(root)?;

    let profile_file = root.join("profiles").join(format!("{}.json", args.profile));
    if !profile_file.exists() {
        add_profile_from_default(root, &args.profile)?;
    }

    let mut config = load_user_profile(root, &args.profile)?;
    config.apply_env();
    if args.no_images {
        config.generator.images_enabled = false;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing();

    let root = data_root(args.data_dir.as_deref());
    let config = load_config(&args, &root)?;
    config.validate().context("Cannot start")?;

    let client = Arc::new(GeminiClient::new(&config.generator)?);

    let anki_client = if config.anki.enabled {
        let client = tango_anki::AnkiConnectClient::new(config.anki.url.clone());
        match tango_anki::check_deck(&client, &config.anki.deck).await {
            Ok(true) => tracing::info!("AnkiConnect ready, deck '{}'", config.anki.deck),
            Ok(false) => tracing::warn!("Anki deck '{}' does not exist yet", config.anki.deck),
            Err(e) => tracing::warn!("AnkiConnect not reachable: {}", e),
        }
        Some(client)
    } else {
        None
    };

    let store_dir = state_dir(&root, &args.profile, &config);
    let reset = args.reset;
    let state = tokio::task::spawn_blocking(move || -> anyhow::Result<AppState> {
        let persistence = Persistence::new(
            FileStore::open(&store_dir, config.storage.quota_bytes)?,
            config.storage.image_window,
        );
        if reset {
            persistence.clear()?;
            tracing::info!("Cleared saved progress in {}", store_dir.display());
        }
        Ok(AppState::new(config, persistence))
    })
    .await??;
    let state = Arc::new(state);
    let controller = AppController::new(state);
    let mut tasks = controller
        .spawn_tasks(client.clone(), client, anki_client)
        .await;

    let failed = tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            false
        }
        result = tasks.join_next() => match result {
            Some(Ok(Ok(()))) => {
                tracing::info!("Task finished, shutting down");
                false
            }
            Some(Ok(Err(e))) => {
                tracing::error!("Task failed: {e:#}");
                true
            }
            Some(Err(e)) => {
                tracing::error!("Task panicked: {e}");
                true
            }
            None => false,
        },
    };

    controller.shutdown();
    tasks.abort_all();

    // The stdin reader may still be parked in a blocking read
    std::process::exit(if failed { 1 } else { 0 });
}
