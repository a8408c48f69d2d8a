use clap::Parser;
use flashcards_match::config::{AppConfig, BackendConfig};
use flashcards_match::database::SqliteStore;
use flashcards_match::services::{ApiClient, DataSource};
use flashcards_match::views::ViewContext;
use flashcards_match::{FlashcardApp, Route};
use eframe::egui;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flashcard-match", version, about = "Match flashcard questions to their answers")]
struct Cli {
    /// Config file (defaults to flashcard-match.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use this SQLite database
    #[arg(long, conflicts_with = "api")]
    db: Option<PathBuf>,

    /// Use the backend API at this base URL
    #[arg(long)]
    api: Option<String>,

    /// Screen to open first, e.g. /library, /folder/2 or /match/7
    #[arg(long, default_value = "/library")]
    route: String,

    /// Do not add sample decks to an empty database
    #[arg(long)]
    no_seed: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn open_source(backend: &BackendConfig) -> flashcards_match::Result<Arc<dyn DataSource>> {
    match backend {
        BackendConfig::Sqlite {
            path,
            seed_sample_data,
        } => {
            let store = SqliteStore::open(path)?;
            if *seed_sample_data {
                store.seed_sample_data()?;
            }
            info!("Database holds {} decks", store.deck_count()?);
            Ok(Arc::new(store))
        }
        BackendConfig::Http {
            base_url,
            timeout_secs,
        } => {
            let client = ApiClient::new(base_url, Duration::from_secs(*timeout_secs))?;
            info!("Using backend API at {}", client.base_url());
            Ok(Arc::new(client))
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.api.as_deref(), cli.db.as_deref(), cli.no_seed);

    let route = Route::parse(&cli.route)?;
    let source = open_source(&config.backend)?;
    let timings = config.feedback;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Flashcard Match",
        options,
        Box::new(move |cc| {
            let egui_ctx = cc.egui_ctx.clone();
            let ctx = ViewContext {
                source,
                timings,
                notify: Arc::new(move || egui_ctx.request_repaint()),
            };
            Ok(Box::new(FlashcardApp::new(route, ctx)))
        }),
    )?;

    Ok(())
}
