//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the generation session's
//! concurrency wrapper.

use crate::config::Config;
use crate::web::seed;
use seo_writer_core::{
    domain::GenerationSession,
    ports::{DocumentExporter, GenerationProvider, SettingsStore},
    repository::ArticleRepository,
    session::SessionMachine,
    settings::Settings,
};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

//=========================================================================================
// GenerationControl (the single writer session)
//=========================================================================================

/// The session machine plus the token of the attempt currently in flight.
pub struct GenerationControl {
    pub machine: SessionMachine,
    pub in_flight: Option<CancellationToken>,
}

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn GenerationProvider>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub settings_store: Arc<dyn SettingsStore>,
    pub generation: Mutex<GenerationControl>,
    pub session_tx: watch::Sender<GenerationSession>,
    pub articles: RwLock<ArticleRepository>,
    pub settings: RwLock<Settings>,
    /// Cancelled on shutdown; every attempt token is a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Builds the state, loading stored settings and seeding demo articles
    /// when configured. Unreadable stored settings fall back to defaults.
    pub async fn new(
        config: Arc<Config>,
        generator: Arc<dyn GenerationProvider>,
        exporter: Arc<dyn DocumentExporter>,
        settings_store: Arc<dyn SettingsStore>,
    ) -> Arc<Self> {
        let settings = match settings_store.load().await {
            Ok(Some(settings)) => {
                info!("Loaded stored settings.");
                settings
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("Ignoring stored settings: {}", e);
                Settings::default()
            }
        };

        let mut articles = ArticleRepository::new();
        if config.seed_demo_articles {
            let seeded = seed::seed_demo_articles(&mut articles);
            info!("Seeded {} demo articles.", seeded);
        }

        let (session_tx, _) = watch::channel(GenerationSession::default());

        Arc::new(Self {
            config,
            generator,
            exporter,
            settings_store,
            generation: Mutex::new(GenerationControl {
                machine: SessionMachine::new(),
                in_flight: None,
            }),
            session_tx,
            articles: RwLock::new(articles),
            settings: RwLock::new(settings),
            shutdown: CancellationToken::new(),
        })
    }

    /// Pushes a session snapshot to every subscriber.
    pub fn publish(&self, session: &GenerationSession) {
        self.session_tx.send_replace(session.clone());
    }
}
