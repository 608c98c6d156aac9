use std::sync::Arc;

use log::info;

use storage::repository::{KeyValueStore, Storage};

use crate::catalog::QuestionCatalog;
use crate::error::AppServicesError;
use crate::narration::SpeechEngine;
use crate::player::{PlayerConfig, QuizPlayer};
use crate::preferences::PreferencesService;
use crate::Clock;

/// Assembles the catalog and preferences a front-end needs.
#[derive(Clone)]
pub struct AppServices {
    catalog: QuestionCatalog,
    preferences: PreferencesService,
    clock: Clock,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the bank
    /// has no usable questions.
    pub async fn new_sqlite(
        db_url: &str,
        bank_text: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        info!("[DB] Preferences stored at {db_url}");
        Self::assemble(&storage, bank_text, clock)
    }

    /// Build services over a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::EmptyBank` if the bank has no usable questions.
    pub fn in_memory(bank_text: &str, clock: Clock) -> Result<Self, AppServicesError> {
        Self::assemble(&Storage::in_memory(), bank_text, clock)
    }

    fn assemble(storage: &Storage, bank_text: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = QuestionCatalog::from_text(bank_text);
        if catalog.is_empty() {
            return Err(AppServicesError::EmptyBank);
        }
        let kv: Arc<dyn KeyValueStore> = Arc::clone(&storage.kv);

        Ok(Self {
            catalog,
            preferences: PreferencesService::new(kv),
            clock,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn preferences(&self) -> PreferencesService {
        self.preferences.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Create a player that speaks through `engine`.
    pub async fn player(&self, engine: Box<dyn SpeechEngine>, config: PlayerConfig) -> QuizPlayer {
        QuizPlayer::load(
            self.catalog.clone(),
            self.preferences(),
            engine,
            config,
            self.clock,
        )
        .await
    }
}
