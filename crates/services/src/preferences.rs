use std::sync::Arc;

use log::warn;

use mcq_core::model::{Bookmarks, Theme};
use storage::repository::KeyValueStore;

use crate::error::PreferencesError;

/// Store key holding the JSON array of bookmarked question ids.
pub const BOOKMARKS_KEY: &str = "bookmarks";
/// Store key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Reads and writes user preferences through an injected key-value store.
#[derive(Clone)]
pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load bookmarks; a missing or unreadable JSON value yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the store itself fails.
    pub async fn load_bookmarks(&self) -> Result<Bookmarks, PreferencesError> {
        let Some(raw) = self.store.get(BOOKMARKS_KEY).await? else {
            return Ok(Bookmarks::new());
        };

        match serde_json::from_str(&raw) {
            Ok(bookmarks) => Ok(bookmarks),
            Err(err) => {
                warn!("[Prefs] Ignoring corrupt bookmarks value: {err}");
                Ok(Bookmarks::new())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` if encoding or persistence fails.
    pub async fn save_bookmarks(&self, bookmarks: &Bookmarks) -> Result<(), PreferencesError> {
        let encoded = serde_json::to_string(bookmarks)?;
        self.store.set(BOOKMARKS_KEY, &encoded).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the store fails.
    pub async fn load_theme(&self) -> Result<Theme, PreferencesError> {
        let raw = self.store.get(THEME_KEY).await?;
        Ok(Theme::from_persisted(raw.as_deref()))
    }

    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the store fails.
    pub async fn save_theme(&self, theme: Theme) -> Result<(), PreferencesError> {
        self.store.set(THEME_KEY, theme.as_str()).await?;
        Ok(())
    }
}
