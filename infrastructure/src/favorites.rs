//! Favorites read from a JSON file.
//!
//! The file holds an array of saved meals:
//!
//! ```json
//! [
//!   {"name": "Shakshuka", "note": "extra feta", "added_at": "2024-05-01T18:30:00Z"},
//!   {"name": "Dal"}
//! ]
//! ```

use chef_application::ports::favorites::{FavoritesContext, FavoritesError};
use chef_domain::FavoriteEntry;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct StoredFavorite {
    name: String,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    added_at: Option<DateTime<Utc>>,
}

/// [`FavoritesContext`] over a JSON file, newest first.
///
/// The file is re-read on every [`list`](FavoritesContext::list), so edits
/// made by another tool show up on the next refresh.
pub struct FileFavoritesContext {
    path: PathBuf,
}

impl FileFavoritesContext {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesContext for FileFavoritesContext {
    fn list(&self) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No favorites file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut stored: Vec<StoredFavorite> =
            serde_json::from_str(&raw).map_err(|e| FavoritesError::Format(e.to_string()))?;

        // Newest first; undated entries after dated ones, file order kept (stable sort).
        stored.sort_by(|a, b| b.added_at.cmp(&a.added_at));

        Ok(stored
            .into_iter()
            .filter(|f| !f.name.trim().is_empty())
            .map(|f| FavoriteEntry {
                name: f.name.trim().to_string(),
                note: f.note,
            })
            .collect())
    }
}
