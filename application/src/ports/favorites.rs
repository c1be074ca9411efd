//! Favorites context port
//!
//! The favorites store itself (screens, CRUD, persistence) is outside this
//! application. The chat session only needs a read-only, ordered listing.

use chef_domain::FavoriteEntry;
use thiserror::Error;

/// Errors that can occur while reading favorites
#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to read favorites: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed favorites data: {0}")]
    Format(String),
}

/// Read access to the user's saved favorites.
pub trait FavoritesContext: Send + Sync {
    /// All favorites in display order (may be empty).
    fn list(&self) -> Result<Vec<FavoriteEntry>, FavoritesError>;
}

/// Empty favorites source
pub struct NoFavorites;

impl FavoritesContext for NoFavorites {
    fn list(&self) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        Ok(Vec::new())
    }
}
