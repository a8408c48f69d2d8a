//! Data providers for folders, decks and flashcards.

pub mod api;
pub mod loader;

use crate::error::Result;
use crate::models::{Deck, Flashcard, Folder};

pub use api::ApiClient;
pub use loader::{Notify, Pending};

/// Read access to the records the views display.
///
/// Implementations are shared across worker threads, so they must be `Send + Sync`.
/// Records are returned as stored; views normalize dates themselves.
pub trait DataSource: Send + Sync {
    fn get_folders(&self) -> Result<Vec<Folder>>;

    /// Decks that are not filed in any folder
    fn get_unfiled_decks(&self) -> Result<Vec<Deck>>;

    fn get_decks_by_folder_id(&self, folder_id: i64) -> Result<Vec<Deck>>;

    /// Fails with `AppError::NotFound` when no deck has this id
    fn get_deck_by_id(&self, deck_id: i64) -> Result<Deck>;

    /// All flashcards of a deck, ordered by id
    fn get_flashcards_by_deck_id(&self, deck_id: i64) -> Result<Vec<Flashcard>>;
}
