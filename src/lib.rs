pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routing;
pub mod services;
pub mod views;

pub use app::FlashcardApp;
pub use error::{AppError, Result};
pub use models::{Deck, Flashcard, Folder, MatchGame};
pub use routing::Route;
