//! Deck is a named collection of flashcards, optionally filed in a folder
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deck {
    #[serde(rename = "DeckId")]
    pub id: i64,
    #[serde(rename = "DeckName")]
    pub name: String,
    #[serde(rename = "DeckDescription", default)]
    pub description: String,
    pub creation_date: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: String::new(),
            creation_date: String::new(),
            folder_id: None,
        }
    }
}

impl Deck {
    /// Strips the time of day from the creation date, keeping `YYYY-MM-DD`.
    pub fn normalize_creation_date(&mut self) {
        let date = date_only(&self.creation_date).to_string();
        self.creation_date = date;
    }

    /// Folder the deck is filed in. `0` is treated the same as no folder.
    pub fn owning_folder(&self) -> Option<i64> {
        self.folder_id.filter(|&id| id != 0)
    }
}

/// Returns the date part of a timestamp, cut at the first `T` or space.
pub fn date_only(timestamp: &str) -> &str {
    timestamp.split(['T', ' ']).next().unwrap_or(timestamp)
}
