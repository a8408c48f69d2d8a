//! Flashcard is a question/answer pair belonging to a deck
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Flashcard {
    #[serde(rename = "FlashcardId")]
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub creation_date: String,
    pub deck_id: i64,
}
