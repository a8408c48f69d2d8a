pub mod deck;
pub mod flashcard;
pub mod folder;
pub mod match_game;
pub mod shuffle;

pub use deck::Deck;
pub use flashcard::Flashcard;
pub use folder::Folder;
pub use match_game::{Appearance, Instruction, MatchGame, MatchOutcome};
