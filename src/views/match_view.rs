//! Matching game screen.
//! Loads a deck and its flashcards, then lets the player pair shuffled
//! questions with shuffled answers.

use super::ViewContext;
use crate::error::AppError;
use crate::models::{Appearance, Deck, Flashcard, MatchGame, MatchOutcome};
use crate::routing::Route;
use crate::services::loader::{self, Pending, take_finished};
use eframe::egui::{self, Color32, RichText};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

const QUESTION_COLOR: Color32 = Color32::from_rgb(173, 216, 230);
const ANSWER_COLOR: Color32 = Color32::from_rgb(32, 178, 170);
const SELECTED_COLOR: Color32 = Color32::from_rgb(0, 128, 0);
const WRONG_COLOR: Color32 = Color32::from_rgb(220, 20, 20);

pub struct MatchView {
    deck_id: i64,
    deck: Deck,
    game: MatchGame,
    pending_deck: Option<Pending<Deck>>,
    pending_flashcards: Option<Pending<Vec<Flashcard>>>,
    load_errors: Vec<String>,
    ctx: ViewContext,
}

impl MatchView {
    /// Starts loading the deck and its flashcards; both requests run concurrently.
    pub fn open(deck_id: i64, ctx: ViewContext) -> Self {
        info!("Opening match game for deck {}", deck_id);

        let source = Arc::clone(&ctx.source);
        let pending_deck = loader::spawn("deck", ctx.notify.clone(), move || {
            source.get_deck_by_id(deck_id)
        });

        let source = Arc::clone(&ctx.source);
        let pending_flashcards = loader::spawn("flashcards", ctx.notify.clone(), move || {
            source.get_flashcards_by_deck_id(deck_id)
        });

        Self {
            deck_id,
            deck: Deck {
                id: deck_id,
                ..Deck::default()
            },
            game: MatchGame::empty(ctx.timings),
            pending_deck: Some(pending_deck),
            pending_flashcards: Some(pending_flashcards),
            load_errors: Vec::new(),
            ctx,
        }
    }

    /// Applies whichever fetches have finished since the last call.
    pub fn poll(&mut self) {
        if let Some(result) = take_finished(&mut self.pending_deck) {
            match result {
                Ok(deck) => self.on_deck_loaded(deck),
                Err(e) => self.on_load_failed("deck", e),
            }
        }

        if let Some(result) = take_finished(&mut self.pending_flashcards) {
            match result {
                Ok(flashcards) => self.on_flashcards_loaded(flashcards),
                Err(e) => self.on_load_failed("flashcards", e),
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_deck.is_some() || self.pending_flashcards.is_some()
    }

    pub fn on_deck_loaded(&mut self, mut deck: Deck) {
        deck.normalize_creation_date();
        info!("Loaded deck '{}' ({})", deck.name, deck.id);
        self.deck = deck;
    }

    pub fn on_flashcards_loaded(&mut self, flashcards: Vec<Flashcard>) {
        info!(
            "Loaded {} flashcards for deck {}",
            flashcards.len(),
            self.deck_id
        );
        self.game = MatchGame::new(flashcards, &mut rand::thread_rng(), self.ctx.timings);
    }

    fn on_load_failed(&mut self, what: &str, e: AppError) {
        error!("Failed to load {} for deck {}: {}", what, self.deck_id, e);
        self.load_errors.push(format!("Could not load {}: {}", what, e));
    }

    pub fn select_question(&mut self, flashcard_id: i64, now: Instant) -> Option<MatchOutcome> {
        let outcome = self.game.select_question(flashcard_id, now);
        self.after_selection(outcome);
        outcome
    }

    pub fn select_answer(&mut self, flashcard_id: i64, now: Instant) -> Option<MatchOutcome> {
        let outcome = self.game.select_answer(flashcard_id, now);
        self.after_selection(outcome);
        outcome
    }

    fn after_selection(&mut self, outcome: Option<MatchOutcome>) {
        if outcome == Some(MatchOutcome::Correct) && self.game.is_finished() {
            info!(
                "Deck '{}' completed: {} matches",
                self.deck.name,
                self.game.total()
            );
        }
    }

    /// Throws away all game state and loads the deck again from scratch.
    pub fn restart(&mut self) {
        info!("Restarting match game for deck {}", self.deck_id);
        let ctx = self.ctx.clone();
        *self = Self::open(self.deck_id, ctx);
    }

    /// The deck's folder, or the library when the deck is not filed.
    pub fn back_route(&self) -> Route {
        match self.deck.owning_folder() {
            Some(folder_id) => Route::Folder(folder_id),
            None => Route::Library,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn game(&self) -> &MatchGame {
        &self.game
    }

    /// One message per failed fetch, in the order they failed
    pub fn load_errors(&self) -> &[String] {
        &self.load_errors
    }

    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        self.game.next_deadline(now)
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let now = Instant::now();
        let back = self.back_route();

        let mut navigate = None;
        let mut restart = false;
        let mut clicked_question: Option<i64> = None;
        let mut clicked_answer: Option<i64> = None;

        ui.heading(format!("Match: {}", self.deck.name));
        if !self.deck.description.is_empty() {
            ui.label(&self.deck.description);
        }
        if !self.deck.creation_date.is_empty() {
            ui.label(format!("Created {}", self.deck.creation_date));
        }
        for message in &self.load_errors {
            ui.colored_label(Color32::RED, message);
        }

        ui.separator();

        ui.heading(self.game.instruction(now).text());
        ui.add(
            egui::ProgressBar::new((self.game.progress() / 100.0) as f32).text(format!(
                "{} / {} matched",
                self.game.correct_matches(),
                self.game.total()
            )),
        );

        if self.game.is_finished() {
            ui.add_space(10.0);
            ui.heading("Congratulations!");
            ui.label("You've matched every question with its answer.");
        } else if self.is_loading() {
            ui.spinner();
        }

        ui.add_space(10.0);

        let game = &self.game;
        egui::ScrollArea::vertical()
            .id_salt("match_items")
            .max_height(420.0)
            .show(ui, |ui| {
                ui.columns(2, |columns| {
                    columns[0].label(RichText::new("Questions").strong());
                    for card in &game.questions {
                        let appearance = game.question_appearance(card.id, now);
                        if let Some(button) = item_button(&card.question, appearance, QUESTION_COLOR)
                        {
                            if columns[0].add(button).clicked() {
                                clicked_question = Some(card.id);
                            }
                        }
                    }

                    columns[1].label(RichText::new("Answers").strong());
                    for card in &game.answers {
                        let appearance = game.answer_appearance(card.id, now);
                        if let Some(button) = item_button(&card.answer, appearance, ANSWER_COLOR) {
                            if columns[1].add(button).clicked() {
                                clicked_answer = Some(card.id);
                            }
                        }
                    }
                });
            });

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            if ui.button("Restart").clicked() {
                restart = true;
            }
            if ui.button("Back").clicked() {
                navigate = Some(back);
            }
        });

        // Execute deferred actions
        if let Some(id) = clicked_question {
            self.select_question(id, now);
        }
        if let Some(id) = clicked_answer {
            self.select_answer(id, now);
        }
        if restart {
            self.restart();
        }

        navigate
    }
}

/// Button for one question or answer; `None` once the pair is matched.
fn item_button(text: &str, appearance: Appearance, idle: Color32) -> Option<egui::Button<'static>> {
    let (fill, text_color) = match appearance {
        Appearance::Hidden => return None,
        Appearance::Idle => (idle, Color32::BLACK),
        Appearance::Selected => (SELECTED_COLOR, Color32::WHITE),
        Appearance::Wrong => (WRONG_COLOR, Color32::WHITE),
    };

    Some(
        egui::Button::new(RichText::new(text).color(text_color))
            .fill(fill)
            .min_size(egui::vec2(0.0, 36.0)),
    )
}
