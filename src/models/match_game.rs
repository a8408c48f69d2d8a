//! Matching game state.
//! Questions and answers are shuffled independently; the player pairs them by
//! selecting one of each. Everything the UI shows (highlighting, hidden items,
//! the instruction line, progress) is derived from this state and a timestamp.

use super::Flashcard;
use super::shuffle::shuffled;
use crate::config::FeedbackTimings;
use rand::Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Correct,
    Wrong,
}

/// How a single question or answer item should be drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appearance {
    Idle,
    Selected,
    Wrong,
    Hidden,
}

/// Text of the instruction line above the game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Prompt,
    Correct,
    WrongMatch,
}

impl Instruction {
    pub fn text(self) -> &'static str {
        match self {
            Instruction::Prompt => "Match the correct Questions and Answers",
            Instruction::Correct => "Correct!!",
            Instruction::WrongMatch => "WRONG MATCH",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct WrongPair {
    question: i64,
    answer: i64,
    until: Instant,
}

pub struct MatchGame {
    pub flashcards: Vec<Flashcard>,
    pub questions: Vec<Flashcard>,
    pub answers: Vec<Flashcard>,
    total: usize,
    correct: usize,
    selected_question: Option<i64>,
    selected_answer: Option<i64>,
    matched: HashSet<i64>,
    wrong_pair: Option<WrongPair>,
    instruction: Option<(Instruction, Instant)>,
    timings: FeedbackTimings,
}

impl Default for MatchGame {
    fn default() -> Self {
        Self::empty(FeedbackTimings::default())
    }
}

impl MatchGame {
    /// Game with no cards, shown until the flashcards arrive.
    pub fn empty(timings: FeedbackTimings) -> Self {
        Self {
            flashcards: Vec::new(),
            questions: Vec::new(),
            answers: Vec::new(),
            total: 0,
            correct: 0,
            selected_question: None,
            selected_answer: None,
            matched: HashSet::new(),
            wrong_pair: None,
            instruction: None,
            timings,
        }
    }

    /// Builds a game from a deck's flashcards, shuffling questions and answers separately.
    pub fn new<R: Rng + ?Sized>(
        flashcards: Vec<Flashcard>,
        rng: &mut R,
        timings: FeedbackTimings,
    ) -> Self {
        let questions = shuffled(&flashcards, rng);
        let answers = shuffled(&flashcards, rng);
        let total = flashcards.len();

        Self {
            flashcards,
            questions,
            answers,
            total,
            ..Self::empty(timings)
        }
    }

    pub fn select_question(&mut self, flashcard_id: i64, now: Instant) -> Option<MatchOutcome> {
        if self.matched.contains(&flashcard_id) {
            return None;
        }
        self.selected_question = Some(flashcard_id);
        self.evaluate_if_ready(now)
    }

    pub fn select_answer(&mut self, flashcard_id: i64, now: Instant) -> Option<MatchOutcome> {
        if self.matched.contains(&flashcard_id) {
            return None;
        }
        self.selected_answer = Some(flashcard_id);
        self.evaluate_if_ready(now)
    }

    /// Evaluates once both a question and an answer are selected, then clears both.
    fn evaluate_if_ready(&mut self, now: Instant) -> Option<MatchOutcome> {
        let (Some(question), Some(answer)) = (self.selected_question, self.selected_answer) else {
            return None;
        };

        let outcome = self.evaluate(question, answer, now);
        self.selected_question = None;
        self.selected_answer = None;
        Some(outcome)
    }

    fn evaluate(&mut self, question: i64, answer: i64, now: Instant) -> MatchOutcome {
        if question == answer {
            if self.matched.insert(question) {
                self.correct += 1;
            }
            self.instruction = Some((Instruction::Correct, now + self.timings.message()));
            debug!(
                "Correct match for flashcard {} ({}/{})",
                question, self.correct, self.total
            );
            MatchOutcome::Correct
        } else {
            self.wrong_pair = Some(WrongPair {
                question,
                answer,
                until: now + self.timings.wrong_flash(),
            });
            self.instruction = Some((Instruction::WrongMatch, now + self.timings.message()));
            debug!("Wrong match: question {} with answer {}", question, answer);
            MatchOutcome::Wrong
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn correct_matches(&self) -> usize {
        self.correct
    }

    /// Percentage of flashcards matched, `100 * correct / total`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }

    pub fn selected_question(&self) -> Option<i64> {
        self.selected_question
    }

    pub fn selected_answer(&self) -> Option<i64> {
        self.selected_answer
    }

    pub fn question_appearance(&self, flashcard_id: i64, now: Instant) -> Appearance {
        let flashing = self
            .active_wrong_pair(now)
            .is_some_and(|pair| pair.question == flashcard_id);
        self.appearance(flashcard_id, self.selected_question, flashing)
    }

    pub fn answer_appearance(&self, flashcard_id: i64, now: Instant) -> Appearance {
        let flashing = self
            .active_wrong_pair(now)
            .is_some_and(|pair| pair.answer == flashcard_id);
        self.appearance(flashcard_id, self.selected_answer, flashing)
    }

    fn appearance(&self, flashcard_id: i64, selected: Option<i64>, flashing: bool) -> Appearance {
        if self.matched.contains(&flashcard_id) {
            Appearance::Hidden
        } else if selected == Some(flashcard_id) {
            Appearance::Selected
        } else if flashing {
            Appearance::Wrong
        } else {
            Appearance::Idle
        }
    }

    fn active_wrong_pair(&self, now: Instant) -> Option<WrongPair> {
        self.wrong_pair.filter(|pair| now < pair.until)
    }

    pub fn instruction(&self, now: Instant) -> Instruction {
        match self.instruction {
            Some((instruction, until)) if now < until => instruction,
            _ => Instruction::Prompt,
        }
    }

    /// Time until the next piece of transient feedback expires, if any is showing.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let flash = self.active_wrong_pair(now).map(|pair| pair.until);
        let message = self
            .instruction
            .map(|(_, until)| until)
            .filter(|&until| now < until);

        flash
            .into_iter()
            .chain(message)
            .min()
            .map(|until| until.duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(id: i64) -> Flashcard {
        Flashcard {
            id,
            question: format!("question {}", id),
            answer: format!("answer {}", id),
            creation_date: "2023-10-01T08:00:00".to_string(),
            deck_id: 1,
        }
    }

    fn create_test_game(n: i64) -> MatchGame {
        let mut rng = StdRng::seed_from_u64(42);
        MatchGame::new((1..=n).map(card).collect(), &mut rng, FeedbackTimings::default())
    }

    #[test]
    fn test_new_game_shuffles_both_lists() {
        let game = create_test_game(10);
        assert_eq!(game.total(), 10);
        assert_eq!(game.correct_matches(), 0);

        let mut question_ids: Vec<i64> = game.questions.iter().map(|c| c.id).collect();
        let mut answer_ids: Vec<i64> = game.answers.iter().map(|c| c.id).collect();
        question_ids.sort();
        answer_ids.sort();
        let expected: Vec<i64> = (1..=10).collect();
        assert_eq!(question_ids, expected);
        assert_eq!(answer_ids, expected);
    }

    #[test]
    fn test_single_selection_does_not_evaluate() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        assert_eq!(game.select_question(1, now), None);
        assert_eq!(game.select_question(2, now), None);
        assert_eq!(game.selected_question(), Some(2));
        assert_eq!(game.question_appearance(2, now), Appearance::Selected);
        assert_eq!(game.question_appearance(1, now), Appearance::Idle);
        assert_eq!(game.correct_matches(), 0);
    }

    #[test]
    fn test_three_card_example() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        assert_eq!(game.select_question(2, now), None);
        assert_eq!(game.select_answer(2, now), Some(MatchOutcome::Correct));
        assert_eq!(game.correct_matches(), 1);
        assert!((game.progress() - 100.0 / 3.0).abs() < 1e-9);

        assert_eq!(game.select_question(1, now), None);
        assert_eq!(game.select_answer(3, now), Some(MatchOutcome::Wrong));
        assert_eq!(game.correct_matches(), 1);
        assert_eq!(game.instruction(now), Instruction::WrongMatch);
    }

    #[test]
    fn test_answer_first_then_question() {
        let mut game = create_test_game(2);
        let now = Instant::now();

        assert_eq!(game.select_answer(1, now), None);
        assert_eq!(game.select_question(1, now), Some(MatchOutcome::Correct));
    }

    #[test]
    fn test_selections_clear_after_evaluation() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        game.select_question(1, now);
        game.select_answer(2, now);
        assert_eq!(game.selected_question(), None);
        assert_eq!(game.selected_answer(), None);

        // A lone selection afterwards must not evaluate against stale state
        assert_eq!(game.select_answer(1, now), None);
    }

    #[test]
    fn test_correct_match_hides_items() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        game.select_question(3, now);
        game.select_answer(3, now);
        assert_eq!(game.question_appearance(3, now), Appearance::Hidden);
        assert_eq!(game.answer_appearance(3, now), Appearance::Hidden);
        assert_eq!(game.instruction(now), Instruction::Correct);
    }

    #[test]
    fn test_matched_items_cannot_be_selected() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        game.select_question(1, now);
        game.select_answer(1, now);

        assert_eq!(game.select_question(1, now), None);
        assert_eq!(game.selected_question(), None);
        assert_eq!(game.select_answer(1, now), None);
        assert_eq!(game.correct_matches(), 1);
    }

    #[test]
    fn test_counter_never_decrements() {
        let mut game = create_test_game(4);
        let now = Instant::now();
        let mut last = 0;

        let picks = [(1, 2), (1, 1), (2, 3), (4, 4), (3, 2), (2, 2)];
        for (q, a) in picks {
            game.select_question(q, now);
            game.select_answer(a, now);
            assert!(game.correct_matches() >= last);
            last = game.correct_matches();
        }
        assert_eq!(game.correct_matches(), 3);
    }

    #[test]
    fn test_wrong_match_flashes_then_reverts() {
        let mut game = create_test_game(3);
        let start = Instant::now();

        game.select_question(1, start);
        game.select_answer(3, start);
        assert_eq!(game.question_appearance(1, start), Appearance::Wrong);
        assert_eq!(game.answer_appearance(3, start), Appearance::Wrong);
        assert_eq!(game.answer_appearance(1, start), Appearance::Idle);

        let after_flash = start + Duration::from_millis(250);
        assert_eq!(game.question_appearance(1, after_flash), Appearance::Idle);
        assert_eq!(game.answer_appearance(3, after_flash), Appearance::Idle);
        assert_eq!(game.instruction(after_flash), Instruction::WrongMatch);

        let after_message = start + Duration::from_millis(1000);
        assert_eq!(game.instruction(after_message), Instruction::Prompt);
    }

    #[test]
    fn test_selection_overrides_wrong_flash() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        game.select_question(1, now);
        game.select_answer(3, now);
        game.select_question(1, now);
        assert_eq!(game.question_appearance(1, now), Appearance::Selected);
    }

    #[test]
    fn test_progress_reaches_100_and_finishes() {
        let mut game = create_test_game(3);
        let now = Instant::now();

        for id in 1..=3 {
            assert!(!game.is_finished());
            game.select_question(id, now);
            game.select_answer(id, now);
            let expected = 100.0 * game.correct_matches() as f64 / 3.0;
            assert!((game.progress() - expected).abs() < 1e-9);
        }

        assert_eq!(game.progress(), 100.0);
        assert!(game.is_finished());
    }

    #[test]
    fn test_empty_game() {
        let game = MatchGame::default();
        assert_eq!(game.total(), 0);
        assert_eq!(game.progress(), 0.0);
        assert!(!game.is_finished());
        assert_eq!(game.instruction(Instant::now()), Instruction::Prompt);
    }

    #[test]
    fn test_next_deadline() {
        let mut game = create_test_game(3);
        let start = Instant::now();
        assert_eq!(game.next_deadline(start), None);

        game.select_question(1, start);
        game.select_answer(2, start);
        assert_eq!(game.next_deadline(start), Some(Duration::from_millis(200)));

        let later = start + Duration::from_millis(500);
        assert_eq!(game.next_deadline(later), Some(Duration::from_millis(500)));

        let done = start + Duration::from_millis(1500);
        assert_eq!(game.next_deadline(done), None);
    }

    #[test]
    fn test_instruction_text() {
        assert_eq!(
            Instruction::Prompt.text(),
            "Match the correct Questions and Answers"
        );
        assert_eq!(Instruction::Correct.text(), "Correct!!");
        assert_eq!(Instruction::WrongMatch.text(), "WRONG MATCH");
    }
}
