//! Screens of the app. Each view owns its state and pending fetches, and its
//! `ui` method returns a route when the user asks to go somewhere else.

pub mod folder;
pub mod library;
pub mod match_view;

use crate::config::FeedbackTimings;
use crate::services::{DataSource, Notify};
use std::sync::Arc;

pub use folder::FolderView;
pub use library::LibraryView;
pub use match_view::MatchView;

/// What every view needs to load data and schedule repaints
#[derive(Clone)]
pub struct ViewContext {
    pub source: Arc<dyn DataSource>,
    pub timings: FeedbackTimings,
    pub notify: Notify,
}
