//! Decks filed in one folder

use super::ViewContext;
use crate::models::Deck;
use crate::routing::Route;
use crate::services::loader::{self, Pending, take_finished};
use eframe::egui::{self, Color32};
use std::sync::Arc;
use tracing::{error, info};

pub struct FolderView {
    folder_id: i64,
    decks: Vec<Deck>,
    pending: Option<Pending<Vec<Deck>>>,
    load_error: Option<String>,
}

impl FolderView {
    pub fn open(folder_id: i64, ctx: &ViewContext) -> Self {
        let source = Arc::clone(&ctx.source);
        let pending = loader::spawn("folder decks", ctx.notify.clone(), move || {
            source.get_decks_by_folder_id(folder_id)
        });

        Self {
            folder_id,
            decks: Vec::new(),
            pending: Some(pending),
            load_error: None,
        }
    }

    pub fn poll(&mut self) {
        match take_finished(&mut self.pending) {
            Some(Ok(mut decks)) => {
                for deck in &mut decks {
                    deck.normalize_creation_date();
                }
                info!("Loaded {} decks in folder {}", decks.len(), self.folder_id);
                self.decks = decks;
            }
            Some(Err(e)) => {
                error!("Failed to load decks for folder {}: {}", self.folder_id, e);
                self.load_error = Some(format!("Could not load decks: {}", e));
            }
            None => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let mut navigate = None;

        ui.horizontal(|ui| {
            if ui.button("Back to Library").clicked() {
                navigate = Some(Route::Library);
            }
            ui.heading(format!("Folder {}", self.folder_id));
        });
        ui.separator();

        if let Some(message) = &self.load_error {
            ui.colored_label(Color32::RED, message);
        } else if self.is_loading() {
            ui.spinner();
        } else if self.decks.is_empty() {
            ui.label("This folder has no decks yet");
        }

        egui::ScrollArea::vertical()
            .id_salt("folder_decks")
            .show(ui, |ui| {
                for deck in &self.decks {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.strong(&deck.name);
                            if ui.button("Match").clicked() {
                                navigate = Some(Route::Match(deck.id));
                            }
                        });
                        if !deck.description.is_empty() {
                            ui.label(&deck.description);
                        }
                        ui.label(format!("Created {}", deck.creation_date));
                    });
                }
            });

        navigate
    }
}
