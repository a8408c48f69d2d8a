//! Library root: folders and the decks that are not in any folder

use super::ViewContext;
use crate::models::{Deck, Folder};
use crate::routing::Route;
use crate::services::loader::{self, Pending, take_finished};
use eframe::egui::{self, Color32};
use std::sync::Arc;
use tracing::error;

pub struct LibraryView {
    folders: Vec<Folder>,
    decks: Vec<Deck>,
    pending_folders: Option<Pending<Vec<Folder>>>,
    pending_decks: Option<Pending<Vec<Deck>>>,
    load_error: Option<String>,
}

impl LibraryView {
    pub fn open(ctx: &ViewContext) -> Self {
        let source = Arc::clone(&ctx.source);
        let pending_folders =
            loader::spawn("folders", ctx.notify.clone(), move || source.get_folders());

        let source = Arc::clone(&ctx.source);
        let pending_decks = loader::spawn("unfiled decks", ctx.notify.clone(), move || {
            source.get_unfiled_decks()
        });

        Self {
            folders: Vec::new(),
            decks: Vec::new(),
            pending_folders: Some(pending_folders),
            pending_decks: Some(pending_decks),
            load_error: None,
        }
    }

    pub fn poll(&mut self) {
        match take_finished(&mut self.pending_folders) {
            Some(Ok(folders)) => self.folders = folders,
            Some(Err(e)) => {
                error!("Failed to load folders: {}", e);
                self.load_error = Some(format!("Could not load folders: {}", e));
            }
            None => {}
        }

        match take_finished(&mut self.pending_decks) {
            Some(Ok(mut decks)) => {
                for deck in &mut decks {
                    deck.normalize_creation_date();
                }
                self.decks = decks;
            }
            Some(Err(e)) => {
                error!("Failed to load decks: {}", e);
                self.load_error = Some(format!("Could not load decks: {}", e));
            }
            None => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_folders.is_some() || self.pending_decks.is_some()
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let mut navigate = None;

        ui.heading("Library");
        if let Some(message) = &self.load_error {
            ui.colored_label(Color32::RED, message);
        } else if self.is_loading() {
            ui.spinner();
        }
        ui.separator();

        ui.heading(format!("Folders ({})", self.folders.len()));
        egui::ScrollArea::vertical()
            .id_salt("folders_list")
            .max_height(200.0)
            .show(ui, |ui| {
                for folder in &self.folders {
                    let label = if folder.description.is_empty() {
                        folder.name.clone()
                    } else {
                        format!("{} - {}", folder.name, folder.description)
                    };
                    if ui.selectable_label(false, label).clicked() {
                        navigate = Some(Route::Folder(folder.id));
                    }
                }
            });

        ui.separator();

        ui.heading(format!("Decks ({})", self.decks.len()));
        egui::ScrollArea::vertical()
            .id_salt("unfiled_decks_list")
            .max_height(250.0)
            .show(ui, |ui| {
                for deck in &self.decks {
                    ui.horizontal(|ui| {
                        ui.label(format!("{} ({})", deck.name, deck.creation_date));
                        if ui.button("Match").clicked() {
                            navigate = Some(Route::Match(deck.id));
                        }
                    });
                }
            });

        navigate
    }
}
