//! Main application window.
//! Owns the current route and the screen built for it, and switches screens
//! when a view asks to navigate.

use crate::routing::Route;
use crate::views::{FolderView, LibraryView, MatchView, ViewContext};
use eframe::egui;
use std::time::Instant;
use tracing::info;

/// Screen currently shown, one per route kind
enum Screen {
    Library(LibraryView),
    Folder(FolderView),
    Match(MatchView),
}

pub struct FlashcardApp {
    route: Route,
    screen: Screen,
    ctx: ViewContext,
}

impl FlashcardApp {
    pub fn new(route: Route, ctx: ViewContext) -> Self {
        let screen = Self::build_screen(route, &ctx);
        Self { route, screen, ctx }
    }

    fn build_screen(route: Route, ctx: &ViewContext) -> Screen {
        match route {
            Route::Library => Screen::Library(LibraryView::open(ctx)),
            Route::Folder(id) => Screen::Folder(FolderView::open(id, ctx)),
            Route::Match(id) => Screen::Match(MatchView::open(id, ctx.clone())),
        }
    }

    /// Replaces the current screen; fetches still running for the old one are dropped.
    pub fn navigate(&mut self, route: Route) {
        info!("Navigating from {} to {}", self.route, route);
        self.screen = Self::build_screen(route, &self.ctx);
        self.route = route;
    }

    pub fn route(&self) -> Route {
        self.route
    }

    fn poll(&mut self) {
        match &mut self.screen {
            Screen::Library(view) => view.poll(),
            Screen::Folder(view) => view.poll(),
            Screen::Match(view) => view.poll(),
        }
    }
}

impl eframe::App for FlashcardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        egui::TopBottomPanel::top("route_bar").show(ctx, |ui| {
            ui.label(self.route.to_string());
        });

        let mut navigate = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            navigate = match &mut self.screen {
                Screen::Library(view) => view.ui(ui),
                Screen::Folder(view) => view.ui(ui),
                Screen::Match(view) => view.ui(ui),
            };
        });

        // Transient match feedback expires on its own, so wake up for it
        if let Screen::Match(view) = &self.screen {
            if let Some(delay) = view.next_repaint(Instant::now()) {
                ctx.request_repaint_after(delay);
            }
        }

        if let Some(route) = navigate {
            self.navigate(route);
        }
    }
}
