use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::Session;
use crate::ui::pages::{self, PageState};
use crate::ui::{panels, Action};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub session: Session,
    pages: PageState,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            session: Session::new(config),
            pages: PageState::default(),
        }
    }

    /// Apply what the UI asked for during this frame, in order.
    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Dispatch(event) => {
                    if matches!(event, crate::dispatch::Event::Upload(_)) {
                        self.pages.preview_page = 0;
                    }
                    self.session.handle(event);
                }
                Action::ReportError(message) => self.session.report_error(message),
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        panels::dropped_files(ctx, &mut actions);

        // ---- Top panel: menu and navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session, &mut actions);
        });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    pages::page_content(ui, &self.session, &mut self.pages, &mut actions);
                });
        });

        self.apply(actions);
    }
}
