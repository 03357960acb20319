use eframe::egui::{self, RichText, Ui};

use crate::color;
use crate::data::loader::{mime_for_name, read_upload, Upload};
use crate::dispatch::Event;
use crate::route::Route;
use crate::state::Session;
use crate::ui::Action;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / navigation bar.
pub fn top_bar(ui: &mut Ui, session: &Session, actions: &mut Vec<Action>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(actions);
                ui.close_menu();
            }
        });

        ui.separator();

        for route in Route::ALL {
            let label = match route {
                Route::Landing => "Home",
                other => other.link_label(),
            };
            if ui.selectable_label(session.page == route, label).clicked() {
                actions.push(Action::navigate(route.path()));
            }
        }

        ui.separator();

        if let Some(ds) = session.dataset() {
            ui.label(format!(
                "{}: {} rows, {} columns",
                ds.source,
                ds.len(),
                ds.columns.len()
            ));
        }

        if let Some(msg) = &session.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(color::warning()));
        }
    });
}

// ---------------------------------------------------------------------------
// Upload sources
// ---------------------------------------------------------------------------

/// Ask for a CSV file and queue it as an upload.
pub fn open_file_dialog(actions: &mut Vec<Action>) {
    let file = rfd::FileDialog::new()
        .set_title("Upload data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        actions.push(match read_upload(&path) {
            Ok(upload) => Action::Dispatch(Event::Upload(upload)),
            Err(e) => {
                log::error!("Failed to read file: {e:#}");
                Action::ReportError(format!("Error: {e:#}"))
            }
        });
    }
}

/// Turn files dropped onto the window into an upload (first file only).
pub fn dropped_files(ctx: &egui::Context, actions: &mut Vec<Action>) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    let Some(file) = dropped.first() else {
        return;
    };
    if dropped.len() > 1 {
        log::warn!("{} files dropped, uploading only {}", dropped.len(), file.name);
    }

    if let Some(bytes) = &file.bytes {
        let mime = if file.mime.is_empty() {
            mime_for_name(&file.name)
        } else {
            file.mime.as_str()
        };
        let upload = Upload::from_bytes(file.name.clone(), mime, bytes);
        actions.push(Action::Dispatch(Event::Upload(upload)));
    } else if let Some(path) = &file.path {
        actions.push(match read_upload(path) {
            Ok(upload) => Action::Dispatch(Event::Upload(upload)),
            Err(e) => {
                log::error!("Failed to read dropped file: {e:#}");
                Action::ReportError(format!("Error: {e:#}"))
            }
        });
    }
}
