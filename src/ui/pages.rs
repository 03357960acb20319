use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::model::Preview;
use crate::dispatch::{ComponentId, Event};
use crate::handlers::{UploadView, UPLOAD_PROMPT};
use crate::route::Route;
use crate::state::Session;
use crate::ui::{panels, plot, Action};

/// Page-local widget state that is not part of the session.
#[derive(Debug, Default)]
pub struct PageState {
    /// Zero-based page of the preview grid.
    pub preview_page: usize,
}

/// Render whichever page the session is on.
pub fn page_content(ui: &mut Ui, session: &Session, pages: &mut PageState, actions: &mut Vec<Action>) {
    match session.page {
        Route::Landing => landing_page(ui, session, pages, actions),
        Route::Univariate => univariate_page(ui, session, actions),
        Route::Bivariate => bivariate_page(ui, session, actions),
    }
}

fn page_heading(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(text).color(color::accent()).size(28.0));
    });
    ui.add_space(8.0);
}

fn nav_link(ui: &mut Ui, route: Route, actions: &mut Vec<Action>) {
    if ui.link(route.link_label()).clicked() {
        actions.push(Action::navigate(route.path()));
    }
}

// ---------------------------------------------------------------------------
// Landing page
// ---------------------------------------------------------------------------

fn landing_page(ui: &mut Ui, session: &Session, pages: &mut PageState, actions: &mut Vec<Action>) {
    page_heading(ui, &session.config().title);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            "This dashboard helps analyze IMDb's Top 1000 movies with insights \
             from univariate and bivariate analyses.",
        );
    });
    ui.add_space(12.0);

    upload_zone(ui, actions);
    ui.add_space(12.0);

    match &session.table {
        UploadView::Prompt => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(UPLOAD_PROMPT).color(color::warning()));
            });
        }
        UploadView::Error { message, .. } => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(message).color(color::warning()));
            });
        }
        UploadView::Table {
            filename,
            preview,
            page_size,
            notice,
        } => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(format!(
                    "{filename}: showing the first {} of {} rows",
                    preview.rows.len(),
                    preview.total_rows
                ));
                if let Some(notice) = notice {
                    ui.label(RichText::new(notice).color(color::warning()));
                }
            });
            preview_table(ui, preview, *page_size, &mut pages.preview_page);
        }
    }

    ui.add_space(12.0);
    ui.horizontal(|ui: &mut Ui| {
        nav_link(ui, Route::Univariate, actions);
        ui.add_space(20.0);
        nav_link(ui, Route::Bivariate, actions);
    });
}

/// The drag-and-drop target with a file picker button.
fn upload_zone(ui: &mut Ui, actions: &mut Vec<Action>) {
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let border = if hovering {
        color::accent()
    } else {
        egui::Color32::GRAY
    };

    egui::Frame::group(ui.style())
        .fill(color::drop_zone())
        .stroke(Stroke::new(1.0, border))
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Drag and Drop or");
                    if ui.link("Select Files").clicked() {
                        panels::open_file_dialog(actions);
                    }
                });
            });
        });
}

/// Paginated grid over the preview rows.
fn preview_table(ui: &mut Ui, preview: &Preview, page_size: usize, page: &mut usize) {
    let page_size = page_size.max(1);
    let n_pages = preview.rows.len().div_ceil(page_size).max(1);
    *page = (*page).min(n_pages - 1);

    let first = *page * page_size;
    let rows = &preview.rows[first..(first + page_size).min(preview.rows.len())];

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0), preview.columns.len())
                .header(20.0, |mut header| {
                    for name in &preview.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let cells = &rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });

    if n_pages > 1 {
        ui.horizontal(|ui: &mut Ui| {
            if ui.add_enabled(*page > 0, egui::Button::new("◀")).clicked() {
                *page -= 1;
            }
            ui.label(format!("{} / {n_pages}", *page + 1));
            if ui.add_enabled(*page + 1 < n_pages, egui::Button::new("▶")).clicked() {
                *page += 1;
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Analysis pages
// ---------------------------------------------------------------------------

/// A dropdown over `options`. A selection outside `options` shows as the
/// placeholder.
fn column_dropdown(
    ui: &mut Ui,
    component: ComponentId,
    placeholder: &str,
    options: &[String],
    selected: Option<&str>,
    actions: &mut Vec<Action>,
) {
    let current = selected.filter(|s| options.iter().any(|o| o == s));

    egui::ComboBox::from_id_salt(format!("{component:?}"))
        .selected_text(current.unwrap_or(placeholder))
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(current == Some(option.as_str()), option)
                    .clicked()
                {
                    actions.push(Action::Dispatch(Event::Select {
                        component,
                        value: Some(option.clone()),
                    }));
                }
            }
            if current.is_some() && ui.selectable_label(false, "Clear").clicked() {
                actions.push(Action::Dispatch(Event::Select {
                    component,
                    value: None,
                }));
            }
        });
}

fn univariate_page(ui: &mut Ui, session: &Session, actions: &mut Vec<Action>) {
    page_heading(ui, "Univariate Analysis");

    ui.vertical_centered(|ui: &mut Ui| {
        ui.set_max_width(ui.available_width() * 0.5);
        column_dropdown(
            ui,
            ComponentId::UnivariateDropdown,
            "Select a Column",
            &session.univariate_options,
            session.inputs().univariate.as_deref(),
            actions,
        );
    });
    ui.add_space(8.0);

    nav_link(ui, Route::Landing, actions);
    plot::figure_plot(ui, "univariate_plot", &session.univariate_figure);
}

fn bivariate_page(ui: &mut Ui, session: &Session, actions: &mut Vec<Action>) {
    page_heading(ui, "Bivariate Analysis");

    let inputs = session.inputs();
    ui.columns(2, |cols| {
        column_dropdown(
            &mut cols[0],
            ComponentId::BivariateX,
            "Select X-Axis Column",
            &session.bivariate_x_options,
            inputs.bivariate_x.as_deref(),
            actions,
        );
        column_dropdown(
            &mut cols[1],
            ComponentId::BivariateY,
            "Select Y-Axis Column",
            &session.bivariate_y_options,
            inputs.bivariate_y.as_deref(),
            actions,
        );
    });
    ui.add_space(8.0);

    ui.vertical_centered(|ui: &mut Ui| {
        nav_link(ui, Route::Landing, actions);
    });
    plot::figure_plot(ui, "bivariate_plot", &session.bivariate_figure);
}
