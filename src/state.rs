use std::sync::Arc;

use crate::chart::Figure;
use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::data::store::DataStore;
use crate::dispatch::{self, ComponentId, Event, Inputs, Output};
use crate::handlers::{Context, UploadView};
use crate::route::Route;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one user's dashboard holds, independent of rendering.
///
/// Input properties change only through [`Session::handle`]; the outputs are
/// whatever the dispatched callbacks last produced.
pub struct Session {
    config: DashboardConfig,
    store: DataStore,
    inputs: Inputs,

    /// Page currently shown.
    pub page: Route,
    /// Landing page preview / prompt / upload error.
    pub table: UploadView,
    pub univariate_options: Vec<String>,
    pub univariate_figure: Figure,
    pub bivariate_x_options: Vec<String>,
    pub bivariate_y_options: Vec<String>,
    pub bivariate_figure: Figure,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl Session {
    /// Create a session and run every callback once for the initial layout.
    pub fn new(config: DashboardConfig) -> Self {
        let mut session = Self {
            config,
            store: DataStore::new(),
            inputs: Inputs::default(),
            page: Route::Landing,
            table: UploadView::Prompt,
            univariate_options: Vec::new(),
            univariate_figure: Figure::Empty,
            bivariate_x_options: Vec::new(),
            bivariate_y_options: Vec::new(),
            bivariate_figure: Figure::Empty,
            status_message: None,
        };
        session.fire(&[
            ComponentId::Url,
            ComponentId::UploadData,
            ComponentId::UnivariateDropdown,
            ComponentId::BivariateX,
            ComponentId::BivariateY,
        ]);
        session
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.store.get()
    }

    /// Apply one user action and run the callbacks it triggers.
    pub fn handle(&mut self, event: Event) {
        let changed = self.apply_input(event);
        self.fire(&changed);
    }

    /// Show an error that happened outside the callbacks (e.g. file I/O).
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Record the new input value; return the components that changed.
    fn apply_input(&mut self, event: Event) -> Vec<ComponentId> {
        match event {
            Event::Navigate(path) => {
                let route = Route::from_path(&path);
                log::info!("Navigate to {path} ({route:?})");

                let mut changed = vec![ComponentId::Url];
                if route != self.page {
                    // The new page is mounted with fresh, empty dropdowns.
                    for &dropdown in ComponentId::dropdowns_on(route) {
                        if let Some(slot) = self.inputs.selection_mut(dropdown) {
                            *slot = None;
                        }
                        changed.push(dropdown);
                    }
                }
                self.inputs.pathname = path;
                changed
            }
            Event::Upload(upload) => {
                self.status_message = None;
                self.inputs.upload = Some(upload);
                vec![ComponentId::UploadData]
            }
            Event::Select { component, value } => {
                let value = value.filter(|v| !v.is_empty());
                match self.inputs.selection_mut(component) {
                    Some(slot) => {
                        *slot = value;
                        vec![component]
                    }
                    None => {
                        log::warn!("Ignoring selection on non-dropdown {component:?}");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Run triggered callbacks one at a time, applying outputs as they come.
    fn fire(&mut self, changed: &[ComponentId]) {
        for callback in dispatch::triggered(changed) {
            log::debug!("Callback {} fired by {changed:?}", callback.name);
            let outputs = {
                let mut ctx = Context {
                    store: &mut self.store,
                    config: &self.config,
                };
                (callback.handler)(&mut ctx, &self.inputs)
            };
            for output in outputs {
                self.apply_output(output);
            }
        }
    }

    fn apply_output(&mut self, output: Output) {
        match output {
            Output::PageContent(route) => self.page = route,
            Output::TableContainer(view) => {
                if let UploadView::Error { message, .. } = &view {
                    self.status_message = Some(message.clone());
                }
                self.table = view;
            }
            Output::UnivariateOptions(options) => self.univariate_options = options,
            Output::UnivariateFigure(figure) => self.univariate_figure = figure,
            Output::BivariateXOptions(options) => self.bivariate_x_options = options,
            Output::BivariateYOptions(options) => self.bivariate_y_options = options,
            Output::BivariateFigure(figure) => self.bivariate_figure = figure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::Upload;

    const MOVIES: &str = "rating,title\n9.3,The Shawshank Redemption\n9.2,The Godfather\n9.0,The Dark Knight\n";

    fn upload(name: &str, csv: &str) -> Event {
        Event::Upload(Upload::from_bytes(name, "text/csv", csv.as_bytes()))
    }

    fn navigate(path: &str) -> Event {
        Event::Navigate(path.to_string())
    }

    fn select(component: ComponentId, value: &str) -> Event {
        Event::Select {
            component,
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn initial_layout() {
        let session = Session::default();
        assert_eq!(session.page, Route::Landing);
        assert_eq!(session.table, UploadView::Prompt);
        assert!(session.univariate_figure.is_empty());
        assert!(session.bivariate_figure.is_empty());
        assert!(session.dataset().is_none());
    }

    #[test]
    fn no_upload_then_univariate_is_empty() {
        let mut session = Session::default();
        session.handle(navigate("/univariate"));

        assert_eq!(session.page, Route::Univariate);
        assert!(session.univariate_options.is_empty());
        assert!(session.univariate_figure.is_empty());

        // Even a selection cannot produce a plot without data.
        session.handle(select(ComponentId::UnivariateDropdown, "rating"));
        assert!(session.univariate_figure.is_empty());
    }

    #[test]
    fn univariate_histogram_after_upload() {
        let mut session = Session::default();
        session.handle(upload("imdb.csv", MOVIES));
        session.handle(navigate("/univariate"));

        assert_eq!(session.univariate_options, vec!["rating"]);
        session.handle(select(ComponentId::UnivariateDropdown, "rating"));
        assert_eq!(
            session.univariate_figure.title(),
            Some("Distribution of rating")
        );
        assert!(matches!(session.univariate_figure, Figure::Histogram { .. }));
    }

    #[test]
    fn bivariate_same_column_lies_on_diagonal() {
        let mut session = Session::default();
        session.handle(upload("imdb.csv", MOVIES));
        session.handle(navigate("/bivariate"));

        assert_eq!(session.bivariate_x_options, vec!["rating"]);
        assert_eq!(session.bivariate_y_options, vec!["rating"]);

        session.handle(select(ComponentId::BivariateX, "rating"));
        assert!(session.bivariate_figure.is_empty());
        session.handle(select(ComponentId::BivariateY, "rating"));

        match &session.bivariate_figure {
            Figure::Scatter { title, points, .. } => {
                assert_eq!(title, "rating vs rating");
                assert_eq!(points.len(), 3);
                assert!(points.iter().all(|[x, y]| x == y));
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn no_numeric_columns_means_nothing_to_pick() {
        let mut session = Session::default();
        session.handle(upload("titles.csv", "title,genre\nAlien,Horror\nHeat,Crime\n"));
        assert!(session.dataset().is_some());

        session.handle(navigate("/univariate"));
        assert!(session.univariate_options.is_empty());
        assert!(session.univariate_figure.is_empty());

        session.handle(navigate("/bivariate"));
        assert!(session.bivariate_x_options.is_empty());
        assert!(session.bivariate_y_options.is_empty());
        session.handle(select(ComponentId::BivariateX, "title"));
        session.handle(select(ComponentId::BivariateY, "genre"));
        assert!(session.bivariate_figure.is_empty());
    }

    #[test]
    fn replacement_degrades_stale_selection_to_empty() {
        let mut session = Session::default();
        session.handle(upload("imdb.csv", MOVIES));
        session.handle(navigate("/univariate"));
        session.handle(select(ComponentId::UnivariateDropdown, "rating"));
        assert!(!session.univariate_figure.is_empty());

        session.handle(upload("box_office.csv", "gross,studio\n100,A\n250,B\n"));

        assert_eq!(session.dataset().unwrap().source, "box_office.csv");
        assert_eq!(session.inputs().univariate.as_deref(), Some("rating"));
        assert!(session.univariate_figure.is_empty());
        assert_eq!(session.univariate_options, vec!["gross"]);
    }

    #[test]
    fn preview_shows_first_ten_rows_and_all_columns() {
        let mut csv = String::from("id,title,rating\n");
        for i in 0..25 {
            csv.push_str(&format!("{i},Movie {i},{}.5\n", i % 10));
        }

        let mut session = Session::default();
        session.handle(upload("many.csv", &csv));

        match &session.table {
            UploadView::Table {
                preview, page_size, ..
            } => {
                assert_eq!(preview.columns, vec!["id", "title", "rating"]);
                assert_eq!(preview.rows.len(), 10);
                assert_eq!(preview.total_rows, 25);
                assert_eq!(preview.rows[0], vec!["0", "Movie 0", "0.5"]);
                assert_eq!(*page_size, 10);
            }
            other => panic!("expected table, got {other:?}"),
        }

        session.handle(upload("few.csv", "a,b\n1,2\n3,4\n"));
        match &session.table {
            UploadView::Table { preview, .. } => assert_eq!(preview.rows.len(), 2),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn bad_upload_keeps_previous_dataset() {
        let mut session = Session::default();
        session.handle(upload("imdb.csv", MOVIES));
        session.handle(Event::Upload(Upload {
            contents: "text/csv;base64,%%%".into(),
            filename: "broken.csv".into(),
        }));

        assert!(matches!(session.table, UploadView::Error { .. }));
        assert!(session.status_message.is_some());
        assert_eq!(session.dataset().unwrap().source, "imdb.csv");

        session.handle(upload("imdb.csv", MOVIES));
        assert!(session.status_message.is_none());
    }

    #[test]
    fn navigating_away_and_back_resets_dropdowns() {
        let mut session = Session::default();
        session.handle(upload("imdb.csv", MOVIES));
        session.handle(navigate("/univariate"));
        session.handle(select(ComponentId::UnivariateDropdown, "rating"));

        session.handle(navigate("/"));
        assert_eq!(session.page, Route::Landing);
        assert!(session.univariate_options.is_empty());

        session.handle(navigate("/univariate"));
        assert_eq!(session.inputs().univariate, None);
        assert!(session.univariate_figure.is_empty());
        assert_eq!(session.univariate_options, vec!["rating"]);
    }

    #[test]
    fn unknown_path_shows_landing() {
        let mut session = Session::default();
        session.handle(navigate("/nowhere"));
        assert_eq!(session.page, Route::Landing);
        assert_eq!(session.inputs().pathname, "/nowhere");
    }

    #[test]
    fn selection_on_non_dropdown_is_ignored() {
        let mut session = Session::default();
        session.handle(select(ComponentId::Url, "/univariate"));
        assert_eq!(session.page, Route::Landing);
        assert_eq!(session.inputs().pathname, "/");
    }
}
