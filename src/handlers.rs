//! The dashboard's callbacks.
//!
//! Each handler reads the current input properties, consults the data store,
//! and returns the outputs it owns. Only [`update_table`] writes the store.

use serde::Serialize;

use crate::chart::Figure;
use crate::config::DashboardConfig;
use crate::data::loader::load_upload;
use crate::data::model::Preview;
use crate::data::store::DataStore;
use crate::dispatch::{Inputs, Output};
use crate::route::Route;

pub const UPLOAD_PROMPT: &str = "Please upload a CSV file to display the data.";

/// What a handler may touch besides its inputs.
pub struct Context<'a> {
    pub store: &'a mut DataStore,
    pub config: &'a DashboardConfig,
}

/// Contents of the landing page's table container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum UploadView {
    /// Nothing uploaded yet.
    #[default]
    Prompt,
    Table {
        filename: String,
        preview: Preview,
        page_size: usize,
        /// Shown next to the grid, e.g. when nothing can be plotted.
        notice: Option<String>,
    },
    Error {
        filename: String,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// Parse the latest upload, replace the dataset, and preview it.
pub fn update_table(ctx: &mut Context<'_>, inputs: &Inputs) -> Vec<Output> {
    let Some(upload) = &inputs.upload else {
        return vec![Output::TableContainer(UploadView::Prompt)];
    };

    let view = match load_upload(upload) {
        Ok(dataset) => {
            let numeric = dataset.numeric_column_names();
            log::info!(
                "Loaded {} rows from {} with columns {:?} (numeric: {:?})",
                dataset.len(),
                upload.filename,
                dataset.column_names(),
                numeric
            );

            let notice = numeric
                .is_empty()
                .then(|| format!("{} has no numeric columns to plot.", upload.filename));
            let preview = dataset.head(ctx.config.preview_rows);
            ctx.store.replace(dataset);

            UploadView::Table {
                filename: upload.filename.clone(),
                preview,
                page_size: ctx.config.page_size,
                notice,
            }
        }
        Err(e) => {
            log::warn!("Rejected upload {}: {e}", upload.filename);
            UploadView::Error {
                filename: upload.filename.clone(),
                message: format!("Could not load {}: {e}.", upload.filename),
            }
        }
    };

    vec![Output::TableContainer(view)]
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

pub fn display_page(_ctx: &mut Context<'_>, inputs: &Inputs) -> Vec<Output> {
    vec![Output::PageContent(Route::from_path(&inputs.pathname))]
}

// ---------------------------------------------------------------------------
// Column options
// ---------------------------------------------------------------------------

/// Numeric columns of the current dataset, offered only on `page`.
pub fn numeric_options(store: &DataStore, pathname: &str, page: Route) -> Vec<String> {
    if Route::from_path(pathname) != page {
        return Vec::new();
    }
    store
        .get()
        .map(|ds| ds.numeric_column_names())
        .unwrap_or_default()
}

pub fn univariate_options(ctx: &mut Context<'_>, inputs: &Inputs) -> Vec<Output> {
    vec![Output::UnivariateOptions(numeric_options(
        ctx.store,
        &inputs.pathname,
        Route::Univariate,
    ))]
}

pub fn bivariate_options(ctx: &mut Context<'_>, inputs: &Inputs) -> Vec<Output> {
    let options = numeric_options(ctx.store, &inputs.pathname, Route::Bivariate);
    vec![
        Output::BivariateXOptions(options.clone()),
        Output::BivariateYOptions(options),
    ]
}

// ---------------------------------------------------------------------------
// Plots
// ---------------------------------------------------------------------------

/// Histogram of `column`, or empty when there is no usable selection.
pub fn render_univariate(store: &DataStore, column: Option<&str>, max_bins: usize) -> Figure {
    let (Some(name), Some(dataset)) = (column, store.get()) else {
        return Figure::Empty;
    };
    match dataset.numeric_column(name) {
        Some(col) => Figure::histogram(col, max_bins),
        None => {
            log::debug!("Selection {name:?} is not a numeric column of {}", dataset.source);
            Figure::Empty
        }
    }
}

/// Scatter of `x` against `y`, or empty unless both name numeric columns.
pub fn render_bivariate(store: &DataStore, x: Option<&str>, y: Option<&str>) -> Figure {
    let (Some(x), Some(y), Some(dataset)) = (x, y, store.get()) else {
        return Figure::Empty;
    };
    match (dataset.numeric_column(x), dataset.numeric_column(y)) {
        (Some(xc), Some(yc)) => Figure::scatter(xc, yc),
        _ => Figure::Empty,
    }
}

pub fn univariate_plot(ctx: &mut Context<'_>, inputs: &Inputs) -> Vec<Output> {
    vec![Output::UnivariateFigure(render_univariate(
        ctx.store,
        inputs.univariate.as_deref(),
        ctx.config.max_bins,
    ))]
}

pub fn bivariate_plot(ctx: &mut Context<'_>, inputs: &Inputs) -> Vec<Output> {
    vec![Output::BivariateFigure(render_bivariate(
        ctx.store,
        inputs.bivariate_x.as_deref(),
        inputs.bivariate_y.as_deref(),
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{parse_csv, Upload};

    fn store_with(csv: &str) -> DataStore {
        let mut store = DataStore::new();
        store.replace(parse_csv(csv, "movies.csv").unwrap());
        store
    }

    #[test]
    fn options_require_matching_route_and_data() {
        let empty = DataStore::new();
        assert!(numeric_options(&empty, "/univariate", Route::Univariate).is_empty());

        let store = store_with("title,rating,year\nAlien,8.5,1979\n");
        assert_eq!(
            numeric_options(&store, "/univariate", Route::Univariate),
            vec!["rating", "year"]
        );
        assert!(numeric_options(&store, "/bivariate", Route::Univariate).is_empty());
        assert!(numeric_options(&store, "/", Route::Bivariate).is_empty());
    }

    #[test]
    fn options_never_include_non_numeric_columns() {
        let store = store_with("a,b,c,d\nx,1,true,2.5\ny,2,false,\n");
        let options = numeric_options(&store, "/bivariate", Route::Bivariate);
        assert_eq!(options, vec!["b", "d"]);
    }

    #[test]
    fn plots_need_a_numeric_selection() {
        let store = store_with("title,rating\nAlien,8.5\nHeat,8.3\n");

        assert!(render_univariate(&store, None, 50).is_empty());
        assert!(render_univariate(&store, Some("title"), 50).is_empty());
        assert!(render_univariate(&store, Some("gone"), 50).is_empty());
        assert_eq!(
            render_univariate(&store, Some("rating"), 50).title(),
            Some("Distribution of rating")
        );

        assert!(render_bivariate(&store, Some("rating"), None).is_empty());
        assert!(render_bivariate(&store, Some("rating"), Some("title")).is_empty());
        assert_eq!(
            render_bivariate(&store, Some("rating"), Some("rating")).title(),
            Some("rating vs rating")
        );
    }

    #[test]
    fn failed_upload_reports_and_keeps_dataset() {
        let mut store = store_with("rating\n1\n");
        let config = DashboardConfig::default();
        let inputs = Inputs {
            upload: Some(Upload {
                contents: "not a data uri".into(),
                filename: "broken.csv".into(),
            }),
            ..Inputs::default()
        };

        let outputs = update_table(
            &mut Context {
                store: &mut store,
                config: &config,
            },
            &inputs,
        );

        match &outputs[..] {
            [Output::TableContainer(UploadView::Error { filename, message })] => {
                assert_eq!(filename, "broken.csv");
                assert!(message.contains("not a data URI"), "{message}");
            }
            other => panic!("unexpected outputs {other:?}"),
        }
        assert_eq!(store.get().unwrap().source, "movies.csv");
    }

    #[test]
    fn upload_without_numeric_columns_gets_notice() {
        let mut store = DataStore::new();
        let config = DashboardConfig::default();
        let inputs = Inputs {
            upload: Some(Upload::from_bytes("titles.csv", "text/csv", b"title\nAlien\n")),
            ..Inputs::default()
        };

        let outputs = update_table(
            &mut Context {
                store: &mut store,
                config: &config,
            },
            &inputs,
        );

        match &outputs[..] {
            [Output::TableContainer(UploadView::Table { notice, .. })] => {
                assert_eq!(notice.as_deref(), Some("titles.csv has no numeric columns to plot."));
            }
            other => panic!("unexpected outputs {other:?}"),
        }
        assert!(store.is_loaded());
    }
}
