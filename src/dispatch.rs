//! Event dispatch: which callbacks run when a component property changes.
//!
//! ```text
//!   Event ──▶ Session::handle ──▶ changed components
//!                                       │
//!                     CALLBACKS (table order, one at a time)
//!                                       │
//!                                       ▼
//!                                 Vec<Output> ──▶ Session outputs
//! ```

use crate::chart::Figure;
use crate::data::loader::Upload;
use crate::handlers::{self, Context, UploadView};
use crate::route::Route;

/// Components whose properties act as callback inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// The location bar; its property is the pathname.
    Url,
    UploadData,
    UnivariateDropdown,
    BivariateX,
    BivariateY,
}

impl ComponentId {
    /// Dropdowns that live on a page and reset when it is re-mounted.
    pub fn dropdowns_on(route: Route) -> &'static [ComponentId] {
        match route {
            Route::Landing => &[],
            Route::Univariate => &[ComponentId::UnivariateDropdown],
            Route::Bivariate => &[ComponentId::BivariateX, ComponentId::BivariateY],
        }
    }
}

/// A user action, as delivered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Navigate(String),
    Upload(Upload),
    Select {
        component: ComponentId,
        value: Option<String>,
    },
}

/// Current value of every input property.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub pathname: String,
    pub upload: Option<Upload>,
    pub univariate: Option<String>,
    pub bivariate_x: Option<String>,
    pub bivariate_y: Option<String>,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            pathname: Route::Landing.path().to_string(),
            upload: None,
            univariate: None,
            bivariate_x: None,
            bivariate_y: None,
        }
    }
}

impl Inputs {
    /// The selection slot of a dropdown, `None` for other components.
    pub fn selection_mut(&mut self, component: ComponentId) -> Option<&mut Option<String>> {
        match component {
            ComponentId::UnivariateDropdown => Some(&mut self.univariate),
            ComponentId::BivariateX => Some(&mut self.bivariate_x),
            ComponentId::BivariateY => Some(&mut self.bivariate_y),
            ComponentId::Url | ComponentId::UploadData => None,
        }
    }
}

/// A value produced by a callback for one output property.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    PageContent(Route),
    TableContainer(UploadView),
    UnivariateOptions(Vec<String>),
    UnivariateFigure(Figure),
    BivariateXOptions(Vec<String>),
    BivariateYOptions(Vec<String>),
    BivariateFigure(Figure),
}

pub type Handler = fn(&mut Context<'_>, &Inputs) -> Vec<Output>;

pub struct Callback {
    pub name: &'static str,
    pub inputs: &'static [ComponentId],
    pub handler: Handler,
}

impl Callback {
    pub fn listens_to(&self, changed: &[ComponentId]) -> bool {
        self.inputs.iter().any(|c| changed.contains(c))
    }
}

/// Every callback of the dashboard, in execution order.
///
/// `update_table` is the only store writer and comes first, so the readers
/// triggered by the same upload see the new dataset.
pub static CALLBACKS: [Callback; 6] = [
    Callback {
        name: "update_table",
        inputs: &[ComponentId::UploadData],
        handler: handlers::update_table,
    },
    Callback {
        name: "display_page",
        inputs: &[ComponentId::Url],
        handler: handlers::display_page,
    },
    Callback {
        name: "univariate_options",
        inputs: &[ComponentId::Url, ComponentId::UploadData],
        handler: handlers::univariate_options,
    },
    Callback {
        name: "univariate_plot",
        inputs: &[ComponentId::UnivariateDropdown, ComponentId::UploadData],
        handler: handlers::univariate_plot,
    },
    Callback {
        name: "bivariate_options",
        inputs: &[ComponentId::Url, ComponentId::UploadData],
        handler: handlers::bivariate_options,
    },
    Callback {
        name: "bivariate_plot",
        inputs: &[
            ComponentId::BivariateX,
            ComponentId::BivariateY,
            ComponentId::UploadData,
        ],
        handler: handlers::bivariate_plot,
    },
];

/// Callbacks triggered by a set of changed components, in table order.
pub fn triggered(changed: &[ComponentId]) -> impl Iterator<Item = &'static Callback> + '_ {
    CALLBACKS.iter().filter(move |cb| cb.listens_to(changed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(changed: &[ComponentId]) -> Vec<&'static str> {
        triggered(changed).map(|cb| cb.name).collect()
    }

    #[test]
    fn upload_runs_writer_before_readers() {
        assert_eq!(
            names(&[ComponentId::UploadData]),
            vec![
                "update_table",
                "univariate_options",
                "univariate_plot",
                "bivariate_options",
                "bivariate_plot"
            ]
        );
    }

    #[test]
    fn navigation_and_selection_fan_out() {
        assert_eq!(
            names(&[ComponentId::Url]),
            vec!["display_page", "univariate_options", "bivariate_options"]
        );
        assert_eq!(names(&[ComponentId::BivariateY]), vec!["bivariate_plot"]);
        // Two inputs of one callback still run it once.
        assert_eq!(
            names(&[ComponentId::BivariateX, ComponentId::BivariateY]),
            vec!["bivariate_plot"]
        );
    }

    #[test]
    fn only_dropdowns_have_selections() {
        let mut inputs = Inputs::default();
        assert!(inputs.selection_mut(ComponentId::Url).is_none());
        *inputs.selection_mut(ComponentId::BivariateX).unwrap() = Some("rating".into());
        assert_eq!(inputs.bivariate_x.as_deref(), Some("rating"));
    }
}
