pub mod pages;
pub mod panels;
pub mod plot;

use crate::dispatch::Event;

/// Something the UI asks the app to do once the frame is drawn.
#[derive(Debug)]
pub enum Action {
    Dispatch(Event),
    ReportError(String),
}

impl Action {
    pub fn navigate(path: &str) -> Self {
        Action::Dispatch(Event::Navigate(path.to_string()))
    }
}
