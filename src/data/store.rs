use std::sync::Arc;

use super::model::Dataset;

/// Holds the most recently uploaded dataset, if any.
///
/// An upload replaces the whole dataset; nothing is merged. Readers get an
/// `Arc`, so a handler keeps a consistent view even across a replacement.
#[derive(Debug, Default, Clone)]
pub struct DataStore {
    current: Option<Arc<Dataset>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.current.clone()
    }

    /// Swap in a new dataset, returning the previous one.
    pub fn replace(&mut self, dataset: Dataset) -> Option<Arc<Dataset>> {
        self.current.replace(Arc::new(dataset))
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    #[test]
    fn replace_is_wholesale() {
        let mut store = DataStore::new();
        assert!(!store.is_loaded());

        assert!(store.replace(parse_csv("a\n1\n", "first.csv").unwrap()).is_none());
        let held = store.get().unwrap();

        let previous = store.replace(parse_csv("b\n2\n3\n", "second.csv").unwrap());
        assert_eq!(previous.unwrap().source, "first.csv");

        let now = store.get().unwrap();
        assert_eq!(now.column_names(), vec!["b"]);
        assert_eq!(now.len(), 2);
        // An earlier reader still sees the dataset it started with.
        assert_eq!(held.column_names(), vec!["a"]);
    }
}
