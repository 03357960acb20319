use serde::Serialize;

/// Which page a navigable path shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Route {
    #[default]
    Landing,
    Univariate,
    Bivariate,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Landing, Route::Univariate, Route::Bivariate];

    /// Total: any path that is not an analysis page is the landing page.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/univariate" => Route::Univariate,
            "/bivariate" => Route::Bivariate,
            _ => Route::Landing,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Univariate => "/univariate",
            Route::Bivariate => "/bivariate",
        }
    }

    /// Text for links pointing at this page.
    pub fn link_label(self) -> &'static str {
        match self {
            Route::Landing => "Go to Landing Page",
            Route::Univariate => "Univariate Analysis",
            Route::Bivariate => "Bivariate Analysis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path("/univariate"), Route::Univariate);
        assert_eq!(Route::from_path("/bivariate"), Route::Bivariate);
    }

    #[test]
    fn unknown_paths_fall_back_to_landing() {
        for path in ["", "/univariate/", "/Bivariate", "bivariate", "/about", "/univariate?x=1"] {
            assert_eq!(Route::from_path(path), Route::Landing, "{path:?}");
        }
    }

    #[test]
    fn path_round_trips() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }
}
