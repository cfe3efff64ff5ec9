//! The four top-level pages and where they land in the output tree.
//!
//! Routing is purely declarative: every route is a full page rendered at
//! build time, with no guards and no query-parameter contract. Only the
//! landing page moves, so that either the advertise page or the downloads
//! browser can be served at `/`.

use crate::config::RoutesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Advertise,
    Downloads,
    Contact,
    Terms,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Advertise,
        Route::Downloads,
        Route::Contact,
        Route::Terms,
    ];

    /// Label used in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            Route::Advertise => "Advertise",
            Route::Downloads => "Downloads",
            Route::Contact => "Contact",
            Route::Terms => "Terms",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Route::Advertise => "advertise",
            Route::Downloads => "downloads",
            Route::Contact => "contact",
            Route::Terms => "terms",
        }
    }
}

/// Route table resolved against the configured landing page.
#[derive(Debug, Clone, Copy)]
pub struct RouteMap {
    landing: Route,
}

impl RouteMap {
    pub fn new(config: &RoutesConfig) -> Self {
        Self {
            landing: config.landing_route(),
        }
    }

    pub fn landing(&self) -> Route {
        self.landing
    }

    /// URL path for a route (`/`, `/downloads/`, ...).
    pub fn path(&self, route: Route) -> String {
        if route == self.landing {
            "/".to_string()
        } else {
            format!("/{}/", route.slug())
        }
    }

    /// Output file relative to the site root.
    pub fn output_file(&self, route: Route) -> String {
        if route == self.landing {
            "index.html".to_string()
        } else {
            format!("{}/index.html", route.slug())
        }
    }

    /// Resolve a request path to a route. Trailing slashes and a trailing
    /// `index.html` are ignored.
    pub fn from_path(&self, path: &str) -> Option<Route> {
        let trimmed = path
            .trim_end_matches("index.html")
            .trim_matches('/');
        if trimmed.is_empty() {
            return Some(self.landing);
        }
        Route::ALL
            .into_iter()
            .find(|r| *r != self.landing && r.slug() == trimmed)
    }
}
