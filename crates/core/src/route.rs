//! Navigable dashboard routes.

use serde::{Deserialize, Serialize};

/// A known dashboard route.
///
/// Unknown paths are not representable; callers decide what to do with them
/// (the route table sends them to the dashboard).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    ForgotPassword,
    Dashboard,
    StudentManagement,
    AdminManagement,
    ProfileApproval,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Login,
        Route::ForgotPassword,
        Route::Dashboard,
        Route::StudentManagement,
        Route::AdminManagement,
        Route::ProfileApproval,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::ForgotPassword => "/forgot-password",
            Route::Dashboard => "/dashboard",
            Route::StudentManagement => "/student-management",
            Route::AdminManagement => "/admin-management",
            Route::ProfileApproval => "/profile-approval",
        }
    }

    /// Match a request path against the known routes.
    ///
    /// Query strings, fragments and a single trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_parses_from_its_path() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(Route::parse("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/login?next=%2Fdashboard"), Some(Route::Login));
        assert_eq!(Route::parse("/student-management#top"), Some(Route::StudentManagement));
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/reports"), None);
        assert_eq!(Route::parse("/dashboard/extra"), None);
    }
}
