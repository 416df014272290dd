use collegedesk_core::{RoleTag, Route};
use serde::Serialize;

/// Access requirements attached to a route.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RouteRequirements {
    /// Reachable without logging in.
    pub public: bool,

    /// Only this role may open the route. `None` means any authenticated role.
    pub required_role: Option<RoleTag>,
}

impl RouteRequirements {
    pub fn public() -> Self {
        Self {
            public: true,
            required_role: None,
        }
    }

    pub fn protected() -> Self {
        Self::default()
    }

    pub fn role(role: RoleTag) -> Self {
        Self {
            public: false,
            required_role: Some(role),
        }
    }
}

/// Outcome of matching a request path against a [`RouteTable`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub requirements: RouteRequirements,
    /// The path was unknown and the catch-all route was substituted.
    pub fallback: bool,
}

/// Route → requirements mapping, with a catch-all for unknown paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<(Route, RouteRequirements)>,
    fallback: Route,
}

impl RouteTable {
    /// The dashboard's route set.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (Route::Login, RouteRequirements::public()),
                (Route::ForgotPassword, RouteRequirements::public()),
                (Route::Dashboard, RouteRequirements::protected()),
                (Route::StudentManagement, RouteRequirements::protected()),
                (Route::AdminManagement, RouteRequirements::role(RoleTag::CollegeAdmin)),
                (Route::ProfileApproval, RouteRequirements::role(RoleTag::DepartmentAdmin)),
            ],
            fallback: Route::Dashboard,
        }
    }

    /// Requirements for `route`. Routes missing from the table are protected.
    pub fn requirements(&self, route: Route) -> RouteRequirements {
        self.entries
            .iter()
            .find(|(r, _)| *r == route)
            .map(|(_, req)| *req)
            .unwrap_or_else(RouteRequirements::protected)
    }

    pub fn fallback(&self) -> Route {
        self.fallback
    }

    /// Resolve a request path; unknown paths map to the catch-all route.
    pub fn lookup(&self, path: &str) -> RouteMatch {
        match Route::parse(path) {
            Some(route) => RouteMatch {
                route,
                requirements: self.requirements(route),
                fallback: false,
            },
            None => RouteMatch {
                route: self.fallback,
                requirements: self.requirements(self.fallback),
                fallback: true,
            },
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_forgot_password_are_public() {
        let table = RouteTable::standard();
        assert!(table.requirements(Route::Login).public);
        assert!(table.requirements(Route::ForgotPassword).public);
        assert!(!table.requirements(Route::Dashboard).public);
        assert!(!table.requirements(Route::StudentManagement).public);
    }

    #[test]
    fn shared_routes_are_role_agnostic() {
        let table = RouteTable::standard();
        assert_eq!(table.requirements(Route::Dashboard).required_role, None);
        assert_eq!(table.requirements(Route::StudentManagement).required_role, None);
        assert_eq!(
            table.requirements(Route::AdminManagement).required_role,
            Some(RoleTag::CollegeAdmin)
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_dashboard() {
        let m = RouteTable::standard().lookup("/nope");
        assert_eq!(m.route, Route::Dashboard);
        assert!(m.fallback);
        assert_eq!(m.requirements, RouteRequirements::protected());

        let m = RouteTable::standard().lookup("/login");
        assert_eq!(m.route, Route::Login);
        assert!(!m.fallback);
    }
}
