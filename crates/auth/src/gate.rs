//! Route access decisions.
//!
//! - No IO
//! - No panics
//! - Total over (session, route, requirements)

use collegedesk_core::{Route, Session};
use serde::Serialize;

use crate::{RouteRequirements, RouteTable, resolve, resolve_role};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Allow,
    RedirectToLogin,
    /// Send the user to their own role's landing page.
    RedirectToDefault,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    NotAuthenticated,
    RoleNotPermitted,
    Ok,
}

/// Result of evaluating one navigation. Computed per event, never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub outcome: Outcome,
    pub reason: Reason,
}

impl AccessDecision {
    pub const ALLOW: AccessDecision = AccessDecision {
        outcome: Outcome::Allow,
        reason: Reason::Ok,
    };

    pub fn is_allowed(&self) -> bool {
        self.outcome == Outcome::Allow
    }

    /// Route the shell should end up on after applying this decision.
    pub fn target(&self, requested: Route, session: &Session) -> Route {
        match self.outcome {
            Outcome::Allow => requested,
            Outcome::RedirectToLogin => Route::Login,
            Outcome::RedirectToDefault => match session.role() {
                Some(role) => resolve_role(role).default_route(),
                None => resolve(None).default_route(),
            },
        }
    }
}

/// Decide whether `session` may open `requested`.
pub fn evaluate(
    session: &Session,
    requested: Route,
    requirements: &RouteRequirements,
) -> AccessDecision {
    let decision = decide(session, requested, requirements);
    if !decision.is_allowed() {
        tracing::debug!(
            route = %requested,
            outcome = ?decision.outcome,
            reason = ?decision.reason,
            "navigation redirected"
        );
    }
    decision
}

fn decide(session: &Session, requested: Route, requirements: &RouteRequirements) -> AccessDecision {
    let Some(role) = session.role() else {
        return if requirements.public {
            AccessDecision::ALLOW
        } else {
            AccessDecision {
                outcome: Outcome::RedirectToLogin,
                reason: Reason::NotAuthenticated,
            }
        };
    };

    // A logged-in user never sees the login form again.
    if requested == Route::Login {
        return AccessDecision {
            outcome: Outcome::RedirectToDefault,
            reason: Reason::Ok,
        };
    }

    match requirements.required_role {
        Some(required) if required != role => AccessDecision {
            outcome: Outcome::RedirectToDefault,
            reason: Reason::RoleNotPermitted,
        },
        _ => AccessDecision::ALLOW,
    }
}

/// Gate evaluation for a raw request path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GateResult {
    /// Route the path resolved to (catch-all applied).
    pub route: Route,
    pub decision: AccessDecision,
    /// Where the shell should navigate.
    pub target: Route,
}

/// Route table plus the decision policy, as consumed by the UI shell.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    routes: RouteTable,
}

impl AccessGate {
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn evaluate(&self, session: &Session, route: Route) -> AccessDecision {
        evaluate(session, route, &self.routes.requirements(route))
    }

    pub fn evaluate_path(&self, session: &Session, path: &str) -> GateResult {
        let matched = self.routes.lookup(path);
        if matched.fallback {
            tracing::debug!(path, fallback = %matched.route, "unknown path");
        }
        let decision = evaluate(session, matched.route, &matched.requirements);
        GateResult {
            route: matched.route,
            decision,
            target: decision.target(matched.route, session),
        }
    }
}
