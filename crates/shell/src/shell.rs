use std::time::Duration;

use collegedesk_auth::{AccessDecision, AccessGate, RoleProfile, resolve_role};
use collegedesk_core::{FetchState, RoleTag, Route, Session};
use collegedesk_session::{KeyValueStore, SessionError, SessionStore, StorageError};
use tokio::sync::watch;

use crate::{ApiClient, ConfiguredStore, Credentials, ShellConfig};

/// What the layout needs to draw the chrome for an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub profile: RoleProfile,
    /// Name shown in the header; the role label when details are missing.
    pub display_name: String,
}

/// Result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    /// Route the path matched (after the catch-all).
    pub route: Route,
    pub decision: AccessDecision,
    /// Route actually displayed.
    pub target: Route,
    /// Present when the target is rendered inside the authenticated layout.
    pub view: Option<ShellView>,
}

/// Dashboard application controller.
#[derive(Debug)]
pub struct Shell<S, A> {
    sessions: SessionStore<S>,
    gate: AccessGate,
    api: A,
    splash_delay: Duration,
    login_state: FetchState<Session>,
}

/// Initialize logging and build a shell from `config`.
pub fn bootstrap<A: ApiClient>(
    config: &ShellConfig,
    api: A,
) -> Result<Shell<ConfiguredStore, A>, StorageError> {
    collegedesk_observability::init(config.log_format);
    let store = config.open_store()?;
    tracing::debug!(
        storage = ?config.storage,
        splash_ms = config.splash_delay.as_millis() as u64,
        "shell configured"
    );
    Ok(Shell::new(store, api, config.splash_delay))
}

impl<S: KeyValueStore, A: ApiClient> Shell<S, A> {
    pub fn new(storage: S, api: A, splash_delay: Duration) -> Self {
        Self {
            sessions: SessionStore::new(storage),
            gate: AccessGate::default(),
            api,
            splash_delay,
            login_state: FetchState::Idle,
        }
    }

    pub fn session(&self) -> &Session {
        self.sessions.current()
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sessions.subscribe()
    }

    pub fn login_state(&self) -> &FetchState<Session> {
        &self.login_state
    }

    /// Restore the persisted session, then hold for the splash delay.
    pub async fn start(&mut self) -> Session {
        let session = self.sessions.rehydrate();
        if !self.splash_delay.is_zero() {
            tokio::time::sleep(self.splash_delay).await;
        }
        session
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let session = self.sessions.current();
        let result = self.gate.evaluate_path(session, path);

        let public = self.gate.routes().requirements(result.target).public;
        let view = match session.role() {
            Some(role) if !public => Some(view_for(role, session)),
            _ => None,
        };

        Navigation {
            requested: path.to_string(),
            route: result.route,
            decision: result.decision,
            target: result.target,
            view,
        }
    }

    /// Exchange credentials for tokens and persist the new session.
    ///
    /// The returned state is also kept in [`Self::login_state`].
    pub async fn login(&mut self, credentials: &Credentials, role: RoleTag) -> FetchState<Session> {
        self.login_state = FetchState::Loading;

        let response = match self.api.login(credentials, role).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, role = %role, "login rejected by API");
                self.login_state = FetchState::Failure(err.into());
                return self.login_state.clone();
            }
        };

        let result = self.sessions.login(
            response.access_token,
            response.refresh_token,
            role,
            response.details,
        );
        if let Err(err) = &result {
            tracing::warn!(error = %err, kind = %err.kind(), "login could not be completed");
        }

        self.login_state = FetchState::from_result(result);
        self.login_state.clone()
    }

    /// Log out and go to the login page.
    ///
    /// On error the user is still logged in and stays where they are.
    pub fn logout(&mut self) -> Result<Navigation, SessionError> {
        self.sessions.logout()?;
        self.login_state = FetchState::Idle;
        Ok(self.navigate(Route::Login.path()))
    }

    /// The API answered 401: drop the session and go back to the login page.
    pub fn handle_unauthorized(&mut self) -> Result<Navigation, SessionError> {
        self.sessions.expire()?;
        self.login_state = FetchState::Idle;
        Ok(self.navigate(Route::Login.path()))
    }

    /// Whether the current user may use `capability`. Anonymous users may not.
    pub fn can(&self, capability: &str) -> bool {
        self.sessions
            .current()
            .role()
            .is_some_and(|role| collegedesk_auth::capability_allowed(role, capability))
    }
}

fn view_for(role: RoleTag, session: &Session) -> ShellView {
    let display_name = session
        .user_details()
        .and_then(|d| d.get_str("name"))
        .map(str::to_string)
        .unwrap_or_else(|| role.label().to_string());

    ShellView {
        profile: resolve_role(role),
        display_name,
    }
}
