use collegedesk_core::{
    AccessToken, ErrorKind, RefreshToken, RoleTag, Session, SessionState, UserDetails,
};
use tokio::sync::watch;

use crate::{KeyValueStore, SessionError, StorageError};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "role";
pub const USER_DETAILS_KEY: &str = "userDetails";

/// Every key the session owns in the persistent store.
pub const AUTH_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, USER_DETAILS_KEY];

/// Single source of truth for authentication state.
///
/// # State machine
/// - `Anonymous --login--> Authenticated{role}`
/// - `Authenticated{role} --logout/expire--> Anonymous`
/// - `Anonymous --rehydrate--> Authenticated{role} | Anonymous`
///
/// A role never changes without an intervening logout.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    current: Session,
    notifier: watch::Sender<Session>,
}

type Snapshot = Vec<(&'static str, Option<String>)>;

impl<S: KeyValueStore> SessionStore<S> {
    /// Wrap `storage`. The session starts anonymous until [`Self::rehydrate`].
    pub fn new(storage: S) -> Self {
        let (notifier, _) = watch::channel(Session::anonymous());
        Self {
            storage,
            current: Session::anonymous(),
            notifier,
        }
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    pub fn state(&self) -> SessionState {
        self.current.state()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Observe every session change (login, logout, rehydrate).
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.notifier.subscribe()
    }

    /// Rebuild the session from persisted keys. Never writes to storage.
    ///
    /// Unreadable keys count as absent, and undecodable user details are
    /// dropped: this never fails.
    pub fn rehydrate(&mut self) -> Session {
        let session = self.read_persisted();
        match session.role() {
            Some(role) => tracing::info!(role = %role, "session rehydrated"),
            None => tracing::debug!("no persisted session"),
        }
        self.publish(session.clone());
        session
    }

    /// Persist a freshly issued session.
    ///
    /// All-or-nothing: if any write fails, previously persisted values are
    /// restored and the in-memory session is left untouched.
    pub fn login(
        &mut self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        role: RoleTag,
        details: Option<UserDetails>,
    ) -> Result<Session, SessionError> {
        if access_token.as_str().is_empty() {
            return Err(SessionError::EmptyAccessToken);
        }
        if let Some(current) = self.current.role() {
            if current != role {
                return Err(SessionError::RoleSwitch {
                    current,
                    requested: role,
                });
            }
        }

        let snapshot = self.snapshot()?;

        // Token goes last: rehydrate keys off its presence.
        let writes = [
            (ROLE_KEY, Some(role.as_str().to_string())),
            (REFRESH_TOKEN_KEY, refresh_token.as_ref().map(|t| t.as_str().to_string())),
            (USER_DETAILS_KEY, details.as_ref().map(UserDetails::to_json)),
            (ACCESS_TOKEN_KEY, Some(access_token.as_str().to_string())),
        ];

        if let Err(err) = self.apply(&writes) {
            tracing::error!(
                error = %err,
                role = %role,
                kind = %ErrorKind::PersistenceFailure,
                "failed to persist session; rolling back"
            );
            self.restore(snapshot);
            return Err(SessionError::Persistence(err));
        }

        tracing::info!(
            role = %role,
            has_refresh_token = refresh_token.is_some(),
            has_details = details.is_some(),
            "logged in"
        );

        let session = Session::authenticated(access_token, refresh_token, role, details);
        self.publish(session.clone());
        Ok(session)
    }

    /// Clear all persisted authentication keys. Safe to call repeatedly.
    ///
    /// The access token is removed first. If that fails nothing else is
    /// touched and the session stays authenticated, so a reload reproduces
    /// exactly the session the user still has.
    pub fn logout(&mut self) -> Result<Session, SessionError> {
        let role = self.current.role();
        self.clear_persisted()?;
        match role {
            Some(role) => tracing::info!(role = %role, "logged out"),
            None => tracing::debug!("logout while anonymous"),
        }
        self.publish(Session::anonymous());
        Ok(Session::anonymous())
    }

    /// Log out because the API rejected the session token.
    pub fn expire(&mut self) -> Result<Session, SessionError> {
        let role = self.current.role();
        self.clear_persisted()?;
        if let Some(role) = role {
            tracing::info!(role = %role, "session expired");
        }
        self.publish(Session::anonymous());
        Ok(Session::anonymous())
    }

    fn read_persisted(&self) -> Session {
        let Some(token) = self.read(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty()) else {
            return Session::anonymous();
        };

        let tag = self.read(ROLE_KEY);
        if let Some(Err(err)) = tag.as_deref().map(str::parse::<RoleTag>) {
            tracing::warn!(error = %err, "persisted role not recognized");
        } else if tag.is_none() {
            tracing::warn!("token persisted without a role");
        }
        let role = collegedesk_auth::resolve(tag.as_deref()).role;

        let details = self
            .read(USER_DETAILS_KEY)
            .and_then(|blob| match UserDetails::from_json(&blob) {
                Ok(details) => Some(details),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        kind = %ErrorKind::MalformedUserDetails,
                        "ignoring persisted user details"
                    );
                    None
                }
            });

        Session::authenticated(
            AccessToken::new(token),
            self.read(REFRESH_TOKEN_KEY).map(RefreshToken::new),
            role,
            details,
        )
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to read session key");
                None
            }
        }
    }

    fn snapshot(&self) -> Result<Snapshot, StorageError> {
        AUTH_KEYS
            .iter()
            .map(|key| self.storage.get(key).map(|value| (*key, value)))
            .collect()
    }

    fn apply(&mut self, writes: &[(&str, Option<String>)]) -> Result<(), StorageError> {
        for (key, value) in writes {
            match value {
                Some(value) => self.storage.set(key, value)?,
                None => self.storage.remove(key)?,
            }
        }
        Ok(())
    }

    fn restore(&mut self, snapshot: Snapshot) {
        for (key, value) in snapshot {
            let result = match value {
                Some(value) => self.storage.set(key, &value),
                None => self.storage.remove(key),
            };
            if let Err(err) = result {
                tracing::error!(key, error = %err, "failed to restore session key");
            }
        }
    }

    fn clear_persisted(&mut self) -> Result<(), SessionError> {
        // Without the token, rehydrate yields an anonymous session whatever
        // else is left behind; with it, the role must survive.
        if let Err(err) = self.storage.remove(ACCESS_TOKEN_KEY) {
            tracing::error!(
                error = %err,
                kind = %ErrorKind::PersistenceFailure,
                "failed to remove access token; session kept"
            );
            return Err(SessionError::LogoutIncomplete(err));
        }

        for key in [REFRESH_TOKEN_KEY, ROLE_KEY, USER_DETAILS_KEY] {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!(key, error = %err, "failed to remove session key");
            }
        }
        Ok(())
    }

    fn publish(&mut self, session: Session) {
        self.current = session.clone();
        self.notifier.send_replace(session);
    }
}
