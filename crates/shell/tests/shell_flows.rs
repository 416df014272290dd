use std::sync::Mutex;
use std::time::{Duration, Instant};

use collegedesk_auth::{Outcome, Reason};
use collegedesk_core::{
    AccessToken, ErrorKind, FetchState, RefreshToken, RoleTag, Route, Session, UserDetails,
};
use collegedesk_session::{
    ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore, ROLE_KEY, StorageError, USER_DETAILS_KEY,
};
use collegedesk_shell::{
    ApiClient, ApiError, Credentials, LoginResponse, Shell, ShellConfig, StorageBackend, bootstrap,
};

/// API double that answers every login with a fixed result.
struct StubApi {
    response: Result<LoginResponse, ApiError>,
    calls: Mutex<Vec<RoleTag>>,
}

impl StubApi {
    fn accepting(details: Option<&str>) -> Self {
        Self {
            response: Ok(LoginResponse {
                access_token: AccessToken::new("t1"),
                refresh_token: Some(RefreshToken::new("r1")),
                details: details.map(|d| UserDetails::from_json(d).unwrap()),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(err: ApiError) -> Self {
        Self {
            response: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ApiClient for StubApi {
    async fn login(
        &self,
        _credentials: &Credentials,
        role: RoleTag,
    ) -> Result<LoginResponse, ApiError> {
        self.calls.lock().unwrap().push(role);
        self.response.clone()
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected("read-only".to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.0.remove(key)
    }
}

/// Store that cannot delete the access token.
#[derive(Debug, Default)]
struct StickyTokenStore(MemoryStore);

impl KeyValueStore for StickyTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if key == ACCESS_TOKEN_KEY {
            return Err(StorageError::Rejected("token is locked".to_string()));
        }
        self.0.remove(key)
    }
}

fn credentials() -> Credentials {
    Credentials::new("admin@college.edu", "secret")
}

fn shell(store: MemoryStore, api: StubApi) -> Shell<MemoryStore, StubApi> {
    Shell::new(store, api, Duration::ZERO)
}

#[tokio::test]
async fn anonymous_start_lands_on_login() {
    let mut shell = shell(MemoryStore::new(), StubApi::accepting(None));
    assert_eq!(shell.start().await, Session::anonymous());

    let nav = shell.navigate("/dashboard");
    assert_eq!(nav.decision.outcome, Outcome::RedirectToLogin);
    assert_eq!(nav.decision.reason, Reason::NotAuthenticated);
    assert_eq!(nav.target, Route::Login);
    assert!(nav.view.is_none());

    let nav = shell.navigate("/forgot-password");
    assert!(nav.decision.is_allowed());
    assert_eq!(nav.target, Route::ForgotPassword);
}

#[tokio::test]
async fn persisted_session_is_restored_at_startup() {
    let store = MemoryStore::with_entries([
        (ACCESS_TOKEN_KEY, "t1"),
        (ROLE_KEY, "department_admin"),
        (USER_DETAILS_KEY, r#"{"name":"Grace","department":"CS"}"#),
    ]);
    let mut shell = shell(store, StubApi::accepting(None));

    let session = shell.start().await;
    assert_eq!(session.role(), Some(RoleTag::DepartmentAdmin));

    let nav = shell.navigate("/student-management");
    assert!(nav.decision.is_allowed());
    let view = nav.view.expect("authenticated layout");
    assert_eq!(view.display_name, "Grace");
    assert_eq!(view.profile.role, RoleTag::DepartmentAdmin);
}

#[tokio::test]
async fn corrupt_details_fall_back_to_role_label() {
    let store = MemoryStore::with_entries([
        (ACCESS_TOKEN_KEY, "t1"),
        (ROLE_KEY, "college_admin"),
        (USER_DETAILS_KEY, "{not json"),
    ]);
    let mut shell = shell(store, StubApi::accepting(None));
    shell.start().await;

    let view = shell.navigate("/dashboard").view.expect("authenticated layout");
    assert_eq!(view.display_name, "College Admin");
}

#[tokio::test]
async fn login_then_navigation_uses_the_role_profile() {
    let mut shell = shell(MemoryStore::new(), StubApi::accepting(Some(r#"{"name":"Ada"}"#)));
    shell.start().await;

    let state = shell.login(&credentials(), RoleTag::CollegeAdmin).await;
    let session = state.data().expect("logged in");
    assert_eq!(session.role(), Some(RoleTag::CollegeAdmin));
    assert_eq!(shell.login_state(), &state);

    // Logged-in users are bounced off the login page.
    let nav = shell.navigate("/login");
    assert_eq!(nav.decision.outcome, Outcome::RedirectToDefault);
    assert_eq!(nav.target, Route::Dashboard);

    let nav = shell.navigate("/admin-management");
    assert!(nav.decision.is_allowed());
    let view = nav.view.unwrap();
    assert!(view.profile.menu_item("admin-management").is_some());
    assert_eq!(view.display_name, "Ada");

    assert!(shell.can("admin_management"));
    assert!(!shell.can("profile_approval"));
    assert!(shell.can("undeclared_report"));
}

#[tokio::test]
async fn department_admin_is_kept_out_of_college_pages() {
    let mut shell = shell(MemoryStore::new(), StubApi::accepting(None));
    shell.login(&credentials(), RoleTag::DepartmentAdmin).await;

    let nav = shell.navigate("/admin-management");
    assert_eq!(nav.decision.outcome, Outcome::RedirectToDefault);
    assert_eq!(nav.decision.reason, Reason::RoleNotPermitted);
    assert_eq!(nav.target, Route::Dashboard);
    assert!(nav.view.is_some());
}

#[tokio::test]
async fn unknown_paths_go_to_dashboard() {
    let mut shell = shell(MemoryStore::new(), StubApi::accepting(None));
    shell.login(&credentials(), RoleTag::CollegeAdmin).await;

    let nav = shell.navigate("/reports/2024");
    assert_eq!(nav.route, Route::Dashboard);
    assert_eq!(nav.target, Route::Dashboard);
    assert!(nav.decision.is_allowed());
}

#[tokio::test]
async fn rejected_credentials_leave_the_user_anonymous() {
    let mut shell = shell(MemoryStore::new(), StubApi::rejecting(ApiError::InvalidCredentials));

    let state = shell.login(&credentials(), RoleTag::CollegeAdmin).await;
    assert_eq!(state, FetchState::Failure(ErrorKind::Unauthorized));
    assert!(!shell.session().is_authenticated());
    assert!(shell.sessions().storage().is_empty());
}

#[tokio::test]
async fn persistence_failure_is_retryable_and_not_logged_in() {
    let mut shell = Shell::new(ReadOnlyStore::default(), StubApi::accepting(None), Duration::ZERO);

    let state = shell.login(&credentials(), RoleTag::CollegeAdmin).await;
    assert_eq!(state.error(), Some(ErrorKind::PersistenceFailure));
    assert!(state.error().is_some_and(|k| k.is_retryable()));
    assert!(!shell.session().is_authenticated());
    assert_eq!(shell.navigate("/dashboard").target, Route::Login);
}

#[tokio::test]
async fn logout_and_expiry_return_to_login() {
    let mut shell = shell(MemoryStore::new(), StubApi::accepting(None));
    let mut rx = shell.subscribe();

    shell.login(&credentials(), RoleTag::CollegeAdmin).await;
    assert!(rx.borrow_and_update().is_authenticated());

    let nav = shell.logout().unwrap();
    assert_eq!(nav.target, Route::Login);
    assert!(nav.decision.is_allowed());
    assert!(!rx.borrow_and_update().is_authenticated());
    assert!(shell.login_state().is_idle());

    shell.login(&credentials(), RoleTag::CollegeAdmin).await;
    let nav = shell.handle_unauthorized().unwrap();
    assert_eq!(nav.target, Route::Login);
    assert!(shell.sessions().storage().is_empty());
    assert_eq!(shell.navigate("/student-management").target, Route::Login);
}

#[tokio::test]
async fn api_receives_the_selected_role_variant() {
    let api = StubApi::accepting(None);
    let mut shell = shell(MemoryStore::new(), api);

    shell.login(&credentials(), RoleTag::DepartmentAdmin).await;
    shell.logout().unwrap();
    shell.login(&credentials(), RoleTag::CollegeAdmin).await;

    assert_eq!(
        *shell.api().calls.lock().unwrap(),
        vec![RoleTag::DepartmentAdmin, RoleTag::CollegeAdmin]
    );
}

#[tokio::test]
async fn start_waits_for_the_splash_delay() {
    let mut shell = Shell::new(
        MemoryStore::new(),
        StubApi::accepting(None),
        Duration::from_millis(20),
    );

    let started = Instant::now();
    shell.start().await;
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[tokio::test]
async fn bootstrap_restores_a_file_backed_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShellConfig {
        storage: StorageBackend::File(dir.path().join("session.json")),
        splash_delay: Duration::ZERO,
        ..ShellConfig::default()
    };

    let mut first = bootstrap(&config, StubApi::accepting(None)).unwrap();
    first.start().await;
    let logged_in = first.login(&credentials(), RoleTag::DepartmentAdmin).await;
    drop(first);

    let mut second = bootstrap(&config, StubApi::accepting(None)).unwrap();
    let restored = second.start().await;
    assert_eq!(Some(&restored), logged_in.data());
}

#[tokio::test]
async fn failed_logout_keeps_the_user_in_their_own_role() {
    let mut shell = Shell::new(
        StickyTokenStore::default(),
        StubApi::accepting(None),
        Duration::ZERO,
    );
    shell.login(&credentials(), RoleTag::DepartmentAdmin).await;

    let err = shell.logout().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
    assert_eq!(shell.session().role(), Some(RoleTag::DepartmentAdmin));
    assert!(!shell.can("admin_management"));
    assert!(shell.handle_unauthorized().is_err());

    // Still on the department admin's pages, never promoted.
    let nav = shell.navigate("/admin-management");
    assert_eq!(nav.decision.reason, Reason::RoleNotPermitted);
    assert_eq!(nav.target, Route::Dashboard);
}

#[tokio::test]
async fn logging_in_under_another_role_asks_for_logout() {
    let mut shell = shell(MemoryStore::new(), StubApi::accepting(None));
    shell.login(&credentials(), RoleTag::CollegeAdmin).await;

    let state = shell.login(&credentials(), RoleTag::DepartmentAdmin).await;
    assert_eq!(state, FetchState::Failure(ErrorKind::RoleConflict));
    assert_eq!(shell.session().role(), Some(RoleTag::CollegeAdmin));
}

#[tokio::test]
async fn corrupt_session_file_starts_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"accessToken":"t1","#).unwrap();
    let config = ShellConfig {
        storage: StorageBackend::File(path.clone()),
        splash_delay: Duration::ZERO,
        ..ShellConfig::default()
    };

    let mut shell = bootstrap(&config, StubApi::accepting(None)).unwrap();
    assert_eq!(shell.start().await, Session::anonymous());
    assert_eq!(shell.navigate("/dashboard").target, Route::Login);

    // The reset file is usable again.
    let logged_in = shell.login(&credentials(), RoleTag::CollegeAdmin).await;
    drop(shell);
    let mut restarted = bootstrap(&config, StubApi::accepting(None)).unwrap();
    assert_eq!(Some(&restarted.start().await), logged_in.data());
}
