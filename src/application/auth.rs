//! Session-cookie admin authentication.
//!
//! The backend owns the session; this gate only tracks what the last session check or
//! login said and mints [`AdminSession`] tokens that protected calls require.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use clubsite_api_types::{ChangePasswordRequest, LoginRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::error::AppError;
use crate::application::ports::AuthApi;
use crate::domain::schema::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Deliberately vague about which credential was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("a login attempt is already in progress")]
    LoginInProgress,
    #[error("login required")]
    LoginRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Checking,
    Authenticating,
    Authenticated,
    Anonymous,
}

/// Proof that the backend confirmed the session.
///
/// Only [`AuthGate::check_session`] and [`AuthGate::login`] construct one, and
/// logout invalidates every token minted before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    epoch: u64,
}

pub struct AuthGate {
    api: Arc<dyn AuthApi>,
    state: Mutex<SessionState>,
    login_lock: tokio::sync::Mutex<()>,
    epoch: AtomicU64,
}

impl AuthGate {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState::Unknown),
            login_lock: tokio::sync::Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.lock_state()
    }

    /// Read-only session check; anything but `authenticated: true` means anonymous.
    pub async fn check_session(&self) -> Result<AdminSession, AuthError> {
        self.set_state(SessionState::Checking);
        match self.api.check().await {
            Ok(status) if status.authenticated => Ok(self.grant()),
            Ok(_) => {
                self.set_state(SessionState::Anonymous);
                Err(AuthError::LoginRequired)
            }
            Err(err) => {
                warn!(error = %err, "session check failed");
                self.set_state(SessionState::Anonymous);
                Err(AuthError::LoginRequired)
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        let _writer = self
            .login_lock
            .try_lock()
            .map_err(|_| AuthError::LoginInProgress)?;
        self.set_state(SessionState::Authenticating);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(response) if response.granted() => {
                info!("admin login succeeded");
                Ok(self.grant())
            }
            Ok(response) => {
                warn!(message = ?response.message, "admin login rejected");
                self.set_state(SessionState::Anonymous);
                Err(AuthError::InvalidCredentials)
            }
            Err(err) => {
                warn!(error = %err, "admin login failed");
                self.set_state(SessionState::Anonymous);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Local state clears whatever the backend answers.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            warn!(error = %err, "backend logout failed; clearing local session anyway");
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.set_state(SessionState::Anonymous);
    }

    /// Fails when `session` predates a logout or the gate is no longer authenticated.
    ///
    /// A re-check in flight keeps a current session usable until it resolves.
    pub fn require(&self, session: &AdminSession) -> Result<(), AuthError> {
        let current = self.epoch.load(Ordering::SeqCst) == session.epoch;
        let usable = matches!(
            self.state(),
            SessionState::Authenticated | SessionState::Checking
        );
        if current && usable {
            Ok(())
        } else {
            Err(AuthError::LoginRequired)
        }
    }

    pub async fn change_password(
        &self,
        session: &AdminSession,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.require(session)?;
        if new_password.is_empty() {
            return Err(ValidationError::required("new_password", "New password").into());
        }
        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.api.change_password(&request).await.map_err(|err| {
            warn!(error = %err, "password change failed");
            AppError::operation("change password", err)
        })?;
        info!("admin password changed");
        Ok(())
    }

    fn grant(&self) -> AdminSession {
        self.set_state(SessionState::Authenticated);
        AdminSession {
            epoch: self.epoch.load(Ordering::SeqCst),
        }
    }

    fn set_state(&self, next: SessionState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use clubsite_api_types::{LoginResponse, SessionStatus};
    use tokio::sync::Notify;

    use crate::application::ports::ApiError;

    #[derive(Default)]
    struct FakeAuth {
        authenticated: Mutex<bool>,
        check_fails: bool,
        logout_fails: bool,
        password: &'static str,
        hold_login: Option<Arc<Notify>>,
        hold_check: Option<Arc<Notify>>,
        changed_to: Mutex<Option<String>>,
    }

    #[async_trait]
    impl AuthApi for FakeAuth {
        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            if let Some(gate) = &self.hold_login {
                gate.notified().await;
            }
            let ok = request.username == "admin" && request.password == self.password;
            *self.authenticated.lock().unwrap() = ok;
            Ok(LoginResponse {
                success: ok,
                authenticated: Some(ok),
                message: (!ok).then(|| "Invalid credentials".to_string()),
            })
        }

        async fn logout(&self) -> Result<(), ApiError> {
            *self.authenticated.lock().unwrap() = false;
            if self.logout_fails {
                return Err(ApiError::transport("connection reset"));
            }
            Ok(())
        }

        async fn check(&self) -> Result<SessionStatus, ApiError> {
            if let Some(gate) = &self.hold_check {
                gate.notified().await;
            }
            if self.check_fails {
                return Err(ApiError::transport("connection refused"));
            }
            Ok(SessionStatus {
                authenticated: *self.authenticated.lock().unwrap(),
            })
        }

        async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
            if request.current_password != self.password {
                return Err(ApiError::rejected(401, "Current password is incorrect"));
            }
            *self.changed_to.lock().unwrap() = Some(request.new_password.clone());
            Ok(())
        }
    }

    fn fake() -> FakeAuth {
        FakeAuth {
            password: "hunter2",
            ..FakeAuth::default()
        }
    }

    #[tokio::test]
    async fn starts_unknown_and_resolves_by_check() {
        let gate = AuthGate::new(Arc::new(fake()));
        assert_eq!(gate.state(), SessionState::Unknown);
        assert_eq!(gate.check_session().await, Err(AuthError::LoginRequired));
        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn transport_failure_during_check_is_anonymous() {
        let api = FakeAuth {
            check_fails: true,
            ..fake()
        };
        *api.authenticated.lock().unwrap() = true;
        let gate = AuthGate::new(Arc::new(api));
        assert_eq!(gate.check_session().await, Err(AuthError::LoginRequired));
        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn wrong_username_and_wrong_password_look_identical() {
        let gate = AuthGate::new(Arc::new(fake()));
        let bad_user = gate.login("root", "hunter2").await;
        let bad_pass = gate.login("admin", "nope").await;
        assert_eq!(bad_user, Err(AuthError::InvalidCredentials));
        assert_eq!(bad_user, bad_pass);
        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn login_then_check_grants_session() {
        let gate = AuthGate::new(Arc::new(fake()));
        let session = gate.login("admin", "hunter2").await.expect("login");
        assert_eq!(gate.state(), SessionState::Authenticated);
        assert!(gate.require(&session).is_ok());
        let checked = gate.check_session().await.expect("check");
        assert_eq!(checked, session);
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_backend_fails() {
        let api = FakeAuth {
            logout_fails: true,
            ..fake()
        };
        let gate = AuthGate::new(Arc::new(api));
        let session = gate.login("admin", "hunter2").await.expect("login");
        gate.logout().await;
        assert_eq!(gate.state(), SessionState::Anonymous);
        assert_eq!(gate.require(&session), Err(AuthError::LoginRequired));
    }

    #[tokio::test]
    async fn concurrent_login_is_rejected() {
        let hold = Arc::new(Notify::new());
        let api = FakeAuth {
            hold_login: Some(hold.clone()),
            ..fake()
        };
        let gate = AuthGate::new(Arc::new(api));

        let second = async {
            tokio::task::yield_now().await;
            let result = gate.login("admin", "hunter2").await;
            hold.notify_one();
            result
        };
        let (first, second) = tokio::join!(gate.login("admin", "hunter2"), second);
        assert!(first.is_ok());
        assert_eq!(second, Err(AuthError::LoginInProgress));
    }

    #[tokio::test]
    async fn session_stays_usable_while_recheck_is_pending() {
        let hold = Arc::new(Notify::new());
        let api = FakeAuth {
            hold_check: Some(hold.clone()),
            ..fake()
        };
        let gate = AuthGate::new(Arc::new(api));
        let session = gate.login("admin", "hunter2").await.expect("login");

        let during = async {
            tokio::task::yield_now().await;
            let state = gate.state();
            let access = gate.require(&session);
            hold.notify_one();
            (state, access)
        };
        let (checked, (state, access)) = tokio::join!(gate.check_session(), during);
        assert_eq!(state, SessionState::Checking);
        assert_eq!(access, Ok(()));
        assert!(checked.is_ok());
        assert_eq!(gate.require(&session), Ok(()));

        gate.logout().await;
        let during = async {
            tokio::task::yield_now().await;
            let access = gate.require(&session);
            hold.notify_one();
            access
        };
        let (_, access) = tokio::join!(gate.check_session(), during);
        assert_eq!(access, Err(AuthError::LoginRequired));
    }

    #[tokio::test]
    async fn change_password_needs_session_and_value() {
        let api = Arc::new(fake());
        let gate = AuthGate::new(api.clone());
        let session = gate.login("admin", "hunter2").await.expect("login");

        let err = gate
            .change_password(&session, "hunter2", "")
            .await
            .expect_err("empty password");
        assert!(matches!(err, AppError::Validation(_)));

        let err = gate
            .change_password(&session, "wrong", "s3cret")
            .await
            .expect_err("backend rejects");
        assert!(matches!(err, AppError::OperationFailed { .. }));

        gate.change_password(&session, "hunter2", "s3cret")
            .await
            .expect("changed");
        assert_eq!(api.changed_to.lock().unwrap().as_deref(), Some("s3cret"));

        gate.logout().await;
        let err = gate
            .change_password(&session, "s3cret", "again")
            .await
            .expect_err("stale session");
        assert!(matches!(err, AppError::Auth(AuthError::LoginRequired)));
    }
}
