use std::path::PathBuf;
use std::sync::Mutex;

use log::warn;

use crate::error::AppError;
use crate::models::identity::{Identity, SessionSnapshot};
use crate::services::auth_service::Authenticator;

const SESSION_FILE: &str = "session.json";

/// Holds the current identity and drives the session state machine:
/// Unknown -> {Authenticated, Anonymous} on restore, Anonymous ->
/// Authenticated on login/sign-up, Authenticated -> Anonymous on logout.
/// `is_loading` brackets every operation; `error` is cleared at the
/// start of each one and set only on failure.
pub struct SessionStore {
    authenticator: Box<dyn Authenticator>,
    session_path: PathBuf,
    state: Mutex<SessionSnapshot>,
}

impl SessionStore {
    pub fn new(authenticator: Box<dyn Authenticator>, data_dir: PathBuf) -> Self {
        Self {
            authenticator,
            session_path: data_dir.join(SESSION_FILE),
            state: Mutex::new(SessionSnapshot::anonymous()),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self) {
        let mut state = self.lock();
        state.is_loading = true;
        state.error = None;
    }

    /// Load a previously persisted identity. A missing file means
    /// anonymous; an unreadable or malformed file is a restore failure.
    /// Never returns an error to the caller.
    pub fn restore(&self) -> SessionSnapshot {
        let restored = match std::fs::read_to_string(&self.session_path) {
            Ok(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Ok(Some(identity)),
                Err(err) => {
                    warn!("session file is malformed: {err}");
                    Err(AppError::SessionRestore)
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                warn!("session file is unreadable: {err}");
                Err(AppError::SessionRestore)
            }
        };

        let mut state = self.lock();
        match restored {
            Ok(Some(identity)) => {
                *state = SessionSnapshot {
                    identity: Some(identity),
                    is_authenticated: true,
                    is_loading: false,
                    error: None,
                };
            }
            Ok(None) => {
                state.is_loading = false;
            }
            Err(err) => {
                *state = SessionSnapshot {
                    identity: None,
                    is_authenticated: false,
                    is_loading: false,
                    error: Some(err.to_string()),
                };
            }
        }
        state.clone()
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        self.begin();
        let result = self
            .authenticator
            .login(email, password)
            .and_then(|identity| self.persist(identity));
        self.settle_auth(result)
    }

    pub fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Identity, AppError> {
        self.begin();
        let result = self
            .authenticator
            .sign_up(email, password, name)
            .and_then(|identity| self.persist(identity));
        self.settle_auth(result)
    }

    /// On success the persisted identity is removed and the session
    /// resets to anonymous. On failure the error is recorded and the
    /// session (including the persisted identity) is left as-is.
    pub fn logout(&self) -> Result<(), AppError> {
        self.begin();
        match self.authenticator.logout() {
            Ok(()) => {
                match std::fs::remove_file(&self.session_path) {
                    Ok(()) => {}
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                    Err(err) => warn!("failed to remove session file: {err}"),
                }
                *self.lock() = SessionSnapshot::anonymous();
                Ok(())
            }
            Err(err) => {
                let mut state = self.lock();
                state.is_loading = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn persist(&self, identity: Identity) -> Result<Identity, AppError> {
        let raw = serde_json::to_string(&identity)?;
        std::fs::write(&self.session_path, raw)?;
        Ok(identity)
    }

    fn settle_auth(&self, result: Result<Identity, AppError>) -> Result<Identity, AppError> {
        let mut state = self.lock();
        match result {
            Ok(identity) => {
                *state = SessionSnapshot {
                    identity: Some(identity.clone()),
                    is_authenticated: true,
                    is_loading: false,
                    error: None,
                };
                Ok(identity)
            }
            Err(err) => {
                state.is_loading = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::MockAuthenticator;

    struct FailingLogout;

    impl Authenticator for FailingLogout {
        fn login(&self, email: &str, password: &str) -> Result<Identity, AppError> {
            MockAuthenticator.login(email, password)
        }

        fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Identity, AppError> {
            MockAuthenticator.sign_up(email, password, name)
        }

        fn logout(&self) -> Result<(), AppError> {
            Err(AppError::General("logout backend unavailable".to_string()))
        }
    }

    fn store_in(dir: &std::path::Path) -> SessionStore {
        SessionStore::new(Box::new(MockAuthenticator), dir.to_path_buf())
    }

    #[test]
    fn restore_without_persisted_session_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = store_in(dir.path()).restore();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn restore_with_malformed_session_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();

        let snapshot = store_in(dir.path()).restore();
        assert!(!snapshot.is_authenticated);
        assert_eq!(snapshot.error.as_deref(), Some("Failed to restore session"));
    }

    #[test]
    fn login_persists_identity_for_next_restore() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.login("demo@example.com", "password").unwrap();
        assert!(store.snapshot().is_authenticated);

        // A fresh store over the same directory sees the saved identity.
        let snapshot = store_in(dir.path()).restore();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.identity.unwrap().email, "demo@example.com");
    }

    #[test]
    fn failed_login_records_error_and_stays_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let err = store.login("demo@example.com", "wrong").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));

        let snapshot = store.snapshot();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.unwrap().contains("Invalid credentials"));
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn login_clears_previous_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.login("demo@example.com", "wrong").unwrap_err();
        store.login("demo@example.com", "password").unwrap();
        assert!(store.snapshot().error.is_none());
    }

    #[test]
    fn sign_up_authenticates_with_supplied_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let identity = store.sign_up("ada@example.com", "secret", "Ada").unwrap();
        assert_eq!(identity.name, "Ada");
        assert!(store.snapshot().is_authenticated);
    }

    #[test]
    fn logout_clears_persisted_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.login("demo@example.com", "password").unwrap();

        store.logout().unwrap();
        assert!(!store.snapshot().is_authenticated);
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn failed_logout_keeps_session_intact() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(Box::new(FailingLogout), dir.path().to_path_buf());
        store.login("demo@example.com", "password").unwrap();

        store.logout().unwrap_err();

        let snapshot = store.snapshot();
        assert!(snapshot.is_authenticated);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_some());
        assert!(dir.path().join(SESSION_FILE).exists());
    }
}
