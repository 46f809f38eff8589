use chrono::Utc;

use crate::error::AppError;
use crate::models::identity::Identity;

/// Credential backend behind the session store. The store's state
/// machine never changes when this is swapped for a real service.
pub trait Authenticator: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<Identity, AppError>;
    fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Identity, AppError>;
    fn logout(&self) -> Result<(), AppError>;
}

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "password";

/// Stand-in backend: accepts exactly the demo credentials, lets any
/// sign-up through, and never fails logout.
pub struct MockAuthenticator;

impl Authenticator for MockAuthenticator {
    fn login(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            return Ok(Identity {
                id: "1".to_string(),
                email: DEMO_EMAIL.to_string(),
                name: "Demo User".to_string(),
                created_at: Utc::now(),
            });
        }
        Err(AppError::Authentication("Invalid credentials".to_string()))
    }

    fn sign_up(&self, email: &str, _password: &str, name: &str) -> Result<Identity, AppError> {
        Ok(Identity {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        })
    }

    fn logout(&self) -> Result<(), AppError> {
        Ok(())
    }
}
