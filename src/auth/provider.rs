use std::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{JwtService, UserSession};

/// Read-only view of who is signed in
pub trait AuthProvider: Send + Sync {
    fn current_session(&self) -> Option<UserSession>;

    /// Identity to submit under; only athletes may submit
    fn current_athlete_id(&self) -> Option<Uuid> {
        self.current_session()
            .filter(|session| session.role.can_submit())
            .map(|session| session.user_id)
    }
}

/// Session holder updated by the sign-in flow and read by the workflow
#[derive(Debug, Default)]
pub struct SessionState {
    session: RwLock<Option<UserSession>>,
}

impl SessionState {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(session: UserSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    /// Restore a session from a stored access token
    pub fn from_token(jwt: &JwtService, token: &str) -> Self {
        match jwt.extract_user_session(token) {
            Ok(session) => {
                info!("Restored session for user {}", session.user_id);
                Self::signed_in(session)
            }
            Err(e) => {
                warn!("Ignoring stored session token: {}", e);
                Self::signed_out()
            }
        }
    }

    pub fn sign_in(&self, session: UserSession) {
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
    }
}

impl AuthProvider for SessionState {
    fn current_session(&self) -> Option<UserSession> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }
}
