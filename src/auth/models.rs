use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account roles: athletes submit videos, officials review them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Athlete,
    Official,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Athlete => "athlete",
            UserRole::Official => "official",
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, UserRole::Athlete)
    }
}

/// JWT token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Subject (user ID)
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

/// Authenticated user as seen by the submission flow
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl UserSession {
    pub fn athlete(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserRole::Athlete,
        }
    }

    pub fn from_claims(claims: &Claims) -> Result<Self, uuid::Error> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.sub)?,
            role: claims.role,
        })
    }
}
