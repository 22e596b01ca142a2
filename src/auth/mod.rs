pub mod errors;
pub mod jwt;
pub mod models;
pub mod provider;

pub use errors::AuthError;
pub use jwt::JwtService;
pub use models::{Claims, UserRole, UserSession};
pub use provider::{AuthProvider, SessionState};
