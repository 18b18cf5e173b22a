//! Authentication layer: token issuing, the verification fallback chain and
//! the admin gate extractor.

pub mod middleware;
pub mod token;

pub use middleware::{AdminAuth, AppState, RateLimiter};
pub use token::{issue_token, verify_credential, AdminIdentity, AuthRejection, Role, AUTH_COOKIE};
