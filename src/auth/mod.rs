//! Authentication: password hashing, session tokens and the session guard

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenError, TokenIssuer};
pub use middleware::{extract_token, session_guard_middleware, CurrentAccount, SessionGuard};
pub use password::PasswordHasher;
