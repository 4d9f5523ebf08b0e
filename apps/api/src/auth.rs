mod session;
mod session_resolver;

pub use session::{establish_session_handler, logout_handler, me_handler};
pub use session_resolver::TowerSessionResolver;

/// Session key holding the caller's [`stratum_core::SessionClaims`].
pub const SESSION_CLAIMS_KEY: &str = "session_claims";
