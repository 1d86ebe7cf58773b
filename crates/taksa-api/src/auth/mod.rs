// Authentication: token issuance, revocation and the request gate
//
// jwt        -> TokenCodec (sign/verify, injectable clock)
// revocation -> RevocationStore (persisted revoked-token set)
// gate       -> AuthGate (revocation check, then token check)
// middleware -> AuthUser extractor and HTTP error mapping
// routes     -> register, login, profile, logout

pub mod config;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod revocation;
pub mod routes;

pub use config::{AuthConfig, JwtConfig};
pub use gate::{AuthError, AuthGate, DenyReason, Subject};
pub use jwt::{Clock, InvalidToken, ManualClock, SystemClock, TokenClaims, TokenCodec};
pub use middleware::{ApiError, AuthState, AuthUser, FromRef};
pub use revocation::{RevocationStore, StoreFailure};
pub use routes::routes;
