//! Login, session tokens and route protection

pub mod credentials;
pub mod guard;
pub mod middleware;
pub mod models;
pub mod session;
pub mod token;

pub use credentials::CredentialStore;
pub use guard::{authorize, Access, Guard, RouteClass, RouteTable, SessionSignal};
pub use middleware::{route_guard, SessionEvidence};
pub use models::{CredentialRecord, LoginRequest, LoginResponse, Profile, UserRole};
pub use session::{
    require_session, ClientSession, FileStore, MemoryStore, Navigation, SessionContext,
    SessionStore,
};
pub use token::TokenClaims;
