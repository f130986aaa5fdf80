//! Infrastructure Layer
//!
//! Identity provider client, database repositories, the cookie-jar session
//! store and in-memory stand-ins.

pub mod cookie_store;
pub mod identity_http;
pub mod memory;
pub mod postgres;

pub use cookie_store::CookieJarStore;
pub use identity_http::HttpIdentityProvider;
pub use memory::{MemoryIdentityProvider, MemoryProfileRepository, MemorySessionStore, SessionWrite};
pub use postgres::PgProfileRepository;
