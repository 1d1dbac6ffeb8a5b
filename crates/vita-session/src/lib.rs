//! Persistence of the signed-in session (bearer token and user profile).
//!
//! The store is keyed string entries shared by every page of the client;
//! business logic depends on the [`SessionStore`] trait so tests can swap
//! the file backend for an in-memory one.

mod profile;
mod store;

pub use profile::UserProfile;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, TOKEN_KEY, USER_KEY};
