//! Session and preference state persisted through a storage backend.

mod admin;
mod favorites;
pub mod keys;
mod profile;
mod store;

pub use admin::AdminPolicy;
pub use profile::UserProfile;
pub use store::{CurrentUser, LoginInfo, SessionStore};
