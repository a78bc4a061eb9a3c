//! The Profile context.
//!
//! The shopper's name, email and optional date of birth, the rules a
//! submitted profile must pass, and the store that holds the current value.

pub mod profile;
pub mod store;

pub use profile::Profile;
pub use store::{InMemoryProfileStore, ProfileStore};
