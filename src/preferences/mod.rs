pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo::{PgPreferenceRepo, PreferenceRepo};
pub use repo_types::{PreferenceCategory, PreferenceItem, PreferenceSet};
