//! Editor host glue
//!
//! - [`EditorHost`]: the four calls a host exposes
//! - [`RegistrationState`]: exactly-once registration per dialect
//! - [`MonarchGrammar`]: JSON export for Monarch-style hosts

mod host;
mod monarch;
mod state;

pub use host::{CharacterPair, EditorHost, LanguageConfiguration, LanguageRegistration};
pub use monarch::MonarchGrammar;
pub use state::RegistrationState;
