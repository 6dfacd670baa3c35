//! Configuration for Finanzgarten
//!
//! XDG-compliant path resolution and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
