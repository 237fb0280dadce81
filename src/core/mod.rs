pub mod store;
pub mod backup;
pub mod restore;
pub mod prompt;
pub mod reload;

pub use store::{LocalStore, StageStore};
pub use restore::RestoreManager;
pub use prompt::ConsolePrompter;
pub use reload::MarkerReloader;
