pub mod reload_command;

pub use reload_command::{CommandReloader, ReloadOutcome};
