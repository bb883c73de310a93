pub mod editor;

pub use editor::{write_file_atomic, ZoneFileEditor};
