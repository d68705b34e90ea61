pub mod formatting;
pub mod resume;
pub mod saved;
