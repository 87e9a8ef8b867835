pub mod filesystem;
pub mod path;

pub use filesystem::*;
pub use path::{absolutize, join_under, module_specifier};
