//! Loader backend implementations.

mod command_line;
mod directory;
mod environment;
mod fixed;
mod properties_file;

pub use command_line::CommandLineLoader;
pub use directory::DirectoryLoader;
pub use environment::EnvironmentLoader;
pub use fixed::FixedValueLoader;
pub use properties_file::{FileLocation, PropertiesFileLoader, parse_properties};
