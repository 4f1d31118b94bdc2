pub mod import;
pub mod resource_types;

pub use import::ImportCommand;
pub use resource_types::ResourceTypesCommand;
