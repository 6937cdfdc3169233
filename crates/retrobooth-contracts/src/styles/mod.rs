mod catalog;
mod presets;

pub use catalog::{StyleCatalog, StyleDescriptor, DEFAULT_PROGRESS_MESSAGES};
