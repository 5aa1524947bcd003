pub mod loader;
pub mod setter;

pub use loader::{ElementSources, LazyLoader, LoadReport};
pub use setter::{set_sources, set_sources_for_picture};
