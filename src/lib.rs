#[cfg(feature = "chrome")]
pub mod browser;
pub mod core;
pub mod dom;
pub mod errors;
pub mod sources;
pub mod testing;

#[cfg(feature = "chrome")]
pub use browser::ChromeHost;
pub use crate::core::{Config, DomHost, SourceSettings};
pub use dom::{Document, DomElement, NodeId};
pub use errors::{LazyLoadError, Result};
pub use sources::{set_sources, set_sources_for_picture, LazyLoader, LoadReport};
