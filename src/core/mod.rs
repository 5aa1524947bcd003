pub mod config;
pub mod dom;

pub use config::{BrowserConfig, Config, RenderConfig, SourceSettings, Viewport};
pub use dom::DomHost;
