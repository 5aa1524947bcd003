pub mod chrome;

pub use chrome::{ChromeHost, PageNode};
