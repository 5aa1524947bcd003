pub mod dataset;
pub mod document;
pub mod element;
pub mod html;
pub mod style;

pub use document::{Document, Node, NodeData, NodeId};
pub use element::{Attr, DomElement};
pub use style::InlineStyle;
