use crate::errors::Result;
use std::fmt::Debug;

/// Minimal element interface the source setter works against
///
/// A host owns the DOM and hands out cheap `Handle`s for its elements. The
/// in-memory [`crate::dom::Document`] and the live-browser
/// `crate::browser::ChromeHost` both implement it, so the resolution rules
/// are written once.
pub trait DomHost {
    type Handle: Copy + Debug;

    /// Lower-case tag name of the element (`img`, `iframe`, `div`, ...)
    fn tag_name(&self, element: Self::Handle) -> Result<String>;

    /// Staged (dataset) value stored under `key`, e.g. `src` for `data-src`
    fn staged_value(&self, element: Self::Handle, key: &str) -> Result<Option<String>>;

    /// Current value of a live attribute
    fn attribute(&self, element: Self::Handle, name: &str) -> Result<Option<String>>;

    /// Overwrite a live attribute
    fn set_attribute(&mut self, element: Self::Handle, name: &str, value: &str) -> Result<()>;

    /// Inline style property in CSS notation (`background-image`)
    fn style_property(&self, element: Self::Handle, property: &str) -> Result<Option<String>>;

    /// Set one inline style property, leaving the others as they are
    fn set_style_property(
        &mut self,
        element: Self::Handle,
        property: &str,
        value: &str,
    ) -> Result<()>;

    fn parent(&self, element: Self::Handle) -> Result<Option<Self::Handle>>;

    /// Element children in document order (text and comments are skipped)
    fn children(&self, element: Self::Handle) -> Result<Vec<Self::Handle>>;
}
