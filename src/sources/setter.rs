//! Copy staged `data-*` values onto the attributes a browser actually loads.
//!
//! The rule is the same everywhere: a non-empty staged value overwrites the
//! live one, an empty or missing staged value leaves it alone.

use crate::core::{DomHost, SourceSettings};
use crate::errors::Result;
use tracing::{debug, trace};

pub const BACKGROUND_IMAGE: &str = "background-image";

/// Resolve the staged sources of a single element
///
/// `img` gets `srcset` and `src` (after its `<picture>` sources, if any),
/// `iframe` gets `src`, anything else gets `background-image: url(...)`.
pub fn set_sources<H: DomHost>(
    host: &mut H,
    element: H::Handle,
    settings: &SourceSettings,
) -> Result<()> {
    let tag_name = host.tag_name(element)?;
    let src = non_empty(host.staged_value(element, &settings.data_src)?);

    match tag_name.as_str() {
        "img" => {
            set_sources_for_picture(host, element, settings)?;
            if let Some(key) = settings.data_sizes.as_deref() {
                set_attribute_from_staged(host, element, "sizes", key)?;
            }
            set_attribute_from_staged(host, element, "srcset", &settings.data_srcset)?;
            if let Some(src) = src {
                apply(host, element, "src", &src)?;
            }
        }
        "iframe" => {
            if let Some(src) = src {
                apply(host, element, "src", &src)?;
            }
        }
        _ => {
            if let Some(src) = src {
                let value = format!("url({})", src);
                debug!(element = ?element, property = BACKGROUND_IMAGE, value = %value, "applying staged background");
                host.set_style_property(element, BACKGROUND_IMAGE, &value)?;
            } else {
                trace!(element = ?element, "no staged background image");
            }
        }
    }

    Ok(())
}

/// Resolve the `<source>` siblings of an `<img>` inside a `<picture>`
///
/// Each source is handled on its own, in document order. An image without a
/// `<picture>` parent has nothing to resolve.
pub fn set_sources_for_picture<H: DomHost>(
    host: &mut H,
    img: H::Handle,
    settings: &SourceSettings,
) -> Result<()> {
    let Some(picture) = host.parent(img)? else {
        trace!(element = ?img, "image has no parent picture");
        return Ok(());
    };
    if host.tag_name(picture)? != "picture" {
        trace!(element = ?img, "image parent is not a picture");
        return Ok(());
    }

    for child in host.children(picture)? {
        if host.tag_name(child)? != "source" {
            continue;
        }
        if let Some(key) = settings.data_sizes.as_deref() {
            set_attribute_from_staged(host, child, "sizes", key)?;
        }
        set_attribute_from_staged(host, child, "srcset", &settings.data_srcset)?;
    }

    Ok(())
}

fn set_attribute_from_staged<H: DomHost>(
    host: &mut H,
    element: H::Handle,
    attribute: &str,
    key: &str,
) -> Result<()> {
    match non_empty(host.staged_value(element, key)?) {
        Some(value) => apply(host, element, attribute, &value),
        None => {
            trace!(element = ?element, attribute, key, "staged value empty, keeping live attribute");
            Ok(())
        }
    }
}

fn apply<H: DomHost>(host: &mut H, element: H::Handle, attribute: &str, value: &str) -> Result<()> {
    debug!(element = ?element, attribute, value, "applying staged value");
    host.set_attribute(element, attribute, value)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
