use crate::dom::dataset;
use crate::dom::style::InlineStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute on an element (e.g. `src="a.png"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// An element in the in-memory DOM
///
/// Attributes are kept in source order. The dataset and the inline style are
/// views over the `data-*` and `style` attributes, like in a browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomElement {
    pub tag_name: String,
    pub attributes: Vec<Attr>,
}

impl DomElement {
    pub fn new(tag_name: impl AsRef<str>) -> Self {
        Self {
            tag_name: tag_name.as_ref().to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_staged(mut self, key: &str, value: &str) -> Self {
        self.set_staged(key, value);
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.set_style_property(property, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attr {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let index = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Staged value for a dataset key; an empty key never matches
    pub fn staged(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.attribute(&dataset::attribute_name(key))
    }

    pub fn set_staged(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }
        self.set_attribute(&dataset::attribute_name(key), value);
    }

    pub fn dataset(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .filter_map(|attr| {
                dataset::dataset_key(&attr.name).map(|key| (key, attr.value.clone()))
            })
            .collect()
    }

    pub fn style(&self) -> InlineStyle {
        self.attribute("style")
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    pub fn style_property(&self, property: &str) -> Option<String> {
        self.style().get(property).map(str::to_string)
    }

    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut style = self.style();
        style.set(property, value);
        self.set_attribute("style", &style.to_css());
    }

    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }
}
