use crate::dom::{Document, NodeId};

/// Fixture builders shared by unit and integration tests
pub struct TestHelper;

/// A `<picture>` with two `<source>` children followed by an `<img>`
#[derive(Debug, Clone, Copy)]
pub struct PictureFixture {
    pub picture: NodeId,
    pub sources: [NodeId; 2],
    pub img: NodeId,
}

impl TestHelper {
    /// `<div><img></div>`, returning the image
    pub fn image_in_div(doc: &mut Document) -> NodeId {
        let div = doc.create_element("div");
        let img = doc.create_element("img");
        Self::append(doc, div, img);
        img
    }

    pub fn picture(doc: &mut Document) -> PictureFixture {
        let picture = doc.create_element("picture");
        let first = doc.create_element("source");
        let second = doc.create_element("source");
        let img = doc.create_element("img");
        for child in [first, second, img] {
            Self::append(doc, picture, child);
        }
        PictureFixture {
            picture,
            sources: [first, second],
            img,
        }
    }

    /// Replace the staged values of an element, like assigning `el.dataset`
    pub fn set_dataset(doc: &mut Document, element: NodeId, entries: &[(&str, &str)]) {
        if let Ok(el) = doc.element_mut(element) {
            el.attributes.retain(|attr| !attr.name.starts_with("data-"));
            for (key, value) in entries {
                el.set_staged(key, value);
            }
        }
    }

    pub fn set_attribute(doc: &mut Document, element: NodeId, name: &str, value: &str) {
        if let Ok(el) = doc.element_mut(element) {
            el.set_attribute(name, value);
        }
    }

    pub fn attribute(doc: &Document, element: NodeId, name: &str) -> Option<String> {
        doc.element(element)
            .ok()
            .and_then(|el| el.attribute(name).map(str::to_string))
    }

    pub fn style_property(doc: &Document, element: NodeId, property: &str) -> Option<String> {
        doc.element(element)
            .ok()
            .and_then(|el| el.style_property(property))
    }

    fn append(doc: &mut Document, parent: NodeId, child: NodeId) {
        if let Err(e) = doc.append_child(parent, child) {
            panic!("fixture tree is invalid: {}", e);
        }
    }
}
