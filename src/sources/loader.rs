use crate::core::{DomHost, SourceSettings};
use crate::errors::Result;
use crate::sources::setter::{set_sources, BACKGROUND_IMAGE};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Live sources of one element after loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSources {
    pub tag_name: String,
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub elements: Vec<ElementSources>,
}

impl LoadReport {
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn with_src(&self) -> Vec<&ElementSources> {
        self.elements.iter().filter(|e| e.src.is_some()).collect()
    }
}

/// Applies the source rules to a batch of elements with one set of settings
pub struct LazyLoader {
    settings: SourceSettings,
}

impl LazyLoader {
    pub fn new(settings: SourceSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    pub fn load<H: DomHost>(&self, host: &mut H, element: H::Handle) -> Result<()> {
        set_sources(host, element, &self.settings)
    }

    /// Load every element in order and report what ended up live
    pub fn load_all<H: DomHost>(&self, host: &mut H, elements: &[H::Handle]) -> Result<LoadReport> {
        let mut report = LoadReport {
            timestamp: chrono::Utc::now(),
            elements: Vec::with_capacity(elements.len()),
        };

        for element in elements {
            self.load(host, *element)?;
            report.elements.push(Self::describe(host, *element)?);
        }

        info!(
            "Resolved staged sources for {} elements ({} with src)",
            report.element_count(),
            report.with_src().len()
        );
        Ok(report)
    }

    fn describe<H: DomHost>(host: &H, element: H::Handle) -> Result<ElementSources> {
        Ok(ElementSources {
            tag_name: host.tag_name(element)?,
            src: host.attribute(element, "src")?,
            srcset: host.attribute(element, "srcset")?,
            background_image: host.style_property(element, BACKGROUND_IMAGE)?,
        })
    }
}

impl Default for LazyLoader {
    fn default() -> Self {
        Self::new(SourceSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_load_all_reports_live_values() {
        let html = r#"<img class="lazy" data-src="a.png" data-srcset="a2.png 2x"><iframe class="lazy" data-src="https://example.com"></iframe><div class="lazy" data-src="bg.png"></div>"#;
        let (mut doc, selected) = Document::parse_selecting(html, ".lazy").unwrap();

        let report = LazyLoader::default().load_all(&mut doc, &selected).unwrap();

        assert_eq!(report.element_count(), 3);
        assert_eq!(
            report.elements[0],
            ElementSources {
                tag_name: "img".to_string(),
                src: Some("a.png".to_string()),
                srcset: Some("a2.png 2x".to_string()),
                background_image: None,
            }
        );
        assert_eq!(report.elements[1].src.as_deref(), Some("https://example.com"));
        assert_eq!(report.elements[2].src, None);
        assert_eq!(
            report.elements[2].background_image.as_deref(),
            Some("url(bg.png)")
        );
        assert_eq!(report.with_src().len(), 2);
    }

    #[test]
    fn test_load_all_updates_serialized_markup() {
        let (mut doc, selected) =
            Document::parse_selecting(r#"<img data-src="a.png" alt="">"#, "img").unwrap();
        LazyLoader::default().load_all(&mut doc, &selected).unwrap();

        insta::assert_snapshot!(doc.to_html(), @r#"<img data-src="a.png" alt="" src="a.png">"#);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let (mut doc, selected) =
            Document::parse_selecting(r#"<img data-src="a.png">"#, "img").unwrap();
        let report = LazyLoader::default().load_all(&mut doc, &selected).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elements"][0]["src"], "a.png");
        assert_eq!(json["elements"][0]["srcset"], serde_json::Value::Null);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_empty_selection() {
        let mut doc = Document::new();
        let report = LazyLoader::default().load_all(&mut doc, &[]).unwrap();
        assert_eq!(report.element_count(), 0);
    }
}
