use serde::{Deserialize, Serialize};

/// Ordered inline style declarations, as found in a `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute. Semicolons inside `url(...)` or quotes do
    /// not end a declaration; entries without a `:` are dropped.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for part in split_declarations(text) {
            let Some((property, value)) = part.split_once(':') else {
                continue;
            };
            let property = property.trim();
            if property.is_empty() {
                continue;
            }
            style.set(property, value.trim());
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let property = normalize_property(property);
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the value in place when the property exists, append otherwise
    pub fn set(&mut self, property: &str, value: &str) {
        let property = normalize_property(property);
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((property, value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let property = normalize_property(property);
        let index = self
            .declarations
            .iter()
            .position(|(name, _)| *name == property)?;
        Some(self.declarations.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// Custom properties are case-sensitive, everything else is not.
fn normalize_property(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        property.to_string()
    } else {
        property.to_ascii_lowercase()
    }
}

fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let style = InlineStyle::parse("padding: 1px; Background-Image: url(a.png)");
        assert_eq!(style.len(), 2);
        assert_eq!(style.get("padding"), Some("1px"));
        assert_eq!(style.get("background-image"), Some("url(a.png)"));
    }

    #[test]
    fn test_semicolons_inside_url_and_quotes() {
        let style = InlineStyle::parse(
            "background-image: url(data:image/png;base64,AAAA); content: 'a;b'; margin: 0",
        );
        assert_eq!(
            style.get("background-image"),
            Some("url(data:image/png;base64,AAAA)")
        );
        assert_eq!(style.get("content"), Some("'a;b'"));
        assert_eq!(style.get("margin"), Some("0"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut style = InlineStyle::parse("padding: 1px; background-image: url(old); color: red");
        style.set("background-image", "url(new)");
        assert_eq!(
            style.to_css(),
            "padding: 1px; background-image: url(new); color: red;"
        );
    }

    #[test]
    fn test_set_appends_new_property() {
        let mut style = InlineStyle::parse("padding: 1px;");
        style.set("background-image", "url(x)");
        assert_eq!(style.to_css(), "padding: 1px; background-image: url(x);");
    }

    #[test]
    fn test_garbage_entries_are_dropped() {
        let style = InlineStyle::parse(";;nonsense; : 3px; width:10px");
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("width"), Some("10px"));
    }

    #[test]
    fn test_remove() {
        let mut style = InlineStyle::parse("padding: 1px; margin: 0");
        assert_eq!(style.remove("PADDING").as_deref(), Some("1px"));
        assert_eq!(style.remove("padding"), None);
        assert_eq!(style.to_css(), "margin: 0;");
    }

    #[test]
    fn test_custom_properties_keep_case() {
        let style = InlineStyle::parse("--Accent: blue");
        assert_eq!(style.get("--Accent"), Some("blue"));
        assert_eq!(style.get("--accent"), None);
    }
}
