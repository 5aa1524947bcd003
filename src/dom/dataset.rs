//! Mapping between `data-*` attribute names and dataset keys.
//!
//! Follows the HTML dataset rules: `data-original-set` <-> `originalSet`.

const DATA_PREFIX: &str = "data-";

/// Attribute name backing a dataset key (`originalSet` -> `data-original-set`)
pub fn attribute_name(key: &str) -> String {
    let mut name = String::with_capacity(DATA_PREFIX.len() + key.len() + 2);
    name.push_str(DATA_PREFIX);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Dataset key for an attribute, or `None` when it is not a `data-*` attribute
pub fn dataset_key(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix(DATA_PREFIX)?;
    let mut key = String::with_capacity(rest.len());
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                key.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        key.push(c);
    }
    Some(key)
}
