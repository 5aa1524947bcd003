use crate::core::{BrowserConfig, DomHost};
use crate::errors::{LazyLoadError, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Handle to an element registered in the page-side node registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageNode(u32);

impl PageNode {
    pub fn index(self) -> u32 {
        self.0
    }
}

// Installed on every evaluation; registering the same node twice yields the same index.
const PRELUDE: &str = r#"
window.__lazyloadSourcesNodes = window.__lazyloadSourcesNodes || [];
window.__lazyloadSourcesRegister = window.__lazyloadSourcesRegister || function (node) {
    const registry = window.__lazyloadSourcesNodes;
    let index = registry.indexOf(node);
    if (index < 0) {
        index = registry.push(node) - 1;
    }
    return index;
};
"#;

/// [`DomHost`] backed by a live Chrome tab
///
/// Every operation is a `Runtime.evaluate` round trip. Results come back as
/// JSON text so arrays and nulls survive the CDP value conversion.
pub struct ChromeHost {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeHost {
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        if config.disable_images {
            args.push(OsStr::new("--blink-settings=imagesEnabled=false"));
        }

        for arg in &config.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| LazyLoadError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| LazyLoadError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| LazyLoadError::LaunchFailed(e.to_string()))?;
        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        info!("Chrome launched (headless: {})", config.headless);
        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| LazyLoadError::NavigationFailed(e.to_string()))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| LazyLoadError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    /// Register every element matching `selector` and return their handles
    pub fn query(&self, selector: &str) -> Result<Vec<PageNode>> {
        let script = format!(
            "{}JSON.stringify(Array.from(document.querySelectorAll({})).map(n => window.__lazyloadSourcesRegister(n)))",
            PRELUDE,
            js_string(selector)?
        );
        let value = self.evaluate_json(&script)?;
        Ok(serde_json::from_value::<Vec<u32>>(value)?
            .into_iter()
            .map(PageNode)
            .collect())
    }

    fn evaluate_json(&self, script: &str) -> Result<Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| LazyLoadError::JavaScriptFailed(e.to_string()))?;

        match result.value {
            Some(Value::String(json)) => Ok(serde_json::from_str(&json)?),
            other => Err(LazyLoadError::JavaScriptFailed(format!(
                "expected a JSON string, got {:?}",
                other
            ))),
        }
    }

    /// Run `body` with `node` bound to the registered element
    fn on_node(&self, node: PageNode, body: &str) -> Result<Value> {
        let script = format!(
            r#"{prelude}(function () {{
    const node = window.__lazyloadSourcesNodes[{index}];
    if (!node) {{
        return JSON.stringify({{ missing: true }});
    }}
    return JSON.stringify({{ value: (function (node) {{ {body} }})(node) }});
}})()"#,
            prelude = PRELUDE,
            index = node.0,
            body = body
        );

        let mut result = self.evaluate_json(&script)?;
        if result.get("missing").is_some() {
            return Err(LazyLoadError::element_not_found(node));
        }
        Ok(result
            .get_mut("value")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    fn on_node_string(&self, node: PageNode, body: &str) -> Result<Option<String>> {
        Ok(self
            .on_node(node, body)?
            .as_str()
            .map(str::to_string))
    }
}

fn js_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

impl DomHost for ChromeHost {
    type Handle = PageNode;

    fn tag_name(&self, element: PageNode) -> Result<String> {
        Ok(self
            .on_node_string(element, "return node.tagName.toLowerCase();")?
            .unwrap_or_default())
    }

    fn staged_value(&self, element: PageNode, key: &str) -> Result<Option<String>> {
        let body = format!(
            "const value = node.dataset[{}]; return value === undefined ? null : value;",
            js_string(key)?
        );
        self.on_node_string(element, &body)
    }

    fn attribute(&self, element: PageNode, name: &str) -> Result<Option<String>> {
        let body = format!("return node.getAttribute({});", js_string(name)?);
        self.on_node_string(element, &body)
    }

    fn set_attribute(&mut self, element: PageNode, name: &str, value: &str) -> Result<()> {
        let body = format!(
            "node.setAttribute({}, {}); return null;",
            js_string(name)?,
            js_string(value)?
        );
        self.on_node(element, &body)?;
        Ok(())
    }

    fn style_property(&self, element: PageNode, property: &str) -> Result<Option<String>> {
        let body = format!(
            "const value = node.style.getPropertyValue({}); return value === '' ? null : value;",
            js_string(property)?
        );
        self.on_node_string(element, &body)
    }

    fn set_style_property(&mut self, element: PageNode, property: &str, value: &str) -> Result<()> {
        let body = format!(
            "node.style.setProperty({}, {}); return null;",
            js_string(property)?,
            js_string(value)?
        );
        self.on_node(element, &body)?;
        Ok(())
    }

    fn parent(&self, element: PageNode) -> Result<Option<PageNode>> {
        let value = self.on_node(
            element,
            "const parent = node.parentElement; return parent ? window.__lazyloadSourcesRegister(parent) : null;",
        )?;
        Ok(value.as_u64().map(|index| PageNode(index as u32)))
    }

    fn children(&self, element: PageNode) -> Result<Vec<PageNode>> {
        let value = self.on_node(
            element,
            "return Array.from(node.children).map(child => window.__lazyloadSourcesRegister(child));",
        )?;
        Ok(serde_json::from_value::<Vec<u32>>(value)?
            .into_iter()
            .map(PageNode)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("img[alt=\"x\"]").unwrap(), r#""img[alt=\"x\"]""#);
        assert_eq!(js_string("it's").unwrap(), r#""it's""#);
    }

    #[test]
    fn test_page_node_index() {
        assert_eq!(PageNode(3).index(), 3);
    }
}
