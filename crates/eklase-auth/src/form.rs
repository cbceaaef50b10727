//! HTML form scraping for the profile-selection step
//!
//! The portal renders the profile choice as a self-submitting form full of
//! hidden inputs (TenantId, pf_id, ...). The handshake only needs the form's
//! action and its name/value pairs, so extraction sits behind
//! [`FormExtractor`] and the default implementation is a handful of regexes.

use regex::Regex;
use std::sync::LazyLock;

static FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<form\b([^>]*)>(.*?)(?:</form\s*>|\z)").expect("static form regex")
});

static INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<input\b([^>]*)>").expect("static input regex"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([^\s=/>"']+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("static attribute regex")
});

/// A form scraped from an HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedForm {
    /// Raw `action` attribute, usually a path relative to the portal root
    pub action: String,
    /// Every named input in document order, value defaulting to ""
    pub fields: Vec<(String, String)>,
}

/// Turns an HTML page into the first form's action and fields
pub trait FormExtractor: Send + Sync {
    /// Returns `None` when the page has no form with an action
    fn extract(&self, html: &str) -> Option<ExtractedForm>;
}

/// Default extractor built on `regex`
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexFormExtractor;

impl FormExtractor for RegexFormExtractor {
    fn extract(&self, html: &str) -> Option<ExtractedForm> {
        let form = FORM_RE.captures(html)?;
        let form_attrs = form.get(1).map_or("", |m| m.as_str());
        let form_body = form.get(2).map_or("", |m| m.as_str());

        let action = attribute(form_attrs, "action")?;

        let fields = INPUT_RE
            .captures_iter(form_body)
            .filter_map(|input| {
                let attrs = input.get(1)?.as_str();
                let name = attribute(attrs, "name")?;
                let value = attribute(attrs, "value").unwrap_or_default();
                Some((name, value))
            })
            .collect();

        Some(ExtractedForm { action, fields })
    }
}

/// Find an attribute by (case-insensitive) name inside a tag's attribute text
fn attribute(attrs: &str, wanted: &str) -> Option<String> {
    ATTR_RE.captures_iter(attrs).find_map(|cap| {
        let name = cap.get(1)?.as_str();
        if !name.eq_ignore_ascii_case(wanted) {
            return None;
        }
        let raw = cap
            .get(2)
            .or_else(|| cap.get(3))
            .or_else(|| cap.get(4))
            .map_or("", |m| m.as_str());
        Some(decode_entities(raw))
    })
}

/// Decode the handful of entities ASP.NET emits inside attribute values
fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
