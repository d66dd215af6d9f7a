//! Cookie reading.
//!
//! The parser is deliberately narrow: it splits on the literal `"; "`
//! separator, does not URL-decode and ignores cookie attributes.

/// Source of the raw `document.cookie` string.
pub trait CookieSource {
    fn cookie_header(&self) -> String;
}

impl CookieSource for str {
    fn cookie_header(&self) -> String {
        self.to_string()
    }
}

impl CookieSource for String {
    fn cookie_header(&self) -> String {
        self.clone()
    }
}

/// Returns the value of cookie `name`, or `None` when it is absent.
///
/// The value runs up to the next `;`. A name that occurs more than once
/// reads as absent.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    let haystack = format!("; {cookies}");
    let needle = format!("; {name}=");
    let mut parts = haystack.split(needle.as_str());
    let _before = parts.next()?;
    let after = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    after.split(';').next().map(str::to_string)
}
