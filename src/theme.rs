//! Cookie-driven dark/light theme.

use crate::cookie::{get_cookie, CookieSource};
use crate::dom::{Document, StylePriority};

/// Cookie value that turns dark mode on. Anything else means light.
pub const DARK_COOKIE_VALUE: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Dark,
    #[default]
    Light,
}

impl ThemePreference {
    /// Reads the preference from a raw cookie string.
    pub fn from_cookies(cookies: &str, cookie_name: &str) -> Self {
        match get_cookie(cookies, cookie_name).as_deref() {
            Some(DARK_COOKIE_VALUE) => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    /// Logo color forced by the override.
    fn logo_color(self) -> &'static str {
        match self {
            ThemePreference::Dark => "white",
            ThemePreference::Light => "black",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeOptions {
    pub cookie_name: String,
    /// Class toggled on `<html>` and `<body>`.
    pub dark_class: String,
    pub logo_selector: String,
    /// Force the logo's `color` with `!important`.
    pub apply_logo_override: bool,
    /// Re-read the cookie on every click.
    pub reapply_on_click: bool,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            cookie_name: "dark_mode".to_string(),
            dark_class: "dark".to_string(),
            logo_selector: ".logo".to_string(),
            apply_logo_override: false,
            reapply_on_click: false,
        }
    }
}

impl ThemeOptions {
    pub fn with_logo_override(mut self) -> Self {
        self.apply_logo_override = true;
        self
    }

    pub fn with_reapply_on_click(mut self) -> Self {
        self.reapply_on_click = true;
        self
    }
}

/// Applies the theme class from the cookie, now or when the document is
/// ready.
#[derive(Debug, Clone, Default)]
pub struct ThemeApplier {
    options: ThemeOptions,
    deferred: bool,
}

impl ThemeApplier {
    pub fn new(options: ThemeOptions) -> Self {
        Self {
            options,
            deferred: false,
        }
    }

    pub fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// True while waiting for the ready event.
    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    /// Applies immediately unless the document is still loading, in which
    /// case the work waits for [`ThemeApplier::on_ready`].
    pub fn install<D>(&mut self, doc: &mut D) -> Option<ThemePreference>
    where
        D: Document + CookieSource,
    {
        if doc.ready_state().is_loading() {
            self.deferred = true;
            return None;
        }
        Some(self.apply(doc))
    }

    pub fn on_ready<D>(&mut self, doc: &mut D) -> Option<ThemePreference>
    where
        D: Document + CookieSource,
    {
        if !std::mem::take(&mut self.deferred) {
            return None;
        }
        Some(self.apply(doc))
    }

    pub fn on_click<D>(&self, doc: &mut D) -> Option<ThemePreference>
    where
        D: Document + CookieSource,
    {
        self.options.reapply_on_click.then(|| self.apply(doc))
    }

    /// Reads the cookie and sets the classes accordingly. Idempotent.
    pub fn apply<D>(&self, doc: &mut D) -> ThemePreference
    where
        D: Document + CookieSource,
    {
        let cookies = doc.cookie_header();
        let preference = ThemePreference::from_cookies(&cookies, &self.options.cookie_name);
        let class = self.options.dark_class.as_str();

        let mut targets = vec![doc.document_element()];
        targets.extend(doc.body());
        for node in &targets {
            if preference.is_dark() {
                doc.add_class(node, class);
            } else {
                doc.remove_class(node, class);
            }
        }

        if self.options.apply_logo_override {
            if let Some(logo) = doc.query_selector(&self.options.logo_selector) {
                let color = preference.logo_color();
                doc.set_style_property(&logo, "color", color, StylePriority::Important);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Theme applied: {:?}", preference);

        preference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, MemoryElement, ReadyState};

    fn doc_with_cookies(cookies: &str) -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.set_cookies(cookies);
        doc
    }

    fn is_dark(doc: &MemoryDocument) -> bool {
        let root = doc.has_class(doc.root_id(), "dark");
        let body = doc.has_class(doc.body_id(), "dark");
        assert_eq!(root, body, "root and body disagree");
        root
    }

    #[test]
    fn test_preference_from_cookies() {
        assert_eq!(
            ThemePreference::from_cookies("foo=bar; dark_mode=1; other=x", "dark_mode"),
            ThemePreference::Dark
        );
        let light = ThemePreference::Light;
        assert_eq!(ThemePreference::from_cookies("dark_mode=0", "dark_mode"), light);
        assert_eq!(ThemePreference::from_cookies("dark_mode=11", "dark_mode"), light);
        assert_eq!(ThemePreference::from_cookies("", "dark_mode"), ThemePreference::Light);
    }

    #[test]
    fn test_apply_dark() {
        let mut doc = doc_with_cookies("foo=bar; dark_mode=1; other=x");
        let applier = ThemeApplier::default();
        assert_eq!(applier.apply(&mut doc), ThemePreference::Dark);
        assert!(is_dark(&doc));
    }

    #[test]
    fn test_apply_without_cookie_removes_class() {
        let mut doc = MemoryDocument::new();
        let (root, body) = (doc.root_id(), doc.body_id());
        doc.add_class(&root, "dark");
        doc.add_class(&body, "dark");

        assert_eq!(ThemeApplier::default().apply(&mut doc), ThemePreference::Light);
        assert!(!is_dark(&doc));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut doc = doc_with_cookies("dark_mode=1");
        let applier = ThemeApplier::default();
        applier.apply(&mut doc);
        let once = doc.clone();
        applier.apply(&mut doc);
        assert_eq!(is_dark(&once), is_dark(&doc));
        assert!(is_dark(&doc));
    }

    #[test]
    fn test_install_applies_when_ready() {
        let mut doc = doc_with_cookies("dark_mode=1");
        doc.set_ready_state(ReadyState::Interactive);
        let mut applier = ThemeApplier::default();
        assert_eq!(applier.install(&mut doc), Some(ThemePreference::Dark));
        assert!(!applier.is_deferred());
        assert!(is_dark(&doc));
        assert_eq!(applier.on_ready(&mut doc), None);
    }

    #[test]
    fn test_install_defers_while_loading() {
        let mut doc = doc_with_cookies("dark_mode=1");
        doc.set_ready_state(ReadyState::Loading);
        let mut applier = ThemeApplier::default();

        assert_eq!(applier.install(&mut doc), None);
        assert!(applier.is_deferred());
        assert!(!is_dark(&doc));

        doc.set_ready_state(ReadyState::Interactive);
        assert_eq!(applier.on_ready(&mut doc), Some(ThemePreference::Dark));
        assert!(is_dark(&doc));
        assert_eq!(applier.on_ready(&mut doc), None);
    }

    #[test]
    fn test_click_reapplies_only_when_enabled() {
        let mut doc = doc_with_cookies("dark_mode=0");
        let plain = ThemeApplier::default();
        let tracking = ThemeApplier::new(ThemeOptions::default().with_reapply_on_click());
        tracking.apply(&mut doc);

        // A toggle elsewhere on the page flips the cookie.
        doc.set_cookies("dark_mode=1");
        assert_eq!(plain.on_click(&mut doc), None);
        assert!(!is_dark(&doc));
        assert_eq!(tracking.on_click(&mut doc), Some(ThemePreference::Dark));
        assert!(is_dark(&doc));
    }

    #[test]
    fn test_logo_override() {
        let mut doc = doc_with_cookies("dark_mode=1");
        let body = doc.body_id();
        let logo = doc.append(body, MemoryElement::new("img").with_class("logo"));
        let applier = ThemeApplier::new(ThemeOptions::default().with_logo_override());

        applier.apply(&mut doc);
        assert_eq!(
            doc.style_property(logo, "color"),
            Some(("white", StylePriority::Important))
        );

        doc.set_cookies("dark_mode=0");
        applier.apply(&mut doc);
        assert_eq!(
            doc.style_property(logo, "color"),
            Some(("black", StylePriority::Important))
        );
    }

    #[test]
    fn test_logo_override_without_logo_is_noop() {
        let mut doc = doc_with_cookies("dark_mode=1");
        let applier = ThemeApplier::new(ThemeOptions::default().with_logo_override());
        assert_eq!(applier.apply(&mut doc), ThemePreference::Dark);
        assert!(is_dark(&doc));
    }

    #[test]
    fn test_logo_untouched_without_override() {
        let mut doc = doc_with_cookies("dark_mode=1");
        let body = doc.body_id();
        let logo = doc.append(body, MemoryElement::new("img").with_class("logo"));
        ThemeApplier::default().apply(&mut doc);
        assert_eq!(doc.style_property(logo, "color"), None);
    }

    #[test]
    fn test_custom_cookie_and_class() {
        let mut doc = doc_with_cookies("theme=1");
        let applier = ThemeApplier::new(ThemeOptions {
            cookie_name: "theme".to_string(),
            dark_class: "night".to_string(),
            ..ThemeOptions::default()
        });
        applier.apply(&mut doc);
        assert!(doc.has_class(doc.root_id(), "night"));
        assert!(!doc.has_class(doc.root_id(), "dark"));
    }
}
