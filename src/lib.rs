//! Password-change form validation and cookie-driven theme switching
//!
//! This library provides the two page behaviors of the account pages,
//! written against an abstract [`Document`] so they run in any host.
//!
//! # Features
//!
//! - `async` (default): Enables the channel-driven event loop with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_FORM_WEAK_PATTERNS_PATH`: Custom path to a file of extra weak
//!   patterns (default: `./assets/weak-patterns.txt`)
//!
//! # Example
//!
//! ```rust
//! use pwd_form::{
//!     EventOutcome, FormSelectors, MemoryDocument, MemoryElement, Page, PageEvent,
//!     SubmitDecision, ThemeOptions,
//! };
//!
//! let mut doc = MemoryDocument::new();
//! doc.set_cookies("dark_mode=1");
//! let body = doc.body_id();
//! let form = doc.append(body, MemoryElement::new("form").with_id("password-form"));
//! let password = doc.append(form, MemoryElement::new("input").with_id("id_new_password1"));
//! let confirm = doc.append(form, MemoryElement::new("input").with_id("id_new_password2"));
//! let checklist = doc.append(form, MemoryElement::new("ul").with_id("requirements"));
//! for rule in ["length", "lower", "upper", "special"] {
//!     doc.append(checklist, MemoryElement::new("li").with_attribute("data-check", rule));
//! }
//! doc.append(form, MemoryElement::new("p").with_id("match-error"));
//! doc.append(form, MemoryElement::new("button").with_attribute("type", "submit"));
//!
//! let mut page = Page::new(doc)
//!     .with_theme(ThemeOptions::default())
//!     .with_password_form(FormSelectors::default())
//!     .expect("form elements present");
//!
//! page.document_mut().set_value(password, "Abc12345!");
//! page.dispatch(PageEvent::PasswordInput).unwrap();
//! page.document_mut().set_value(confirm, "Abc12345!");
//! page.dispatch(PageEvent::ConfirmInput).unwrap();
//!
//! assert_eq!(
//!     page.dispatch(PageEvent::Submit).unwrap(),
//!     EventOutcome::Submit(SubmitDecision::Proceed)
//! );
//! ```

// Internal modules
mod cookie;
mod dom;
mod form;
mod page;
mod patterns;
mod rules;
mod strength;
mod theme;

// Public API
pub use cookie::{get_cookie, CookieSource};
pub use dom::{Display, Document, MemoryDocument, MemoryElement, NodeId, ReadyState, StylePriority};
pub use form::{
    can_submit, match_state, FormSelectors, InitError, MatchState, PasswordFormValidator,
    SubmitDecision, BLOCKED_SUBMIT_MESSAGE, MISMATCH_MESSAGE,
};
pub use page::{EventOutcome, Page, PageEvent};
pub use patterns::{
    contains_weak_pattern, init_weak_patterns, init_weak_patterns_from_path, weak_patterns_path,
    PatternListError, BUILTIN_WEAK_PATTERNS, WEAK_PATTERNS_ENV,
};
pub use rules::{
    evaluate_rules, mandatory_rules_met, RuleName, RuleReport, UnknownRule, SPECIAL_CHARS,
};
pub use strength::{calculate_strength, StrengthLevel, StrengthScore};
pub use theme::{ThemeApplier, ThemeOptions, ThemePreference, DARK_COOKIE_VALUE};

#[cfg(feature = "async")]
pub use page::run_event_loop;
