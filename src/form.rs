//! Password-change form controller.
//!
//! Live-validates the new password and its confirmation, keeps the
//! requirements checklist and the submit control in sync, and blocks
//! submission while the gate fails.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::dom::{Display, Document};
use crate::rules::{evaluate_rules, mandatory_rules_met, RuleName};
use crate::strength::calculate_strength;

pub const MISMATCH_MESSAGE: &str = "Passwords do not match.";
pub const BLOCKED_SUBMIT_MESSAGE: &str = "Please fix the password errors before submitting.";

const VALID_CLASS: &str = "valid";
const INVALID_CLASS: &str = "invalid";
const RULE_ATTRIBUTE: &str = "data-check";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("Required element not found: {0}")]
    MissingElement(String),
    #[error("Requirements container has no items")]
    NoRequirementItems,
    #[error("Requirement item names unknown rule: {0:?}")]
    UnknownRule(String),
}

/// Where the controller finds its elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSelectors {
    /// Id of the new-password input.
    pub password_id: String,
    /// Id of the confirmation input.
    pub confirm_id: String,
    /// Id of the requirements container.
    pub requirements_id: String,
    /// Selector of the items inside the container.
    pub requirement_item: String,
    pub match_error_id: String,
    pub submit: String,
    pub form_id: String,
    /// Optional element receiving the strength label.
    pub strength_meter: Option<String>,
}

impl Default for FormSelectors {
    fn default() -> Self {
        Self {
            password_id: "id_new_password1".to_string(),
            confirm_id: "id_new_password2".to_string(),
            requirements_id: "requirements".to_string(),
            requirement_item: "li".to_string(),
            match_error_id: "match-error".to_string(),
            submit: r#"button[type="submit"]"#.to_string(),
            form_id: "password-form".to_string(),
            strength_meter: None,
        }
    }
}

impl FormSelectors {
    pub fn with_strength_meter(mut self, selector: &str) -> Self {
        self.strength_meter = Some(selector.to_string());
        self
    }
}

/// State of the confirmation field relative to the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Confirmation is empty; nothing to report yet.
    Neutral,
    Matches,
    Mismatch,
}

impl MatchState {
    pub fn is_match(self) -> bool {
        self == MatchState::Matches
    }

    /// Text for the match-error element.
    pub fn message(self) -> &'static str {
        match self {
            MatchState::Mismatch => MISMATCH_MESSAGE,
            MatchState::Neutral | MatchState::Matches => "",
        }
    }
}

/// Compares the confirmation with the password, exactly.
pub fn match_state(password: &SecretString, confirm: &SecretString) -> MatchState {
    let confirm = confirm.expose_secret();
    if confirm.is_empty() {
        MatchState::Neutral
    } else if password.expose_secret() == confirm {
        MatchState::Matches
    } else {
        MatchState::Mismatch
    }
}

/// The submit gate: every mandatory rule holds, and the password is
/// non-empty and equal to the confirmation.
pub fn can_submit(password: &SecretString, confirm: &SecretString) -> bool {
    let pwd = password.expose_secret();
    mandatory_rules_met(password) && !pwd.is_empty() && pwd == confirm.expose_secret()
}

/// What the host should do with a submit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    /// Cancel the default action; the user has been alerted.
    Prevented,
}

/// Controller bound to one password-change form.
#[derive(Debug, Clone)]
pub struct PasswordFormValidator<N> {
    password: N,
    confirm: N,
    requirements: N,
    items: Vec<(N, RuleName)>,
    match_error: N,
    submit: N,
    form: N,
    strength_meter: Option<N>,
}

fn require<T>(found: Option<T>, what: &str) -> Result<T, InitError> {
    found.ok_or_else(|| InitError::MissingElement(what.to_string()))
}

impl<N: Clone + PartialEq + std::fmt::Debug> PasswordFormValidator<N> {
    /// Locates every element, hides the checklist and sets the initial
    /// submit state.
    ///
    /// # Errors
    ///
    /// Fails when an element is missing, the container holds no items, or
    /// an item's `data-check` does not name a rule.
    pub fn attach<D>(doc: &mut D, selectors: &FormSelectors) -> Result<Self, InitError>
    where
        D: Document<Node = N>,
    {
        let password = require(
            doc.get_element_by_id(&selectors.password_id),
            &selectors.password_id,
        )?;
        let confirm = require(doc.get_element_by_id(&selectors.confirm_id), &selectors.confirm_id)?;
        let requirements = require(
            doc.get_element_by_id(&selectors.requirements_id),
            &selectors.requirements_id,
        )?;
        let match_error = require(
            doc.get_element_by_id(&selectors.match_error_id),
            &selectors.match_error_id,
        )?;
        let submit = require(doc.query_selector(&selectors.submit), &selectors.submit)?;
        let form = require(doc.get_element_by_id(&selectors.form_id), &selectors.form_id)?;
        let strength_meter = match &selectors.strength_meter {
            Some(selector) => Some(require(doc.query_selector(selector), selector)?),
            None => None,
        };

        let items = doc
            .query_selector_all_within(&requirements, &selectors.requirement_item)
            .into_iter()
            .map(|item| {
                let name = doc.attribute(&item, RULE_ATTRIBUTE).unwrap_or_default();
                name.parse::<RuleName>()
                    .map(|rule| (item, rule))
                    .map_err(|_| InitError::UnknownRule(name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if items.is_empty() {
            return Err(InitError::NoRequirementItems);
        }

        let validator = Self {
            password,
            confirm,
            requirements,
            items,
            match_error,
            submit,
            form,
            strength_meter,
        };

        doc.set_display(&validator.requirements, Display::None);
        validator.update_submit_state(doc);

        #[cfg(feature = "tracing")]
        tracing::debug!("Password form attached with {} requirement items", validator.items.len());

        Ok(validator)
    }

    /// The form element, for hosts wiring the submit listener.
    pub fn form(&self) -> &N {
        &self.form
    }

    pub fn on_password_focus<D: Document<Node = N>>(&self, doc: &mut D) {
        if !doc.value(&self.password).is_empty() {
            doc.set_display(&self.requirements, Display::Block);
        }
    }

    pub fn on_password_blur<D: Document<Node = N>>(&self, doc: &mut D) {
        doc.set_display(&self.requirements, Display::None);
    }

    pub fn on_password_input<D: Document<Node = N>>(&self, doc: &mut D) {
        let password = self.read(doc, &self.password);
        let display = if password.expose_secret().is_empty() {
            Display::None
        } else {
            Display::Block
        };
        doc.set_display(&self.requirements, display);

        self.update_requirements(doc, &password);
        self.update_strength_meter(doc, &password);
        self.update_submit_state(doc);
    }

    pub fn on_confirm_input<D: Document<Node = N>>(&self, doc: &mut D) {
        self.update_match(doc);
        self.update_submit_state(doc);
    }

    /// Re-checks the gate; alerts and prevents submission when it fails.
    pub fn on_submit<D: Document<Node = N>>(&self, doc: &mut D) -> SubmitDecision {
        if self.can_submit(doc) {
            return SubmitDecision::Proceed;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("Password form submission blocked");
        doc.alert(BLOCKED_SUBMIT_MESSAGE);
        SubmitDecision::Prevented
    }

    /// Gate over the document's current field values.
    pub fn can_submit<D: Document<Node = N>>(&self, doc: &D) -> bool {
        can_submit(&self.read(doc, &self.password), &self.read(doc, &self.confirm))
    }

    fn read<D: Document<Node = N>>(&self, doc: &D, node: &N) -> SecretString {
        SecretString::new(doc.value(node).into())
    }

    fn update_requirements<D: Document<Node = N>>(&self, doc: &mut D, password: &SecretString) {
        let report = evaluate_rules(password);
        for (item, rule) in &self.items {
            if report.passed(*rule) {
                doc.remove_class(item, INVALID_CLASS);
                doc.add_class(item, VALID_CLASS);
            } else {
                doc.remove_class(item, VALID_CLASS);
                doc.add_class(item, INVALID_CLASS);
            }
        }
    }

    fn update_strength_meter<D: Document<Node = N>>(&self, doc: &mut D, password: &SecretString) {
        let Some(meter) = &self.strength_meter else {
            return;
        };
        let score = calculate_strength(password);
        doc.set_text_content(meter, score.level().label());
        doc.set_attribute(meter, "data-score", &score.to_string());
    }

    fn update_match<D: Document<Node = N>>(&self, doc: &mut D) {
        let state = match_state(&self.read(doc, &self.password), &self.read(doc, &self.confirm));
        doc.set_text_content(&self.match_error, state.message());
    }

    fn update_submit_state<D: Document<Node = N>>(&self, doc: &mut D) {
        let allowed = self.can_submit(doc);
        doc.set_disabled(&self.submit, !allowed);
    }
}
