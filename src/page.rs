//! Page - routes document events to the attached controllers.

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::cookie::CookieSource;
use crate::dom::Document;
use crate::form::{FormSelectors, InitError, PasswordFormValidator, SubmitDecision};
use crate::theme::{ThemeApplier, ThemeOptions};

/// Document events the controllers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// `DOMContentLoaded`.
    Ready,
    PasswordFocus,
    PasswordBlur,
    PasswordInput,
    ConfirmInput,
    Submit,
    /// A click anywhere in the document.
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    /// No controller listens for this event.
    Ignored,
    Submit(SubmitDecision),
}

enum FormSlot<N> {
    Empty,
    Pending(FormSelectors),
    Attached(PasswordFormValidator<N>),
}

/// A host document with its password form and theme controllers.
pub struct Page<D: Document> {
    document: D,
    form: FormSlot<D::Node>,
    theme: Option<ThemeApplier>,
}

impl<D> Page<D>
where
    D: Document + CookieSource,
{
    pub fn new(document: D) -> Self {
        Self {
            document,
            form: FormSlot::Empty,
            theme: None,
        }
    }

    /// Attaches the password form now, or on [`PageEvent::Ready`] while the
    /// document is loading.
    ///
    /// # Errors
    ///
    /// Returns the attach error when the document is ready and an element
    /// is missing.
    pub fn with_password_form(mut self, selectors: FormSelectors) -> Result<Self, InitError> {
        self.form = if self.document.ready_state().is_loading() {
            FormSlot::Pending(selectors)
        } else {
            FormSlot::Attached(PasswordFormValidator::attach(&mut self.document, &selectors)?)
        };
        Ok(self)
    }

    pub fn with_theme(mut self, options: ThemeOptions) -> Self {
        let mut applier = ThemeApplier::new(options);
        applier.install(&mut self.document);
        self.theme = Some(applier);
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access, for hosts feeding input values.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn password_form(&self) -> Option<&PasswordFormValidator<D::Node>> {
        match &self.form {
            FormSlot::Attached(validator) => Some(validator),
            FormSlot::Empty | FormSlot::Pending(_) => None,
        }
    }

    /// Runs every handler interested in `event`.
    ///
    /// # Errors
    ///
    /// Only [`PageEvent::Ready`] can fail, when a deferred form attach
    /// does not find its elements. The form then stays pending and the next
    /// `Ready` tries again.
    pub fn dispatch(&mut self, event: PageEvent) -> Result<EventOutcome, InitError> {
        let outcome = match event {
            PageEvent::Ready => self.on_ready()?,
            PageEvent::Click => match &self.theme {
                Some(theme) if theme.on_click(&mut self.document).is_some() => {
                    EventOutcome::Handled
                }
                _ => EventOutcome::Ignored,
            },
            _ => self.dispatch_form(event),
        };
        Ok(outcome)
    }

    fn on_ready(&mut self) -> Result<EventOutcome, InitError> {
        let mut handled = false;

        if let Some(theme) = self.theme.as_mut() {
            handled |= theme.on_ready(&mut self.document).is_some();
        }

        // A failed attach stays pending, so the next ready event retries.
        if let FormSlot::Pending(selectors) = &self.form {
            let validator = PasswordFormValidator::attach(&mut self.document, selectors)?;
            self.form = FormSlot::Attached(validator);
            handled = true;
        }

        Ok(if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        })
    }

    fn dispatch_form(&mut self, event: PageEvent) -> EventOutcome {
        let FormSlot::Attached(validator) = &self.form else {
            return EventOutcome::Ignored;
        };
        let doc = &mut self.document;
        match event {
            PageEvent::PasswordFocus => validator.on_password_focus(doc),
            PageEvent::PasswordBlur => validator.on_password_blur(doc),
            PageEvent::PasswordInput => validator.on_password_input(doc),
            PageEvent::ConfirmInput => validator.on_confirm_input(doc),
            PageEvent::Submit => return EventOutcome::Submit(validator.on_submit(doc)),
            PageEvent::Ready | PageEvent::Click => return EventOutcome::Ignored,
        }
        EventOutcome::Handled
    }
}

/// Dispatches events from `rx` until the channel closes or `token` is
/// cancelled, forwarding each outcome on `tx`.
///
/// # Errors
///
/// Stops at the first [`InitError`] and returns it.
#[cfg(feature = "async")]
pub async fn run_event_loop<D>(
    page: &mut Page<D>,
    mut rx: mpsc::Receiver<PageEvent>,
    tx: mpsc::Sender<EventOutcome>,
    token: CancellationToken,
) -> Result<(), InitError>
where
    D: Document + CookieSource,
{
    loop {
        let event = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            event = rx.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        let outcome = page.dispatch(event)?;

        if let Err(_e) = tx.send(outcome).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send page event outcome: {}", _e);
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Page event loop stopped");

    Ok(())
}
