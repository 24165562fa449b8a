//! Contact form: per-field validation, inline errors and the submission flow.

use crate::controller::Controller;
use crate::error::SubmitError;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::submit::{ContactSubmission, Submitter};
use crate::validation::{FieldInput, Validator};
use crate::view::View;
use tracing::{debug, info, warn};

pub const FORM_ID: &str = "contact-form";
pub const FIELD_NAMES: [&str; 4] = ["name", "email", "phone", "message"];
pub const SUBMIT_SELECTOR: &str = ".form__submit";
pub const ERROR_CLASS: &str = "error";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_NOTICE: &str = "Message sent successfully! We will contact you soon.";
pub const FAILURE_NOTICE: &str = "Could not send your message. Please try again later.";

pub struct FormController<V: View> {
    form: V::Node,
    fields: Vec<V::Node>,
    validator: Validator,
}

impl<V: View> FormController<V> {
    pub const NAME: &'static str = "form-validation";

    pub fn install(view: &V) -> Option<Self> {
        let form = view.by_id(FORM_ID)?;
        let fields = FIELD_NAMES
            .iter()
            .filter_map(|name| view.query_within(&form, &format!("#{name}")))
            .collect();
        Some(Self {
            form,
            fields,
            validator: Validator::new(),
        })
    }

    fn field_name(view: &V, field: &V::Node) -> String {
        view.attribute(field, "name").unwrap_or_default()
    }

    fn error_element(view: &V, field: &V::Node) -> Option<V::Node> {
        view.by_id(&format!("{}-error", Self::field_name(view, field)))
    }

    /// Validate one field and show or clear its inline error.
    pub fn validate_field(&self, view: &V, field: &V::Node) -> bool {
        let name = Self::field_name(view, field);
        let value = view.value(field);
        self.clear_error(view, field);

        match self.validator.validate(FieldInput {
            name: &name,
            value: &value,
            required: view.has_attribute(field, "required"),
        }) {
            Ok(()) => true,
            Err(err) => {
                self.show_error(view, field, &err.to_string());
                false
            }
        }
    }

    pub fn show_error(&self, view: &V, field: &V::Node, message: &str) {
        if let Some(error) = Self::error_element(view, field) {
            view.set_text(&error, message);
            view.add_class(field, ERROR_CLASS);
        }
    }

    pub fn clear_error(&self, view: &V, field: &V::Node) {
        if let Some(error) = Self::error_element(view, field) {
            view.set_text(&error, "");
            view.remove_class(field, ERROR_CLASS);
        }
    }

    /// Validate every field without stopping at the first failure, so all
    /// errors are displayed at once.
    pub fn validate_all(&self, view: &V) -> bool {
        self.fields
            .iter()
            .fold(true, |ok, field| self.validate_field(view, field) && ok)
    }

    fn collect(&self, view: &V) -> ContactSubmission {
        let mut submission = ContactSubmission::default();
        for field in &self.fields {
            let value = view.value(field).trim().to_owned();
            match Self::field_name(view, field).as_str() {
                "name" => submission.name = value,
                "email" => submission.email = value,
                "phone" => submission.phone = value,
                "message" => submission.message = value,
                _ => {}
            }
        }
        submission
    }

    /// Disable the submit control while `submitter` runs, then report the
    /// outcome. The form is only reset on success.
    pub async fn run_submission(
        &self,
        view: &V,
        submission: &ContactSubmission,
        submitter: &dyn Submitter,
    ) -> Result<(), SubmitError> {
        let button = view.query_within(&self.form, SUBMIT_SELECTOR);
        let original_label = button.as_ref().map(|b| view.text(b));
        if let Some(b) = &button {
            view.set_text(b, SENDING_LABEL);
            view.set_disabled(b, true);
        }

        info!("contact form submission started");
        let result = submitter.submit(submission).await;
        match &result {
            Ok(()) => {
                info!("contact form submission finished");
                view.alert(SUCCESS_NOTICE);
                view.reset_form(&self.form);
            }
            Err(err) => {
                warn!(error = %err, "contact form submission failed");
                view.alert(FAILURE_NOTICE);
            }
        }

        if let (Some(b), Some(label)) = (&button, original_label) {
            view.set_text(b, &label);
            view.set_disabled(b, false);
        }
        result
    }
}

impl<V: View> Controller<V> for FormController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        let mut subs = Vec::with_capacity(self.fields.len() * 2 + 1);
        for field in &self.fields {
            subs.push(Subscription::node(field.clone(), EventKind::Blur));
            subs.push(Subscription::node(field.clone(), EventKind::Input));
        }
        subs.push(Subscription::node(self.form.clone(), EventKind::Submit));
        subs
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        match event {
            SiteEvent::Blur { target } if self.fields.contains(target) => {
                self.validate_field(view, target);
                Dispatch::default()
            }
            SiteEvent::Input { target } if self.fields.contains(target) => {
                self.clear_error(view, target);
                Dispatch::default()
            }
            SiteEvent::Submit => {
                if self.validate_all(view) {
                    Dispatch {
                        prevent_default: true,
                        submission: Some(self.collect(view)),
                    }
                } else {
                    debug!("contact form has invalid fields");
                    Dispatch::prevent_default()
                }
            }
            _ => Dispatch::default(),
        }
    }
}
