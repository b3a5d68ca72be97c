//! Signup wizard state machine.
//!
//! The three-step signup flow is modeled as an explicit finite state
//! machine (`Collecting` -> `Reviewing` -> `Confirmed`) instead of ad hoc
//! flags. Transitions consume the wizard, so an out-of-order action is a
//! typed error rather than silently accepted input. Field validation runs
//! on the `Collecting` -> `Reviewing` transition and reports every bad
//! field at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SubscriptionTier;

/// Raw signup form as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub subscription_tier: SubscriptionTier,
    pub number_of_devices: u32,
}

/// One validation failure, addressed to a specific form field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Current step of the wizard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Collecting,
    Reviewing,
    Confirmed,
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("invalid signup form")]
    Invalid(Vec<FieldError>),

    #[error("cannot {action} while {stage:?}")]
    Transition { stage: Stage, action: &'static str },
}

/// The signup flow. Each state carries exactly the data that step owns.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupWizard {
    Collecting,
    Reviewing(SignupForm),
    Confirmed(SignupForm),
}

impl SignupWizard {
    pub fn new() -> Self {
        SignupWizard::Collecting
    }

    pub fn stage(&self) -> Stage {
        match self {
            SignupWizard::Collecting => Stage::Collecting,
            SignupWizard::Reviewing(_) => Stage::Reviewing,
            SignupWizard::Confirmed(_) => Stage::Confirmed,
        }
    }

    /// Submit the form for review. Valid only while collecting.
    pub fn review(self, form: SignupForm) -> Result<Self, WizardError> {
        match self {
            SignupWizard::Collecting => {
                validate_form(&form).map_err(WizardError::Invalid)?;
                Ok(SignupWizard::Reviewing(form))
            }
            other => Err(WizardError::Transition {
                stage: other.stage(),
                action: "review",
            }),
        }
    }

    /// Return to editing. Valid only while reviewing.
    pub fn back(self) -> Result<Self, WizardError> {
        match self {
            SignupWizard::Reviewing(_) => Ok(SignupWizard::Collecting),
            other => Err(WizardError::Transition {
                stage: other.stage(),
                action: "go back",
            }),
        }
    }

    /// Confirm the reviewed form. Valid only while reviewing.
    pub fn confirm(self) -> Result<Self, WizardError> {
        match self {
            SignupWizard::Reviewing(form) => Ok(SignupWizard::Confirmed(form)),
            other => Err(WizardError::Transition {
                stage: other.stage(),
                action: "confirm",
            }),
        }
    }

    /// The validated form, once confirmed.
    pub fn confirmed_form(&self) -> Option<&SignupForm> {
        match self {
            SignupWizard::Confirmed(form) => Some(form),
            _ => None,
        }
    }
}

impl Default for SignupWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every field and report all failures together.
pub fn validate_form(form: &SignupForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.name.trim().len() < 2 {
        errors.push(FieldError {
            field: "name",
            message: "name must be at least 2 characters".to_string(),
        });
    }

    if !is_plausible_email(&form.email) {
        errors.push(FieldError {
            field: "email",
            message: "email address is not valid".to_string(),
        });
    }

    if form.password.len() < 8 {
        errors.push(FieldError {
            field: "password",
            message: "password must be at least 8 characters".to_string(),
        });
    }

    if form.number_of_devices < 1 {
        errors.push(FieldError {
            field: "numberOfDevices",
            message: "at least one device is required".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Loose structural check: `local@domain.tld`, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Johnson Family".to_string(),
            email: "parent@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            subscription_tier: SubscriptionTier::Family,
            number_of_devices: 3,
        }
    }

    #[test]
    fn test_happy_path() {
        let wizard = SignupWizard::new()
            .review(valid_form())
            .unwrap()
            .confirm()
            .unwrap();
        assert_eq!(wizard.stage(), Stage::Confirmed);
        assert_eq!(wizard.confirmed_form().unwrap().email, "parent@example.com");
    }

    #[test]
    fn test_back_returns_to_collecting() {
        let wizard = SignupWizard::new().review(valid_form()).unwrap();
        let wizard = wizard.back().unwrap();
        assert_eq!(wizard.stage(), Stage::Collecting);
    }

    #[test]
    fn test_confirm_without_review_is_rejected() {
        let err = SignupWizard::new().confirm().unwrap_err();
        assert_eq!(
            err,
            WizardError::Transition {
                stage: Stage::Collecting,
                action: "confirm"
            }
        );
    }

    #[test]
    fn test_double_review_is_rejected() {
        let wizard = SignupWizard::new().review(valid_form()).unwrap();
        assert!(matches!(
            wizard.review(valid_form()),
            Err(WizardError::Transition { .. })
        ));
    }

    #[test]
    fn test_validation_reports_every_bad_field() {
        let form = SignupForm {
            name: "J".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            subscription_tier: SubscriptionTier::Family,
            number_of_devices: 0,
        };
        let errors = validate_form(&form).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "email", "password", "numberOfDevices"]);
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
    }
}
