use thiserror::Error;

/// A rejected form field. `Display` is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("Please enter a valid e-mail.")]
    InvalidEmail,
    #[error("Please enter a valid phone. Ex: (11) 99999-9999.")]
    InvalidPhone,
    #[error("Name must have at least 2 characters.")]
    NameTooShort,
    #[error("Message must have at least 10 characters.")]
    MessageTooShort,
}

/// Failure reported by a [`crate::submit::Submitter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
