//! The submission boundary.
//!
//! The contact form hands a [`ContactSubmission`] to whatever [`Submitter`] the
//! shell provides and reacts to its success or failure.

use crate::error::SubmitError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[async_trait(?Send)]
pub trait Submitter {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), SubmitError>;
}
