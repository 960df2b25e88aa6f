#![forbid(unsafe_code)]

//! Contact form submission through an email relay.
//!
//! [`ContactForm`] owns the status label. The host calls [`ContactForm::begin`]
//! on submit, hands the returned [`RelayRequest`] to an [`EmailRelay`], and
//! feeds the result to [`ContactForm::finish`]. Nothing is retried and no
//! timeout is applied: a relay that never answers leaves the form sending.
//!
//! Overlapping submissions are not serialized; whichever response arrives
//! last decides the final status.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::config::ContactConfig;

/// Visible state of the status element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

impl FormStatus {
    /// Full `class` attribute of the status element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Idle => "form-status",
            Self::Sending => "form-status sending",
            Self::Sent => "form-status success",
            Self::Failed => "form-status error",
        }
    }

    /// Text shown in the status element.
    #[must_use]
    pub fn message(self, cfg: &ContactConfig) -> &str {
        match self {
            Self::Idle => "",
            Self::Sending => &cfg.sending_message,
            Self::Sent => &cfg.success_message,
            Self::Failed => &cfg.error_message,
        }
    }
}

/// Payload understood by the relay's send endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayRequest {
    pub service_id: String,
    pub template_id: String,
    /// Account public key.
    pub user_id: String,
    pub template_params: BTreeMap<String, String>,
}

impl RelayRequest {
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(|e| RelayError::Encode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// No relay transport is available on this page.
    Unavailable,
    /// The request could not be serialized.
    Encode(String),
    /// The request never produced a response.
    Network(String),
    /// The relay answered with a failure status.
    Rejected { status: u16, body: String },
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "email relay unavailable"),
            Self::Encode(msg) => write!(f, "failed to encode relay request: {msg}"),
            Self::Network(msg) => write!(f, "relay request failed: {msg}"),
            Self::Rejected { status, body } => {
                write!(f, "relay rejected message (status {status}): {body}")
            }
        }
    }
}

impl std::error::Error for RelayError {}

/// Transport that delivers a [`RelayRequest`].
///
/// Futures are awaited on the page's single-threaded executor and need not
/// be `Send`.
pub trait EmailRelay {
    fn send(&self, request: &RelayRequest) -> impl Future<Output = Result<(), RelayError>>;
}

/// What the host applies once a submission resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOutcome {
    pub status: FormStatus,
    /// Clear the form's fields. Only set on success.
    pub reset_fields: bool,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    cfg: ContactConfig,
    status: FormStatus,
    in_flight: usize,
}

impl ContactForm {
    #[must_use]
    pub fn new(cfg: ContactConfig) -> Self {
        Self {
            cfg,
            status: FormStatus::Idle,
            in_flight: 0,
        }
    }

    /// Start a submission with the form's `(name, value)` fields.
    pub fn begin<I, K, V>(&mut self, fields: I) -> RelayRequest
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.status = FormStatus::Sending;
        self.in_flight += 1;
        RelayRequest {
            service_id: self.cfg.service_id.clone(),
            template_id: self.cfg.template_id.clone(),
            user_id: self.cfg.public_key.clone(),
            template_params: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Resolve a submission.
    pub fn finish(&mut self, result: Result<(), RelayError>) -> FormOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(()) => {
                tracing::debug!(target: "folio::contact", "message relayed");
                self.status = FormStatus::Sent;
                FormOutcome {
                    status: FormStatus::Sent,
                    reset_fields: true,
                }
            }
            Err(err) => {
                tracing::error!(target: "folio::contact", error = %err, "email relay error");
                self.status = FormStatus::Failed;
                FormOutcome {
                    status: FormStatus::Failed,
                    reset_fields: false,
                }
            }
        }
    }

    #[must_use]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.status.message(&self.cfg)
    }

    /// Submissions started but not yet finished.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}
