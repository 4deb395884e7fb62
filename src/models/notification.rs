use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    Attachments, ContentType, FIELD_CONTENT_TYPE, FIELD_INLINE_ATTACHMENTS, FIELD_SUBJECT,
    RecipientState, null_as_default,
};
use crate::error::{ClientError, ClientResult};

/// Separator between a provider name and an option key (`backend__key`)
pub const PROVIDER_OPTION_SEPARATOR: &str = "__";

// ============================================================================
// Request
// ============================================================================

/// A notification to submit through one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Caller-supplied external id, echoed back in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Recipient addresses; meaning depends on the provider and channel
    pub recipients: Vec<String>,
    /// Message body
    pub payload: String,
    /// Provider options. When several providers are chained server-side a
    /// key may be scoped to one of them as `provider__key`. Passed through
    /// untouched.
    #[serde(default)]
    pub options: HashMap<String, String>,
    /// Channel-specific fields such as `subject` or `contentType`
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl NotificationRequest {
    pub fn new<I, S>(recipients: I, payload: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recipients: recipients.into_iter().map(Into::into).collect(),
            payload: payload.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Adds an option scoped to one provider as `{provider}__{key}`
    pub fn with_provider_option(
        self,
        provider: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Self {
        self.with_option(
            format!("{provider}{PROVIDER_OPTION_SEPARATOR}{key}"),
            value,
        )
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        self.with_field(FIELD_SUBJECT, subject)
    }

    pub fn with_content_type(self, content_type: ContentType) -> Self {
        self.with_field(FIELD_CONTENT_TYPE, content_type)
    }

    /// Stores the attachments as a JSON array in the `inlineAttachments` field
    pub fn with_inline_attachments(self, attachments: &Attachments) -> serde_json::Result<Self> {
        let encoded = serde_json::to_string(attachments)?;
        Ok(self.with_field(FIELD_INLINE_ATTACHMENTS, encoded))
    }

    /// Content type carried in `fields`, if any
    pub fn content_type(&self) -> Option<ContentType> {
        self.fields
            .get(FIELD_CONTENT_TYPE)
            .map(|value| ContentType::from(value.as_str()))
    }

    /// Rejects requests the service cannot accept, before anything is sent.
    ///
    /// `options` are never inspected.
    pub fn validate(&self) -> ClientResult<()> {
        if self.recipients.is_empty() {
            return Err(ClientError::invalid_request(
                "recipients",
                "at least one recipient is required",
            ));
        }

        if let Some(index) = self.recipients.iter().position(|r| r.trim().is_empty()) {
            return Err(ClientError::invalid_request(
                format!("recipients[{index}]"),
                "address must not be blank",
            ));
        }

        if let Some(ContentType::Unknown(raw)) = self.content_type() {
            return Err(ClientError::invalid_request(
                FIELD_CONTENT_TYPE,
                format!("unsupported content type '{raw}', expected one of: text, html, markdown"),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Response
// ============================================================================

/// Delivery state of one recipient.
///
/// `error` is present exactly when `state` is [`RecipientState::Error`];
/// decoding rejects responses that break this. Unknown states may carry
/// either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecipientWire")]
pub struct Recipient {
    pub address: String,
    pub state: RecipientState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct RecipientWire {
    address: String,
    state: RecipientState,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<RecipientWire> for Recipient {
    type Error = String;

    fn try_from(wire: RecipientWire) -> Result<Self, Self::Error> {
        match (&wire.state, &wire.error) {
            (RecipientState::Error, None) => {
                return Err(format!(
                    "recipient {} is in state error without an error message",
                    wire.address
                ));
            }
            (state, Some(_)) if state.is_known() && *state != RecipientState::Error => {
                return Err(format!(
                    "recipient {} carries an error message in state {}",
                    wire.address, state
                ));
            }
            _ => {}
        }

        Ok(Recipient {
            address: wire.address,
            state: wire.state,
            error: wire.error,
        })
    }
}

/// Result of a submission.
///
/// `success` and `error` count recipients that already reached a terminal
/// state when the server answered; delivery may continue asynchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NotificationResponseWire")]
pub struct NotificationResponse {
    /// Server-assigned dispatch id
    pub uuid: String,
    /// Echo of the caller-supplied external id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// One entry per requested recipient, in request order
    pub recipients: Vec<Recipient>,
    pub success: u32,
    pub error: u32,
}

#[derive(Deserialize)]
struct NotificationResponseWire {
    uuid: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    recipients: Vec<Recipient>,
    #[serde(default)]
    success: u32,
    #[serde(default)]
    error: u32,
}

impl TryFrom<NotificationResponseWire> for NotificationResponse {
    type Error = String;

    fn try_from(wire: NotificationResponseWire) -> Result<Self, Self::Error> {
        let total = u64::from(wire.success) + u64::from(wire.error);
        if total > wire.recipients.len() as u64 {
            return Err(format!(
                "success ({}) + error ({}) exceeds recipient count ({})",
                wire.success,
                wire.error,
                wire.recipients.len()
            ));
        }

        Ok(NotificationResponse {
            uuid: wire.uuid,
            id: wire.id,
            recipients: wire.recipients,
            success: wire.success,
            error: wire.error,
        })
    }
}

impl NotificationResponse {
    pub fn recipient(&self, address: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.address == address)
    }

    /// Recipients not yet in a terminal state
    pub fn pending(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter().filter(|r| !r.state.is_terminal())
    }

    /// Recipients whose delivery failed
    pub fn failed(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients
            .iter()
            .filter(|r| r.state == RecipientState::Error)
    }

    /// Whether every recipient reached a terminal state
    pub fn is_complete(&self) -> bool {
        self.recipients.iter().all(|r| r.state.is_terminal())
    }
}
