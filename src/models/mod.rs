//! Domain model of the notification service API.
//!
//! Request values are built fresh per call; response values are fully
//! populated by decoding and never mutated by the client afterwards.

mod attachment;
mod channel;
mod enums;
mod field;
mod notification;
mod provider;

pub use attachment::{Attachment, Attachments};
pub use channel::{ChannelInfo, ChannelsResponse};
pub use enums::{ChannelId, ContentType, RecipientState};
pub use field::{ChannelField, FieldCheckError, FieldDescriptor, ParamsItem};
pub use notification::{
    NotificationRequest, NotificationResponse, PROVIDER_OPTION_SEPARATOR, Recipient,
};
pub use provider::{ProviderInfo, ProvidersResponse};

use serde::{Deserialize, Deserializer};

// ============================================================================
// Well-known names
// ============================================================================

/// Provider parameter: user id
pub const PARAM_USER_ID: &str = "userId";
/// Provider parameter: user secret
pub const PARAM_USER_SECRET: &str = "userSecret";
/// Provider parameter: sender
pub const PARAM_SENDER: &str = "sender";

/// Channel field: message subject
pub const FIELD_SUBJECT: &str = "subject";
/// Channel field: payload content type, see [`ContentType`]
pub const FIELD_CONTENT_TYPE: &str = "contentType";
/// Channel field: JSON-encoded [`Attachments`]
pub const FIELD_INLINE_ATTACHMENTS: &str = "inlineAttachments";

// ============================================================================
// Decoding helpers
// ============================================================================

/// Treats JSON `null` like an absent field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats `null` and `""` as absent
pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
