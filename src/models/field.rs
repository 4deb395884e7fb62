use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::non_empty;

/// Why a value does not satisfy a [`FieldDescriptor`]
#[derive(Error, Debug)]
pub enum FieldCheckError {
    #[error("{id} is required")]
    Missing { id: String },

    #[error("{id} does not match pattern {pattern}")]
    Mismatch { id: String, pattern: String },

    #[error("{id} has an invalid pattern")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
}

/// Describes one configuration option or channel field a sender may supply.
///
/// The regex, when present, is meant for the caller to apply before
/// submitting; the client never enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(rename = "isRequired", default)]
    pub is_required: bool,
}

/// Provider-specific configuration parameter
pub type ParamsItem = FieldDescriptor;

/// Channel-specific metadata field (e.g. email subject)
pub type ChannelField = FieldDescriptor;

impl FieldDescriptor {
    /// Checks a candidate value against `isRequired` and `regex`.
    ///
    /// An absent value passes when the field is optional. The pattern must
    /// match somewhere in the value, as RE2 `MatchString` does.
    pub fn check(&self, value: Option<&str>) -> Result<(), FieldCheckError> {
        let Some(value) = value else {
            return if self.is_required {
                Err(FieldCheckError::Missing {
                    id: self.id.clone(),
                })
            } else {
                Ok(())
            };
        };

        if let Some(pattern) = &self.regex {
            let re = Regex::new(pattern).map_err(|source| FieldCheckError::InvalidPattern {
                id: self.id.clone(),
                source,
            })?;
            if !re.is_match(value) {
                return Err(FieldCheckError::Mismatch {
                    id: self.id.clone(),
                    pattern: pattern.clone(),
                });
            }
        }

        Ok(())
    }
}
