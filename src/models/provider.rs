use serde::{Deserialize, Serialize};

use super::{ChannelId, ParamsItem, non_empty, null_as_default};

/// Delivery backend the notification service can route through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Stable identifier used to route send requests
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Channels this provider can deliver through
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<ChannelId>,
    /// Provider-specific configuration options, in server order
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Vec<ParamsItem>,
}

impl ProviderInfo {
    pub fn supports(&self, channel: &ChannelId) -> bool {
        self.channels.contains(channel)
    }

    pub fn param(&self, id: &str) -> Option<&ParamsItem> {
        self.params.iter().find(|p| p.id == id)
    }

    pub fn required_params(&self) -> impl Iterator<Item = &ParamsItem> {
        self.params.iter().filter(|p| p.is_required)
    }
}

/// Body of `GET v1/provider`
pub type ProvidersResponse = Vec<ProviderInfo>;
