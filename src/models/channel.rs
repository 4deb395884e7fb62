use serde::{Deserialize, Serialize};

use super::{ChannelField, ChannelId, null_as_default};

/// Delivery medium and the extra fields a sender may attach for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<ChannelField>,
}

impl ChannelInfo {
    pub fn field(&self, id: &str) -> Option<&ChannelField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Body of `GET v1/channel`
pub type ChannelsResponse = Vec<ChannelInfo>;
