//! Notifications-RS Library
//!
//! Client for a remote notification-dispatch service: list the configured
//! delivery providers and channels, and submit notifications through a
//! provider.
//!
//! ```no_run
//! use notifications::{ClientConfig, NotificationClient, NotificationRequest};
//!
//! # async fn run() -> Result<(), notifications::ClientError> {
//! let client = NotificationClient::new(ClientConfig::new(
//!     "https://notify.example.com/api",
//!     "user",
//!     "secret",
//! ))?;
//!
//! let providers = client.list_providers().await?;
//! let request = NotificationRequest::new(["+15551234567"], "Hello");
//! let response = client.send_notification(&providers[0].id, &request).await?;
//! println!("accepted as {}", response.uuid);
//! # Ok(())
//! # }
//! ```

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod transport;

pub use client::{ClientConfig, NotificationApi, NotificationClient};
pub use error::{ClientError, ClientResult, Operation, TransportError};
pub use models::{
    Attachment, Attachments, ChannelField, ChannelId, ChannelInfo, ChannelsResponse,
    ContentType, FieldDescriptor, NotificationRequest, NotificationResponse, ParamsItem,
    ProviderInfo, ProvidersResponse, Recipient, RecipientState,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
