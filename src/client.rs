//! Notification service client.
//!
//! Three operations, each a single stateless round trip through the
//! [`Transport`]: list providers, list channels, send a notification.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{ClientError, ClientResult, Operation, TransportError};
use crate::models::{
    ChannelsResponse, NotificationRequest, NotificationResponse, ProvidersResponse,
};
use crate::transport::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, HttpExecutor, Transport, default_headers,
    default_http_client, escape_path_segment,
};

const PROVIDERS_PATH: &str = "v1/provider";
const CHANNELS_PATH: &str = "v1/channel";
const NOTIFICATION_PATH: &str = "v1/notification";

/// Relative path for sending through `provider_id`, with the id escaped as
/// one path segment
pub fn notification_path(provider_id: &str) -> String {
    format!("{}/{}", NOTIFICATION_PATH, escape_path_segment(provider_id))
}

/// Everything needed to construct a [`NotificationClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the notification API
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// HTTP executor to use; a default reqwest client when `None`
    pub executor: Option<Arc<dyn HttpExecutor>>,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            executor: None,
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn HttpExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Uses a pre-configured reqwest client (proxy, TLS, timeouts)
    pub fn with_http_client(self, client: reqwest::Client) -> Self {
        self.with_executor(Arc::new(client))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("executor", &self.executor.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Operations offered by the notification service.
///
/// Implemented by [`NotificationClient`]; callers can depend on the trait to
/// substitute a fake in their own tests.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Lists configured providers. An empty list is a valid answer.
    async fn list_providers(&self) -> ClientResult<ProvidersResponse>;

    /// Lists known delivery channels. An empty list is a valid answer.
    async fn list_channels(&self) -> ClientResult<ChannelsResponse>;

    /// Submits `request` through the provider `provider_id`
    async fn send_notification(
        &self,
        provider_id: &str,
        request: &NotificationRequest,
    ) -> ClientResult<NotificationResponse>;
}

/// Client for the notification service API.
///
/// Holds only the transport and its fixed headers, so it is cheap to clone
/// and safe to use from many tasks at once. Each client owns its own
/// credentials; clients with different credentials coexist freely.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    transport: Transport,
}

impl NotificationClient {
    /// Creates a client, computing the `Authorization` header once.
    ///
    /// # Errors
    /// [`ClientError::Construction`] when the base URL is invalid or the
    /// default executor cannot be built. No partial client is returned.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let construction = |source: TransportError| ClientError::Construction { source };

        let executor: Arc<dyn HttpExecutor> = match config.executor {
            Some(executor) => executor,
            None => Arc::new(
                default_http_client(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
                    .map_err(construction)?,
            ),
        };

        let headers = default_headers(&config.username, &config.password).map_err(construction)?;
        let transport = Transport::new(&config.base_url, headers, executor).map_err(construction)?;

        tracing::debug!(base_url = %transport.base_url(), "notification client created");

        Ok(Self { transport })
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// `GET v1/provider`
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn list_providers(&self) -> ClientResult<ProvidersResponse> {
        let providers: Option<ProvidersResponse> = self
            .transport
            .get(PROVIDERS_PATH)
            .await
            .map_err(|source| ClientError::Operation {
                operation: Operation::GetProviders,
                source,
            })?;
        Ok(providers.unwrap_or_default())
    }

    /// `GET v1/channel`
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn list_channels(&self) -> ClientResult<ChannelsResponse> {
        let channels: Option<ChannelsResponse> = self
            .transport
            .get(CHANNELS_PATH)
            .await
            .map_err(|source| ClientError::Operation {
                operation: Operation::GetChannels,
                source,
            })?;
        Ok(channels.unwrap_or_default())
    }

    /// `POST v1/notification/{provider_id}`
    ///
    /// The request and provider id are validated first; an invalid request
    /// never reaches the network.
    ///
    /// Once the server answered with a success status the dispatch may have
    /// been accepted even if this returns an error: when the answer breaks a
    /// response rule, [`TransportError::dispatch_uuid`] carries the uuid the
    /// server assigned. Check it before retrying, or recipients may be
    /// notified twice.
    #[tracing::instrument(
        level = "debug",
        skip(self, request),
        fields(recipients = request.recipients.len()),
        err
    )]
    pub async fn send_notification(
        &self,
        provider_id: &str,
        request: &NotificationRequest,
    ) -> ClientResult<NotificationResponse> {
        check_provider_id(provider_id)?;
        request.validate()?;

        let send_failed = |source: TransportError| ClientError::Operation {
            operation: Operation::SendNotification,
            source,
        };

        let body: serde_json::Value = self
            .transport
            .post(&notification_path(provider_id), request)
            .await
            .map_err(send_failed)?;

        let uuid = body
            .get("uuid")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        let response: NotificationResponse = serde_json::from_value(body).map_err(|source| {
            tracing::warn!(uuid = ?uuid, error = %source, "rejected notification response");
            send_failed(TransportError::InvalidResponse { uuid, source })
        })?;

        if response.recipients.len() != request.recipients.len() {
            tracing::warn!(
                uuid = %response.uuid,
                expected = request.recipients.len(),
                actual = response.recipients.len(),
                "recipient count mismatch"
            );
            return Err(send_failed(TransportError::RecipientCountMismatch {
                expected: request.recipients.len(),
                actual: response.recipients.len(),
                uuid: response.uuid,
            }));
        }

        tracing::debug!(
            uuid = %response.uuid,
            success = response.success,
            error = response.error,
            "notification accepted"
        );

        Ok(response)
    }
}

/// Rejects ids that URL resolution would collapse into another path
/// (`.` and `..` are dot segments even when percent-encoded)
fn check_provider_id(provider_id: &str) -> ClientResult<()> {
    match provider_id {
        "" => Err(ClientError::invalid_request(
            "provider_id",
            "must not be empty",
        )),
        "." | ".." => Err(ClientError::invalid_request(
            "provider_id",
            format!("'{provider_id}' is not a usable path segment"),
        )),
        _ => Ok(()),
    }
}

#[async_trait]
impl NotificationApi for NotificationClient {
    async fn list_providers(&self) -> ClientResult<ProvidersResponse> {
        NotificationClient::list_providers(self).await
    }

    async fn list_channels(&self) -> ClientResult<ChannelsResponse> {
        NotificationClient::list_channels(self).await
    }

    async fn send_notification(
        &self,
        provider_id: &str,
        request: &NotificationRequest,
    ) -> ClientResult<NotificationResponse> {
        NotificationClient::send_notification(self, provider_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelId, ContentType, RecipientState};
    use serde_json::json;
    use std::error::Error as _;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NotificationClient {
        NotificationClient::new(ClientConfig::new(server.uri(), "user", "pass")).unwrap()
    }

    #[test]
    fn test_notification_path_escapes_provider() {
        assert_eq!(notification_path("sms-gw"), "v1/notification/sms-gw");
        assert_eq!(notification_path("mail/v1"), "v1/notification/mail%2Fv1");
        assert_eq!(
            notification_path("my provider/v2"),
            "v1/notification/my%20provider%2Fv2"
        );
    }

    #[test]
    fn test_new_rejects_malformed_base_url() {
        let err = NotificationClient::new(ClientConfig::new("::not a url", "u", "p")).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Construction {
                source: TransportError::InvalidBaseUrl { .. }
            }
        ));
    }

    #[test]
    fn test_config_debug_redacts_password() {
        let config = ClientConfig::new("http://localhost", "user", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("user"));
    }

    #[test]
    fn test_client_debug_redacts_authorization() {
        let client =
            NotificationClient::new(ClientConfig::new("http://localhost", "user", "pass")).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("dXNlcjpwYXNz"));
    }

    #[tokio::test]
    async fn test_list_providers_sends_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/provider"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "sms-gw",
                    "title": "SMS Gateway",
                    "channels": ["phone"],
                    "params": [{"id": "userId", "title": "User", "isRequired": true}]
                },
                {"id": "smtp", "title": "SMTP", "channels": ["email"], "params": []}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let providers = client_for(&server).list_providers().await.unwrap();

        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].id, "sms-gw");
        assert!(providers[0].supports(&ChannelId::Phone));
        assert_eq!(providers[1].id, "smtp");

        let requests = server.received_requests().await.unwrap();
        let agent = requests[0].headers.get("user-agent").unwrap();
        assert!(agent.to_str().unwrap().starts_with("notifications-rs/"));
    }

    #[tokio::test]
    async fn test_list_providers_empty_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/provider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let providers = client_for(&server).list_providers().await.unwrap();
        assert!(providers.is_empty());
    }

    #[tokio::test]
    async fn test_list_providers_server_error_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/provider"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_providers().await.unwrap_err();

        assert_eq!(err.to_string(), "failed to get providers");
        assert_eq!(err.operation(), Some(Operation::GetProviders));
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        let cause = err
            .source()
            .and_then(|e| e.downcast_ref::<TransportError>())
            .unwrap();
        assert!(matches!(cause, TransportError::Status { body, .. } if body == "internal failure"));
    }

    #[tokio::test]
    async fn test_list_channels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "email", "title": "Email", "fields": [
                    {"id": "subject", "title": "Subject", "isRequired": false}
                ]},
                {"id": "telegram", "title": "Telegram", "fields": []}
            ])))
            .mount(&server)
            .await;

        let channels = client_for(&server).list_channels().await.unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].id, ChannelId::Email);
        assert_eq!(channels[0].fields[0].id, "subject");
        assert_eq!(channels[1].id, ChannelId::Telegram);
    }

    #[tokio::test]
    async fn test_list_channels_malformed_body_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channel"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_channels().await.unwrap_err();
        assert_eq!(err.to_string(), "failed to get channels");
        assert!(matches!(err.transport(), Some(TransportError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_send_notification_pending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/notification/sms-gw"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "recipients": ["+15551234567"],
                "payload": "hi",
                "options": {},
                "fields": {}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "abc-123",
                "recipients": [{"address": "+15551234567", "state": "pending"}],
                "success": 0,
                "error": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = NotificationRequest::new(["+15551234567"], "hi");
        let response = client_for(&server)
            .send_notification("sms-gw", &request)
            .await
            .unwrap();

        assert_eq!(response.uuid, "abc-123");
        assert_eq!(response.recipients.len(), 1);
        assert_eq!(response.recipients[0].state, RecipientState::Pending);
        assert!(response.recipients[0].error.is_none());
    }

    #[tokio::test]
    async fn test_send_notification_escapes_provider_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/notification/mail%2Fv1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "u-1",
                "id": "ext-1",
                "recipients": [{"address": "a@example.com", "state": "sent"}],
                "success": 0,
                "error": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = NotificationRequest::new(["a@example.com"], "hello")
            .with_id("ext-1")
            .with_subject("Hi")
            .with_content_type(ContentType::Markdown);
        let response = client_for(&server)
            .send_notification("mail/v1", &request)
            .await
            .unwrap();
        assert_eq!(response.id.as_deref(), Some("ext-1"));

        let requests = server.received_requests().await.unwrap();
        let raw_path = requests[0].url.path();
        assert!(raw_path.contains("v1/notification/mail%2Fv1"));
        let segment = raw_path.rsplit('/').next().unwrap();
        assert_eq!(urlencoding::decode(segment).unwrap(), "mail/v1");

        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["id"], "ext-1");
        assert_eq!(body["fields"]["subject"], "Hi");
        assert_eq!(body["fields"]["contentType"], "markdown");
    }

    #[tokio::test]
    async fn test_send_notification_invalid_request_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let request = NotificationRequest::new(Vec::<String>::new(), "hi");
        let err = client_for(&server)
            .send_notification("sms-gw", &request)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_send_notification_rejects_dot_segment_provider_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            NotificationClient::new(ClientConfig::new(format!("{}/api", server.uri()), "u", "p"))
                .unwrap();
        let request = NotificationRequest::new(["+15551234567"], "hi");

        for provider_id in ["", ".", ".."] {
            let err = client
                .send_notification(provider_id, &request)
                .await
                .unwrap_err();
            assert!(
                matches!(&err, ClientError::InvalidRequest { field, .. } if field == "provider_id"),
                "unexpected error for {provider_id:?}: {err:?}"
            );
        }
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_notification_rejects_recipient_count_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/notification/sms-gw"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "u-2",
                "recipients": [
                    {"address": "+15551234567", "state": "pending"},
                    {"address": "+15557654321", "state": "pending"}
                ],
                "success": 0,
                "error": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = NotificationRequest::new(["+15551234567"], "hi");
        let err = client_for(&server)
            .send_notification("sms-gw", &request)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to send notification");
        match err.transport() {
            Some(TransportError::RecipientCountMismatch {
                uuid,
                expected,
                actual,
            }) => {
                assert_eq!(uuid, "u-2");
                assert_eq!(*expected, 1);
                assert_eq!(*actual, 2);
            }
            other => panic!("Expected RecipientCountMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_notification_invalid_response_keeps_uuid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/notification/sms-gw"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "u-9",
                "recipients": [{"address": "+15551234567", "state": "sent", "error": "boom"}],
                "success": 0,
                "error": 0
            })))
            .mount(&server)
            .await;

        let request = NotificationRequest::new(["+15551234567"], "hi");
        let err = client_for(&server)
            .send_notification("sms-gw", &request)
            .await
            .unwrap_err();

        let transport = err.transport().unwrap();
        assert!(matches!(transport, TransportError::InvalidResponse { .. }));
        assert_eq!(transport.dispatch_uuid(), Some("u-9"));
    }

    #[tokio::test]
    async fn test_send_notification_failure_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/notification/unknown"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such provider"})))
            .mount(&server)
            .await;

        let request = NotificationRequest::new(["+15551234567"], "hi");
        let err = client_for(&server)
            .send_notification("unknown", &request)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to send notification");
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_wrapped() {
        let client =
            NotificationClient::new(ClientConfig::new("http://127.0.0.1:1/", "u", "p")).unwrap();
        let err = client.list_providers().await.unwrap_err();
        assert!(matches!(err.transport(), Some(TransportError::Request { .. })));
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_base_url_path_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            NotificationClient::new(ClientConfig::new(format!("{}/api", server.uri()), "u", "p"))
                .unwrap();
        assert!(client.list_channels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_calls_through_trait_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/provider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(8)
            .mount(&server)
            .await;

        let api: Arc<dyn NotificationApi> = Arc::new(client_for(&server));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let api = Arc::clone(&api);
                tokio::spawn(async move { api.list_providers().await })
            })
            .collect();

        for result in futures::future::join_all(handles).await {
            assert!(result.unwrap().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_clients_with_different_credentials_coexist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/channel"))
            .and(header("authorization", "Basic YTpi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/channel"))
            .and(header("authorization", "Basic Yzpk"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let first = NotificationClient::new(ClientConfig::new(server.uri(), "a", "b")).unwrap();
        let second = NotificationClient::new(ClientConfig::new(server.uri(), "c", "d")).unwrap();

        assert!(first.list_channels().await.is_ok());
        assert_eq!(
            second.list_channels().await.unwrap_err().status(),
            Some(reqwest::StatusCode::UNAUTHORIZED)
        );
    }
}
