//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ConfigError, WebSmsConfig};
use crate::domain::{
    AccessToken, MAX_RECIPIENTS, Message, MessageType, Outcome, Password, StatusCode, Username,
    ValidationError,
};
use crate::transport::SendMessageResponse;

mod draft;

pub use draft::DraftMessage;

/// Base URL of the public websms REST API.
pub const DEFAULT_ENDPOINT: &str = "https://api.websms.com/rest/";

const INVALID_HTTP_STATUS: &str = "received an invalid status code";
const APPLICATION_JSON: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    url: String,
    headers: Vec<(&'static str, String)>,
    body: String,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(*name, value.as_str());
            }
            let response = builder.body(request.body).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Options passed through to the underlying HTTP client.
///
/// The HTTP client is rebuilt whenever these change; endpoint and credentials are read on
/// every request and never require a rebuild.
pub struct TransportOptions {
    /// Timeout applied to the entire request.
    pub timeout: Option<Duration>,
    /// Timeout for establishing the connection.
    pub connect_timeout: Option<Duration>,
    /// Override for the HTTP `User-Agent` header.
    pub user_agent: Option<String>,
}

impl TransportOptions {
    fn build_transport(&self) -> Result<ReqwestTransport, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = self.user_agent.as_ref() {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(ReqwestTransport { client })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Username/password pair for `Basic` authentication.
pub struct BasicCredentials {
    username: Username,
    password: Password,
}

impl BasicCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    fn header_value(&self) -> String {
        let encoded = BASE64.encode(format!(
            "{}:{}",
            self.username.as_str(),
            self.password.as_str()
        ));
        format!("Basic {encoded}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Authentication credentials for websms API calls.
///
/// An access token always takes priority. Username/password set alongside a token are kept
/// (so a later configuration can fall back to them) but are not sent.
pub enum Auth {
    /// Authenticate with `Authorization: Bearer <token>`.
    AccessToken {
        token: AccessToken,
        basic: Option<BasicCredentials>,
    },
    /// Authenticate with `Authorization: Basic base64(username:password)`.
    Basic(BasicCredentials),
}

impl Auth {
    /// Create [`Auth::AccessToken`] and validate that the token is non-empty after trimming.
    pub fn access_token(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::AccessToken {
            token: AccessToken::new(value)?,
            basic: None,
        })
    }

    /// Create [`Auth::Basic`] and validate that both parts are non-empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Basic(BasicCredentials::new(username, password)?))
    }

    /// Resolve credentials from optional configuration values.
    ///
    /// Blank values count as absent. A token wins; otherwise both username and password
    /// are required. Fails with [`ConfigError::MissingCredentials`] when neither is usable.
    pub fn from_parts(
        access_token: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let access_token = access_token.filter(|value| !value.trim().is_empty());
        let username = username.filter(|value| !value.trim().is_empty());
        let password = password.filter(|value| !value.is_empty());

        let basic = match (username, password) {
            (Some(username), Some(password)) => Some(BasicCredentials::new(username, password)?),
            _ => None,
        };

        match (access_token, basic) {
            (Some(token), basic) => Ok(Self::AccessToken {
                token: AccessToken::new(token)?,
                basic,
            }),
            (None, Some(basic)) => Ok(Self::Basic(basic)),
            (None, None) => Err(ConfigError::MissingCredentials),
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::AccessToken { token, .. } => format!("Bearer {}", token.as_str()),
            Self::Basic(basic) => basic.header_value(),
        }
    }

    fn replace_token(self, token: AccessToken) -> Self {
        match self {
            Self::AccessToken { basic, .. } => Self::AccessToken { token, basic },
            Self::Basic(basic) => Self::AccessToken {
                token,
                basic: Some(basic),
            },
        }
    }

    fn replace_basic(self, basic: BasicCredentials) -> Self {
        match self {
            Self::AccessToken { token, .. } => Self::AccessToken {
                token,
                basic: Some(basic),
            },
            Self::Basic(_) => Self::Basic(basic),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`WebSmsClient`].
///
/// Each provider outcome has its own variant so callers can decide on retry, backoff or
/// alerting per kind. The client itself never retries.
pub enum WebSmsError {
    /// The client could not be constructed from the given settings. Never returned by `send`.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Transport failure (DNS, TLS, timeouts, etc) or an HTTP status other than 200.
    #[error("communication error: {message}")]
    Communication {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// websms rejected the credentials, the account or the source IP.
    #[error("not authorized: {status_message} ({status_code})")]
    NotAuthorized {
        status_code: StatusCode,
        status_message: String,
    },

    /// websms rejected the request content.
    #[error("there seems to be a problem with the request: {status_message} ({status_code})")]
    InvalidRequest {
        status_code: StatusCode,
        status_message: String,
    },

    /// websms reported an internal error or is unavailable.
    #[error("websms service error: {status_message} ({status_code})")]
    Service {
        status_code: StatusCode,
        status_message: String,
    },

    /// websms returned a status code this crate does not know.
    #[error("unknown status code {status_code}: {status_message}")]
    InvalidStatus {
        status_code: StatusCode,
        status_message: String,
    },

    /// The requested message kind is not implemented.
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl WebSmsError {
    /// websms status code carried by provider-level errors.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::NotAuthorized { status_code, .. }
            | Self::InvalidRequest { status_code, .. }
            | Self::Service { status_code, .. }
            | Self::InvalidStatus { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// HTTP status carried by communication errors, when one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Communication { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether sending the same message again may succeed without reconfiguration.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Communication { .. } | Self::Service { .. })
    }

    fn transport(err: Box<dyn StdError + Send + Sync>) -> Self {
        let status = err
            .downcast_ref::<reqwest::Error>()
            .and_then(reqwest::Error::status)
            .map(|status| status.as_u16());
        Self::Communication {
            message: err.to_string(),
            status,
            source: Some(err),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`WebSmsClient`].
///
/// Credentials are resolved in [`WebSmsClientBuilder::build`]: an access token wins over a
/// username/password pair, and having neither is a configuration error.
pub struct WebSmsClientBuilder {
    endpoint: String,
    access_token: Option<String>,
    username: Option<String>,
    password: Option<String>,
    options: TransportOptions,
}

impl Default for WebSmsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSmsClientBuilder {
    /// Create a builder with the default endpoint, no credentials and default transport options.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            access_token: None,
            username: None,
            password: None,
            options: TransportOptions::default(),
        }
    }

    /// Override the websms base URL. Message sub-paths are resolved against it.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Replace all transport options at once.
    pub fn transport_options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`WebSmsClient`].
    pub fn build(self) -> Result<WebSmsClient, WebSmsError> {
        let auth = Auth::from_parts(
            self.access_token.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        )?;
        let endpoint = parse_endpoint(&self.endpoint)?;
        let http = self.options.build_transport()?;

        Ok(WebSmsClient {
            endpoint,
            auth,
            options: self.options,
            http: Arc::new(http),
        })
    }
}

#[derive(Clone)]
/// High-level websms client.
///
/// A client is immutable: the `with_*` methods return a reconfigured copy, so a client can
/// be shared across tasks while another part of the program derives new settings from it.
/// Cloning is cheap; clones share the HTTP connection pool.
pub struct WebSmsClient {
    endpoint: Url,
    auth: Auth,
    options: TransportOptions,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for WebSmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSmsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("auth", &self.auth)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl WebSmsClient {
    /// Create a client for the default endpoint.
    ///
    /// For more customization, use [`WebSmsClient::builder`].
    pub fn new(auth: Auth) -> Result<Self, WebSmsError> {
        let options = TransportOptions::default();
        let http = options.build_transport()?;
        Ok(Self {
            endpoint: parse_endpoint(DEFAULT_ENDPOINT)?,
            auth,
            options,
            http: Arc::new(http),
        })
    }

    /// Start building a client with custom settings.
    pub fn builder() -> WebSmsClientBuilder {
        WebSmsClientBuilder::new()
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &WebSmsConfig) -> Result<Self, WebSmsError> {
        let auth = Auth::from_parts(
            config.auth.access_token.as_deref(),
            config.auth.username.as_deref(),
            config.auth.password.as_deref(),
        )?;
        Self::new(auth)?.with_endpoint(&config.endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Return a copy of this client talking to `endpoint`.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, WebSmsError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    /// Return a copy of this client authenticating with `token`.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Result<Self, WebSmsError> {
        let token = AccessToken::new(token)?;
        self.auth = self.auth.replace_token(token);
        Ok(self)
    }

    /// Return a copy of this client holding a username/password pair.
    ///
    /// An access token already configured keeps priority.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, WebSmsError> {
        let basic = BasicCredentials::new(username, password)?;
        self.auth = self.auth.replace_basic(basic);
        Ok(self)
    }

    /// Return a copy of this client using a freshly built HTTP client with `options`.
    pub fn with_transport_options(mut self, options: TransportOptions) -> Result<Self, WebSmsError> {
        self.http = Arc::new(options.build_transport()?);
        self.options = options;
        Ok(self)
    }

    /// Value sent in the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        self.auth.authorization_header()
    }

    /// Start a text SMS bound to this client.
    pub fn sms_message(&self) -> DraftMessage<'_> {
        DraftMessage::new(self)
    }

    /// Start a message of the given kind.
    ///
    /// Fails with [`WebSmsError::NotSupported`] for kinds this crate does not implement.
    pub fn message(&self, kind: MessageType) -> Result<DraftMessage<'_>, WebSmsError> {
        match kind {
            MessageType::Text => Ok(self.sms_message()),
            MessageType::WhatsApp => Err(WebSmsError::NotSupported(
                "WhatsApp messages are not implemented yet",
            )),
        }
    }

    /// Shorthand for `message(MessageType::WhatsApp)`; always fails.
    pub fn whatsapp_message(&self) -> Result<DraftMessage<'_>, WebSmsError> {
        self.message(MessageType::WhatsApp)
    }

    /// Send a message through websms and return the `clientMessageId` echoed back.
    ///
    /// One request is made per call; nothing is retried.
    ///
    /// Errors:
    /// - [`WebSmsError::Communication`] for transport failures and HTTP statuses other than 200,
    /// - [`WebSmsError::NotAuthorized`], [`WebSmsError::InvalidRequest`],
    ///   [`WebSmsError::Service`] or [`WebSmsError::InvalidStatus`] depending on `statusCode`;
    ///   a body that is not a JSON object reads as status code 0.
    pub async fn send(&self, message: impl Into<Message>) -> Result<Option<String>, WebSmsError> {
        let message = message.into();
        let url = self.request_url(&message)?;

        let recipients = message.recipient_count();
        if recipients == 0 {
            warn!("sending message without recipients");
        } else if recipients > MAX_RECIPIENTS {
            warn!(
                recipients,
                max = MAX_RECIPIENTS,
                "recipient list exceeds the websms limit"
            );
        }

        debug!(
            url = %url,
            message_type = ?message.message_type(),
            recipients,
            "sending message"
        );

        let request = HttpRequest {
            url: url.into(),
            headers: self.request_headers(),
            body: crate::transport::encode_message_payload(&message).to_string(),
        };

        let response = self
            .http
            .post_json(request)
            .await
            .map_err(WebSmsError::transport)?;

        if response.status != 200 {
            warn!(status = response.status, "websms answered with HTTP error");
            return Err(WebSmsError::Communication {
                message: INVALID_HTTP_STATUS.to_owned(),
                status: Some(response.status),
                source: None,
            });
        }

        into_client_message_id(crate::transport::decode_send_message_json_response(
            &response.body,
        ))
    }

    fn request_url(&self, message: &Message) -> Result<Url, WebSmsError> {
        self.endpoint
            .join(message.request_endpoint())
            .map_err(|source| {
                WebSmsError::Configuration(ConfigError::InvalidEndpoint {
                    endpoint: self.endpoint.to_string(),
                    source,
                })
            })
    }

    fn request_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", self.authorization_header()),
            ("Accept", APPLICATION_JSON.to_owned()),
            ("Content-Type", APPLICATION_JSON.to_owned()),
        ]
    }
}

fn into_client_message_id(response: SendMessageResponse) -> Result<Option<String>, WebSmsError> {
    let SendMessageResponse {
        status_code,
        status_message,
        client_message_id,
        transfer_id,
    } = response;

    let error = match status_code.outcome() {
        Outcome::Success => {
            debug!(
                %status_code,
                transfer_id = transfer_id.as_deref().unwrap_or_default(),
                "message accepted"
            );
            return Ok(client_message_id);
        }
        Outcome::NotAuthorized => WebSmsError::NotAuthorized {
            status_code,
            status_message,
        },
        Outcome::InvalidRequest => WebSmsError::InvalidRequest {
            status_code,
            status_message,
        },
        Outcome::ServiceError => WebSmsError::Service {
            status_code,
            status_message,
        },
        Outcome::UnknownStatus => WebSmsError::InvalidStatus {
            status_code,
            status_message,
        },
    };

    warn!(%status_code, error = %error, "websms rejected message");
    Err(error)
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let endpoint = endpoint.trim();
    let url = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }
    Ok(url)
}
