//! Vibrance HTTP client implementation

use crate::dom::{self, MODAL_BODY};
use crate::error::VibranceError;
use crate::extract::{self, ProfileDocument};
use crate::model::{Credentials, EventRecord, MerchandiseRecord, ProfileRecord};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use scraper::Html;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://vitchennaievents.com/vibrance/";
const LOGIN_PATH: &str = "login/";
const PROFILE_PATH: &str = "profile/";
const MAX_REDIRECTS: usize = 10;

/// The main Vibrance client
///
/// Holds configuration only. Every login builds its own HTTP client and
/// cookie jar, so concurrent calls never share a session.
///
/// # Example
///
/// ```no_run
/// use vibrance_http_client::{Credentials, VibranceClient};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = VibranceClient::new()?;
/// let credentials = Credentials::new("21BCE1234", "password");
///
/// let user = client.get_user(&credentials).await?;
/// println!("Logged in as {:?}", user.name);
///
/// for event in client.get_events(&credentials).await? {
///     println!("{} on {}", event.title, event.date);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct VibranceClient {
    base_url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VibranceClient {
    /// Create a client for the live site with default settings
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, VibranceError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use vibrance_http_client::VibranceClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = VibranceClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> VibranceClientBuilder {
        VibranceClientBuilder::new()
    }

    /// Base URL that login and profile paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an HTTP client backed by the given cookie jar
    fn http_client(&self, jar: Arc<Jar>) -> Result<reqwest::Client, VibranceError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_provider(jar)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        builder
            .build()
            .map_err(|e| VibranceError::ClientInit(e.to_string()))
    }

    /// Log in and return an authenticated session
    ///
    /// Posts the login form once. A non-empty `.modal-body` element in the
    /// response means the upstream rejected the credentials.
    ///
    /// # Errors
    ///
    /// * `VibranceError::InvalidCredentials` - The upstream rejected the login
    /// * `VibranceError::UpstreamUnavailable` - Network error, timeout or non-success status
    /// * `VibranceError::ClientInit` - The HTTP client could not be built
    #[tracing::instrument(skip_all, fields(username = credentials.username()))]
    pub async fn acquire_session(&self, credentials: &Credentials) -> Result<Session, VibranceError> {
        let jar = Arc::new(Jar::default());
        let client = self.http_client(Arc::clone(&jar))?;
        let url = join(&self.base_url, LOGIN_PATH)?;

        let form = [
            ("username-login", credentials.username()),
            ("password-login", credentials.password()),
            ("login-form-button", ""),
        ];

        tracing::debug!(%url, "submitting login form");
        let body = client
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if let Some(message) = login_error(&body) {
            tracing::info!("login rejected by upstream");
            return Err(VibranceError::InvalidCredentials(message));
        }

        Ok(Session {
            client,
            jar,
            base_url: self.base_url.clone(),
            username: credentials.username().to_string(),
        })
    }

    /// Log in and extract the user's personal details
    pub async fn get_user(&self, credentials: &Credentials) -> Result<ProfileRecord, VibranceError> {
        let document = self.profile_document(credentials).await?;
        extract::extract_profile(&document)
    }

    /// Log in and extract the user's event registrations
    pub async fn get_events(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<EventRecord>, VibranceError> {
        let document = self.profile_document(credentials).await?;
        extract::extract_events(&document)
    }

    /// Log in and extract the user's merchandise orders
    pub async fn get_merchandise(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<MerchandiseRecord>, VibranceError> {
        let document = self.profile_document(credentials).await?;
        extract::extract_merchandise(&document)
    }

    /// Fresh login followed by a single profile fetch; the session is dropped on return
    async fn profile_document(
        &self,
        credentials: &Credentials,
    ) -> Result<ProfileDocument, VibranceError> {
        let session = self.acquire_session(credentials).await?;
        session.fetch_profile_document().await
    }
}

/// An authenticated session with its own cookie jar
///
/// Only [`VibranceClient::acquire_session`] creates one, and it stays bound to
/// the credentials it was created for. Dropping it releases the connection
/// pool and the cookies.
pub struct Session {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
    username: String,
}

impl Session {
    /// The user this session is logged in as
    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Cookie` header this session sends to the base URL, if any
    pub fn cookies(&self) -> Option<HeaderValue> {
        self.jar.cookies(&self.base_url)
    }

    /// Fetch and parse the profile page
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::UpstreamUnavailable` on network errors, timeouts
    /// and non-success statuses.
    #[tracing::instrument(skip_all, fields(username = %self.username))]
    pub async fn fetch_profile_document(&self) -> Result<ProfileDocument, VibranceError> {
        let url = join(&self.base_url, PROFILE_PATH)?;

        tracing::debug!(%url, "fetching profile page");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let page_url = response.url().clone();
        let body = response.text().await?;

        Ok(ProfileDocument::parse(&body, page_url))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Error message rendered inline by the login form, if any
fn login_error(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let message = dom::trimmed_text(document.select(&MODAL_BODY).next()?);
    (!message.is_empty()).then_some(message)
}

fn join(base: &Url, path: &str) -> Result<Url, VibranceError> {
    base.join(path)
        .map_err(|e| VibranceError::ClientInit(format!("Cannot build URL for {}: {}", path, e)))
}

/// Builder for configuring a Vibrance client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use vibrance_http_client::VibranceClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Default client
/// let client = VibranceClient::builder().build()?;
///
/// // Mock server for testing, with tight timeouts
/// let client = VibranceClient::builder()
///     .base_url("http://localhost:1234")?
///     .timeout(Duration::from_secs(5))
///     .connect_timeout(Duration::from_secs(2))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct VibranceClientBuilder {
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VibranceClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL for the client
    ///
    /// The URL is parsed at builder time. A missing trailing slash is added so
    /// `login/` and `profile/` stay under the given path.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::ClientInit` if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, VibranceError> {
        let url = url
            .into_url()
            .map_err(|e| VibranceError::ClientInit(format!("Invalid base URL: {}", e)))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Total timeout for each request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Timeout for establishing each connection
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// `User-Agent` header sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::ClientInit` if the base URL cannot serve as a
    /// base or the HTTP client settings are rejected.
    pub fn build(self) -> Result<VibranceClient, VibranceError> {
        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| VibranceError::ClientInit(e.to_string()))?,
        };

        if base_url.cannot_be_a_base() {
            return Err(VibranceError::ClientInit(format!(
                "Base URL cannot be a base: {}",
                base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = VibranceClient {
            base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
        };

        // Surface bad HTTP settings now rather than on the first login
        client.http_client(Arc::new(Jar::default()))?;

        Ok(client)
    }
}
