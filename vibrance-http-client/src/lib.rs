//! Vibrance HTTP Client Library
//!
//! The Vibrance event-registration site has no API. This library logs in
//! through the site's HTML login form and scrapes the authenticated profile
//! page for the user's personal details, event registrations and merchandise
//! orders.
//!
//! # Features
//!
//! - Per-call sessions: every login gets its own cookie jar and HTTP client
//! - Typed records with explicit optional fields
//! - Errors that separate rejected credentials from upstream failures
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Async API on top of reqwest
//!
//! # Example
//!
//! ```no_run
//! use vibrance_http_client::{
//!     Credentials, VibranceClient, VibranceError, extract_events, extract_profile,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VibranceClient::new()?;
//! let credentials = Credentials::new("21BCE1234", "password");
//!
//! // One-shot helpers log in, fetch the profile page and extract
//! match client.get_merchandise(&credentials).await {
//!     Ok(items) => println!("{} merchandise orders", items.len()),
//!     Err(VibranceError::InvalidCredentials(message)) => println!("Login failed: {}", message),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! // Or drive the steps yourself to reuse one page for several extractors
//! let session = client.acquire_session(&credentials).await?;
//! let document = session.fetch_profile_document().await?;
//! let profile = extract_profile(&document)?;
//! let events = extract_events(&document)?;
//! println!("{:?} has {} events", profile.name, events.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod dom;
mod error;
mod extract;
mod model;

pub use client::{Session, VibranceClient, VibranceClientBuilder};
pub use error::{INTERNAL_ERROR_MESSAGE, VibranceError};
pub use extract::{ProfileDocument, extract_events, extract_merchandise, extract_profile};
pub use model::{Credentials, EventRecord, MerchandiseRecord, ProfileRecord};
pub use reqwest::Url;
