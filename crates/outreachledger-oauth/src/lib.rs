//! # outreachledger-oauth
//!
//! `OAuth2` authentication library for the mail provider REST API.
//!
//! ## Features
//!
//! - **Client Credentials Flow**: app-only (daemon) token acquisition
//! - **Provider configurations**: Pre-configured for Microsoft tenants,
//!   custom providers supported
//!
//! ## Quick Start
//!
//! ```ignore
//! use outreachledger_oauth::{Provider, OAuthClient, ClientCredentialsFlow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Provider::microsoft("your-tenant-id")?;
//!     let client = OAuthClient::new("your_client_id", provider)
//!         .with_client_secret("your_secret");
//!
//!     let flow = ClientCredentialsFlow::new(client);
//!     let token = flow.fetch_token(None).await?;
//!
//!     println!("Access token: {}", token.access_token);
//!     Ok(())
//! }
//! ```
//!
//! Tokens are deliberately not cached or refreshed: callers run as short
//! batch jobs and perform one exchange per run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod flow;
pub mod provider;
pub mod token;

pub use error::{Error, Result};
pub use flow::{ClientCredentialsFlow, OAuthClient};
pub use provider::Provider;
pub use token::Token;
