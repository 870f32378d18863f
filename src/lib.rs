//! # getaddress.io Client
//! Asynchronous wrapper around the getaddress.io UK postcode lookup API: give [`Client::lookup`] a postcode (and optionally a house name or number) and get back a [`LookupResponse`] holding the postcode's coordinates and its [`Address`]es.
//!
//! ## Audience and uses
//! For Rust services that need to turn a UK postcode into a pick-list of postal addresses, e.g. address autocompletion in sign-up or checkout flows. Configure with [`ClientBuilder`], or read the key from `GETADDRESS_API_KEY` with [`Client::from_env`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Each lookup is a single GET with no retries or caching; set a timeout on the builder if you need one.
//!
//! ## Address format
//! getaddress.io returns every address as one comma-separated string with seven positions: line 1-4, town, postal town, county. [`Address::parse`] splits and trims it, and its `Display` impl joins it back.
//!
//! ## Errors
//! Rejected API keys surface as [`Error::Authentication`], unknown postcodes as [`Error::NotFound`], malformed bodies as [`Error::ResponseParse`], any other status as [`Error::Status`] and transport failures as [`Error::Request`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use getaddress_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), getaddress_client::Error> {
//!     let client = Client::new("your-api-key")?;
//!     let response = client.lookup("NR10 4JJ", None).await?;
//!     println!("{}, {}", response.latitude(), response.longitude());
//!
//!     for address in response.addresses() {
//!         println!("{}", address.lines().collect::<Vec<_>>().join("\n"));
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod parse;

pub use client::{API_KEY_ENV, Client, ClientBuilder, LEGACY_API_KEY_ENV};
pub use error::Error;
pub use models::{Address, LookupResponse};
pub use parse::parse_response;

/// Result type alias for getaddress.io operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
