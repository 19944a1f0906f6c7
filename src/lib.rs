//! # anvil
//!
//! anvil is an API client for the ConnectWise Manage PSA platform, with a
//! demo binary that walks through the most common operations.
//!
//! ## Features
//!
//! - **Authentication**: Basic-Auth token built from company + API keys,
//!   verified with a one-shot connectivity check
//! - **Read operations**: companies, service tickets, ticket notes, time
//!   entries, members, and the authenticated account
//! - **Write operations**: create tickets, add ticket notes, create time
//!   entries
//! - **Security**: the private key is never logged or exposed in error
//!   messages
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with security-conscious message sanitization
//! - [`cwm_client`] - HTTP client for the Manage REST API
//! - [`models`] - Data models for Manage API requests and responses
//!
//! ## Configuration
//!
//! anvil requires five environment variables (a `.env` file works too):
//!
//! - `CWM_SERVER`: Manage server host (e.g. `na.myconnectwise.net`)
//! - `CWM_COMPANY`: company identifier
//! - `CWM_PUBLIC_KEY`: public API key
//! - `CWM_PRIVATE_KEY`: private API key
//! - `CWM_CLIENT_ID`: vendor-issued client ID
//!
//! Optional:
//! - `RUST_LOG`: log level (e.g. `anvil=debug`)
//! - `CWM_DEMO_WRITES` / `CWM_DEMO_BOARD_ID`: enable the mutating demos
//!
//! ## Security Considerations
//!
//! The private key is stored only in memory and is:
//! - Never logged at any log level
//! - Sanitized from all error messages
//! - Not included in demo output
//!
//! ## Example
//!
//! Using the [`CwmClient`](cwm_client::CwmClient) directly:
//!
//! ```ignore
//! use anvil::config::Config;
//! use anvil::cwm_client::{CwmClient, ListParams};
//!
//! async fn example() -> Result<(), anvil::error::AnvilError> {
//!     let config = Config::from_env()?;
//!     let client = CwmClient::new(&config)?;
//!
//!     // List recent service tickets
//!     let params = ListParams::new()
//!         .with_conditions("recordType='ServiceTicket'")
//!         .with_page_size(10);
//!
//!     let tickets = client.list_tickets(params).await?;
//!     for ticket in tickets {
//!         println!("#{}: {}", ticket.id, ticket.display_summary());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod cwm_client;
pub mod error;
pub mod models;
