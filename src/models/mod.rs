//! Data models for the ConnectWise Manage API.
//!
//! This module contains type definitions for the Manage API, including
//! company, ticket, note, time entry and member models, the create payload
//! builders, and common reference types.

mod common;
mod company;
mod member;
mod note;
mod system;
mod ticket;
mod time_entry;

pub use common::*;
pub use company::*;
pub use member::*;
pub use note::*;
pub use system::*;
pub use ticket::*;
pub use time_entry::*;
