//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **twilio**: Reqwest-backed SMS gateway client
//! - **sms_logging**: development sender used when no gateway is configured
//! - **auth**: JWT bearer tokens and Argon2 password hashing
//! - **memory**: in-process user directory and doctor registry
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auth;
pub mod memory;
pub mod sms_logging;
pub mod twilio;
