//! Ambari REST API client and models
//!
//! `client` holds the connection and the status handling shared by every
//! endpoint; `privilege` implements the privilege endpoints on top of it.

pub mod client;
pub mod privilege;

pub use client::AmbariClient;
pub use privilege::{Privilege, PrivilegeInfo, PrivilegesResponse};
