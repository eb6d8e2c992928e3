//! Outbound notification clients for published releases.
//!
//! Each client performs a single authenticated HTTP request and surfaces any
//! non-success response as an error. Nothing is retried.

/// Chat webhook client for release announcements.
pub mod discord;

/// Release notes email API client.
pub mod release_notes;

/// Request payloads sent by the notification clients.
pub mod request;

/// Traits abstracting the notification clients.
pub mod traits;
