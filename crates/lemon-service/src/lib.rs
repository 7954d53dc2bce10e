//! Library surface of the fast-lemon-api service.
//!
//! Exposes the router and API implementations so in-process tests can
//! drive the HTTP surface without binding a socket.

/// API implementations behind the HTTP handlers.
pub mod apis;
/// HTTP server, router, and request handlers.
pub mod server;
