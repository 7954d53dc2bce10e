//! API implementations for the fast-lemon-api HTTP endpoints.

pub mod order;
