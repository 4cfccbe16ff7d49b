//! Typed payloads and request paths for each resource kind.

pub mod gist;
pub mod hook;
pub mod key;
pub mod release;
pub mod repo;
pub mod secret;
pub mod user;
