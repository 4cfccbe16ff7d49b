//! HTTP client, REST pagination, and typed resource payloads for ghsweep.

pub mod client;
pub mod errors;
pub mod http;
pub mod queries;
