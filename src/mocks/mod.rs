//! Mock implementations for testing
//!
//! In-memory stand-ins for the transport and downloader traits so the client
//! and service can be tested without HTTP calls.

#[cfg(test)]
mod mock_transport;

#[cfg(test)]
pub use mock_transport::{MockImageDownloader, MockImageTransport};
