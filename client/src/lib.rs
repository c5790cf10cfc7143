//! Backend access for ERP list screens: configuration, the HTTP transport,
//! dropdown option resolution and search execution.

pub mod config;
pub mod options;
pub mod screen;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use config::{ApiConfig, ClientConfig, ScreenConfig};
pub use options::{OptionRequest, OptionResolver, OptionResponse};
pub use screen::{ListScreen, SearchOutcome, SearchTicket};
pub use transport::{HttpTransport, ListResponse, ResponseSignals, Transport};
