pub mod data_loader;
pub mod error;
pub mod http;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use data_loader::{Committed, DataLoader, FetchOutcome, FetchTicket, PendingFetch};
pub use error::LoadError;
pub use http::HttpSource;
pub use traits::ListingSource;
