pub mod config;
pub mod loader;
pub mod models;
pub mod view;
pub mod viewer;

pub use config::Config;
pub use loader::{Committed, DataLoader, HttpSource, ListingSource, LoadError};
pub use models::{Location, Price, Record, RecordId};
pub use view::{derive_view, DerivedView, FilterField, Filters, PageMeta, PageNav, PageSize, ViewState};
pub use viewer::Viewer;
