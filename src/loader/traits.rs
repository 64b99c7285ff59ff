use crate::loader::LoadError;
use crate::models::Record;
use async_trait::async_trait;

/// Common trait for everything that can hand back a record set.
/// The HTTP backend is the real one; tests plug in canned sources.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the record set, narrowed server-side when `query` is non-empty
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Record>, LoadError>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
