//! Remote authority: the backend that owns the durable blocklist
//!
//! The store never trusts its own cache after a write; everything it knows
//! comes back through this interface.

mod http;

pub use http::HttpAuthority;

use crate::error::Result;
use crate::model::{CustomExtensionRule, ExtensionType, FixedExtensionRule, RuleId};
use async_trait::async_trait;

/// Operations the backend exposes for blocklist rules
///
/// Extensions passed in are expected to be normalized already.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteAuthority: Send + Sync {
    /// Fetch every fixed rule
    async fn list_fixed(&self) -> Result<Vec<FixedExtensionRule>>;

    /// Set the block state of a fixed rule
    async fn set_fixed_blocked(&self, extension: &str, is_blocked: bool) -> Result<()>;

    /// Create a fixed rule
    async fn add_fixed(&self, extension: &str) -> Result<FixedExtensionRule>;

    /// Delete a fixed rule by id
    async fn delete_fixed(&self, id: RuleId) -> Result<()>;

    /// Restore the default fixed catalog
    async fn reset_fixed(&self) -> Result<()>;

    /// Fetch every custom rule
    async fn list_custom(&self) -> Result<Vec<CustomExtensionRule>>;

    /// Create a custom rule
    async fn add_custom(&self, extension: &str) -> Result<CustomExtensionRule>;

    /// Delete a custom rule by id
    async fn delete_custom(&self, id: RuleId) -> Result<()>;

    /// Delete every custom rule
    async fn delete_all_custom(&self) -> Result<()>;

    /// Delete the custom rule holding an extension
    async fn delete_custom_by_extension(&self, extension: &str) -> Result<()>;

    /// Live block decision for an extension
    async fn is_blocked(&self, extension: &str) -> Result<bool>;

    /// Which rule set holds an extension, if any
    async fn extension_type(&self, extension: &str) -> Result<Option<ExtensionType>>;
}
