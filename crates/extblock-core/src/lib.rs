//! # extblock core
//!
//! Extension classification and blocklist synchronization for the
//! file-upload blocklist admin surface.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Classifier** - Turns raw file names into normalized extensions
//! - **Remote authority** - Trait and HTTP client for the backend that owns the rules
//! - **Blocklist store** - Local cache of fixed and custom rules, reloaded after every write
//! - **Configuration** - TOML-based client configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use extblock_core::{classify, BlocklistStore, Config, HttpAuthority};
//!
//! # async fn demo() -> extblock_core::Result<()> {
//! let config = Config::load("extblock.toml")?;
//! let store = BlocklistStore::new(HttpAuthority::from_config(&config.authority)?);
//!
//! let extension = classify("archive.tar.gz")?;
//! if store.check(&extension).await? {
//!     store.load_fixed().await?;
//!     store.load_custom().await?;
//!     println!("{} of {} rules block uploads", store.blocked_count(), store.total_count());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod authority;
pub mod config;
pub mod error;
pub mod extension;
pub mod model;
pub mod store;

// Re-exports for convenience
pub use authority::{HttpAuthority, RemoteAuthority};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use extension::{classify, normalize, validate_rule, ValidationError};
pub use model::{BlocklistState, CustomExtensionRule, ExtensionType, FixedExtensionRule, RuleId};
pub use store::BlocklistStore;
