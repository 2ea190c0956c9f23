//! Blocklist store
//!
//! Holds the locally cached fixed and custom rules and keeps them in step
//! with the remote authority. The cache is a disposable view: every
//! successful write is followed by a full reload of the affected list, and a
//! failed call leaves the cache exactly as it was.

use crate::authority::RemoteAuthority;
use crate::error::{Error, Result};
use crate::extension::normalize;
use crate::model::{BlocklistState, CustomExtensionRule, ExtensionType, FixedExtensionRule, RuleId};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache shared between a store and anyone observing it
pub type SharedState = Arc<RwLock<BlocklistState>>;

/// Which list a request is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Fixed,
    Custom,
}

/// Raises a loading flag for as long as it lives
struct LoadingGuard {
    state: SharedState,
    scope: Scope,
}

impl LoadingGuard {
    fn acquire(state: &SharedState, scope: Scope) -> Self {
        set_loading(&mut state.write(), scope, true);
        Self {
            state: Arc::clone(state),
            scope,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        set_loading(&mut self.state.write(), self.scope, false);
    }
}

fn set_loading(state: &mut BlocklistState, scope: Scope, loading: bool) {
    match scope {
        Scope::Fixed => state.is_loading_fixed = loading,
        Scope::Custom => state.is_loading_custom = loading,
    }
}

fn report<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => debug!(operation, "Blocklist operation succeeded"),
        Err(e) => warn!(operation, kind = ?e.kind(), error = %e, "Blocklist operation failed"),
    }
    result
}

/// Local cache of blocklist rules synchronized with a [`RemoteAuthority`]
///
/// Concurrent calls are not coordinated; callers that care gate on
/// [`is_loading_fixed`](Self::is_loading_fixed) and
/// [`is_loading_custom`](Self::is_loading_custom).
pub struct BlocklistStore<A> {
    authority: A,
    state: SharedState,
}

impl<A: RemoteAuthority> BlocklistStore<A> {
    /// Create a store with an empty cache
    pub fn new(authority: A) -> Self {
        Self::with_state(authority, SharedState::default())
    }

    /// Create a store over an existing cache handle
    pub fn with_state(authority: A, state: SharedState) -> Self {
        Self { authority, state }
    }

    /// The authority this store talks to
    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Handle to the cache, for observers
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    /// Copy of the whole cache
    pub fn snapshot(&self) -> BlocklistState {
        self.state.read().clone()
    }

    /// Drop everything cached and return to the empty state
    pub fn reset_cache(&self) {
        *self.state.write() = BlocklistState::default();
    }

    // ---- Queries (cache only) ----

    /// Cached fixed rules
    pub fn fixed_extensions(&self) -> Vec<FixedExtensionRule> {
        self.state.read().fixed_extensions.clone()
    }

    /// Cached custom rules
    pub fn custom_extensions(&self) -> Vec<CustomExtensionRule> {
        self.state.read().custom_extensions.clone()
    }

    /// Fixed rules currently blocking
    pub fn blocked_fixed(&self) -> Vec<FixedExtensionRule> {
        self.state
            .read()
            .fixed_extensions
            .iter()
            .filter(|rule| rule.is_blocked)
            .cloned()
            .collect()
    }

    /// Fixed rules currently allowing
    pub fn allowed_fixed(&self) -> Vec<FixedExtensionRule> {
        self.state
            .read()
            .fixed_extensions
            .iter()
            .filter(|rule| !rule.is_blocked)
            .cloned()
            .collect()
    }

    /// Number of cached rules of either kind
    pub fn total_count(&self) -> usize {
        let state = self.state.read();
        state.fixed_extensions.len() + state.custom_extensions.len()
    }

    /// Blocked fixed rules plus every custom rule
    ///
    /// Assumes the authority keeps the fixed and custom namespaces disjoint;
    /// see [`overlapping_extensions`](Self::overlapping_extensions).
    pub fn blocked_count(&self) -> usize {
        let state = self.state.read();
        state.fixed_extensions.iter().filter(|rule| rule.is_blocked).count()
            + state.custom_extensions.len()
    }

    /// Block decision from the cache alone, ignoring case
    pub fn is_blocked_locally(&self, extension: &str) -> bool {
        let extension = normalize(extension);
        let state = self.state.read();

        if state
            .fixed_extensions
            .iter()
            .any(|rule| rule.is_blocked && rule.extension == extension)
        {
            return true;
        }

        state
            .custom_extensions
            .iter()
            .any(|rule| rule.extension == extension)
    }

    /// Extensions cached in both the fixed and the custom list
    ///
    /// Always empty while the authority keeps the namespaces disjoint.
    pub fn overlapping_extensions(&self) -> Vec<String> {
        let state = self.state.read();
        let custom: HashSet<&str> = state
            .custom_extensions
            .iter()
            .map(|rule| rule.extension.as_str())
            .collect();

        let mut overlap: Vec<String> = state
            .fixed_extensions
            .iter()
            .filter(|rule| custom.contains(rule.extension.as_str()))
            .map(|rule| rule.extension.clone())
            .collect();
        overlap.sort();
        overlap.dedup();
        overlap
    }

    /// A fixed-scoped request is outstanding
    pub fn is_loading_fixed(&self) -> bool {
        self.state.read().is_loading_fixed
    }

    /// A custom-scoped request is outstanding
    pub fn is_loading_custom(&self) -> bool {
        self.state.read().is_loading_custom
    }

    // ---- Fixed rules ----

    /// Replace the cached fixed rules with the authority's
    pub async fn load_fixed(&self) -> Result<Vec<FixedExtensionRule>> {
        let _loading = LoadingGuard::acquire(&self.state, Scope::Fixed);
        report("load_fixed", self.reload_fixed().await)
    }

    /// Set a fixed rule's block state
    pub async fn toggle_fixed(&self, extension: &str, is_blocked: bool) -> Result<()> {
        let extension = normalize(extension);
        let _loading = LoadingGuard::acquire(&self.state, Scope::Fixed);

        let result = async {
            self.authority.set_fixed_blocked(&extension, is_blocked).await?;
            info!(%extension, is_blocked, "Fixed extension toggled");
            self.reload_fixed().await.map(|_| ())
        }
        .await;

        report("toggle_fixed", result)
    }

    /// Add a fixed rule
    ///
    /// A duplicate comes back as [`Error::Conflict`] carrying the
    /// authority's message.
    pub async fn add_fixed(&self, extension: &str) -> Result<FixedExtensionRule> {
        let extension = normalize(extension);
        let _loading = LoadingGuard::acquire(&self.state, Scope::Fixed);

        let result = async {
            let rule = self.authority.add_fixed(&extension).await?;
            info!(%extension, id = rule.id, "Fixed extension added");
            self.reload_fixed().await?;
            Ok::<_, Error>(rule)
        }
        .await;

        report("add_fixed", result)
    }

    /// Delete a fixed rule by id
    pub async fn delete_fixed(&self, id: RuleId) -> Result<()> {
        let _loading = LoadingGuard::acquire(&self.state, Scope::Fixed);

        let result = async {
            self.authority.delete_fixed(id).await?;
            info!(id, "Fixed extension deleted");
            self.reload_fixed().await.map(|_| ())
        }
        .await;

        report("delete_fixed", result)
    }

    /// Restore the default fixed catalog
    pub async fn reset_fixed(&self) -> Result<()> {
        let _loading = LoadingGuard::acquire(&self.state, Scope::Fixed);

        let result = async {
            self.authority.reset_fixed().await?;
            info!("Fixed extensions reset to defaults");
            self.reload_fixed().await.map(|_| ())
        }
        .await;

        report("reset_fixed", result)
    }

    // ---- Custom rules ----

    /// Replace the cached custom rules with the authority's
    pub async fn load_custom(&self) -> Result<Vec<CustomExtensionRule>> {
        let _loading = LoadingGuard::acquire(&self.state, Scope::Custom);
        report("load_custom", self.reload_custom().await)
    }

    /// Add a custom rule
    ///
    /// A duplicate comes back as [`Error::Conflict`] carrying the
    /// authority's message.
    pub async fn add_custom(&self, extension: &str) -> Result<CustomExtensionRule> {
        let extension = normalize(extension);
        let _loading = LoadingGuard::acquire(&self.state, Scope::Custom);

        let result = async {
            let rule = self.authority.add_custom(&extension).await?;
            info!(%extension, id = rule.id, "Custom extension added");
            self.reload_custom().await?;
            Ok::<_, Error>(rule)
        }
        .await;

        report("add_custom", result)
    }

    /// Delete a custom rule by id
    pub async fn delete_custom(&self, id: RuleId) -> Result<()> {
        let _loading = LoadingGuard::acquire(&self.state, Scope::Custom);

        let result = async {
            self.authority.delete_custom(id).await?;
            info!(id, "Custom extension deleted");
            self.reload_custom().await.map(|_| ())
        }
        .await;

        report("delete_custom", result)
    }

    /// Delete every custom rule
    pub async fn delete_all_custom(&self) -> Result<()> {
        let _loading = LoadingGuard::acquire(&self.state, Scope::Custom);

        let result = async {
            self.authority.delete_all_custom().await?;
            info!("All custom extensions deleted");
            self.reload_custom().await.map(|_| ())
        }
        .await;

        report("delete_all_custom", result)
    }

    // ---- Live queries ----

    /// Ask the authority whether an extension is blocked right now
    ///
    /// Never answered from the cache.
    pub async fn check(&self, extension: &str) -> Result<bool> {
        let extension = normalize(extension);
        let result = self.authority.is_blocked(&extension).await;
        if let Ok(blocked) = &result {
            debug!(%extension, blocked = *blocked, "Checked extension");
        }
        report("check", result)
    }

    /// Ask the authority which rule set holds an extension
    pub async fn classify_type(&self, extension: &str) -> Result<Option<ExtensionType>> {
        let extension = normalize(extension);
        report("classify_type", self.authority.extension_type(&extension).await)
    }

    /// Stop blocking an extension
    ///
    /// Fixed rules are toggled off; custom rules are deleted. Returns the
    /// mechanism used.
    pub async fn unblock(&self, extension: &str, kind: ExtensionType) -> Result<ExtensionType> {
        match kind {
            ExtensionType::Fixed => self.toggle_fixed(extension, false).await?,
            ExtensionType::Custom => self.delete_custom_by_extension(extension).await?,
        }
        Ok(kind)
    }

    async fn delete_custom_by_extension(&self, extension: &str) -> Result<()> {
        let extension = normalize(extension);
        let _loading = LoadingGuard::acquire(&self.state, Scope::Custom);

        let result = async {
            self.authority.delete_custom_by_extension(&extension).await?;
            info!(%extension, "Custom extension removed");
            self.reload_custom().await.map(|_| ())
        }
        .await;

        report("delete_custom_by_extension", result)
    }

    // ---- Reloads ----

    async fn reload_fixed(&self) -> Result<Vec<FixedExtensionRule>> {
        let rules = self.authority.list_fixed().await?;
        self.state.write().fixed_extensions = rules.clone();
        debug!(count = rules.len(), "Fixed extensions reloaded");
        self.warn_on_overlap();
        Ok(rules)
    }

    async fn reload_custom(&self) -> Result<Vec<CustomExtensionRule>> {
        let rules = self.authority.list_custom().await?;
        self.state.write().custom_extensions = rules.clone();
        debug!(count = rules.len(), "Custom extensions reloaded");
        self.warn_on_overlap();
        Ok(rules)
    }

    fn warn_on_overlap(&self) {
        let overlap = self.overlapping_extensions();
        if !overlap.is_empty() {
            warn!(
                extensions = ?overlap,
                "Extensions present in both fixed and custom lists; blocked count double-counts them"
            );
        }
    }
}

impl<A> std::fmt::Debug for BlocklistStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlocklistStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
