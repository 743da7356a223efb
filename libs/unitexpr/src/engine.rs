//! Cached front door: source text -> tree -> value
//!
//! Unit registries parse the same handful of expressions over and over, so
//! the engine keeps recently built trees in an LRU cache keyed by source text.
//! Trees are immutable and shared as `Arc<ExprNode>`.

use crate::ast::ExprNode;
use crate::error::{Error, Result};
use crate::options::SyntaxOptions;
use crate::parser::parse_with;
use crate::token::Token;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

pub struct Engine {
    options: SyntaxOptions,
    cache: Mutex<LruCache<String, Arc<ExprNode>>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SyntaxOptions::default())
    }
}

impl Engine {
    pub fn new(options: SyntaxOptions) -> Self {
        Self::with_capacity(options, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(options: SyntaxOptions, capacity: NonZeroUsize) -> Self {
        Self {
            options,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    // A panic while holding the lock cannot leave the cache half-updated,
    // so a poisoned lock is still usable.
    fn cache(&self) -> MutexGuard<'_, LruCache<String, Arc<ExprNode>>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Parse `source`, reusing a cached tree when one exists.
    ///
    /// Failures are returned to the caller and never cached.
    pub fn parse(&self, source: &str) -> Result<Arc<ExprNode>> {
        if let Some(tree) = self.cache().get(source) {
            tracing::trace!(source, "expression cache hit");
            return Ok(Arc::clone(tree));
        }

        tracing::trace!(source, "expression cache miss");
        let tree = match parse_with(source, &self.options) {
            Ok(tree) => Arc::new(tree),
            Err(err) => {
                tracing::debug!(source, error = %err, "failed to parse unit expression");
                return Err(err);
            }
        };

        self.cache().put(source.to_string(), Arc::clone(&tree));
        Ok(tree)
    }

    /// Parse (or fetch) and evaluate `source`.
    ///
    /// The resolver's own error type is kept; syntax errors are converted into
    /// it through `From<Error>`.
    pub fn evaluate<F, E>(&self, source: &str, resolve: F) -> std::result::Result<f64, E>
    where
        F: FnMut(&Token) -> std::result::Result<f64, E>,
        E: From<Error>,
    {
        let tree = self.parse(source)?;
        tree.evaluate(resolve)
    }

    pub fn cache_len(&self) -> usize {
        self.cache().len()
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }
}
