//! The set of node types a workflow step may use.
//!
//! A [`NodeTypeRegistry`] is loaded once from a [`NodeTypeSource`]. When the source
//! cannot be reached, the registry applies its [`FallbackPolicy`] so that validation
//! stays deterministic for any given registry state:
//!
//! - [`FallbackPolicy::Builtin`] keeps the compiled-in types available.
//! - [`FallbackPolicy::Empty`] rejects every type until a later refresh succeeds.
//!
//! Construction and editing never talk to the registry directly. They take any
//! [`TypeValidator`], which lets tests substitute a fixed set of types.

pub mod builtin;
pub mod descriptor;
pub mod source;

pub use builtin::*;
pub use descriptor::*;
pub use source::*;

use crate::error::RegistryError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Decides whether a step or node type is acceptable.
pub trait TypeValidator {
    fn is_valid_type(&self, candidate: &str) -> bool;
}

/// What a registry holds when its source fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    Empty,
    #[default]
    Builtin,
}

/// Read-only view of a registry, as exposed to pickers and status displays.
#[derive(Debug, Clone, Copy)]
pub struct RegistryState<'a> {
    pub types: &'a [NodeTypeDescriptor],
    pub is_loading: bool,
    pub last_error: Option<&'a RegistryError>,
}

#[derive(Debug, Clone)]
pub struct NodeTypeRegistry {
    types: Vec<NodeTypeDescriptor>,
    ids: AHashSet<String>,
    fallback: FallbackPolicy,
    is_loading: bool,
    last_error: Option<RegistryError>,
}

impl NodeTypeRegistry {
    pub fn new(types: Vec<NodeTypeDescriptor>) -> Self {
        let mut registry = Self {
            types: Vec::new(),
            ids: AHashSet::new(),
            fallback: FallbackPolicy::default(),
            is_loading: false,
            last_error: None,
        };
        registry.replace_types(types);
        registry
    }

    /// A registry holding the compiled-in node types.
    pub fn builtin() -> Self {
        Self::new(builtin_types())
    }

    /// A registry that rejects every type.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Loads a registry from `source`, degrading per `fallback` if the source fails.
    pub async fn load(source: &dyn NodeTypeSource, fallback: FallbackPolicy) -> Self {
        let mut registry = Self::empty().with_fallback(fallback);
        registry.refresh(source).await;
        registry
    }

    /// Re-fetches the node types from `source`.
    ///
    /// On failure the error is kept as `last_error` and the fallback set replaces
    /// the current types.
    pub async fn refresh(&mut self, source: &dyn NodeTypeSource) {
        self.begin_refresh();
        let result = source.fetch().await;
        self.finish_refresh(source.name(), result);
    }

    /// Marks a fetch as in flight. Callers that drive the fetch themselves pair this
    /// with [`finish_refresh`](Self::finish_refresh), so `is_loading` can be observed
    /// while the request is pending.
    pub fn begin_refresh(&mut self) {
        self.is_loading = true;
    }

    /// Applies the outcome of a fetch started with [`begin_refresh`](Self::begin_refresh).
    pub fn finish_refresh(
        &mut self,
        source_name: &str,
        result: Result<Vec<NodeTypeDescriptor>, RegistryError>,
    ) {
        self.is_loading = false;

        match result {
            Ok(types) => {
                tracing::debug!(source = source_name, count = types.len(), "loaded node types");
                self.replace_types(types);
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(
                    source = source_name,
                    fallback = ?self.fallback,
                    "node type source failed: {}",
                    err
                );
                let fallback = match self.fallback {
                    FallbackPolicy::Empty => Vec::new(),
                    FallbackPolicy::Builtin => builtin_types(),
                };
                self.replace_types(fallback);
                self.last_error = Some(err);
            }
        }
    }

    fn replace_types(&mut self, types: Vec<NodeTypeDescriptor>) {
        // First registration of an id wins; later duplicates are dropped.
        let mut ids = AHashSet::with_capacity(types.len());
        let types = types
            .into_iter()
            .filter(|t| ids.insert(t.id.clone()))
            .collect();
        self.types = types;
        self.ids = ids;
    }

    pub fn types(&self) -> &[NodeTypeDescriptor] {
        &self.types
    }

    pub fn get(&self, id: &str) -> Option<&NodeTypeDescriptor> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.id.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&RegistryError> {
        self.last_error.as_ref()
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn state(&self) -> RegistryState<'_> {
        RegistryState {
            types: &self.types,
            is_loading: self.is_loading,
            last_error: self.last_error.as_ref(),
        }
    }

    pub fn is_valid_type(&self, candidate: &str) -> bool {
        self.ids.contains(candidate)
    }
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeValidator for NodeTypeRegistry {
    fn is_valid_type(&self, candidate: &str) -> bool {
        NodeTypeRegistry::is_valid_type(self, candidate)
    }
}

impl<T: TypeValidator + ?Sized> TypeValidator for &T {
    fn is_valid_type(&self, candidate: &str) -> bool {
        (**self).is_valid_type(candidate)
    }
}

/// A fixed list of type ids, handy for tests and for callers without descriptors.
impl TypeValidator for [&str] {
    fn is_valid_type(&self, candidate: &str) -> bool {
        self.iter().any(|t| *t == candidate)
    }
}

impl<const N: usize> TypeValidator for [&str; N] {
    fn is_valid_type(&self, candidate: &str) -> bool {
        self.iter().any(|t| *t == candidate)
    }
}
