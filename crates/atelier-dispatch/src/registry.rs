//! Per-user environment registry
//!
//! Maps user identity to a live execution environment, creating on first
//! use. Concurrency-safe and passed into the dispatcher as an explicit
//! dependency, never a global.

use crate::environment::{EnvironmentFactory, ExecutionEnvironment};
use dashmap::DashMap;
use std::sync::Arc;

/// Registry of per-user execution environments
pub struct EnvironmentRegistry {
    environments: DashMap<String, Arc<dyn ExecutionEnvironment>>,
    factory: Box<dyn EnvironmentFactory>,
}

impl std::fmt::Debug for EnvironmentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentRegistry")
            .field("environment_count", &self.environments.len())
            .finish_non_exhaustive()
    }
}

impl EnvironmentRegistry {
    /// Create a registry backed by the given factory
    #[must_use]
    pub fn new(factory: impl EnvironmentFactory + 'static) -> Self {
        Self {
            environments: DashMap::new(),
            factory: Box::new(factory),
        }
    }

    /// Get the environment bound to a user, creating it on first use
    #[must_use]
    pub fn environment_for_user(&self, user: &str) -> Arc<dyn ExecutionEnvironment> {
        self.environments
            .entry(user.to_string())
            .or_insert_with(|| {
                tracing::debug!(%user, "creating execution environment");
                self.factory.create(user)
            })
            .clone()
    }

    /// Whether a user already has an environment
    #[inline]
    #[must_use]
    pub fn contains_user(&self, user: &str) -> bool {
        self.environments.contains_key(user)
    }

    /// Number of live environments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Drop a user's environment
    pub fn remove(&self, user: &str) -> Option<Arc<dyn ExecutionEnvironment>> {
        self.environments.remove(user).map(|(_, env)| env)
    }

    /// Drop all environments
    pub fn clear(&self) {
        self.environments.clear();
    }

    /// Cancel every live environment and empty the registry
    ///
    /// Called on server shutdown so running child processes do not
    /// outlive the service.
    pub async fn shutdown_all(&self) {
        let environments: Vec<Arc<dyn ExecutionEnvironment>> = self
            .environments
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        self.environments.clear();
        for environment in environments {
            if let Err(error) = environment.cancel().await {
                tracing::warn!(%error, "environment shutdown failed");
            }
        }
    }
}
