//! Name → strategy resolution.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{DummyEvaluator, Evaluator, JuridicalEvaluator};

/// Maps strategy names to instances.
///
/// Resolution never fails: unknown names fall back to the default dummy
/// strategy, so a request with a typo'd or retired evaluator name still
/// produces a result. The map is read on every request and written only by
/// [`register`](Self::register), hence the read/write lock.
///
/// Construct one registry per process (or per test) and pass it by handle;
/// there is no module-level singleton.
pub struct EvaluatorRegistry {
    strategies: RwLock<HashMap<String, Arc<dyn Evaluator>>>,
    fallback: Arc<dyn Evaluator>,
}

impl EvaluatorRegistry {
    /// Creates a registry containing only the default dummy strategy.
    pub fn new() -> Self {
        let fallback: Arc<dyn Evaluator> = Arc::new(DummyEvaluator::new());
        let mut strategies: HashMap<String, Arc<dyn Evaluator>> = HashMap::new();
        strategies.insert(fallback.name().to_string(), Arc::clone(&fallback));

        Self {
            strategies: RwLock::new(strategies),
            fallback,
        }
    }

    /// Creates a registry pre-populated with every built-in strategy that
    /// needs no external configuration.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(JuridicalEvaluator::new()));
        registry
    }

    /// Inserts or replaces the mapping for `strategy.name()`, effective for
    /// subsequent resolutions immediately.
    pub fn register(&self, strategy: Arc<dyn Evaluator>) {
        let name = strategy.name().to_string();
        self.strategies.write().insert(name, strategy);
    }

    /// Returns the named strategy, or the default dummy strategy if the name
    /// is unknown. Never fails.
    pub fn resolve(&self, name: &str) -> Arc<dyn Evaluator> {
        self.strategies
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    /// Names of all registered strategies, sorted.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.strategies.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
