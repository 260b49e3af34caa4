//! Per-invocation run configuration.
//!
//! [`CheckpointConfig`] carries thread identity for the checkpoint layer.
//! [`InvokeConfig`] wraps it with the scheduler-level knobs that are scoped to
//! a single call rather than baked into the compiled graph: a static recursion
//! limit, per-call interrupt gates, the resumption frontier, and an opaque
//! `configurable` bag threaded into node context via [`crate::runtime::Runtime`].

use langgraph_checkpoint::CheckpointConfig;
use serde_json::Value;
use std::collections::HashMap;

/// Default cap on the number of Pregel supersteps a single invocation may run
/// before failing with [`crate::error::GraphError::RecursionLimit`].
pub const DEFAULT_RECURSION_LIMIT: u32 = 25;

/// Per-call configuration accepted by [`CompiledGraph::invoke_with_run_config`](crate::compiled::CompiledGraph::invoke_with_run_config)
/// and the streaming equivalents.
///
/// This is additive to [`CheckpointConfig`]: every existing call site that
/// passes `Option<CheckpointConfig>` to `invoke_with_config` keeps working
/// unchanged, since an `InvokeConfig` is trivially constructed `From` one.
#[derive(Debug, Clone, Default)]
pub struct InvokeConfig {
    /// Thread/checkpoint identity, forwarded to the checkpointer if one is attached.
    pub checkpoint: Option<CheckpointConfig>,
    /// Nodes to interrupt before, for this call only. Merged with the graph's
    /// compile-time `interrupt_before` set.
    pub interrupt_before: Vec<String>,
    /// Nodes to interrupt after, for this call only. Merged with the graph's
    /// compile-time `interrupt_after` set.
    pub interrupt_after: Vec<String>,
    /// When resuming from an interrupt, the node names that make up the next
    /// frontier. Empty means "whatever was pending when the run interrupted".
    pub resume_from: Vec<String>,
    /// Cap on the number of supersteps for this call. Defaults to
    /// [`DEFAULT_RECURSION_LIMIT`] when unset.
    pub recursion_limit: Option<u32>,
    /// Opaque values made available to nodes through `Runtime::get_configurable`.
    pub configurable: HashMap<String, Value>,
}

impl InvokeConfig {
    /// An empty configuration: no checkpoint, default recursion limit, no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach checkpoint thread identity, creating it if necessary.
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        let cfg = self.checkpoint.get_or_insert_with(CheckpointConfig::new);
        cfg.thread_id = Some(thread_id.into());
        self
    }

    /// Attach a full [`CheckpointConfig`].
    pub fn with_checkpoint(mut self, checkpoint: CheckpointConfig) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Set per-call `interrupt_before` nodes.
    pub fn with_interrupt_before<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interrupt_before = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Set per-call `interrupt_after` nodes.
    pub fn with_interrupt_after<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interrupt_after = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the resumption frontier: node names to run on the first superstep
    /// after a resume, overriding whatever was naturally pending.
    pub fn with_resume_from<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resume_from = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Override the default recursion limit for this call.
    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Insert one entry into the `configurable` bag.
    pub fn with_configurable(mut self, key: impl Into<String>, value: Value) -> Self {
        self.configurable.insert(key.into(), value);
        self
    }

    /// The effective recursion limit: the caller's override, or [`DEFAULT_RECURSION_LIMIT`].
    pub fn recursion_limit_or_default(&self) -> u32 {
        self.recursion_limit.unwrap_or(DEFAULT_RECURSION_LIMIT)
    }
}

impl From<CheckpointConfig> for InvokeConfig {
    fn from(checkpoint: CheckpointConfig) -> Self {
        Self {
            checkpoint: Some(checkpoint),
            ..Default::default()
        }
    }
}

impl From<Option<CheckpointConfig>> for InvokeConfig {
    fn from(checkpoint: Option<CheckpointConfig>) -> Self {
        Self {
            checkpoint,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_recursion_limit_is_25() {
        let cfg = InvokeConfig::new();
        assert_eq!(cfg.recursion_limit_or_default(), DEFAULT_RECURSION_LIMIT);
        assert_eq!(DEFAULT_RECURSION_LIMIT, 25);
    }

    #[test]
    fn explicit_recursion_limit_overrides_default() {
        let cfg = InvokeConfig::new().with_recursion_limit(4);
        assert_eq!(cfg.recursion_limit_or_default(), 4);
    }

    #[test]
    fn from_checkpoint_config_carries_thread_id() {
        let checkpoint = CheckpointConfig::new().with_thread_id("t-1".to_string());
        let cfg: InvokeConfig = checkpoint.into();
        assert_eq!(cfg.checkpoint.unwrap().thread_id.as_deref(), Some("t-1"));
    }

    #[test]
    fn builder_collects_overrides() {
        let cfg = InvokeConfig::new()
            .with_thread_id("t-2")
            .with_interrupt_before(["approve"])
            .with_interrupt_after(["finalize"])
            .with_resume_from(["approve"])
            .with_recursion_limit(10)
            .with_configurable("user", Value::String("alice".into()));

        assert_eq!(cfg.interrupt_before, vec!["approve".to_string()]);
        assert_eq!(cfg.interrupt_after, vec!["finalize".to_string()]);
        assert_eq!(cfg.resume_from, vec!["approve".to_string()]);
        assert_eq!(cfg.recursion_limit, Some(10));
        assert_eq!(cfg.configurable.get("user"), Some(&Value::String("alice".into())));
    }
}
