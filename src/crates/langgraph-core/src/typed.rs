//! Struct dialect for graphs whose state is a concrete Rust type.
//!
//! The map dialect ([`crate::state::StateSchema`]) merges a JSON object field
//! by field, one reducer per key. The struct dialect instead merges the whole
//! state at once with a single user-supplied function:
//!
//! ```text
//! merge_fn(current: S, incoming: S) -> Result<S>
//! ```
//!
//! [`TypedStateGraph`] wraps the JSON-based [`StateGraph`](crate::builder::StateGraph)
//! builder so typed graphs still run on the same Pregel engine: nodes receive
//! and return `S`, and the graph serializes to/from `serde_json::Value` at the
//! boundary. `S` therefore must round-trip through serde.
//!
//! # Example
//!
//! ```rust
//! use langgraph_core::typed::{TypedSchema, TypedStateGraph};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Clone, Debug, Default, Serialize, Deserialize)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = TypedSchema::new(Counter::default(), |_current, incoming| Ok(incoming));
//!
//! let mut graph = TypedStateGraph::new(schema);
//! graph.add_node("increment", |mut state: Counter| {
//!     Box::pin(async move {
//!         state.count += 1;
//!         Ok(state)
//!     })
//! });
//! graph.set_entry("increment");
//! graph.add_finish("increment");
//!
//! let compiled = graph.compile()?;
//! let result = compiled.invoke(Counter::default()).await?;
//! assert_eq!(result.count, 1);
//! # Ok(())
//! # }
//! ```

use crate::builder::StateGraph;
use crate::compiled::CompiledGraph;
use crate::error::{GraphError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

/// A node function over a typed state `S`.
pub type TypedNodeFn<S> =
    Arc<dyn Fn(S) -> Pin<Box<dyn Future<Output = Result<S>> + Send>> + Send + Sync>;

/// A conditional selector over a typed state `S`, returning the next node name or [`crate::graph::END`].
pub type TypedSelectorFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Struct-dialect schema: a zero value plus a whole-state merge function.
///
/// `merge_fn` is applied once per node output per step, exactly as
/// [`StateSchema::apply`](crate::state::StateSchema::apply) applies one
/// reducer per key in the map dialect — just scoped to the entire struct
/// instead of a single field.
#[derive(Clone)]
pub struct TypedSchema<S> {
    zero: S,
    merge_fn: Arc<dyn Fn(S, S) -> std::result::Result<S, String> + Send + Sync>,
}

impl<S: Clone + Send + Sync + 'static> TypedSchema<S> {
    /// Create a struct-dialect schema from a zero value and a merge function.
    pub fn new<F>(zero: S, merge_fn: F) -> Self
    where
        F: Fn(S, S) -> std::result::Result<S, String> + Send + Sync + 'static,
    {
        Self {
            zero,
            merge_fn: Arc::new(merge_fn),
        }
    }

    /// The schema's zero value, used to seed state before the first step.
    pub fn zero(&self) -> S {
        self.zero.clone()
    }

    /// Merge an incoming node output into the current state.
    pub fn merge(&self, current: S, incoming: S) -> Result<S> {
        (self.merge_fn)(current, incoming).map_err(|message| GraphError::ReducerFail {
            key: "<struct>".to_string(),
            message,
        })
    }
}

impl<S: Clone + Default + Send + Sync + 'static> TypedSchema<S> {
    /// Convenience schema where every node output fully replaces the current state.
    pub fn overwrite() -> Self {
        Self::new(S::default(), |_current, incoming| Ok(incoming))
    }
}

/// Typed graph builder for the struct dialect.
///
/// Thin wrapper around [`StateGraph`] that serializes `S` to and from JSON at
/// each node boundary and routes all merges through the schema's `merge_fn`
/// (implemented as a single `BinaryOp` channel over the whole state, named
/// `"state"`) rather than per-field map-dialect reducers.
pub struct TypedStateGraph<S> {
    inner: StateGraph,
    schema: TypedSchema<S>,
    _marker: PhantomData<S>,
}

impl<S> TypedStateGraph<S>
where
    S: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a new typed graph builder from a struct-dialect schema.
    pub fn new(schema: TypedSchema<S>) -> Self {
        let merge_fn = schema.merge_fn.clone();
        let mut inner = StateGraph::new();
        inner.add_channel(
            "state",
            crate::graph::ChannelType::BinaryOp,
            Some(Arc::new(move |current: serde_json::Value, incoming: serde_json::Value| {
                let current: S = serde_json::from_value(current)
                    .expect("typed state channel received a value that does not match S");
                let incoming: S = serde_json::from_value(incoming)
                    .expect("typed state channel received a value that does not match S");
                let merged = (merge_fn)(current, incoming)
                    .expect("struct dialect merge_fn failed; typed nodes must not fail reconcilable merges");
                serde_json::to_value(merged).expect("S must serialize to JSON")
            })),
        );
        Self {
            inner,
            schema,
            _marker: PhantomData,
        }
    }

    /// Register a typed node. The node receives the current state (deserialized
    /// from the shared `"state"` channel) and returns the next state.
    pub fn add_node<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(S) -> Pin<Box<dyn Future<Output = Result<S>> + Send>> + Send + Sync + 'static,
    {
        let name = name.into();
        let f: TypedNodeFn<S> = Arc::new(f);
        self.inner.add_node(name, move |value: serde_json::Value| {
            let f = f.clone();
            Box::pin(async move {
                let state: S = serde_json::from_value(value).map_err(|e| {
                    crate::error::GraphError::State(format!(
                        "node input did not match typed state: {e}"
                    ))
                })?;
                let next = f(state).await?;
                serde_json::to_value(next).map_err(|e| {
                    crate::error::GraphError::State(format!(
                        "node output did not serialize to typed state: {e}"
                    ))
                })
            })
        });
        self
    }

    /// Set the entry point node.
    pub fn set_entry(&mut self, node: impl Into<String>) -> &mut Self {
        self.inner.set_entry(node);
        self
    }

    /// Add an unconditional edge.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.inner.add_edge(from, to);
        self
    }

    /// Connect a node to `END`.
    pub fn add_finish(&mut self, node: impl Into<String>) -> &mut Self {
        self.inner.add_finish(node);
        self
    }

    /// Add a conditional edge using a typed selector.
    pub fn add_conditional_edge<F>(
        &mut self,
        from: impl Into<String>,
        selector: F,
        branches: std::collections::HashMap<String, String>,
    ) -> &mut Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
    {
        self.inner.add_conditional_edge(
            from,
            move |value: &serde_json::Value| {
                let state: S = serde_json::from_value(value.clone())
                    .expect("selector input did not match typed state");
                crate::send::ConditionalEdgeResult::Single(selector(&state))
            },
            branches,
        );
        self
    }

    /// Compile into a [`TypedCompiledGraph`].
    pub fn compile(self) -> Result<TypedCompiledGraph<S>> {
        let compiled = self.inner.compile()?;
        Ok(TypedCompiledGraph {
            inner: compiled,
            schema: self.schema,
            _marker: PhantomData,
        })
    }
}

/// Compiled struct-dialect graph. Mirrors [`CompiledGraph`]'s surface with typed
/// `S` in and out instead of `serde_json::Value`.
pub struct TypedCompiledGraph<S> {
    inner: CompiledGraph,
    #[allow(dead_code)]
    schema: TypedSchema<S>,
    _marker: PhantomData<S>,
}

impl<S> TypedCompiledGraph<S>
where
    S: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Run to completion, returning the final typed state.
    pub async fn invoke(&self, input: S) -> Result<S> {
        let value = serde_json::to_value(input)
            .map_err(|e| GraphError::State(format!("initial state did not serialize: {e}")))?;
        let result = self.inner.invoke(value).await?;
        serde_json::from_value(result)
            .map_err(|e| GraphError::State(format!("final state did not match S: {e}")))
    }

    /// Run with an explicit checkpoint configuration (for `thread_id`-scoped resumption).
    pub async fn invoke_with_config(
        &self,
        input: S,
        config: Option<langgraph_checkpoint::CheckpointConfig>,
    ) -> Result<S> {
        let value = serde_json::to_value(input)
            .map_err(|e| GraphError::State(format!("initial state did not serialize: {e}")))?;
        let result = self.inner.invoke_with_config(value, config).await?;
        serde_json::from_value(result)
            .map_err(|e| GraphError::State(format!("final state did not match S: {e}")))
    }

    /// Access the underlying JSON-based compiled graph, e.g. to attach a
    /// checkpointer or call `get_state`/`get_history` directly.
    pub fn inner(&self) -> &CompiledGraph {
        &self.inner
    }
}
