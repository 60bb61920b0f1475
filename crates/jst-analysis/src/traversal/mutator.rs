//! The mutator seam and its stock adapters.

use std::convert::Infallible;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use jst_core::MutationError;

use crate::schema::{NodeId, Schema, SchemaGraph};

/// Mutable view of the node currently handed to a [`Mutator`].
///
/// Dereferences to the node's [`Schema`]. Every field may be changed, but
/// the node's identity cannot be replaced and no nodes can be added.
pub struct NodeMut<'g> {
    graph: &'g mut SchemaGraph,
    id: NodeId,
    depth: usize,
}

impl<'g> NodeMut<'g> {
    pub(crate) fn new(graph: &'g mut SchemaGraph, id: NodeId, depth: usize) -> Self {
        Self { graph, id, depth }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Path depth of this visit; the root is at depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Read access to the whole graph. Descendants are already finalized.
    pub fn graph(&self) -> &SchemaGraph {
        self.graph
    }
}

impl Deref for NodeMut<'_> {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.graph[self.id]
    }
}

impl DerefMut for NodeMut<'_> {
    fn deref_mut(&mut self) -> &mut Schema {
        &mut self.graph[self.id]
    }
}

/// Per-node callback run by the traverser.
///
/// Invoked at most once per logical node, children before parents. An error
/// aborts the traversal and is returned to the caller unchanged.
pub trait Mutator {
    type Error;

    fn on_schema(&mut self, node: NodeMut<'_>) -> Result<(), Self::Error>;
}

impl<M: Mutator + ?Sized> Mutator for &mut M {
    type Error = M::Error;

    fn on_schema(&mut self, node: NodeMut<'_>) -> Result<(), Self::Error> {
        (**self).on_schema(node)
    }
}

/// Mutator backed by a closure. Built with [`from_fn`].
pub struct FnMutator<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> Mutator for FnMutator<F, E>
where
    F: FnMut(NodeMut<'_>) -> Result<(), E>,
{
    type Error = E;

    fn on_schema(&mut self, node: NodeMut<'_>) -> Result<(), E> {
        (self.f)(node)
    }
}

pub fn from_fn<F, E>(f: F) -> FnMutator<F, E>
where
    F: FnMut(NodeMut<'_>) -> Result<(), E>,
{
    FnMutator {
        f,
        _error: PhantomData,
    }
}

/// Mutator that leaves every node untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl Mutator for Noop {
    type Error = Infallible;

    fn on_schema(&mut self, _node: NodeMut<'_>) -> Result<(), Infallible> {
        Ok(())
    }
}

pub fn noop() -> Noop {
    Noop
}

/// Fails every call made after `budget` has elapsed since construction.
pub struct Deadline<M> {
    inner: M,
    budget: Duration,
    started: Instant,
}

impl<M> Deadline<M> {
    pub fn new(inner: M, budget: Duration) -> Self {
        Self {
            inner,
            budget,
            started: Instant::now(),
        }
    }
}

impl<M> Mutator for Deadline<M>
where
    M: Mutator,
    M::Error: From<MutationError>,
{
    type Error = M::Error;

    fn on_schema(&mut self, node: NodeMut<'_>) -> Result<(), Self::Error> {
        if self.started.elapsed() >= self.budget {
            let budget_ms = u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX);
            return Err(MutationError::DeadlineExceeded { budget_ms }.into());
        }
        self.inner.on_schema(node)
    }
}
