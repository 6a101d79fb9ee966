//! Timed tree traversal, independent of the step-log engine.
//!
//! Each node is shown as active for one [`TRAVERSAL_DELAY`] and then joins
//! the visited list, so a traversal of `n` nodes takes `n + 1` ticks.

use std::time::Duration;

use algoviz_algorithms::tree::{BinaryTree, TraversalOrder};
use algoviz_core::NodeId;

use crate::error::{Result, VisError};
use crate::store::VisualState;

pub const TRAVERSAL_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalTick {
    /// This node is now active
    Active(NodeId),
    /// The last node was marked visited; the traversal is over
    Done,
    /// No traversal in progress
    Inactive,
}

#[derive(Debug, Default)]
pub struct TraversalPlayback {
    order: Vec<(NodeId, i64)>,
    next: usize,
    running: bool,
}

impl TraversalPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(
        &mut self,
        tree: &BinaryTree,
        order: TraversalOrder,
        store: &mut VisualState,
    ) -> Result<()> {
        if self.running {
            return Err(VisError::AlreadyRunning);
        }
        if tree.is_empty() {
            return Err(VisError::EmptyTree);
        }
        self.order = tree
            .traverse(order)
            .into_iter()
            .zip(tree.traverse_values(order))
            .collect();
        self.next = 0;
        self.running = true;
        store.traversal.clear();
        store.is_playing = true;
        Ok(())
    }

    pub fn tick(&mut self, store: &mut VisualState) -> TraversalTick {
        if !self.running {
            return TraversalTick::Inactive;
        }
        if let Some(prev) = store.traversal.active.take() {
            store.traversal.visited.push(prev);
        }
        match self.order.get(self.next) {
            Some(&(id, value)) => {
                self.next += 1;
                store.traversal.active = Some(id);
                if !store.traversal.result.is_empty() {
                    store.traversal.result.push_str(" -> ");
                }
                store.traversal.result.push_str(&value.to_string());
                TraversalTick::Active(id)
            }
            None => {
                self.finish(store);
                TraversalTick::Done
            }
        }
    }

    /// Abandon the traversal; progress shown so far stays.
    pub fn stop(&mut self, store: &mut VisualState) -> bool {
        if !self.running {
            return false;
        }
        store.traversal.active = None;
        self.finish(store);
        true
    }

    fn finish(&mut self, store: &mut VisualState) {
        self.running = false;
        self.order.clear();
        self.next = 0;
        store.is_playing = false;
    }
}
