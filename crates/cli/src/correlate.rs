// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Correlates asynchronous run results with outline nodes.
//!
//! The [`Correlator`] owns the running/result state of every node in the
//! most recently discovered outline. Results are matched to nodes by
//! identity key; nodes left running after a result batch are cleared so an
//! aborted run never leaves them spinning.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;

use crate::node::{Node, NodeId, is_root_node, is_wrench_node};
use crate::outline::Outline;
use crate::report::TestRunResult;

/// Messages flowing from outlining and test runs to the correlator.
#[derive(Debug, Clone)]
pub enum Event {
    /// A fresh outline was parsed.
    Discovered(Arc<Outline>),
    /// A node of the current outline started running.
    RunStarted(NodeId),
    /// A batch of results arrived.
    Results(Vec<TestRunResult>),
}

/// Change notifications for observers of node state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChange {
    /// The whole outline was replaced.
    Refreshed,
    /// One node's state changed.
    Node(NodeId),
}

/// Run state of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeState {
    pub running: bool,
    pub result: Option<TestRunResult>,
}

/// What one result batch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorrelationSummary {
    /// Results attached to a running node.
    pub attached: usize,
    /// Results with no running node for their name.
    pub dropped: usize,
    /// Running nodes cleared without a result.
    pub cleared: usize,
}

/// Key-indexed run state for the current outline.
#[derive(Debug, Default)]
pub struct Correlator {
    outline: Arc<Outline>,
    keys: HashMap<String, NodeId>,
    states: Vec<NodeState>,
    root: Option<NodeId>,
    changes: Option<Sender<NodeChange>>,
}

impl Correlator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a [`NodeChange`] for every state mutation.
    pub fn with_changes(mut self, changes: Sender<NodeChange>) -> Self {
        self.changes = Some(changes);
        self
    }

    /// Replace the outline and rebuild the key table.
    ///
    /// All previous state is discarded. When keys collide the last node in
    /// pre-order owns the key.
    pub fn on_discovered(&mut self, outline: Arc<Outline>) {
        self.keys = outline
            .flat()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.key.clone(), NodeId(i)))
            .collect();
        self.states = vec![NodeState::default(); outline.len()];
        self.root = outline
            .flat()
            .iter()
            .position(is_root_node)
            .map(NodeId);
        tracing::debug!("discovered {} nodes", outline.len());
        self.outline = outline;
        self.notify(NodeChange::Refreshed);
    }

    /// Mark a single node running.
    pub fn on_run_started(&mut self, id: NodeId) {
        let Some(state) = self.states.get_mut(id.0) else {
            tracing::debug!("run started for unknown node {}", id.0);
            return;
        };
        state.running = true;
        self.notify(NodeChange::Node(id));
    }

    /// Mark every node sharing `id`'s key running, cascading into non-hook
    /// descendants.
    pub fn prepare_to_run(&mut self, id: NodeId) {
        let mut visited = HashSet::new();
        self.prepare(id, &mut visited);
    }

    /// [`Correlator::prepare_to_run`] by identity key. Returns false when no
    /// node carries the key.
    pub fn prepare_to_run_key(&mut self, key: &str) -> bool {
        match self.outline.find_by_key(key) {
            Some(id) => {
                self.prepare_to_run(id);
                true
            }
            None => false,
        }
    }

    fn prepare(&mut self, id: NodeId, visited: &mut HashSet<NodeId>) {
        let Some(key) = self.outline.get(id).map(|n| n.key.clone()) else {
            return;
        };
        let outline = Arc::clone(&self.outline);
        let matches: Vec<NodeId> = outline
            .ids()
            .filter(|&i| outline.get(i).is_some_and(|n| n.key == key))
            .collect();

        for target in matches {
            let Some(node) = outline.get(target) else {
                continue;
            };
            // A hook shares its container's key; only run it when requested.
            if target != id && is_wrench_node(node) {
                continue;
            }
            if !visited.insert(target) {
                continue;
            }
            self.on_run_started(target);
            if is_wrench_node(node) {
                continue;
            }
            for (child, child_node) in outline.children(target) {
                if !is_wrench_node(child_node) {
                    self.prepare(child, visited);
                }
            }
        }
    }

    /// Attach a batch of results, then clear every node still running that
    /// did not receive one.
    pub fn on_results(&mut self, results: Vec<TestRunResult>) -> CorrelationSummary {
        let mut summary = CorrelationSummary::default();
        let mut resolved: HashSet<NodeId> = HashSet::new();

        for result in results {
            let Some(&id) = self.keys.get(&result.test_name) else {
                tracing::debug!("dropping result for unknown test {:?}", result.test_name);
                summary.dropped += 1;
                continue;
            };
            let Some(state) = self.states.get_mut(id.0) else {
                summary.dropped += 1;
                continue;
            };
            if !state.running {
                tracing::debug!("dropping result for idle test {:?}", result.test_name);
                summary.dropped += 1;
                continue;
            }
            state.running = false;
            resolved.insert(id);
            state.result = Some(result);
            summary.attached += 1;
            self.notify(NodeChange::Node(id));
        }

        for id in self.outline.ids() {
            if resolved.contains(&id) {
                continue;
            }
            if let Some(state) = self.states.get_mut(id.0)
                && state.running
            {
                state.running = false;
                summary.cleared += 1;
                self.notify(NodeChange::Node(id));
            }
        }

        summary
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Discovered(outline) => self.on_discovered(outline),
            Event::RunStarted(id) => self.on_run_started(id),
            Event::Results(results) => {
                let summary = self.on_results(results);
                tracing::debug!(
                    "correlated results: {} attached, {} dropped, {} cleared",
                    summary.attached,
                    summary.dropped,
                    summary.cleared
                );
            }
        }
    }

    /// Apply every pending event without blocking. Returns the count handled.
    pub fn drain(&mut self, events: &Receiver<Event>) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// The current outline.
    pub fn outline(&self) -> &Arc<Outline> {
        &self.outline
    }

    /// First top-level container of the outline, the suite-wide run target.
    pub fn root_node(&self) -> Option<(NodeId, &Node)> {
        let id = self.root?;
        self.outline.get(id).map(|n| (id, n))
    }

    /// Node owning `key` in the lookup table.
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    pub fn state(&self, id: NodeId) -> Option<&NodeState> {
        self.states.get(id.0)
    }

    pub fn is_running(&self, id: NodeId) -> bool {
        self.state(id).is_some_and(|s| s.running)
    }

    /// Result attached to a node, for showing its output.
    pub fn result(&self, id: NodeId) -> Option<&TestRunResult> {
        self.state(id)?.result.as_ref()
    }

    /// Ids of every running node.
    pub fn running(&self) -> Vec<NodeId> {
        self.outline.ids().filter(|&id| self.is_running(id)).collect()
    }

    fn notify(&self, change: NodeChange) {
        if let Some(changes) = &self.changes
            && changes.send(change).is_err()
        {
            tracing::debug!("change receiver dropped");
        }
    }
}

#[cfg(test)]
#[path = "correlate_tests.rs"]
mod tests;
