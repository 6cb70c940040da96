// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outline node model and classification.
//!
//! Nodes live in an [`Outline`](crate::outline::Outline) arena and refer to
//! each other by [`NodeId`]. Kind names follow `ginkgo outline`: a bare kind
//! (`Describe`), a focused variant (`FDescribe`), a pending variant
//! (`PDescribe`), and an excluded variant (`XDescribe`).

use serde::Serialize;

/// Kind name of a narrative step (`By("...")`).
pub const STEP_KIND: &str = "By";

/// Prefix marking a kind as always excluded from runs.
pub const EXCLUDED_PREFIX: &str = "X";

/// Container kinds, including focused/pending/excluded variants.
pub const CONTAINER_KINDS: &[&str] = &[
    "Context", "FContext", "PContext", "XContext", "Describe", "FDescribe", "PDescribe",
    "XDescribe", "When", "FWhen", "PWhen", "XWhen",
];

/// Setup and teardown hook kinds.
pub const HOOK_KINDS: &[&str] = &[
    "BeforeEach",
    "AfterEach",
    "JustBeforeEach",
    "JustAfterEach",
    "BeforeSuite",
    "AfterSuite",
];

/// Index of a node inside its outline.
///
/// Ids are assigned in pre-order, so `NodeId(0)` is the first root and the
/// outline's flat list is indexed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in pre-order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One construct of a Ginkgo test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Construct kind (`Describe`, `It`, `BeforeEach`, `By`, ...).
    pub name: String,
    /// User-supplied label.
    pub text: String,
    /// Byte offset of the construct start.
    pub start: usize,
    /// Byte offset of the construct end.
    pub end: usize,
    /// Whether the node is a runnable spec.
    pub spec: bool,
    /// Whether the node is explicitly pending.
    pub pending: bool,
    /// Whether the node is focused, explicitly or by inference.
    pub focused: bool,
    /// Whether `ginkgo outline` reported the node as focused.
    pub explicitly_focused: bool,
    /// Identity key used to correlate run results.
    pub key: String,
    /// Owning node, `None` for roots.
    #[serde(skip)]
    pub parent: Option<NodeId>,
    /// Children in source order.
    #[serde(skip)]
    pub children: Vec<NodeId>,
}

/// True for the top-level, non-hook container that has children.
pub fn is_root_node(node: &Node) -> bool {
    node.parent.is_none() && !node.children.is_empty() && !is_wrench_node(node)
}

/// True when the node can be run on its own.
pub fn is_runnable_test(node: &Node) -> bool {
    node.name != STEP_KIND && !node.pending && !is_wrench_node(node)
}

/// True for grouping constructs (`Describe`, `Context`, `When` and variants).
pub fn is_suite_container(node: &Node) -> bool {
    CONTAINER_KINDS.contains(&node.name.as_str())
}

/// True for setup/teardown hooks, which are never run on their own.
pub fn is_wrench_node(node: &Node) -> bool {
    HOOK_KINDS.contains(&node.name.as_str())
}

/// True when the node's kind carries the excluded prefix.
pub fn is_excluded_kind(node: &Node) -> bool {
    node.name.starts_with(EXCLUDED_PREFIX)
}

/// Display label for a node.
///
/// Spec kinds are shown as `"It <text>"`; other kinds get an empty prefix.
/// A node without text shows its kind name.
pub fn label(node: &Node) -> String {
    if node.text.is_empty() {
        return node.name.clone();
    }
    let prefix = match node.name.as_str() {
        "It" | "FIt" | "PIt" | "XIt" => "It",
        "Specify" | "FSpecify" | "PSpecify" | "XSpecify" => "Specify",
        "Measure" | "FMeasure" | "PMeasure" | "XMeasure" => "Measure",
        _ => "",
    };
    format!("{prefix} {}", node.text)
}

/// Visual class of a node in a tree display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIcon {
    /// Pending spec.
    Pending,
    /// Focused spec.
    Focused,
    /// Benchmark spec (`Measure`).
    Measure,
    /// Any other spec.
    Spec,
    /// Setup or teardown hook.
    Hook,
    /// Table container (`DescribeTable`).
    Table,
    /// Grouping container.
    Container,
    /// Narrative step.
    Step,
}

impl NodeIcon {
    /// Single-character marker for plain-text trees.
    pub fn glyph(self) -> char {
        match self {
            NodeIcon::Pending => '-',
            NodeIcon::Focused => '*',
            NodeIcon::Measure => '~',
            NodeIcon::Spec => '>',
            NodeIcon::Hook => '#',
            NodeIcon::Table => '=',
            NodeIcon::Container => '+',
            NodeIcon::Step => '.',
        }
    }
}

/// Classify a node for display. Unknown non-spec kinds have no icon.
pub fn icon(node: &Node) -> Option<NodeIcon> {
    if node.spec {
        return Some(if node.pending {
            NodeIcon::Pending
        } else if node.explicitly_focused {
            NodeIcon::Focused
        } else if node.name == "Measure" {
            NodeIcon::Measure
        } else {
            NodeIcon::Spec
        });
    }
    match node.name.as_str() {
        _ if is_wrench_node(node) => Some(NodeIcon::Hook),
        "DescribeTable" | "FDescribeTable" | "PDescribeTable" => Some(NodeIcon::Table),
        _ if is_suite_container(node) => Some(NodeIcon::Container),
        STEP_KIND => Some(NodeIcon::Step),
        _ => None,
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
