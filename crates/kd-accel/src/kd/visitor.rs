//! Visitor pattern for KD-tree traversal.
//!
//! Visitors allow inspecting the tree structure (for statistics, debugging
//! or validation) without coupling the walk to a specific use.

use super::node::KdNode;

/// Visitor for processing nodes during a KD-tree walk.
///
/// Nodes are visited in pre-order: a node first, then its left subtree,
/// then its right subtree. `depth` is 0 for the root.
pub trait KdVisitor<'s, T> {
    fn visit(&mut self, node: &KdNode<'s, T>, depth: usize);
}

/// A simple visitor that collects the triangles stored at every node.
#[derive(Debug)]
pub struct CollectingVisitor<'s, T> {
    collected: Vec<&'s T>,
}

impl<'s, T> CollectingVisitor<'s, T> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self {
            collected: Vec::new(),
        }
    }

    /// Returns the collected triangles.
    pub fn into_triangles(self) -> Vec<&'s T> {
        self.collected
    }

    /// Returns a reference to the collected triangles.
    pub fn triangles(&self) -> &[&'s T] {
        &self.collected
    }
}

impl<T> Default for CollectingVisitor<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, T> KdVisitor<'s, T> for CollectingVisitor<'s, T> {
    fn visit(&mut self, node: &KdNode<'s, T>, _depth: usize) {
        self.collected.extend(node.triangles().iter().copied());
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<'s, T, F> KdVisitor<'s, T> for FnVisitor<F>
where
    F: FnMut(&KdNode<'s, T>, usize),
{
    fn visit(&mut self, node: &KdNode<'s, T>, depth: usize) {
        (self.func)(node, depth);
    }
}

/// Walks a subtree in pre-order, left before right.
pub(crate) fn walk_node<'s, T, V>(node: &KdNode<'s, T>, depth: usize, visitor: &mut V)
where
    V: KdVisitor<'s, T> + ?Sized,
{
    visitor.visit(node, depth);
    if let Some((left, right)) = node.children() {
        walk_node(left, depth + 1, visitor);
        walk_node(right, depth + 1, visitor);
    }
}
