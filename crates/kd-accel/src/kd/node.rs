//! KD-tree node implementation.

use crate::BoundingBox;

/// A node in the KD-tree.
///
/// Each node covers an axis-aligned box and stores the triangles that could
/// not be pushed into exactly one child. A node has either two children or
/// none: the children are kept together as one boxed pair.
///
/// Triangles are borrowed from the caller's scene storage for `'s`; the node
/// owns only its children.
#[derive(Debug)]
pub struct KdNode<'s, T> {
    /// Region of space covered by this subtree.
    bounds: BoundingBox,

    /// Triangles stored at this node: straddlers for interior nodes, the
    /// full remaining set for leaves.
    triangles: Vec<&'s T>,

    /// Left and right subtrees, produced by splitting `bounds`.
    children: Option<Box<[KdNode<'s, T>; 2]>>,
}

impl<'s, T> KdNode<'s, T> {
    /// Creates a leaf node holding `triangles`.
    pub fn leaf(bounds: BoundingBox, triangles: Vec<&'s T>) -> Self {
        Self {
            bounds,
            triangles,
            children: None,
        }
    }

    /// Creates an interior node with two children and its straddling triangles.
    pub fn interior(
        bounds: BoundingBox,
        triangles: Vec<&'s T>,
        left: KdNode<'s, T>,
        right: KdNode<'s, T>,
    ) -> Self {
        Self {
            bounds,
            triangles,
            children: Some(Box::new([left, right])),
        }
    }

    /// Returns the bounding box of this node.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Returns the triangles stored directly at this node.
    #[inline]
    pub fn triangles(&self) -> &[&'s T] {
        &self.triangles
    }

    /// Returns both children, if this is an interior node.
    #[inline]
    pub fn children(&self) -> Option<(&KdNode<'s, T>, &KdNode<'s, T>)> {
        self.children.as_deref().map(|[left, right]| (left, right))
    }

    /// Returns a reference to the left child subtree.
    #[inline]
    pub fn left(&self) -> Option<&KdNode<'s, T>> {
        self.children().map(|(left, _)| left)
    }

    /// Returns a reference to the right child subtree.
    #[inline]
    pub fn right(&self) -> Option<&KdNode<'s, T>> {
        self.children().map(|(_, right)| right)
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns the total number of triangles in this subtree (including all descendants).
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
            + self
                .children()
                .map_or(0, |(l, r)| l.triangle_count() + r.triangle_count())
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        1 + self.children().map_or(0, |(l, r)| l.depth().max(r.depth()))
    }

    /// Returns the number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |(l, r)| l.node_count() + r.node_count())
    }

    /// Returns the number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.children()
            .map_or(1, |(l, r)| l.leaf_count() + r.leaf_count())
    }
}

impl<T> Clone for KdNode<'_, T> {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            triangles: self.triangles.clone(),
            children: self.children.clone(),
        }
    }
}
