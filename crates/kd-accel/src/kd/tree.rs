//! KD-tree container, construction and ray queries.

use crate::{BoundingBox, KdTreeConfig, KdTreeError, Primitive, Ray, RayHit, Result, TraversalStats};

use super::containment::{ContainmentTest, VertexContainment};
use super::node::KdNode;
use super::visitor::{walk_node, FnVisitor, KdVisitor};

/// A KD-tree over borrowed triangles, for nearest-hit ray queries.
///
/// The tree recursively halves the scene bounding box along its longest
/// axis. Triangles that fit in exactly one half move down into it, triangles
/// that straddle the split stay at the node. Nodes with few enough triangles
/// become leaves.
///
/// # Construction
///
/// ```ignore
/// use kd_accel::{KdTree, KdTreeConfig, OverlapContainment};
///
/// let tree = KdTree::build(&triangles)?;
/// let tree = KdTree::build_with(&triangles, &KdTreeConfig::default(), &OverlapContainment)?;
/// ```
///
/// # Queries
///
/// The tree is immutable once built. Queries take `&self` and report their
/// work to a caller-owned [`TraversalStats`]:
///
/// ```ignore
/// let stats = TraversalStats::new();
/// if let Some(hit) = tree.nearest_intersection(&ray, f32::INFINITY, &stats) {
///     shade(hit.triangle, hit.u, hit.v);
/// }
/// ```
#[derive(Debug)]
pub struct KdTree<'s, T> {
    root: Option<KdNode<'s, T>>,
    report: BuildReport,
}

/// What happened during construction, beyond the tree shape itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Depth limit that was in effect.
    pub depth_limit: usize,
    /// Leaves created by a safety cutoff while holding more than `leaf_size` triangles.
    pub forced_leaves: usize,
    /// Triangles that neither child accepted during a split.
    pub dropped_triangles: usize,
}

/// Shape statistics of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub triangle_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    /// Number of levels (1 for a single leaf, 0 for an empty tree).
    pub depth: usize,
    /// Largest number of triangles stored in a single leaf.
    pub max_leaf_triangles: usize,
}

/// The nearest triangle hit by a ray, with its hit parameters.
#[derive(Debug)]
pub struct Intersection<'s, T> {
    pub triangle: &'s T,
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl<'s, T> Intersection<'s, T> {
    fn new(triangle: &'s T, hit: RayHit) -> Self {
        Self {
            triangle,
            t: hit.t,
            u: hit.u,
            v: hit.v,
        }
    }
}

impl<T> Clone for Intersection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Intersection<'_, T> {}

impl<T> Default for KdTree<'_, T> {
    fn default() -> Self {
        Self {
            root: None,
            report: BuildReport::default(),
        }
    }
}

impl<T> Clone for KdTree<'_, T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            report: self.report,
        }
    }
}

impl<'s, T: Primitive> KdTree<'s, T> {
    /// Creates an empty KD-tree. Every query against it reports no hit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a KD-tree with the default configuration and [`VertexContainment`].
    pub fn build<I>(triangles: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'s T>,
    {
        Self::build_with(triangles, &KdTreeConfig::default(), &VertexContainment)
    }

    /// Builds a KD-tree from a non-empty set of triangles.
    ///
    /// The root box tightly bounds every vertex of every triangle. Nodes are
    /// split at the midpoint of their longest axis until they hold at most
    /// `config.leaf_size` triangles, or a safety cutoff (depth limit or
    /// `config.min_extent`) fires.
    ///
    /// # Errors
    ///
    /// - [`KdTreeError::InvalidInput`] for an empty triangle set, a vertex
    ///   with a non-finite coordinate, or an invalid configuration.
    /// - [`KdTreeError::ConstructionLimitExceeded`] when a cutoff fires and
    ///   `config.strict` is set.
    pub fn build_with<I, C>(triangles: I, config: &KdTreeConfig, containment: &C) -> Result<Self>
    where
        I: IntoIterator<Item = &'s T>,
        C: ContainmentTest,
    {
        config.validate()?;

        let triangles: Vec<&'s T> = triangles.into_iter().collect();
        if let Some(index) = triangles.iter().position(|t| {
            t.vertices()
                .iter()
                .any(|v| v.iter().any(|c| !c.is_finite()))
        }) {
            return Err(KdTreeError::InvalidInput(format!(
                "triangle {} has a non-finite vertex",
                index
            )));
        }
        let bounds = BoundingBox::from_primitives(triangles.iter().copied()).ok_or_else(|| {
            KdTreeError::InvalidInput("cannot build a KD-tree from an empty triangle set".to_string())
        })?;

        let mut builder = NodeBuilder {
            config,
            containment,
            report: BuildReport {
                depth_limit: config.depth_limit(triangles.len()),
                ..BuildReport::default()
            },
        };
        let root = builder.build_node(bounds, triangles, 0)?;

        let tree = Self {
            root: Some(root),
            report: builder.report,
        };

        let summary = tree.summary();
        log::debug!(
            "built KD-tree: {} triangles, {} nodes, {} leaves, depth {}",
            summary.triangle_count,
            summary.node_count,
            summary.leaf_count,
            summary.depth
        );
        if tree.report.forced_leaves > 0 {
            log::warn!(
                "{} KD-tree leaves exceed the leaf size of {} (depth limit {}, min extent {})",
                tree.report.forced_leaves,
                config.leaf_size,
                tree.report.depth_limit,
                config.min_extent
            );
        }

        Ok(tree)
    }

    /// Finds the nearest triangle hit by `ray` with `t < max_t`.
    ///
    /// Subtrees whose box the ray misses are skipped. Otherwise the left
    /// subtree, then the right subtree, then the triangles stored at the node
    /// are searched, each search bounded by the closest hit found so far.
    /// When two triangles are hit at exactly the same `t`, the first one
    /// found in that order wins.
    ///
    /// Every ray/triangle test and every hit is recorded in `stats`.
    /// Returns `None` for an empty tree or when nothing is hit.
    pub fn nearest_intersection(
        &self,
        ray: &Ray,
        max_t: f32,
        stats: &TraversalStats,
    ) -> Option<Intersection<'s, T>> {
        let root = self.root.as_ref()?;
        let mut nearest = None;
        find_nearest(root, ray, max_t, stats, &mut nearest);
        nearest
    }

    /// Returns `true` if `ray` hits any triangle with `t < max_t`.
    ///
    /// Stops at the first hit, so it is cheaper than
    /// [`nearest_intersection`](Self::nearest_intersection) for shadow rays.
    pub fn occluded(&self, ray: &Ray, max_t: f32, stats: &TraversalStats) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| find_any(root, ray, max_t, stats))
    }
}

impl<'s, T> KdTree<'s, T> {
    /// Returns `true` if the tree contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&KdNode<'s, T>> {
        self.root.as_ref()
    }

    /// Returns the scene bounding box, if the tree is not empty.
    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.root.as_ref().map(|n| n.bounds())
    }

    /// Returns what happened during construction.
    #[inline]
    pub fn build_report(&self) -> &BuildReport {
        &self.report
    }

    /// Returns the total number of triangles stored in the tree.
    pub fn triangle_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.triangle_count())
    }

    /// Returns the number of levels of the tree (0 for an empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.node_count())
    }

    /// Returns the number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.leaf_count())
    }

    /// Walks every node in pre-order (node, left subtree, right subtree).
    pub fn walk<V: KdVisitor<'s, T>>(&self, visitor: &mut V) {
        if let Some(ref root) = self.root {
            walk_node(root, 0, visitor);
        }
    }

    /// Computes shape statistics in a single walk.
    pub fn summary(&self) -> TreeSummary {
        let mut summary = TreeSummary::default();
        let mut visitor = FnVisitor::new(|node: &KdNode<'s, T>, depth: usize| {
            summary.triangle_count += node.triangles().len();
            summary.node_count += 1;
            summary.depth = summary.depth.max(depth + 1);
            if node.is_leaf() {
                summary.leaf_count += 1;
                summary.max_leaf_triangles = summary.max_leaf_triangles.max(node.triangles().len());
            }
        });
        self.walk(&mut visitor);
        summary
    }
}

/// Recursive construction state.
struct NodeBuilder<'c, C> {
    config: &'c KdTreeConfig,
    containment: &'c C,
    report: BuildReport,
}

impl<C: ContainmentTest> NodeBuilder<'_, C> {
    fn build_node<'s, T: Primitive>(
        &mut self,
        bounds: BoundingBox,
        triangles: Vec<&'s T>,
        depth: usize,
    ) -> Result<KdNode<'s, T>> {
        if triangles.len() <= self.config.leaf_size {
            return Ok(KdNode::leaf(bounds, triangles));
        }

        let extent = bounds.extent();
        let longest = extent.x.max(extent.y).max(extent.z);
        if depth >= self.report.depth_limit || longest <= self.config.min_extent {
            let limit = KdTreeError::ConstructionLimitExceeded {
                depth,
                triangles: triangles.len(),
            };
            if self.config.strict {
                return Err(limit);
            }
            log::debug!("{}, storing them in a leaf", limit);
            self.report.forced_leaves += 1;
            return Ok(KdNode::leaf(bounds, triangles));
        }

        let (left_bounds, right_bounds) = bounds.split();

        let mut straddling = Vec::new();
        let mut left_list = Vec::new();
        let mut right_list = Vec::new();

        for triangle in triangles {
            let in_left = self.containment.contains(&left_bounds, triangle);
            let in_right = self.containment.contains(&right_bounds, triangle);
            match (in_left, in_right) {
                (true, true) => straddling.push(triangle),
                (true, false) => left_list.push(triangle),
                (false, true) => right_list.push(triangle),
                (false, false) => {
                    log::debug!("triangle dropped at depth {}: outside both child boxes", depth);
                    self.report.dropped_triangles += 1;
                }
            }
        }

        let left = self.build_node(left_bounds, left_list, depth + 1)?;
        let right = self.build_node(right_bounds, right_list, depth + 1)?;

        Ok(KdNode::interior(bounds, straddling, left, right))
    }
}

/// Nearest-hit search over a subtree.
///
/// Returns `true` if this subtree improved `nearest`; `max_t` only shrinks
/// as closer hits are found.
fn find_nearest<'s, T: Primitive>(
    node: &KdNode<'s, T>,
    ray: &Ray,
    mut max_t: f32,
    stats: &TraversalStats,
    nearest: &mut Option<Intersection<'s, T>>,
) -> bool {
    if !node.bounds().intersects(ray) {
        return false;
    }

    let mut found = false;

    if let Some((left, right)) = node.children() {
        for child in [left, right] {
            if find_nearest(child, ray, max_t, stats, nearest) {
                if let Some(hit) = nearest {
                    max_t = hit.t;
                }
                found = true;
            }
        }
    }

    for &triangle in node.triangles() {
        stats.record_test();
        if let Some(hit) = triangle.intersect(ray, max_t) {
            stats.record_hit();
            max_t = hit.t;
            *nearest = Some(Intersection::new(triangle, hit));
            found = true;
        }
    }

    found
}

/// Any-hit search over a subtree; local triangles are tested before children.
fn find_any<T: Primitive>(node: &KdNode<'_, T>, ray: &Ray, max_t: f32, stats: &TraversalStats) -> bool {
    if !node.bounds().intersects(ray) {
        return false;
    }

    let local_hit = node.triangles().iter().any(|triangle| {
        stats.record_test();
        let hit = triangle.intersect(ray, max_t).is_some();
        if hit {
            stats.record_hit();
        }
        hit
    });
    if local_hit {
        return true;
    }

    node.children().is_some_and(|(left, right)| {
        find_any(left, ray, max_t, stats) || find_any(right, ray, max_t, stats)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kd::CollectingVisitor, OverlapContainment, Triangle};
    use nalgebra::{Point3, Vector3};

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
    }

    /// A unit right triangle in the plane `z`, with its right angle at `(x, y)`.
    fn cell_triangle(x: f32, y: f32, z: f32) -> Triangle {
        make_triangle([x, y, z], [x + 1.0, y, z], [x, y + 1.0, z])
    }

    /// A degenerate triangle with all three vertices at one point.
    fn point_triangle(x: f32, y: f32, z: f32) -> Triangle {
        make_triangle([x, y, z], [x, y, z], [x, y, z])
    }

    fn down(x: f32, y: f32) -> Ray {
        Ray::new(Point3::new(x, y, 10.0), -Vector3::z())
    }

    #[test]
    fn empty_tree() {
        let tree: KdTree<'_, Triangle> = KdTree::new();
        assert!(tree.is_empty());
        assert!(tree.bounds().is_none());
        assert_eq!(tree.triangle_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.summary(), TreeSummary::default());
    }

    #[test]
    fn empty_tree_query_misses() {
        let tree: KdTree<'_, Triangle> = KdTree::new();
        let stats = TraversalStats::new();
        assert!(tree.nearest_intersection(&down(0.0, 0.0), f32::INFINITY, &stats).is_none());
        assert!(!tree.occluded(&down(0.0, 0.0), f32::INFINITY, &stats));
        assert_eq!(stats.intersection_tests(), 0);
    }

    #[test]
    fn build_empty_is_invalid_input() {
        let triangles: Vec<Triangle> = vec![];
        let result = KdTree::build(&triangles);
        assert!(matches!(result, Err(KdTreeError::InvalidInput(_))));
    }

    #[test]
    fn build_rejects_non_finite_vertex() {
        let triangles = vec![
            cell_triangle(0.0, 0.0, 0.0),
            make_triangle([f32::NAN, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let err = KdTree::build(&triangles).unwrap_err();
        assert_eq!(
            err,
            KdTreeError::InvalidInput("triangle 1 has a non-finite vertex".to_string())
        );
    }

    #[test]
    fn build_rejects_invalid_config() {
        let triangles = vec![cell_triangle(0.0, 0.0, 0.0)];
        let config = KdTreeConfig::default().with_leaf_size(0);
        let result = KdTree::build_with(&triangles, &config, &VertexContainment);
        assert!(matches!(result, Err(KdTreeError::InvalidInput(_))));
    }

    #[test]
    fn build_single_triangle() {
        let triangles = vec![cell_triangle(0.0, 0.0, 0.0)];
        let tree = KdTree::build(&triangles).unwrap();

        assert!(!tree.is_empty());
        assert_eq!(tree.triangle_count(), 1);
        assert_eq!(tree.depth(), 1);
        assert!(tree.root().unwrap().is_leaf());
    }

    #[test]
    fn root_bounds_cover_all_triangles() {
        let triangles = vec![
            make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            make_triangle([-3.0, 2.0, 1.0], [0.0, 5.0, 0.0], [1.0, 1.0, -4.0]),
        ];
        let tree = KdTree::build(&triangles).unwrap();
        let bounds = tree.bounds().unwrap();

        assert_eq!(bounds.min(), Point3::new(-3.0, 0.0, -4.0));
        assert_eq!(bounds.max(), Point3::new(1.0, 5.0, 1.0));
    }

    #[test]
    fn leaf_size_stops_splitting() {
        let triangles: Vec<Triangle> = (0..4).map(|i| cell_triangle(i as f32 * 2.0, 0.0, 0.0)).collect();
        let config = KdTreeConfig::default().with_leaf_size(4);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();
        assert_eq!(tree.node_count(), 1);

        let config = KdTreeConfig::default().with_leaf_size(1);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();
        assert!(tree.node_count() > 1);
        assert_eq!(tree.triangle_count(), 4);
    }

    #[test]
    fn straddling_triangle_stays_at_root() {
        // Root box spans x in [0, 4] and splits at x = 2.
        let triangles = vec![
            cell_triangle(0.0, 0.0, 0.0),
            cell_triangle(3.0, 0.0, 0.0),
            make_triangle([1.5, 0.0, 0.0], [2.5, 0.0, 0.0], [1.5, 1.0, 0.0]),
        ];
        let config = KdTreeConfig::default().with_leaf_size(1);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(root.triangles().len(), 1);
        assert!(std::ptr::eq(root.triangles()[0], &triangles[2]));
        assert_eq!(root.left().unwrap().triangle_count(), 1);
        assert_eq!(root.right().unwrap().triangle_count(), 1);
    }

    #[test]
    fn clustered_triangles_hit_depth_limit() {
        // Five triangles collapsed onto the origin always land in the same child.
        let mut triangles: Vec<Triangle> = (0..5).map(|_| point_triangle(0.0, 0.0, 0.0)).collect();
        triangles.push(point_triangle(1.0, 0.0, 0.0));
        let config = KdTreeConfig::default().with_leaf_size(2).with_max_depth(6);

        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();
        assert_eq!(tree.triangle_count(), 6);
        assert_eq!(tree.build_report().forced_leaves, 1);
        assert_eq!(tree.depth(), 7);
        assert_eq!(tree.summary().max_leaf_triangles, 5);
    }

    #[test]
    fn strict_mode_reports_limit() {
        // The scene box is a single point and cannot be split.
        let triangles: Vec<Triangle> = (0..3).map(|_| point_triangle(1.0, 1.0, 1.0)).collect();
        let config = KdTreeConfig::default().with_leaf_size(2).with_strict(true);

        let err = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap_err();
        assert_eq!(
            err,
            KdTreeError::ConstructionLimitExceeded {
                depth: 0,
                triangles: 3
            }
        );
    }

    #[test]
    fn min_extent_forces_leaf() {
        let triangles: Vec<Triangle> = (0..8).map(|i| cell_triangle(i as f32, 0.0, 0.0)).collect();
        let config = KdTreeConfig::default().with_leaf_size(1).with_min_extent(100.0);

        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.build_report().forced_leaves, 1);
    }

    /// Accepts triangles below `z = 1` by vertex containment, rejects the rest.
    struct BelowPlane;

    impl ContainmentTest for BelowPlane {
        fn contains<P: Primitive + ?Sized>(&self, bounds: &BoundingBox, triangle: &P) -> bool {
            triangle.vertices().iter().all(|v| v.z < 1.0) && bounds.contains_triangle(triangle)
        }
    }

    #[test]
    fn rejected_triangle_is_dropped() {
        let triangles = vec![
            cell_triangle(0.0, 0.0, 0.0),
            cell_triangle(2.0, 0.0, 0.0),
            cell_triangle(4.0, 0.0, 0.0),
            cell_triangle(6.0, 0.0, 0.0),
            cell_triangle(0.0, 0.0, 1.0),
        ];
        let config = KdTreeConfig::default().with_leaf_size(1);
        let tree = KdTree::build_with(&triangles, &config, &BelowPlane).unwrap();

        assert_eq!(tree.build_report().dropped_triangles, 1);
        assert_eq!(tree.build_report().forced_leaves, 0);
        assert_eq!(tree.triangle_count(), 4);

        let mut visitor = CollectingVisitor::new();
        tree.walk(&mut visitor);
        let stored = visitor.into_triangles();
        assert_eq!(stored.len(), 4);
        assert!(!stored.iter().any(|&t| std::ptr::eq(t, &triangles[4])));

        // The dropped triangle sits above the one it would occlude.
        let stats = TraversalStats::new();
        let hit = tree
            .nearest_intersection(&down(0.25, 0.25), f32::INFINITY, &stats)
            .unwrap();
        assert!(std::ptr::eq(hit.triangle, &triangles[0]));
        assert!((hit.t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn nearest_single_triangle() {
        let triangles = vec![cell_triangle(0.0, 0.0, 0.0)];
        let tree = KdTree::build(&triangles).unwrap();
        let stats = TraversalStats::new();

        let hit = tree
            .nearest_intersection(&down(0.25, 0.25), f32::INFINITY, &stats)
            .unwrap();
        assert!(std::ptr::eq(hit.triangle, &triangles[0]));
        assert!((hit.t - 10.0).abs() < 1e-5);
        assert_eq!(stats.intersection_tests(), 1);
        assert_eq!(stats.intersections_found(), 1);
    }

    #[test]
    fn nearest_respects_max_t() {
        let triangles = vec![cell_triangle(0.0, 0.0, 0.0)];
        let tree = KdTree::build(&triangles).unwrap();
        let stats = TraversalStats::new();

        assert!(tree.nearest_intersection(&down(0.25, 0.25), 5.0, &stats).is_none());
        assert!(tree.nearest_intersection(&down(0.25, 0.25), 11.0, &stats).is_some());
    }

    #[test]
    fn nearest_prefers_closer_triangle() {
        // Stacked along z, enough of them to force splits along z.
        let triangles: Vec<Triangle> = (0..6).map(|i| cell_triangle(0.0, 0.0, i as f32 * 3.0)).collect();
        let config = KdTreeConfig::default().with_leaf_size(1);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();
        assert!(tree.node_count() > 1);
        let stats = TraversalStats::new();

        let from_above = Ray::new(Point3::new(0.25, 0.25, 20.0), -Vector3::z());
        let hit = tree.nearest_intersection(&from_above, f32::INFINITY, &stats).unwrap();
        assert!(std::ptr::eq(hit.triangle, &triangles[5]));
        assert!((hit.t - 5.0).abs() < 1e-5);

        let from_below = Ray::new(Point3::new(0.25, 0.25, -1.0), Vector3::z());
        let hit = tree.nearest_intersection(&from_below, f32::INFINITY, &stats).unwrap();
        assert!(std::ptr::eq(hit.triangle, &triangles[0]));
        assert!((hit.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tie_keeps_first_discovered() {
        let a = cell_triangle(0.0, 0.0, 0.0);
        let b = cell_triangle(0.0, 0.0, 0.0);
        let triangles = vec![a, b];
        let tree = KdTree::build(&triangles).unwrap();
        let stats = TraversalStats::new();

        let hit = tree
            .nearest_intersection(&down(0.25, 0.25), f32::INFINITY, &stats)
            .unwrap();
        assert!(std::ptr::eq(hit.triangle, &triangles[0]));
        assert_eq!(stats.intersections_found(), 1);
    }

    #[test]
    fn miss_leaves_counters_untouched_outside_bounds() {
        let triangles = vec![cell_triangle(0.0, 0.0, 0.0)];
        let tree = KdTree::build(&triangles).unwrap();
        let stats = TraversalStats::new();

        assert!(tree.nearest_intersection(&down(5.0, 5.0), f32::INFINITY, &stats).is_none());
        assert_eq!(stats.intersection_tests(), 0);
    }

    #[test]
    fn degenerate_ray_misses() {
        let triangles = vec![cell_triangle(0.0, 0.0, 0.0)];
        let tree = KdTree::build(&triangles).unwrap();
        let stats = TraversalStats::new();

        let zero = Ray::new(Point3::new(0.25, 0.25, 1.0), Vector3::zeros());
        assert!(tree.nearest_intersection(&zero, f32::INFINITY, &stats).is_none());
    }

    #[test]
    fn occluded_matches_nearest() {
        let triangles: Vec<Triangle> = (0..9)
            .map(|i| cell_triangle((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        let config = KdTreeConfig::default().with_leaf_size(2);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();
        let stats = TraversalStats::new();

        assert!(tree.occluded(&down(1.25, 1.25), f32::INFINITY, &stats));
        assert!(!tree.occluded(&down(1.25, 1.25), 5.0, &stats));
        assert!(!tree.occluded(&down(7.0, 7.0), f32::INFINITY, &stats));
    }

    #[test]
    fn overlap_containment_builds_same_answers() {
        let triangles: Vec<Triangle> = (0..9)
            .map(|i| cell_triangle((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        let config = KdTreeConfig::default().with_leaf_size(2);
        let tree = KdTree::build_with(&triangles, &config, &OverlapContainment).unwrap();
        assert_eq!(tree.triangle_count(), 9);
        let stats = TraversalStats::new();

        let hit = tree
            .nearest_intersection(&down(1.25, 1.25), f32::INFINITY, &stats)
            .unwrap();
        assert!(std::ptr::eq(hit.triangle, &triangles[4]));
    }

    #[test]
    fn walk_visits_every_triangle_once() {
        let triangles: Vec<Triangle> = (0..9)
            .map(|i| cell_triangle((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        let config = KdTreeConfig::default().with_leaf_size(2);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();

        let mut visitor = CollectingVisitor::new();
        tree.walk(&mut visitor);
        let collected = visitor.into_triangles();

        assert_eq!(collected.len(), triangles.len());
        for triangle in &triangles {
            assert_eq!(collected.iter().filter(|&&t| std::ptr::eq(t, triangle)).count(), 1);
        }
    }

    #[test]
    fn summary_matches_node_queries() {
        let triangles: Vec<Triangle> = (0..9)
            .map(|i| cell_triangle((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        let config = KdTreeConfig::default().with_leaf_size(2);
        let tree = KdTree::build_with(&triangles, &config, &VertexContainment).unwrap();

        let summary = tree.summary();
        assert_eq!(summary.triangle_count, tree.triangle_count());
        assert_eq!(summary.node_count, tree.node_count());
        assert_eq!(summary.leaf_count, tree.leaf_count());
        assert_eq!(summary.depth, tree.depth());
        assert!(summary.max_leaf_triangles <= 2);
    }
}
