use clap::Parser;
use kd_accel::{
    BoundingBox, KdTree, KdTreeConfig, KdTreeError, OverlapContainment, Ray, TraversalStats,
    Triangle, VertexContainment,
};
use kd_trace::{cubes_above_grid, grid_scene};
use nalgebra::{Point3, Vector3};

/// Build a KD-tree over a synthetic scene and fire a batch of rays at it.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Side length of the unit-triangle grid.
    #[arg(long, default_value_t = 32)]
    grid: usize,

    /// Number of cubes floating above the grid.
    #[arg(long, default_value_t = 4)]
    cubes: usize,

    /// Maximum number of triangles per leaf.
    #[arg(long, default_value_t = kd_accel::DEFAULT_LEAF_SIZE)]
    leaf_size: usize,

    /// Maximum tree depth (defaults to a heuristic based on triangle count).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Minimum box extent below which nodes are not split.
    #[arg(long, default_value_t = 0.0)]
    min_extent: f32,

    /// Classify triangles with the exact box/triangle overlap test.
    #[arg(long)]
    overlap: bool,

    /// Fail instead of creating oversized leaves when a construction limit is hit.
    #[arg(long)]
    strict: bool,

    /// Rays per side of the square batch fired down the Z axis.
    #[arg(long, default_value_t = 64)]
    rays: usize,
}

fn build<'s>(triangles: &'s [Triangle], args: &Args) -> Result<KdTree<'s, Triangle>, KdTreeError> {
    let mut config = KdTreeConfig::default()
        .with_leaf_size(args.leaf_size)
        .with_min_extent(args.min_extent)
        .with_strict(args.strict);
    config.max_depth = args.max_depth;

    if args.overlap {
        KdTree::build_with(triangles, &config, &OverlapContainment)
    } else {
        KdTree::build_with(triangles, &config, &VertexContainment)
    }
}

/// Orthographic rays straight down over the XY footprint of `bounds`.
fn ray_batch(bounds: &BoundingBox, n: usize) -> Vec<Ray> {
    let min = bounds.min();
    let extent = bounds.extent();
    let top = bounds.max().z + 1.0;

    (0..n * n)
        .map(|i| {
            let fx = ((i % n) as f32 + 0.5) / n as f32;
            let fy = ((i / n) as f32 + 0.5) / n as f32;
            Ray::new(
                Point3::new(min.x + fx * extent.x, min.y + fy * extent.y, top),
                -Vector3::z(),
            )
        })
        .collect()
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut triangles = grid_scene(args.grid);
    triangles.extend(cubes_above_grid(args.grid, args.cubes));
    log::info!(
        "scene: {}x{} grid and {} cubes, {} triangles",
        args.grid,
        args.grid,
        args.cubes,
        triangles.len()
    );

    let tree = match build(&triangles, &args) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    let summary = tree.summary();
    let report = tree.build_report();
    println!(
        "KD-tree built: {} triangles, {} nodes, {} leaves, depth {} (limit {})",
        summary.triangle_count, summary.node_count, summary.leaf_count, summary.depth, report.depth_limit
    );
    println!(
        "Largest leaf: {} triangles | forced leaves: {} | dropped triangles: {}",
        summary.max_leaf_triangles, report.forced_leaves, report.dropped_triangles
    );

    let Some(bounds) = tree.bounds() else {
        return;
    };
    let rays = ray_batch(bounds, args.rays);
    let stats = TraversalStats::new();

    let mut hits = 0;
    let mut nearest_t = f32::INFINITY;
    for ray in &rays {
        if let Some(hit) = tree.nearest_intersection(ray, f32::INFINITY, &stats) {
            hits += 1;
            nearest_t = nearest_t.min(hit.t);
        }
    }

    let counters = stats.snapshot();
    println!("Rays: {} | hits: {} | nearest t: {}", rays.len(), hits, nearest_t);
    println!(
        "Ray/triangle tests: {} ({:.2} per ray, brute force would be {}) | intersections found: {}",
        counters.intersection_tests,
        counters.intersection_tests as f64 / rays.len().max(1) as f64,
        triangles.len(),
        counters.intersections_found
    );
}
