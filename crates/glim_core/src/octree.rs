//! Octree acceleration structure for triangle meshes.
//!
//! The octree narrows the set of candidate triangles for a ray query. It
//! must never change the answer relative to a brute-force scan over every
//! triangle - only its cost. Nodes hold `u32` indices into the owning
//! mesh's triangle list, never triangle data or pointers, so mesh and index
//! can be moved independently.

use std::cmp::Ordering;

use glim_math::{Aabb, Interval, Ray};

use crate::{hit::Hit, triangle::Triangle};

/// Leaf capacity before a node splits.
const MAX_LEAF_TRIANGLES: usize = 8;

/// Maximum subdivision depth. Bounds recursion when large triangles
/// straddle every octant and refuse to separate.
const MAX_DEPTH: u32 = 8;

/// Octree node - either a branch with eight octant children or a leaf
/// holding triangle indices.
enum OctreeNode {
    Branch {
        children: Box<[OctreeNode; 8]>,
        bounds: Aabb,
    },
    Leaf {
        triangles: Vec<u32>,
        bounds: Aabb,
    },
}

impl OctreeNode {
    fn bounds(&self) -> &Aabb {
        match self {
            OctreeNode::Branch { bounds, .. } => bounds,
            OctreeNode::Leaf { bounds, .. } => bounds,
        }
    }
}

/// Spatial index over a mesh's triangle set.
pub struct Octree {
    root: OctreeNode,
}

impl Octree {
    /// Build the index for a triangle set within the given bounds.
    ///
    /// A triangle is assigned to every octant its bounding box overlaps
    /// (conservative - a triangle may be visited more than once, which costs
    /// time but never correctness).
    pub fn build(triangles: &[Triangle], bounds: Aabb) -> Self {
        let triangle_bounds: Vec<Aabb> = triangles.iter().map(|t| t.bounds()).collect();
        let indices: Vec<u32> = (0..triangles.len() as u32).collect();
        let root = build_node(&triangle_bounds, indices, bounds, 0);

        log::debug!(
            "built octree over {} triangles, root bounds {:?}",
            triangles.len(),
            bounds
        );
        Self { root }
    }

    /// Intersect a ray against the indexed triangles.
    ///
    /// Same contract as every primitive intersect: closest wins, the shared
    /// hit record mutates only on success. Octants are visited front to back
    /// and traversal stops once the running best hit is nearer than the
    /// entry distance of everything left.
    pub fn intersect<'a>(
        &self,
        triangles: &'a [Triangle],
        ray: &Ray,
        t_min: f32,
        hit: &mut Hit<'a>,
    ) -> bool {
        if triangles.is_empty() {
            return false;
        }
        // Ray never enters the root volume
        if self
            .root
            .bounds()
            .clip(ray, Interval::new(t_min, hit.t))
            .is_none()
        {
            return false;
        }
        intersect_node(&self.root, triangles, ray, t_min, hit)
    }
}

/// Split an octant's box out of `bounds` around `center`.
fn octant_bounds(bounds: &Aabb, index: usize) -> Aabb {
    let center = bounds.centroid();
    let x = if index & 1 == 0 {
        Interval::new(bounds.x.min, center.x)
    } else {
        Interval::new(center.x, bounds.x.max)
    };
    let y = if index & 2 == 0 {
        Interval::new(bounds.y.min, center.y)
    } else {
        Interval::new(center.y, bounds.y.max)
    };
    let z = if index & 4 == 0 {
        Interval::new(bounds.z.min, center.z)
    } else {
        Interval::new(center.z, bounds.z.max)
    };
    Aabb::new(x, y, z)
}

fn build_node(
    triangle_bounds: &[Aabb],
    indices: Vec<u32>,
    bounds: Aabb,
    depth: u32,
) -> OctreeNode {
    if indices.len() <= MAX_LEAF_TRIANGLES || depth >= MAX_DEPTH {
        return OctreeNode::Leaf {
            triangles: indices,
            bounds,
        };
    }

    let children = std::array::from_fn(|octant| {
        let child_bounds = octant_bounds(&bounds, octant);
        let child_indices: Vec<u32> = indices
            .iter()
            .copied()
            .filter(|&i| child_bounds.overlaps(&triangle_bounds[i as usize]))
            .collect();
        build_node(triangle_bounds, child_indices, child_bounds, depth + 1)
    });

    OctreeNode::Branch {
        children: Box::new(children),
        bounds,
    }
}

fn intersect_node<'a>(
    node: &OctreeNode,
    triangles: &'a [Triangle],
    ray: &Ray,
    t_min: f32,
    hit: &mut Hit<'a>,
) -> bool {
    match node {
        OctreeNode::Leaf {
            triangles: indices, ..
        } => {
            let mut hit_anything = false;
            for &i in indices {
                if triangles[i as usize].intersect(ray, t_min, hit) {
                    hit_anything = true;
                }
            }
            hit_anything
        }
        OctreeNode::Branch { children, .. } => {
            // Entry distance per reachable child, front to back
            let mut order = [(f32::INFINITY, 0usize); 8];
            let mut reachable = 0;
            for (i, child) in children.iter().enumerate() {
                if let Some((entry, _)) =
                    child.bounds().clip(ray, Interval::new(t_min, hit.t))
                {
                    order[reachable] = (entry, i);
                    reachable += 1;
                }
            }
            order[..reachable]
                .sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let mut hit_anything = false;
            for &(entry, i) in &order[..reachable] {
                // Everything after this child enters even farther away
                if hit.t <= entry {
                    break;
                }
                if intersect_node(&children[i], triangles, ray, t_min, hit) {
                    hit_anything = true;
                }
            }
            hit_anything
        }
    }
}
