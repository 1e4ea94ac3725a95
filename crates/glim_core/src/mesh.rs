//! Triangle mesh built from externally loaded geometry.

use std::sync::Arc;

use glim_math::{Aabb, Ray, Vec2, Vec3};

use crate::{
    error::SceneError, hit::Hit, material::Material, octree::Octree, triangle::Triangle,
};

/// One face of the input geometry: three vertex indices plus three texcoord
/// indices (all zero when the source carried no texcoords).
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshFace {
    pub vertices: [u32; 3],
    pub texcoords: [u32; 3],
}

/// Raw geometry as produced by the external mesh loader: vertex positions,
/// optional texture coordinates, and triangle index triples. Counter-
/// clockwise winding is the front face.
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub faces: Vec<MeshFace>,
}

/// A triangle mesh with precomputed smooth vertex normals and an octree
/// over its triangles.
///
/// The mesh exclusively owns both; the octree refers to triangles by index
/// only. Texture coordinates are retained as metadata - shading does not
/// consume them.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    texcoords: Vec<Vec2>,
    face_texcoords: Vec<[u32; 3]>,
    bounds: Aabb,
    octree: Octree,
}

impl TriangleMesh {
    /// Build a mesh from loaded geometry.
    ///
    /// Vertex normals are the normalized sum of the face normals of every
    /// incident triangle. A vertex whose accumulated normal sums to zero
    /// (opposing faces cancelling out) keeps the zero vector and shades
    /// unlit rather than producing NaNs; such vertices are warned about.
    ///
    /// Malformed geometry (no faces, out-of-range indices) is fatal: the
    /// primitive tree tolerates no undefined references.
    pub fn new(geometry: MeshGeometry, material: Arc<Material>) -> Result<Self, SceneError> {
        if geometry.faces.is_empty() {
            return Err(SceneError::EmptyMesh);
        }

        let vertex_count = geometry.positions.len();
        for (face_index, face) in geometry.faces.iter().enumerate() {
            for &index in &face.vertices {
                if index as usize >= vertex_count {
                    return Err(SceneError::VertexIndexOutOfRange {
                        face: face_index,
                        index,
                        count: vertex_count,
                    });
                }
            }
            if !geometry.texcoords.is_empty() {
                for &index in &face.texcoords {
                    if index as usize >= geometry.texcoords.len() {
                        return Err(SceneError::TexcoordIndexOutOfRange {
                            face: face_index,
                            index,
                            count: geometry.texcoords.len(),
                        });
                    }
                }
            }
        }

        // Accumulate face normals at each vertex. Degenerate faces
        // contribute nothing instead of NaNs.
        let mut normals = vec![Vec3::ZERO; vertex_count];
        for face in &geometry.faces {
            let [i0, i1, i2] = face.vertices.map(|i| i as usize);
            let a = geometry.positions[i1] - geometry.positions[i0];
            let b = geometry.positions[i2] - geometry.positions[i0];
            let face_normal = a.cross(b).normalize_or_zero();
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        let mut degenerate = 0usize;
        for normal in &mut normals {
            let normalized = normal.normalize_or_zero();
            if normalized == Vec3::ZERO {
                degenerate += 1;
            }
            *normal = normalized;
        }
        if degenerate > 0 {
            log::warn!(
                "{} of {} mesh vertices have a zero normal accumulation; they will shade unlit",
                degenerate,
                vertex_count
            );
        }

        let triangles: Vec<Triangle> = geometry
            .faces
            .iter()
            .map(|face| {
                let [i0, i1, i2] = face.vertices.map(|i| i as usize);
                Triangle::new(
                    [
                        geometry.positions[i0],
                        geometry.positions[i1],
                        geometry.positions[i2],
                    ],
                    [normals[i0], normals[i1], normals[i2]],
                    Arc::clone(&material),
                )
            })
            .collect();

        let bounds = compute_bounds(&geometry.positions);
        let octree = Octree::build(&triangles, bounds);

        log::info!(
            "built mesh: {} vertices, {} triangles",
            vertex_count,
            triangles.len()
        );

        Ok(Self {
            triangles,
            texcoords: geometry.texcoords,
            face_texcoords: geometry.faces.iter().map(|f| f.texcoords).collect(),
            bounds,
            octree,
        })
    }

    /// The mesh's triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Axis-aligned bounds over all vertices.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Texture coordinates retained from the source geometry.
    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    /// Per-face texcoord index triples, parallel to `triangles()`.
    pub fn face_texcoords(&self) -> &[[u32; 3]] {
        &self.face_texcoords
    }

    /// Intersect through the octree, never the linear triangle scan.
    pub fn intersect<'a>(&'a self, ray: &Ray, t_min: f32, hit: &mut Hit<'a>) -> bool {
        self.octree.intersect(&self.triangles, ray, t_min, hit)
    }
}

fn compute_bounds(positions: &[Vec3]) -> Aabb {
    if positions.is_empty() {
        return Aabb::EMPTY;
    }
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for position in positions {
        min = min.min(*position);
        max = max.max(*position);
    }
    Aabb::from_points(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> Arc<Material> {
        Arc::new(Material::diffuse(Vec3::splat(0.5)))
    }

    fn single_triangle_geometry() -> MeshGeometry {
        MeshGeometry {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            texcoords: Vec::new(),
            faces: vec![MeshFace {
                vertices: [0, 1, 2],
                texcoords: [0, 0, 0],
            }],
        }
    }

    #[test]
    fn test_mesh_smooth_normals() {
        // CCW triangle in the XY plane faces +Z
        let mesh = TriangleMesh::new(single_triangle_geometry(), gray()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);

        let triangle = &mesh.triangles()[0];
        for i in 0..3 {
            assert!((triangle.normal(i) - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_mesh_normals_average_across_faces() {
        // Two faces of a "tent" sharing the ridge edge: the slope normals
        // lean opposite ways in x, so the ridge normals average to +Y
        let geometry = MeshGeometry {
            positions: vec![
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, -1.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
            texcoords: Vec::new(),
            faces: vec![
                MeshFace {
                    vertices: [0, 1, 2],
                    texcoords: [0; 3],
                },
                MeshFace {
                    vertices: [1, 3, 2],
                    texcoords: [0; 3],
                },
            ],
        };
        let mesh = TriangleMesh::new(geometry, gray()).unwrap();

        // Ridge vertex 1 is shared by both slopes once each
        let ridge_normal = mesh.triangles()[0].normal(1);
        assert!(ridge_normal.x.abs() < 1e-5);
        assert!(ridge_normal.y > 0.0);
        assert!((ridge_normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_rejects_empty() {
        let geometry = MeshGeometry::default();
        assert!(matches!(
            TriangleMesh::new(geometry, gray()),
            Err(SceneError::EmptyMesh)
        ));
    }

    #[test]
    fn test_mesh_rejects_bad_vertex_index() {
        let mut geometry = single_triangle_geometry();
        geometry.faces[0].vertices = [0, 1, 7];
        assert!(matches!(
            TriangleMesh::new(geometry, gray()),
            Err(SceneError::VertexIndexOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_mesh_rejects_bad_texcoord_index() {
        let mut geometry = single_triangle_geometry();
        geometry.texcoords = vec![Vec2::ZERO];
        geometry.faces[0].texcoords = [0, 0, 3];
        assert!(matches!(
            TriangleMesh::new(geometry, gray()),
            Err(SceneError::TexcoordIndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_mesh_degenerate_normal_stays_zero() {
        // Two coincident faces with opposite winding: their face normals
        // cancel at every shared vertex
        let geometry = MeshGeometry {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            texcoords: Vec::new(),
            faces: vec![
                MeshFace {
                    vertices: [0, 1, 2],
                    texcoords: [0; 3],
                },
                MeshFace {
                    vertices: [0, 2, 1],
                    texcoords: [0; 3],
                },
            ],
        };
        let mesh = TriangleMesh::new(geometry, gray()).unwrap();
        for i in 0..3 {
            assert_eq!(mesh.triangles()[0].normal(i), Vec3::ZERO);
        }
    }

    #[test]
    fn test_mesh_intersect_through_octree() {
        let mesh = TriangleMesh::new(single_triangle_geometry(), gray()).unwrap();

        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();
        assert!(mesh.intersect(&ray, 1e-4, &mut hit));
        assert!((hit.t - 5.0).abs() < 1e-5);

        let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();
        assert!(!mesh.intersect(&ray, 1e-4, &mut hit));
    }

    #[test]
    fn test_mesh_keeps_texcoord_metadata() {
        let mut geometry = single_triangle_geometry();
        geometry.texcoords = vec![Vec2::ZERO, Vec2::X, Vec2::Y];
        geometry.faces[0].texcoords = [0, 1, 2];

        let mesh = TriangleMesh::new(geometry, gray()).unwrap();
        assert_eq!(mesh.texcoords().len(), 3);
        assert_eq!(mesh.face_texcoords()[0], [0, 1, 2]);
    }
}
