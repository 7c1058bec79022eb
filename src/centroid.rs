//! Area-weighted centroid of a triangle mesh.

use cgmath::{InnerSpace, Vector3};

use crate::error::MeshError;

/// Triangle mesh given as a vertex list and a flat triangle index list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f32>>,
    pub indices: Vec<u32>,
}

/// Corners of an 8-vertex box, paired with the 12 triangles covering its faces.
const CUBOID_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const CUBOID_INDICES: [u32; 36] = [
    0, 2, 1, 0, 3, 2, // -z
    4, 5, 6, 4, 6, 7, // +z
    0, 1, 5, 0, 5, 4, // -y
    3, 7, 6, 3, 6, 2, // +y
    0, 4, 7, 0, 7, 3, // -x
    1, 2, 6, 1, 6, 5, // +x
];

impl Mesh {
    pub fn new(vertices: Vec<Vector3<f32>>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Closed box centered at the origin, X = `length`, Y = `height`, Z = `width`.
    pub fn cuboid(length: f32, height: f32, width: f32) -> Self {
        let half = Vector3::new(length, height, width) / 2.0;
        let vertices = CUBOID_CORNERS
            .iter()
            .map(|[x, y, z]| Vector3::new(x * half.x, y * half.y, z * half.z))
            .collect();

        Self::new(vertices, CUBOID_INDICES.to_vec())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check that the index list describes whole triangles over existing vertices.
    pub fn validate(&self) -> Result<(), MeshError> {
        validate(&self.vertices, &self.indices)
    }

    /// Iterate the triangles as vertex triples. Call [`Mesh::validate`] first.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        triangles(&self.vertices, &self.indices)
    }

    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
            indices: self.indices.clone(),
        }
    }

    pub fn surface_area(&self) -> Result<f32, MeshError> {
        self.validate()?;
        Ok(self.triangles().map(|[a, b, c]| triangle_area(a, b, c)).sum())
    }

    pub fn centroid(&self) -> Result<Vector3<f32>, MeshError> {
        compute_centroid(&self.vertices, &self.indices)
    }
}

fn validate(vertices: &[Vector3<f32>], indices: &[u32]) -> Result<(), MeshError> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::InvalidIndexCount {
            count: indices.len(),
        });
    }

    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index as usize >= vertices.len())
    {
        return Err(MeshError::IndexOutOfBounds {
            index,
            position,
            vertex_count: vertices.len(),
        });
    }

    Ok(())
}

fn triangles<'a>(
    vertices: &'a [Vector3<f32>],
    indices: &'a [u32],
) -> impl Iterator<Item = [Vector3<f32>; 3]> + 'a {
    indices.chunks_exact(3).map(move |tri| {
        [
            vertices[tri[0] as usize],
            vertices[tri[1] as usize],
            vertices[tri[2] as usize],
        ]
    })
}

fn triangle_area(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> f32 {
    (a - c).cross(b - c).magnitude() / 2.0
}

/// Compute the area-weighted centroid of a triangle mesh.
///
/// Each triangle contributes its vertex average weighted by its area. Fails
/// when the index list is malformed or when the total area is zero (no
/// triangles, or only degenerate ones).
pub fn compute_centroid(
    vertices: &[Vector3<f32>],
    indices: &[u32],
) -> Result<Vector3<f32>, MeshError> {
    validate(vertices, indices)?;

    let mut total_area = 0.0;
    let mut weighted = Vector3::new(0.0, 0.0, 0.0);
    for [a, b, c] in triangles(vertices, indices) {
        let area = triangle_area(a, b, c);
        total_area += area;
        weighted += (a + b + c) / 3.0 * area;
    }

    // NaN from non-finite vertices is rejected as well.
    if !(total_area > 0.0) {
        return Err(MeshError::Degenerate {
            triangles: indices.len() / 3,
        });
    }

    Ok(weighted / total_area)
}
