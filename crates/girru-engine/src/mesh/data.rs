use crate::error::RenderError;

use super::Vertex;

/// CPU-side mesh description: positions plus triangle-list indices.
///
/// Invariant: every index value is smaller than the vertex count, and the
/// index list describes whole triangles. [`MeshData::validate`] enforces
/// both; [`super::StaticMesh::create`] refuses data that fails it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// The hard-coded tutorial quad: four corners, two triangles.
    pub fn quad() -> Self {
        Self {
            vertices: vec![
                Vertex::new(0.5, 0.5, 0.0),   // top right
                Vertex::new(0.5, -0.5, 0.0),  // bottom right
                Vertex::new(-0.5, -0.5, 0.0), // bottom left
                Vertex::new(-0.5, 0.5, 0.0),  // top left
            ],
            indices: vec![0, 1, 3, 1, 2, 3],
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Checks the mesh invariants.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.vertices.is_empty() {
            return Err(RenderError::ResourceCreation(
                "mesh has no vertices".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(RenderError::ResourceCreation(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        let vertex_count = self.vertices.len() as u32;
        for (i, &index) in self.indices.iter().enumerate() {
            if index >= vertex_count {
                return Err(RenderError::ResourceCreation(format!(
                    "index {index} at position {i} out of range for {vertex_count} vertices"
                )));
            }
        }

        Ok(())
    }
}
