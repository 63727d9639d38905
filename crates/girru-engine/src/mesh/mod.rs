//! Static geometry.
//!
//! [`MeshData`] is the CPU-side description (positions + triangle-list
//! indices), validated before any GPU upload. [`StaticMesh`] owns the
//! uploaded vertex/index buffers; the data is immutable for the mesh's
//! whole lifetime.

mod data;
mod static_mesh;
mod vertex;

pub use data::MeshData;
pub use static_mesh::StaticMesh;
pub use vertex::Vertex;
