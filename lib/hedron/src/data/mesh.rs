pub mod polygon;

use num_traits::AsPrimitive;

use crate::{ArrayIndex, Coordinate, Normal, Position, Rgba};

/// Per-vertex attributes a [Mesh] may optionally carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Normal,
    Color,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Normal => f.write_str("normal"),
            Attribute::Color => f.write_str("color"),
        }
    }
}

/// Errors related to [Mesh] construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// A triangle index is past the last vertex.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {len} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        len: usize,
    },
    /// An attribute doesn't have exactly one value per vertex.
    #[error("mesh has {expected} vertices, but {found} {attribute} values")]
    AttributeLength {
        attribute: Attribute,
        expected: usize,
        found: usize,
    },
}

/// An indexed triangle mesh.
///
/// # Invariants
///
/// * every index in `triangles` is `< positions.len`
/// * `normals.len` == `colors.len` == `positions.len`, where present
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<Real: Coordinate = f64, Idx: ArrayIndex = u32> {
    positions: Vec<Position<Real>>,
    triangles: Vec<[Idx; 3]>,
    normals: Option<Vec<Normal<Real>>>,
    colors: Option<Vec<Rgba>>,
}

impl<Real: Coordinate, Idx: ArrayIndex> Default for Mesh<Real, Idx> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Real: Coordinate, Idx: ArrayIndex> Mesh<Real, Idx> {
    /// A mesh with no vertices, triangles, or attributes.
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            triangles: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    /// Construct a mesh from vertex positions and triangles indexing into them.
    pub fn new(
        positions: Vec<Position<Real>>,
        triangles: Vec<[Idx; 3]>,
    ) -> Result<Self, MeshError> {
        let len = positions.len();
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(index) = tri.iter().map(|&i| -> usize { i.as_() }).find(|&i| i >= len) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    len,
                });
            }
        }
        Ok(Self {
            positions,
            triangles,
            normals: None,
            colors: None,
        })
    }

    /// Attach one normal per vertex.
    pub fn with_normals(mut self, normals: Vec<Normal<Real>>) -> Result<Self, MeshError> {
        self.check_attribute(Attribute::Normal, normals.len())?;
        self.normals = Some(normals);
        Ok(self)
    }

    /// Attach one color per vertex.
    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Result<Self, MeshError> {
        self.check_attribute(Attribute::Color, colors.len())?;
        self.colors = Some(colors);
        Ok(self)
    }

    fn check_attribute(&self, attribute: Attribute, found: usize) -> Result<(), MeshError> {
        if found == self.positions.len() {
            Ok(())
        } else {
            Err(MeshError::AttributeLength {
                attribute,
                expected: self.positions.len(),
                found,
            })
        }
    }

    /// Vertex positions, in index order.
    #[inline]
    pub fn positions(&self) -> &[Position<Real>] {
        &self.positions
    }

    /// Triangles as 0-based vertex indices.
    #[inline]
    pub fn triangles(&self) -> &[[Idx; 3]] {
        &self.triangles
    }

    /// Per-vertex normals, if the mesh has them.
    #[inline]
    pub fn normals(&self) -> Option<&[Normal<Real>]> {
        self.normals.as_deref()
    }

    /// Per-vertex colors, if the mesh has them.
    #[inline]
    pub fn colors(&self) -> Option<&[Rgba]> {
        self.colors.as_deref()
    }

    /// Number of vertices; the length of [positions](Self::positions).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh carries `attribute`.
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Normal => self.normals.is_some(),
            Attribute::Color => self.colors.is_some(),
        }
    }
}
