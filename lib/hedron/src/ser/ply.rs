//! Utilities for serializing [Meshes](crate::Mesh) to [PLY](https://paulbourke.net/dataformats/ply/).
//!
//! # Notes
//!
//! Only the `ascii 1.0` encoding is written. Output is structured as:
//!
//! * header
//!   * `ply`
//!   * `format ascii 1.0`
//!   * `comment ...`: one line for [GENERATOR_ID], then one per [PlyOptions::comments] entry
//!   * `element vertex <count>`
//!     * `property <type> x`, `y`, `z`; `<type>` is [Coordinate::PLY_TYPE]
//!     * `property <type> nx`, `ny`, `nz`, if the mesh has normals
//!     * `property uchar red`, `green`, `blue`, `alpha`, if the mesh has colors
//!   * `element face <count>`
//!     * `property list uchar int vertex_indices`
//!   * `end_header`
//! * one line per vertex, properties in declaration order
//! * one line per triangle: `3 a b c`, with 0-based indices
//!
//! Numbers are written with Rust's shortest round-trip representation, so coordinates survive a
//! write/read cycle exactly.

use std::io::{self, Write};

use num_traits::{AsPrimitive, ToPrimitive};

use crate::{ArrayIndex, Coordinate, Mesh};

/// The value of the generator `comment` line in output headers.
pub const GENERATOR_ID: &str = concat!("hedron@", env!("CARGO_PKG_VERSION"));

/// Errors related to writing PLY documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("vertex index {0} doesn't fit in a PLY `int`")]
    IndexOverflow(usize),
    #[error("header comments may not contain line breaks: {0:?}")]
    MultilineComment(String),
}

/// Settings for [write].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PlyOptions {
    /// Extra `comment` lines, written after the generator line
    pub comments: Vec<String>,
}

/// Write a mesh as an ASCII PLY document.
///
/// The writer isn't buffered here; wrap it in a [BufWriter](std::io::BufWriter) if needed.
pub fn write<Real: Coordinate, Idx: ArrayIndex>(
    mesh: &Mesh<Real, Idx>,
    mut out: impl Write,
    options: &PlyOptions,
) -> Result<(), Error> {
    if let Some(c) = options.comments.iter().find(|c| c.contains(['\n', '\r'])) {
        return Err(Error::MultilineComment(c.clone()));
    }

    let normals = mesh.normals();
    let colors = mesh.colors();

    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment generator {GENERATOR_ID}")?;
    for comment in &options.comments {
        writeln!(out, "comment {comment}")?;
    }
    writeln!(out, "element vertex {}", mesh.vertex_count())?;
    for axis in ["x", "y", "z"] {
        writeln!(out, "property {} {axis}", Real::PLY_TYPE)?;
    }
    if normals.is_some() {
        for axis in ["nx", "ny", "nz"] {
            writeln!(out, "property {} {axis}", Real::PLY_TYPE)?;
        }
    }
    if colors.is_some() {
        for channel in ["red", "green", "blue", "alpha"] {
            writeln!(out, "property uchar {channel}")?;
        }
    }
    writeln!(out, "element face {}", mesh.triangle_count())?;
    writeln!(out, "property list uchar int vertex_indices")?;
    writeln!(out, "end_header")?;

    for (i, p) in mesh.positions().iter().enumerate() {
        write!(out, "{} {} {}", p.x, p.y, p.z)?;
        if let Some(n) = normals.map(|n| &n[i]) {
            write!(out, " {} {} {}", n.x, n.y, n.z)?;
        }
        if let Some(c) = colors.map(|c| &c[i]) {
            write!(out, " {} {} {} {}", c.x, c.y, c.z, c.w)?;
        }
        writeln!(out)?;
    }

    for tri in mesh.triangles() {
        write!(out, "3")?;
        for &idx in tri {
            let idx: i32 = idx
                .to_i32()
                .ok_or_else(|| Error::IndexOverflow(idx.as_()))?;
            write!(out, " {idx}")?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        normals = normals.is_some(),
        colors = colors.is_some(),
        "wrote PLY document"
    );
    Ok(())
}
