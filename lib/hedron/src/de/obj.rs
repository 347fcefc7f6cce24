//! Utilities for reading [Wavefront OBJ](https://paulbourke.net/dataformats/obj/) documents as a [Mesh].
//!
//! # Notes
//!
//! Only polygonal geometry is read. Everything else is skipped without error.
//!
//! * `v x y z [w]`: vertex position; `w` is ignored
//!   * `v x y z r g b [a]`: vertex position with color. If every color component in the
//!     document is `<= 1.0`, colors are read as normalized; otherwise all of them are read as
//!     `0..=255`.
//! * `vn x y z`: normal, referenced by faces
//! * `f v₁ v₂ v₃ ...`: polygon; each element is one of `v`, `v/vt`, `v//vn`, `v/vt/vn`
//!   * indices are 1-based; negative indices count back from the most recently defined element
//!   * polygons are fan-triangulated from their first vertex
//!   * texture indices are checked for syntax, then discarded
//! * `#` starts a comment, and a line whose non-comment text ends in `\` continues on the next
//!   line
//!
//! A vertex takes the normal referenced by the first face corner using it. Normals and colors
//! are only kept if every vertex ends up with one.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use num_traits::ToPrimitive;

use crate::{polygon, ArrayIndex, Coordinate, Mesh, MeshError, Normal, Position, Rgba};

/// Settings for [read].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjOptions {
    /// Whether negative (relative) face indices are resolved. If `false`, they're rejected with
    /// [Error::Unsupported].
    pub relative_indices: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            relative_indices: true,
        }
    }
}

/// OBJ features which may be declined, depending on [ObjOptions].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    RelativeIndex,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::RelativeIndex => f.write_str("relative (negative) face index"),
        }
    }
}

/// The kind of element a face index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Vertex,
    Normal,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Vertex => f.write_str("vertex"),
            IndexKind::Normal => f.write_str("normal"),
        }
    }
}

/// Ways in which an OBJ statement can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("`{statement}` has {found} components; expected at least 3")]
    MissingComponents {
        statement: &'static str,
        found: usize,
    },
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
    #[error("invalid face element: {0:?}")]
    InvalidFaceElement(String),
    #[error("face has {0} vertices; expected at least 3")]
    DegenerateFace(usize),
    #[error("face references {kind} {index}, but only {defined} are defined")]
    IndexOutOfRange {
        kind: IndexKind,
        index: i64,
        defined: usize,
    },
    #[error("vertex {0} doesn't fit in the mesh's index type")]
    IndexOverflow(usize),
}

/// Errors related to reading OBJ documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading failed, or the document isn't UTF-8.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A statement is malformed.
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    /// A statement uses a feature turned off in [ObjOptions].
    #[error("line {line}: {feature} is not supported")]
    Unsupported { line: usize, feature: Feature },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl Error {
    #[inline]
    fn parse(line: usize, kind: ParseErrorKind) -> Self {
        Self::Parse { line, kind }
    }

    /// The 1-based line number at which this error occurred, if it's tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } | Error::Unsupported { line, .. } => Some(*line),
            Error::Io(_) | Error::Mesh(_) => None,
        }
    }
}

/// Read an OBJ document from a file.
pub fn load<Real: Coordinate, Idx: ArrayIndex>(
    path: impl AsRef<Path>,
    options: &ObjOptions,
) -> Result<Mesh<Real, Idx>, Error> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading OBJ document");
    let file = File::open(path)?;
    read(BufReader::new(file), options)
}

/// Parse an OBJ document held in memory.
pub fn parse<Real: Coordinate, Idx: ArrayIndex>(
    src: &str,
    options: &ObjOptions,
) -> Result<Mesh<Real, Idx>, Error> {
    read(src.as_bytes(), options)
}

/// Read an OBJ document from a buffered reader.
///
/// Invalid UTF-8 is reported as an [Error::Io] of kind [io::ErrorKind::InvalidData].
pub fn read<Real: Coordinate, Idx: ArrayIndex>(
    reader: impl BufRead,
    options: &ObjOptions,
) -> Result<Mesh<Real, Idx>, Error> {
    let mut parser = Parser::new(options);
    let mut pending = String::new();
    let mut start = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if pending.is_empty() {
            start = i + 1;
        }
        let code = line.split_once('#').map_or(line.as_str(), |(code, _)| code);
        if let Some(head) = code.trim_end().strip_suffix('\\') {
            pending.push_str(head);
            pending.push(' ');
            continue;
        }
        pending.push_str(code);
        parser.statement(start, &pending)?;
        pending.clear();
    }
    if !pending.is_empty() {
        parser.statement(start, &pending)?;
    }
    parser.finish()
}

struct Parser<'opt, Real: Coordinate, Idx: ArrayIndex> {
    options: &'opt ObjOptions,
    positions: Vec<Position<Real>>,
    colors: Vec<Option<RawColor<Real>>>,
    /// Per-position normals, assigned by face corners
    vertex_normals: Vec<Option<Normal<Real>>>,
    /// `vn` records, in document order
    normals: Vec<Normal<Real>>,
    triangles: Vec<[Idx; 3]>,
    polygon: Vec<Idx>,
    skipped: usize,
}

impl<'opt, Real: Coordinate, Idx: ArrayIndex> Parser<'opt, Real, Idx> {
    fn new(options: &'opt ObjOptions) -> Self {
        Self {
            options,
            positions: Vec::new(),
            colors: Vec::new(),
            vertex_normals: Vec::new(),
            normals: Vec::new(),
            triangles: Vec::new(),
            polygon: Vec::new(),
            skipped: 0,
        }
    }

    /// Interpret one logical line, with comments already removed.
    fn statement(&mut self, line: usize, text: &str) -> Result<(), Error> {
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            None => Ok(()),
            Some("v") => self.vertex(line, tokens),
            Some("vn") => self.normal(line, tokens),
            Some("f") => self.face(line, tokens),
            Some(keyword) => {
                tracing::trace!(line, keyword, "skipping statement");
                self.skipped += 1;
                Ok(())
            }
        }
    }

    fn vertex(&mut self, line: usize, tokens: SplitWhitespace<'_>) -> Result<(), Error> {
        let values = numbers::<Real>(line, tokens)?;
        let color = match values.len() {
            found @ 0..=2 => {
                return Err(Error::parse(
                    line,
                    ParseErrorKind::MissingComponents {
                        statement: "v",
                        found,
                    },
                ))
            }
            3..=5 => None,
            found => Some(RawColor {
                rgb: [values[3], values[4], values[5]],
                alpha: (found > 6).then(|| values[6]),
            }),
        };
        self.positions
            .push(Position::new(values[0], values[1], values[2]));
        self.colors.push(color);
        self.vertex_normals.push(None);
        Ok(())
    }

    fn normal(&mut self, line: usize, tokens: SplitWhitespace<'_>) -> Result<(), Error> {
        let values = numbers::<Real>(line, tokens)?;
        if values.len() < 3 {
            return Err(Error::parse(
                line,
                ParseErrorKind::MissingComponents {
                    statement: "vn",
                    found: values.len(),
                },
            ));
        }
        self.normals
            .push(Normal::new(values[0], values[1], values[2]));
        Ok(())
    }

    fn face(&mut self, line: usize, tokens: SplitWhitespace<'_>) -> Result<(), Error> {
        self.polygon.clear();
        for element in tokens {
            let invalid =
                || Error::parse(line, ParseErrorKind::InvalidFaceElement(element.to_owned()));
            let mut parts = element.split('/');
            let v = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
            let vt = parts.next().filter(|s| !s.is_empty());
            let vn = parts.next().filter(|s| !s.is_empty());
            if parts.next().is_some() {
                return Err(invalid());
            }

            let vi = self.resolve(line, v, IndexKind::Vertex, self.positions.len())?;
            if let Some(vt) = vt {
                vt.parse::<i64>().map_err(|_| invalid())?;
            }
            if let Some(vn) = vn {
                let ni = self.resolve(line, vn, IndexKind::Normal, self.normals.len())?;
                let slot = &mut self.vertex_normals[vi];
                if slot.is_none() {
                    *slot = Some(self.normals[ni]);
                }
            }
            let idx = Idx::from_usize(vi)
                .ok_or_else(|| Error::parse(line, ParseErrorKind::IndexOverflow(vi)))?;
            self.polygon.push(idx);
        }

        if self.polygon.len() < 3 {
            return Err(Error::parse(
                line,
                ParseErrorKind::DegenerateFace(self.polygon.len()),
            ));
        }
        self.triangles.extend(polygon::fan(&self.polygon));
        Ok(())
    }

    /// Resolve a 1-based (or negative, relative) index against the `defined` elements read so far.
    fn resolve(
        &self,
        line: usize,
        token: &str,
        kind: IndexKind,
        defined: usize,
    ) -> Result<usize, Error> {
        let index: i64 = token.parse().map_err(|_| {
            Error::parse(line, ParseErrorKind::InvalidFaceElement(token.to_owned()))
        })?;
        let resolved = match index {
            0 => None,
            1.. => usize::try_from(index - 1).ok(),
            _ if !self.options.relative_indices => {
                return Err(Error::Unsupported {
                    line,
                    feature: Feature::RelativeIndex,
                })
            }
            _ => usize::try_from(index.unsigned_abs())
                .ok()
                .and_then(|back| defined.checked_sub(back)),
        };
        resolved.filter(|&i| i < defined).ok_or_else(|| {
            Error::parse(
                line,
                ParseErrorKind::IndexOutOfRange {
                    kind,
                    index,
                    defined,
                },
            )
        })
    }

    fn finish(self) -> Result<Mesh<Real, Idx>, Error> {
        tracing::debug!(
            vertices = self.positions.len(),
            triangles = self.triangles.len(),
            skipped = self.skipped,
            "parsed OBJ document"
        );
        let has_vertices = !self.positions.is_empty();
        let mut mesh = Mesh::new(self.positions, self.triangles)?;

        if has_vertices && !self.normals.is_empty() {
            match self.vertex_normals.into_iter().collect::<Option<Vec<_>>>() {
                Some(normals) => mesh = mesh.with_normals(normals)?,
                None => tracing::warn!("not every vertex is given a normal; discarding normals"),
            }
        }

        if self.colors.iter().any(Option::is_some) {
            match self.colors.into_iter().collect::<Option<Vec<_>>>() {
                Some(colors) => {
                    let normalized = colors.iter().all(RawColor::is_normalized);
                    tracing::trace!(normalized, "quantizing vertex colors");
                    mesh = mesh.with_colors(
                        colors.iter().map(|c| c.quantize(normalized)).collect(),
                    )?;
                }
                None => tracing::warn!("not every vertex has a color; discarding colors"),
            }
        }

        Ok(mesh)
    }
}

fn numbers<Real: Coordinate>(line: usize, tokens: SplitWhitespace<'_>) -> Result<Vec<Real>, Error> {
    tokens
        .map(|token| {
            token
                .parse::<Real>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    Error::parse(line, ParseErrorKind::InvalidNumber(token.to_owned()))
                })
        })
        .collect()
}

/// A vertex color as written in the document, before its range is known.
#[derive(Debug, Clone, Copy)]
struct RawColor<Real> {
    rgb: [Real; 3],
    alpha: Option<Real>,
}

impl<Real: Coordinate> RawColor<Real> {
    fn is_normalized(&self) -> bool {
        self.rgb.iter().chain(&self.alpha).all(|&v| v <= Real::one())
    }

    /// Convert to 8 bits per channel; `normalized` applies to the whole document.
    fn quantize(&self, normalized: bool) -> Rgba {
        let channel = |value: Real| {
            let value = value.to_f64().unwrap_or_default();
            let value = if normalized { value * 255.0 } else { value };
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            channel(self.rgb[0]),
            channel(self.rgb[1]),
            channel(self.rgb[2]),
            self.alpha.map_or(u8::MAX, channel),
        )
    }
}
