use std::{
    io::{self, BufWriter},
    path::Path,
};

use hedron::{
    de::obj::{self, ObjOptions},
    ser::ply::{self, PlyOptions},
    Mesh,
};

use crate::{validate_input, Error};

/// Settings for [convert_with].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// How the input is read
    pub obj: ObjOptions,
    /// How the output is written
    pub ply: PlyOptions,
}

/// Summary of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Report {
    /// Number of vertices written
    pub vertices: usize,
    /// Number of triangles written, after triangulation
    pub triangles: usize,
    /// Whether per-vertex normals were written
    pub normals: bool,
    /// Whether per-vertex colors were written
    pub colors: bool,
}

impl Report {
    fn of(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            normals: mesh.normals().is_some(),
            colors: mesh.colors().is_some(),
        }
    }
}

/// Convert the OBJ file at `input` to a PLY file at `output`, with default [Options].
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Report, Error> {
    convert_with(input.as_ref(), output.as_ref(), &Options::default())
}

/// Convert the OBJ file at `input` to a PLY file at `output`.
///
/// The document is written to a temporary file beside `output`, which is renamed over `output`
/// once complete. On failure, `output` is left as it was.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn convert_with(input: &Path, output: &Path, options: &Options) -> Result<Report, Error> {
    validate_input(input)?;

    let mesh: Mesh = obj::load(input, &options.obj).map_err(|e| Error::from_obj(input, e))?;
    let report = Report::of(&mesh);
    tracing::info!(
        vertices = report.vertices,
        triangles = report.triangles,
        normals = report.normals,
        colors = report.colors,
        "loaded mesh"
    );

    persist_ply(&mesh, output, &options.ply).map_err(|source| Error::Write {
        path: output.to_owned(),
        source,
    })?;
    tracing::info!("wrote mesh");
    Ok(report)
}

fn persist_ply(mesh: &Mesh, path: &Path, options: &PlyOptions) -> Result<(), ply::Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".obj2ply-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tracing::trace!(tmp = %tmp.path().display(), "writing to temporary file");

    ply::write(mesh, BufWriter::new(tmp.as_file_mut()), options)?;
    tmp.as_file().sync_all()?;
    // dropping the error removes the temporary file
    tmp.persist(path).map_err(io::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn persists_complete_document() {
        let dir = tempfile::tempdir().unwrap();
        let mesh: Mesh = obj::parse(TRIANGLE, &ObjOptions::default()).unwrap();
        let output = dir.path().join("tri.ply");
        persist_ply(&mesh, &output, &PlyOptions::default()).unwrap();
        let doc = fs::read_to_string(&output).unwrap();
        assert!(doc.starts_with("ply\n"));
        assert!(doc.ends_with("end_header\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n"));
    }

    #[test]
    fn report_flags_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tri.obj");
        fs::write(&input, "v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n").unwrap();
        let report = convert(&input, dir.path().join("tri.ply")).unwrap();
        assert_eq!(
            report,
            Report {
                vertices: 3,
                triangles: 1,
                normals: false,
                colors: true,
            }
        );
    }

    #[test]
    fn leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tri.obj");
        fs::write(&input, TRIANGLE).unwrap();
        convert(&input, dir.path().join("tri.ply")).unwrap();

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["tri.obj", "tri.ply"]);
    }

    #[test]
    fn write_failure_keeps_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tri.obj");
        let output = dir.path().join("tri.ply");
        fs::write(&input, TRIANGLE).unwrap();
        fs::write(&output, "previous").unwrap();

        let options = Options {
            ply: PlyOptions {
                comments: vec!["bad\ncomment".to_owned()],
            },
            ..Default::default()
        };
        let err = convert_with(&input, &output, &options).unwrap_err();
        assert!(matches!(err, Error::Write { .. }), "{err}");
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
