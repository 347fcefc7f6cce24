use std::{io, path::Path, path::PathBuf};

use hedron::{de::obj, ser::ply};

/// Errors related to [converting](crate::convert()) meshes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path is missing or isn't a regular file.
    #[error("input file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    /// The input file name doesn't end in `.obj`.
    #[error("input file is not in OBJ format: {}", .0.display())]
    Format(PathBuf),
    /// The input isn't valid OBJ.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: obj::Error,
    },
    /// The input uses an OBJ feature that was turned off.
    #[error("unsupported OBJ feature in {}: {source}", .path.display())]
    UnsupportedFeature {
        path: PathBuf,
        #[source]
        source: obj::Error,
    },
    /// The input couldn't be read or decoded.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The output couldn't be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: ply::Error,
    },
}

impl Error {
    /// Sort an OBJ reader error into the matching category.
    pub(crate) fn from_obj(path: &Path, err: obj::Error) -> Self {
        let path = path.to_owned();
        match err {
            obj::Error::Io(source) => Self::Load { path, source },
            source @ obj::Error::Unsupported { .. } => Self::UnsupportedFeature { path, source },
            source @ (obj::Error::Parse { .. } | obj::Error::Mesh(_)) => {
                Self::Parse { path, source }
            }
        }
    }

    /// The input or output path this error concerns.
    pub fn path(&self) -> &Path {
        match self {
            Error::NotFound(path) | Error::Format(path) => path,
            Error::Parse { path, .. }
            | Error::UnsupportedFeature { path, .. }
            | Error::Load { path, .. }
            | Error::Write { path, .. } => path,
        }
    }
}
