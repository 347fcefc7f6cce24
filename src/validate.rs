use std::path::Path;

use crate::Error;

/// Check that `path` names an existing file whose name ends in `.obj` (case-insensitive).
///
/// Existence is checked before the extension. No file content is read.
pub fn validate_input(path: &Path) -> Result<(), Error> {
    if !path.metadata().is_ok_and(|m| m.is_file()) {
        return Err(Error::NotFound(path.to_owned()));
    }
    let is_obj = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(".obj"));
    if !is_obj {
        return Err(Error::Format(path.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn accepts_any_case() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.obj", "b.OBJ", "c.Obj", ".obj", "d.tar.OBJ"] {
            let path = dir.path().join(name);
            fs::write(&path, "").unwrap();
            validate_input(&path).unwrap();
        }
    }

    #[test]
    fn missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.obj");
        assert!(matches!(validate_input(&path), Err(Error::NotFound(p)) if p == path));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.obj");
        fs::create_dir(&path).unwrap();
        assert!(matches!(validate_input(&path), Err(Error::NotFound(_))));
    }

    #[test]
    fn wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["mesh.ply", "mesh", "mesh.obj.txt", "obj", "mesh_obj"] {
            let path = dir.path().join(name);
            fs::write(&path, "v 0 0 0\n").unwrap();
            assert!(
                matches!(validate_input(&path), Err(Error::Format(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn existence_is_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(validate_input(&path), Err(Error::NotFound(_))));
    }
}
