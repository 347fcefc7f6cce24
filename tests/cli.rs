//! Invocations of the `obj2ply` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_obj2ply"));
    cmd.env_remove("OBJ2PLY_LOG_FILTER")
        .env_remove("OBJ2PLY_NO_RELATIVE_INDICES");
    cmd
}

fn triangle_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tri.obj"), TRIANGLE).unwrap();
    dir
}

#[test]
fn no_arguments() {
    cli()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn one_argument() {
    cli()
        .arg("tri.obj")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn too_many_arguments() {
    cli()
        .args(["a.obj", "b.ply", "c.ply"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn success() {
    let dir = triangle_dir();
    let output = dir.path().join("tri.ply");
    cli()
        .arg(dir.path().join("tri.obj"))
        .arg(&output)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Success:").and(predicate::str::contains("tri.ply")));
    assert!(fs::read_to_string(&output)
        .unwrap()
        .ends_with("end_header\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n"));
}

#[test]
fn comments() {
    let dir = triangle_dir();
    let output = dir.path().join("tri.ply");
    cli()
        .args(["-c", "scanned 2024"])
        .arg(dir.path().join("tri.obj"))
        .arg(&output)
        .assert()
        .success();
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("\ncomment scanned 2024\n"));
}

#[test]
fn missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.ply");
    cli()
        .arg(dir.path().join("missing.obj"))
        .arg(&output)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: input file does not exist"));
    assert!(!output.exists());
}

#[test]
fn not_an_obj() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mesh.txt");
    fs::write(&input, TRIANGLE).unwrap();
    cli()
        .arg(&input)
        .arg(dir.path().join("out.ply"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not in OBJ format"));
}

#[test]
fn relative_indices_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rel.obj");
    fs::write(&input, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
    let output = dir.path().join("out.ply");

    cli()
        .arg("--no-relative-indices")
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not supported"));
    assert!(!output.exists());

    cli().arg(&input).arg(&output).assert().success();
}
