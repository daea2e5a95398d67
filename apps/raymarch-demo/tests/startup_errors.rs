use std::path::Path;
use std::process::{Command, Output};

const FRAGMENT: &str = "#version 450
layout(location = 0) out vec4 frag_color;
void main() { frag_color = vec4(1.0); }
";

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quadray-raymarch-demo"))
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn broken_vertex_shader_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("shader.vert"), "#version 450\nvoid main( {").unwrap();
    std::fs::write(dir.path().join("shader.frag"), FRAGMENT).unwrap();

    let output = run_in(dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("vertex shader compilation failed"), "{stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("compilation failed"));
}

#[cfg(unix)]
#[test]
fn missing_vertex_shader_exits_with_file_open_code() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    // exit(-3) is reported as 253 by the OS.
    assert_eq!(output.status.code(), Some(253));
    assert!(stderr.contains("shader.vert"), "{stderr}");
    assert!(output.stdout.is_empty());
}
