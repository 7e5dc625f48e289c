//! Builds the generated Go code with a small driver that decodes a message from stdin and
//! writes it back re-encoded. Skipped when no Go toolchain is installed.

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use sdp_contract::{
    collisions,
    shapes::{Greeting, Point, Shape},
    COLLISIONS_GO, SHAPES_GO,
};
use sdp_wire::Message as _;

const GO_MOD: &str = "module sdpcheck\n\ngo 1.18\n";

fn driver(cases: &[&str]) -> String {
    let cases = cases
        .iter()
        .map(|name| format!("\tcase *{name}:\n\t\tos.Stdout.Write(Encode{name}Message(v))\n"))
        .collect::<String>();
    format!(
        "package main

import (
\t\"fmt\"
\t\"io\"
\t\"os\"
)

func main() {{
\tdata, err := io.ReadAll(os.Stdin)
\tif err != nil {{
\t\tfmt.Fprintln(os.Stderr, err)
\t\tos.Exit(2)
\t}}
\tmsg, err := DecodeMessage(data)
\tif err != nil {{
\t\tfmt.Fprintln(os.Stderr, err)
\t\tos.Exit(1)
\t}}
\tswitch v := msg.(type) {{
{cases}\tdefault:
\t\tos.Exit(3)
\t}}
}}
"
    )
}

fn go_available() -> bool {
    Command::new("go")
        .arg("version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn go_command(work: &Path) -> Command {
    let mut command = Command::new("go");
    command
        .env("GOTOOLCHAIN", "local")
        .env("GOCACHE", work.join("cache"))
        .env("GOPATH", work.join("gopath"));
    command
}

/// Writes a Go module with `source` and the driver into `name` and builds it.
fn build(name: &str, source: &str, cases: &[&str]) -> PathBuf {
    let work = Path::new(env!("CARGO_TARGET_TMPDIR")).join("go");
    let dir = work.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("go.mod"), GO_MOD).unwrap();
    fs::write(dir.join(format!("{name}.go")), source).unwrap();
    fs::write(dir.join("main.go"), driver(cases)).unwrap();

    let binary = dir.join("driver");
    let output = go_command(&work)
        .current_dir(&dir)
        .arg("build")
        .arg("-o")
        .arg(&binary)
        .arg(".")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "go build failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    binary
}

fn run(binary: &Path, input: &[u8]) -> Output {
    let mut child = Command::new(binary)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

fn assert_echoes(binary: &Path, framed: &[u8]) {
    let output = run(binary, framed);
    assert!(
        output.status.success(),
        "driver failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(output.stdout, framed);
}

#[test]
fn go_shapes_agree_with_rust() {
    if !go_available() {
        eprintln!("go toolchain not found, skipping");
        return;
    }
    let binary = build("shapes", SHAPES_GO, &["Point", "Shape", "Greeting"]);

    let shape = Shape {
        a: 0xff,
        b: 0xbeef,
        c: 567_890,
        d: u64::MAX,
        e: -1,
        f: i16::MIN,
        g: -567_890,
        h: i64::MIN,
        ratio: f32::NAN,
        scale: -0.0,
        flag: true,
        label: "héllo".into(),
        points: vec![Point { x: 1.5, y: f64::INFINITY }],
        anchor: None,
        tags: Some(vec![String::new(), "a".into()]),
        grid: vec![vec![], vec![1, -2, 3]],
        sparse: vec![Some(7), None, Some(0)],
    };
    let messages = [
        shape.encode_message(),
        Shape {
            anchor: Some(Point { x: 0.0, y: -1.0 }),
            tags: None,
            ..shape.clone()
        }
        .encode_message(),
        Point { x: 3.0, y: 4.0 }.encode_message(),
        Greeting {
            u32_field: 567_890,
            str_field: "Hello, C++!".into(),
        }
        .encode_message(),
    ];
    for framed in &messages {
        assert_echoes(&binary, framed);
    }

    let framed = &messages[0];
    for k in [0, 5, 9, 10, framed.len() / 2, framed.len() - 1] {
        let output = run(&binary, &framed[..k]);
        assert_eq!(output.status.code(), Some(1), "prefix of {k} bytes");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unexpected end of data"), "prefix of {k} bytes: {stderr}");
    }
}

#[test]
fn go_collisions_build_and_agree() {
    if !go_available() {
        eprintln!("go toolchain not found, skipping");
        return;
    }
    let binary = build("collisions", COLLISIONS_GO, &["Decode", "ResultSet"]);

    let value = collisions::ResultSet {
        results: vec![collisions::Encode {
            value: i32::MIN,
            other: Some("o".into()),
            ok: false,
            err: true,
        }],
        buf: vec![collisions::Debug { u32: 1, size: 2 }],
    };
    assert_echoes(&binary, &value.encode_message());
}
