use aex_core::scene::{AvAttributes, Layer};
use aex_core::Project;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn aex(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aex"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run aex")
}

fn write_snapshot(dir: &TempDir) -> String {
    let mut project = Project::new();
    let comp = project.add_comp("Main", AvAttributes::default());
    project
        .comp_mut(comp)
        .unwrap()
        .add_layer(Layer::null("Null 1", 10.0));
    let path = dir.path().join("scene.json");
    fs::write(&path, serde_json::to_string(&project).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "aex failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_get_prints_the_project_document() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);

    let result = stdout_json(&aex(&["get", &snapshot]));
    assert_eq!(result["object"]["type"], "aex:project");
    assert_eq!(result["object"]["comps"][0]["name"], "Main");
    assert_eq!(result["object"]["comps"][0]["layers"][0]["name"], "Null 1");
    assert_eq!(result["log"], json!([]));
}

#[test]
fn test_get_layer_target_to_file() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let out = dir.path().join("layer.json");

    let output = aex(&[
        "get",
        &snapshot,
        "--target",
        "layer:1:1",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(read_json(&out)["object"]["type"], "aex:layer:null");
}

#[test]
fn test_update_saves_the_snapshot_in_place() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let document = dir.path().join("doc.json");
    fs::write(
        &document,
        json!({ "type": "aex:item:av:comp", "name": "Renamed" }).to_string(),
    )
    .unwrap();

    let result = stdout_json(&aex(&[
        "update",
        &snapshot,
        document.to_str().unwrap(),
        "--target",
        "comp:1",
    ]));
    assert_eq!(result["stats"]["compCount"], 1);

    let reread = stdout_json(&aex(&["get", &snapshot, "--target", "comp:1"]));
    assert_eq!(reread["object"]["name"], "Renamed");
}

#[test]
fn test_create_with_options_file() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let document = dir.path().join("solid.json");
    fs::write(
        &document,
        json!({ "type": "aex:item:av:footage:solid", "name": "Red", "color": [1, 0, 0] })
            .to_string(),
    )
    .unwrap();
    let options = dir.path().join("options.json");
    fs::write(&options, json!({ "layerMatchBy": "name" }).to_string()).unwrap();
    let saved = dir.path().join("out.json");

    let output = aex(&[
        "create",
        &snapshot,
        document.to_str().unwrap(),
        "--options",
        options.to_str().unwrap(),
        "--output",
        saved.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let items = read_json(&saved)["items"].as_array().unwrap().len();
    assert_eq!(items, 2);
    // The source snapshot is left alone when an output is given.
    let original = read_json(Path::new(&snapshot))["items"].as_array().unwrap().len();
    assert_eq!(original, 1);
}

#[test]
fn test_unsupported_create_fails_with_the_reason() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let document = dir.path().join("layer.json");
    fs::write(&document, json!({ "type": "aex:layer:null" }).to_string()).unwrap();

    let output = aex(&["create", &snapshot, document.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Creating a 'aex:layer:null' under a 'aex:project' is not supported"));
}

#[test]
fn test_bad_target_is_rejected_by_the_parser() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let output = aex(&["get", &snapshot, "--target", "layer:one"]);
    assert!(!output.status.success());
}

#[test]
fn test_prescan_counts_nodes() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let output = aex(&["prescan", &snapshot]);
    assert!(output.status.success());
    let count: usize = String::from_utf8_lossy(&output.stdout).trim().parse().unwrap();
    assert!(count > 2);
}

#[test]
fn test_schema_describes_documents() {
    let output = aex(&["schema"]);
    let schema = stdout_json(&output);
    assert!(schema.get("anyOf").is_some() || schema.get("$defs").is_some());
}
