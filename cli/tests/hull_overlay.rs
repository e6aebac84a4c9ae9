use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const DIAGRAM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="640" height="320">
  <g data-entity="Carlos">
    <rect x="10" y="10" width="40" height="20"/>
    <rect x="90" y="20" width="40" height="20"/>
    <rect x="40" y="90" width="40" height="20"/>
    <text x="50" y="60">Carlos</text>
  </g>
  <g data-entity="Carl">
    <rect x="220" y="10" width="40" height="20"/>
    <rect x="300" y="40" width="40" height="20"/>
    <circle cx="250" cy="110" r="12"/>
  </g>
  <g data-entity="Luca" transform="translate(420, 20)">
    <rect x="0" y="0" width="50" height="20"/>
    <ellipse cx="120" cy="40" rx="12" ry="6"/>
    <path d="M30 120 L70 120 L50 140 Z"/>
  </g>
</svg>
"#;

const AREAS: &str = r##"
- name: Carlos
  label: Carlos
  color: "#cc3333"
  areas: [Carlos]
- name: Carl
  label: Carl
  color: "#33aa33"
  areas: [Carl]
- name: Luca
  label: Luca
  color: rgb(40, 60, 200)
  areas: [Luca]
"##;

fn hull_overlay() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hull-overlay"))
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn cli_overlays_three_focus_areas() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);
    let config = write(tmp.path(), "areas.yaml", AREAS);
    let out = tmp.path().join("out.svg");

    hull_overlay()
        .args(["-i", input.to_str().unwrap(), "-c", config.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read output");
    assert!(svg.starts_with("<?xml"));
    assert_eq!(svg.matches(r#"class="hull-layers""#).count(), 3);
    for (name, color) in [("Carlos", "#cc3333"), ("Carl", "#33aa33"), ("Luca", "#283cc8")] {
        assert!(svg.contains(&format!(r#"data-hull="{name}""#)), "missing hull for {name}");
        assert!(svg.contains(&format!(r#"fill="{color}""#)), "missing color {color}");
        assert_eq!(
            svg.matches(&format!(r#"dominant-baseline="middle">{name}</text>"#)).count(),
            1,
            "label for {name}"
        );
    }
    // the original diagram is kept between hulls and labels
    let first_layer = svg.find("hull-layers").unwrap();
    let diagram_group = svg.find(r#"data-entity="Carlos""#).unwrap();
    let first_label = svg.find(r#"text-anchor="middle""#).unwrap();
    assert!(first_layer < diagram_group && diagram_group < first_label);
    assert!(svg.contains("xmlns:xlink"));
}

#[test]
fn cli_writes_names_to_stdout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);

    let output = hull_overlay()
        .args(["Carl*", "-i", input.to_str().unwrap(), "--fragments-only", "--curve", "basis-closed"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"<g class="hull">"#));
    assert!(stdout.contains(">Carl*</text>"));
    assert!(stdout.contains(r##"fill="#4682b4""##));
}

#[test]
fn cli_exports_geojson() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);
    let geojson = tmp.path().join("hulls.geojson");

    hull_overlay()
        .args(["Luca", "-i", input.to_str().unwrap(), "--geojson", geojson.to_str().unwrap()])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&geojson).unwrap()).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"][0]["properties"]["name"], "Luca");
}

#[test]
fn cli_unwritable_geojson_emits_no_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);
    let geojson = tmp.path().join("missing-dir").join("hulls.geojson");

    let output = hull_overlay()
        .args(["Luca", "-i", input.to_str().unwrap(), "--geojson", geojson.to_str().unwrap()])
        .output()
        .expect("run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "{}", String::from_utf8_lossy(&output.stdout));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hulls.geojson"));
}

#[test]
fn cli_unknown_group_fails_with_insufficient_points() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);

    let output = hull_overlay()
        .args(["Nobody", "-i", input.to_str().unwrap()])
        .output()
        .expect("run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nobody"), "{stderr}");
    assert!(stderr.contains("Insufficient points"), "{stderr}");
}

#[test]
fn cli_missing_focus_group_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);
    let config = write(
        tmp.path(),
        "areas.json",
        r#"[{"name": "team", "label": "Team", "color": "red", "areas": ["Carlos", "Ghost"]}]"#,
    );

    let output = hull_overlay()
        .args(["-i", input.to_str().unwrap(), "-c", config.to_str().unwrap()])
        .output()
        .expect("run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ghost"));
}

#[test]
fn cli_requires_names_or_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write(tmp.path(), "diagram.svg", DIAGRAM);

    hull_overlay().args(["-i", input.to_str().unwrap()]).assert().failure();
}

#[test]
fn cli_rejects_unknown_curve_before_reading_input() {
    let output = hull_overlay()
        .args(["Carl", "-i", "/does/not/exist.svg", "--curve", "zigzag"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("zigzag"), "{stderr}");
    assert!(!stderr.contains("diagram file"), "{stderr}");
}

#[test]
fn cli_prints_schema() {
    let output = hull_overlay().arg("--print-schema").output().expect("run");
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema.to_string().contains("FocusArea"));
}
