//! End-to-end runs of the CLI against files on disk.

use std::fs;

use clap::Parser;

use mopro::MoproError;
use mopro_cli::{Args, run};

const MODEL: &str = r#"
[[packages]]
name = "Shop"
stereotype = "profile"

[[packages.packages]]
name = "Abstract Syntax Model"
stereotype = "Metamodel"

[[packages.packages.elements]]
id = 1
name = "Gateway"

[[packages.packages.diagrams]]
name = "Shop"
type = "Logical"
objects = [1]

[[packages]]
name = "Bank"
stereotype = "profile"
"#;

#[test]
fn test_compile_with_profile_config() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.toml");
    fs::write(&model, MODEL).unwrap();
    fs::write(
        dir.path().join("profile.config"),
        "technologyName=Web Shop\nversion=3\nbogus=1\n",
    )
    .unwrap();
    let output = dir.path().join("out.xml");

    let args = Args::parse_from([
        "mopro",
        model.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--profile-package",
        "Shop",
        "--non-interactive",
    ]);
    run(&args).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"windows-1252\"?>"));
    assert!(xml.contains("name=\"Web Shop\""));
    assert!(xml.contains("version=\"3\""));
    assert!(xml.contains("Web%20Shop::Gateway(UML::Class)"));
}

#[test]
fn test_ambiguous_package_fails_non_interactively() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.toml");
    fs::write(&model, MODEL).unwrap();

    let args = Args::parse_from(["mopro", model.to_str().unwrap(), "--non-interactive"]);
    let err = run(&args).unwrap_err();
    assert!(matches!(err, MoproError::AmbiguousProfilePackage { .. }));
}

#[test]
fn test_invalid_model_reports_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.toml");
    fs::write(
        &model,
        "[[packages]]\nname = \"Shop\"\n\n[[packages.diagrams]]\nname = \"D\"\nobjects = [42]\n",
    )
    .unwrap();

    let args = Args::parse_from(["mopro", model.to_str().unwrap(), "--non-interactive"]);
    let err = run(&args).unwrap_err();
    assert!(matches!(err, MoproError::Parse { .. }));
    assert!(!mopro_cli::error_adapter::to_reportables(&err).is_empty());
}

#[test]
fn test_missing_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args::parse_from([
        "mopro",
        dir.path().join("absent.toml").to_str().unwrap(),
        "--non-interactive",
    ]);
    assert!(matches!(run(&args), Err(MoproError::Io(_))));
}
