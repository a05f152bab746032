use std::fs;
use std::path::Path;
use std::process::Command;

use k2m_diagrams::{DiagramFormat, DiagramLanguage, KrokiLink};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_kroki2md")));
    cmd.current_dir(dir).env_remove("KROKI_URL").env_remove("RUST_LOG");
    cmd
}

fn mermaid_link(base: &str, format: DiagramFormat, source: &str) -> String {
    KrokiLink::new(base, DiagramLanguage::Mermaid, format, source)
        .unwrap()
        .to_string()
}

fn setup(document: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.mmd"), "graph TD; A-->B;").unwrap();
    fs::write(dir.path().join("README.md"), document).unwrap();
    dir
}

#[test]
fn cli_replaces_placeholder() {
    let dir = setup("# Title\n![a.mmd]\nfooter\n");

    cmd(dir.path())
        .args(["-i", "a.mmd", "-f", "svg", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Conversion completed"))
        .stderr(predicate::str::contains("Found 1 update points"));

    let link = mermaid_link("https://kroki.io", DiagramFormat::Svg, "graph TD; A-->B;");
    assert!(link.starts_with("https://kroki.io/mermaid/svg/"));
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        format!("# Title\n![a.mmd]({link})\nfooter\n")
    );
}

#[test]
fn cli_dry_run_leaves_document_untouched() {
    let original = "![a.mmd]\n";
    let dir = setup(original);

    cmd(dir.path())
        .args(["-i", "a.mmd", "--dry-run", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("This was a dry run"))
        .stderr(predicate::str::contains("Found 1 update points"));

    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        original
    );
}

#[test]
fn cli_skips_unsupported_files() {
    let dir = setup("![notes.txt]\n![a.mmd]\n");
    fs::write(dir.path().join("notes.txt"), "plain text").unwrap();

    cmd(dir.path())
        .args(["-i", "notes.txt", "-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\tSkipping notes.txt"))
        .stderr(predicate::str::contains("Conversion completed with warnings"));

    let link = mermaid_link("https://kroki.io", DiagramFormat::Svg, "graph TD; A-->B;");
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        format!("![notes.txt]\n![a.mmd]({link})\n")
    );
}

#[test]
fn cli_no_match_keeps_document_bytes() {
    let original = "# Doc\r\n\r\nNo placeholders here\r\n![b.mmd]";
    let dir = setup(original);

    cmd(dir.path())
        .args(["-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 0 update points"));

    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        original
    );
}

#[test]
fn cli_missing_input_fails_without_writing() {
    let original = "![a.mmd]\n![missing.mmd]\n";
    let dir = setup(original);

    cmd(dir.path())
        .args(["-i", "a.mmd", "-i", "missing.mmd", "README.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.mmd"));

    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        original
    );
}

#[test]
fn cli_missing_document_fails() {
    let dir = setup("");

    cmd(dir.path())
        .args(["-i", "a.mmd", "NOPE.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("NOPE.md"));
}

#[test]
fn cli_rejects_unknown_format() {
    let original = "![a.mmd]\n";
    let dir = setup(original);

    cmd(dir.path())
        .args(["-i", "a.mmd", "-f", "jpeg", "README.md"])
        .assert()
        .failure()
        .code(2);

    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        original
    );
}

#[test]
fn cli_silent_hides_progress() {
    let dir = setup("![a.mmd]\n");

    cmd(dir.path())
        .args(["-s", "-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn cli_silent_still_warns() {
    let original = "![a.mmd]\n";
    let dir = setup(original);
    fs::write(dir.path().join("notes.txt"), "plain text").unwrap();

    cmd(dir.path())
        .args(["-s", "-d", "-i", "notes.txt", "-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Skipping notes.txt as it is not a supported diagram file",
        ))
        .stderr(predicate::str::contains("\tSkipping").not())
        .stderr(predicate::str::contains("This was a dry run."))
        .stderr(predicate::str::contains("Configuration selected").not())
        .stderr(predicate::str::contains("Conversion completed").not())
        .stderr(predicate::str::contains("Found 1 update points").not());
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        original
    );
}

#[test]
fn cli_verbosity_tiers() {
    let dir = setup("intro\n![a.mmd]\n");

    cmd(dir.path())
        .args(["-d", "-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed file").not())
        .stderr(predicate::str::contains("@Line 2:").not());

    cmd(dir.path())
        .args(["-d", "-vv", "-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed file: a.mmd"))
        .stderr(predicate::str::contains("@Line 2:"))
        .stderr(predicate::str::contains("-- ![a.mmd]").not());

    cmd(dir.path())
        .args(["-d", "-vvv", "-i", "a.mmd", "README.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("-- ![a.mmd]"))
        .stderr(predicate::str::contains("++ ![a.mmd](https://kroki.io/mermaid/svg/"));
}

#[test]
fn cli_kroki_url_from_env_and_config() {
    let dir = setup("![a.mmd]\n");
    fs::write(
        dir.path().join("kroki2md.toml"),
        "[kroki]\nurl = \"http://config.example\"\nformat = \"png\"\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["-i", "a.mmd", "README.md"])
        .assert()
        .success();
    let link = mermaid_link("http://config.example", DiagramFormat::Png, "graph TD; A-->B;");
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        format!("![a.mmd]({link})\n")
    );

    cmd(dir.path())
        .env("KROKI_URL", "http://env.example/")
        .args(["-i", "a.mmd", "-f", "svg", "README.md"])
        .assert()
        .success();
    let link = mermaid_link("http://env.example", DiagramFormat::Svg, "graph TD; A-->B;");
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        format!("![a.mmd]({link})\n")
    );
}

#[test]
fn cli_invalid_config_fails() {
    let dir = setup("![a.mmd]\n");
    fs::write(
        dir.path().join("kroki2md.toml"),
        "[extensions]\nxyz = \"not-a-language\"\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["-i", "a.mmd", "README.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not-a-language"));
}
