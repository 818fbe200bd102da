use mermaid_editor_engine::formatting::{FormatOptions, format_source};
use mermaid_editor_engine::{Document, format_file};
use pretty_assertions::assert_eq;

#[test]
fn fixture_architecture() {
    assert_fixture("architecture");
}

#[test]
fn fixture_nested_subgraphs() {
    assert_fixture("nested_subgraphs");
}

#[test]
fn fixture_excess_end() {
    assert_fixture("excess_end");
}

#[test]
fn formatting_is_idempotent_on_fixtures() {
    for name in ["architecture", "nested_subgraphs", "excess_end"] {
        let once = format_source(&read_fixture(name), &FormatOptions::default());
        let twice = format_source(&once, &FormatOptions::default());
        assert_eq!(once, twice, "fixture {name}");
    }
}

#[test]
fn document_format_matches_file_format() {
    let source = read_fixture("nested_subgraphs");
    let mut document = Document::new(&source);
    document.format(&FormatOptions::default());

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested.mmd");
    std::fs::write(&path, &source).unwrap();
    assert!(format_file(&path, &FormatOptions::default()).unwrap());

    assert_eq!(document.text(), std::fs::read_to_string(&path).unwrap());
}

#[test]
fn wider_indent_scales_every_level() {
    let options = FormatOptions::new(4).unwrap();
    let formatted = format_source(&read_fixture("nested_subgraphs"), &options);
    assert!(formatted.contains("\n        A-->B\n"));
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.mmd",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn assert_fixture(name: &str) {
    let source = read_fixture(name);
    let expected = read_fixture(&format!("{name}.formatted"));

    let formatted = format_source(&source, &FormatOptions::default());
    assert_eq!(formatted, expected);

    // Every non-blank source line survives, trimmed
    let kept: Vec<&str> = formatted.lines().map(str::trim).collect();
    let original: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    assert_eq!(kept, original);
}
