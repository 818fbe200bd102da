use mermaid_editor_engine::formatting::{FormatOptions, MAX_INDENT_SIZE, format_source};
use proptest::prelude::*;

const LINES: &[&str] = &[
    "graph TD", "subgraph A", "subgraph", "group api(cloud)[API]", "end", "endé", "end_x",
    "A-->B", "x", "", "   ", "\t", "  subgraph  B  ", "\u{a0}end", "service db(database)",
];

/// Lines of Mermaid-ish source with random leading and trailing blanks.
fn source() -> impl Strategy<Value = String> {
    let line = (
        prop::sample::select(vec!["", " ", "  ", "\t", "    "]),
        prop::sample::select(LINES),
        prop::sample::select(vec!["", " ", "\t", "\r"]),
    )
        .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"));
    prop::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
}

fn options() -> impl Strategy<Value = FormatOptions> {
    (1..=MAX_INDENT_SIZE).prop_map(|size| FormatOptions::new(size).unwrap())
}

proptest! {
    #[test]
    fn formatting_is_idempotent(source in source(), options in options()) {
        let once = format_source(&source, &options);
        let twice = format_source(&once, &options);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn no_blank_lines_survive(source in source(), options in options()) {
        let formatted = format_source(&source, &options);
        prop_assert!(!formatted.starts_with('\n'));
        prop_assert!(!formatted.ends_with('\n'));
        prop_assert!(formatted.lines().all(|line| !line.trim().is_empty()));
    }

    #[test]
    fn line_content_is_preserved(source in source(), options in options()) {
        let formatted = format_source(&source, &options);

        let kept: Vec<&str> = formatted.lines().map(str::trim).collect();
        let original: Vec<&str> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        prop_assert_eq!(kept, original);
    }

    #[test]
    fn indent_is_a_multiple_of_indent_size(source in source(), options in options()) {
        let formatted = format_source(&source, &options);
        for line in formatted.lines() {
            let indent = line.len() - line.trim_start_matches(' ').len();
            prop_assert_eq!(indent % options.indent_size(), 0);
        }
    }
}
