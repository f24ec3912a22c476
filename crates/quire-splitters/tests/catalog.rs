use quire_splitters::{CatalogSplitter, HeadingSplitter, SplitWarning, TextSplitter};

#[test]
fn chapters_follow_catalog_order_not_text_order() {
    // Catalog order and in-text order legitimately differ; boundaries come
    // from text order, output ordering from the catalog index.
    let splitter = CatalogSplitter::new(vec!["Ch2".to_string(), "Ch1".to_string()]);
    let result = splitter.split("Ch1\nfoo\nCh2\nbar\n");

    assert_eq!(result.chapters, vec!["Ch2\nbar", "Ch1\nfoo"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn missing_title_is_skipped_and_reported() {
    let splitter = CatalogSplitter::new(vec![
        "Intro".to_string(),
        "Nope".to_string(),
        "End".to_string(),
    ]);
    let result = splitter.split("Intro\naaa\nEnd\nbbb");

    assert_eq!(result.chapters, vec!["Intro\naaa", "End\nbbb"]);
    assert_eq!(
        result.warnings,
        vec![SplitWarning::TitleNotFound {
            title: "Nope".to_string(),
        }],
    );
}

#[test]
fn zero_matches_yields_empty_chapters() {
    let splitter = CatalogSplitter::new(vec!["Alpha".to_string(), "Beta".to_string()]);
    let result = splitter.split("nothing here matches\nat all");

    assert!(result.chapters.is_empty());
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn titles_match_whole_lines_only() {
    // "Ch" inside "Chapter" must not count; only the standalone line does.
    let splitter = CatalogSplitter::new(vec!["Ch".to_string()]);
    let result = splitter.split("Chapter\nxx\nCh\nyy");
    assert_eq!(result.chapters, vec!["Ch\nyy"]);

    let indented = CatalogSplitter::new(vec!["Title".to_string()]);
    let miss = indented.split("prefix Title\nbody");
    assert!(miss.chapters.is_empty());
}

#[test]
fn titles_are_matched_literally_not_as_patterns() {
    let splitter = CatalogSplitter::new(vec!["1. What? (draft)".to_string()]);
    let result = splitter.split("intro\n1. What? (draft)\nbody\n");
    assert_eq!(result.chapters, vec!["1. What? (draft)\nbody"]);
}

#[test]
fn concatenated_chapters_cover_text_from_first_match() {
    let text = "preamble\nA\nfirst body\nB\nsecond body\n";
    let splitter = CatalogSplitter::new(vec!["B".to_string(), "A".to_string()]);
    let result = splitter.split(text);

    // Re-join in text order: everything from the first matched title onward.
    let mut in_text_order = result.chapters.clone();
    in_text_order.sort_by_key(|ch| text.find(ch.as_str()).unwrap_or(usize::MAX));
    assert_eq!(in_text_order.join("\n"), "A\nfirst body\nB\nsecond body");
}

#[test]
fn empty_text_yields_empty_result() {
    let splitter = CatalogSplitter::new(vec!["A".to_string()]);
    assert!(splitter.split("").chapters.is_empty());
    assert!(splitter.split("   \n  ").chapters.is_empty());
}

#[test]
fn from_text_parses_newline_delimited_catalog() {
    let splitter = CatalogSplitter::from_text("# One\n\n  # Two  \n").unwrap();
    assert_eq!(splitter.catalog(), ["# One", "# Two"]);

    assert!(CatalogSplitter::from_text("").is_err());
    assert!(CatalogSplitter::from_text(" \n \n").is_err());
}

#[test]
fn heading_split_catalog_feeds_catalog_splitter() {
    // The synthesized catalog from heading splitting locates the same
    // boundaries when applied back to the original text.
    let text = "# A\ncontent a\n# B\ncontent b\n";
    let heading = HeadingSplitter::new().with_budgets(10_000, 3);
    let split = heading.split(text);

    let catalog_splitter = CatalogSplitter::new(split.catalog.clone());
    let chapters = catalog_splitter.split(text);

    assert_eq!(chapters.chapters.len(), split.chunks.len());
    assert_eq!(
        chapters.chapters,
        split
            .chunks
            .iter()
            .map(|c| c.content.clone())
            .collect::<Vec<_>>(),
    );
}

#[test]
fn split_text_returns_chapter_strings() {
    let splitter = CatalogSplitter::new(vec!["A".to_string(), "B".to_string()]);
    let chunks = splitter.split_text("A\none\nB\ntwo");
    assert_eq!(chunks, vec!["A\none", "B\ntwo"]);
}
