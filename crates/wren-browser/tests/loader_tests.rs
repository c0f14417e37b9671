//! Integration tests for document loading and the full pipeline.

use std::path::PathBuf;

use wren_browser::{
    LoadError, collect_stylesheet_links, load_document, load_stylesheets, parse_document,
};
use wren_css::{ApproximateFontMetrics, DisplayCommand, LayoutConfig};
use wren_html::parse;

const RED_SHEET: &str = "data:text/css,p{color:red}";

fn config() -> LayoutConfig {
    LayoutConfig::default()
}

/// A fresh directory under the system temp dir for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wren-loader-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn text_colors(commands: &[DisplayCommand]) -> Vec<(&str, &str)> {
    commands
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText { text, color, .. } => Some((text.as_str(), color.as_str())),
            DisplayCommand::FillRect { .. } => None,
        })
        .collect()
}

#[test]
fn test_collect_stylesheet_links() {
    let tree = parse(
        r#"<link rel="stylesheet" href="a.css">
           <link rel="icon" href="favicon.ico">
           <link rel="alternate StyleSheet" href="b.css">
           <link rel="stylesheet">
           <p>body</p>"#,
    );
    assert_eq!(collect_stylesheet_links(&tree), vec!["a.css", "b.css"]);
}

#[test]
fn test_linked_sheet_is_applied() {
    let html = format!(r#"<link rel="stylesheet" href="{RED_SHEET}"><p>Hi</p>"#);
    let document = parse_document(&html, None, &config(), &ApproximateFontMetrics);

    assert_eq!(document.stylesheets, vec![RED_SHEET]);
    assert_eq!(document.rules.len(), 1);
    assert_eq!(text_colors(document.display_list.commands()), vec![("Hi", "red")]);
}

#[test]
fn test_missing_sheet_is_skipped() {
    let html = r#"<link rel="stylesheet" href="definitely/not/here.css"><p>Hi</p>"#;
    let document = parse_document(html, None, &config(), &ApproximateFontMetrics);

    assert!(document.stylesheets.is_empty());
    assert!(document.rules.is_empty());
    assert_eq!(text_colors(document.display_list.commands()), vec![("Hi", "black")]);
}

#[test]
fn test_sheets_apply_in_document_order() {
    let tree = parse(
        r#"<link rel="stylesheet" href="data:text/css,p{color:red}">
           <link rel="stylesheet" href="data:text/css,p{color:blue}">"#,
    );
    let (rules, loaded) = load_stylesheets(&tree, None);
    assert_eq!(loaded.len(), 2);
    let colors: Vec<&str> = rules
        .iter()
        .filter_map(|rule| rule.declarations.get("color").map(String::as_str))
        .collect();
    assert_eq!(colors, vec!["red", "blue"]);
}

#[test]
fn test_load_from_data_url() {
    let document = load_document("data:text/html,<p>Hello%20there</p>", &config(), &ApproximateFontMetrics)
        .expect("data URL loads");
    assert_eq!(document.url.as_deref(), Some("data:text/html,<p>Hello%20there</p>"));
    assert_eq!(document.html_source, "<p>Hello there</p>");
    assert_eq!(document.display_list.len(), 2);
}

#[test]
fn test_load_from_file_resolves_relative_sheet() {
    let dir = scratch_dir("relative");
    std::fs::write(dir.join("style.css"), "p { color: green; }").expect("write css");
    std::fs::write(
        dir.join("index.html"),
        r#"<link rel="stylesheet" href="style.css"><p>Styled</p>"#,
    )
    .expect("write html");

    let index = dir.join("index.html").display().to_string();
    let document = load_document(&index, &config(), &ApproximateFontMetrics).expect("file loads");

    assert_eq!(
        document.stylesheets,
        vec![dir.join("style.css").display().to_string()]
    );
    assert_eq!(text_colors(document.display_list.commands()), vec![("Styled", "green")]);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_missing_document_is_an_error() {
    let result = load_document("/definitely/not/here.html", &config(), &ApproximateFontMetrics);
    let Err(LoadError::Fetch { url, .. }) = result else {
        panic!("expected a fetch error");
    };
    assert_eq!(url, "/definitely/not/here.html");
}

#[test]
fn test_parse_issues_are_reported() {
    let document = parse_document("<p>x</p></div>", None, &config(), &ApproximateFontMetrics);
    assert!(!document.parse_issues.is_empty());
    assert_eq!(text_colors(document.display_list.commands()), vec![("x", "black")]);
}

#[test]
fn test_relayout_at_a_narrower_width() {
    let mut document = parse_document(
        "<p>one two three four five</p>",
        None,
        &config(),
        &ApproximateFontMetrics,
    );
    assert_eq!(document.layout.lines().count(), 1);
    let tall_before = document.content_height();

    // Content width 40 fits one four-letter word per line.
    document.relayout(66.0, &ApproximateFontMetrics);
    assert_eq!(document.config.viewport_width, 66.0);
    assert_eq!(document.layout.lines().count(), 5);
    assert!(document.content_height() > tall_before);
    assert_eq!(document.display_list.len(), 5);
}
