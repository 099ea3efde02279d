//! Integration tests for content-key lookup and section extraction.

use rstest::rstest;

use outliner::domain::{group_lines, OutlineBuilder, DEFAULT_INDENT};
use outliner::util::testing::{init_test_setup, SAMPLE_OUTLINE};

#[ctor::ctor]
fn init() {
    init_test_setup();
}

#[rstest]
#[case("总体情况", Some("一、"))]
#[case("总体情况-支出情况", Some("（二）"))]
#[case("总体情况-收入情况-主营业务", Some("1."))]
#[case("收入情况", None)]
#[case("", None)]
fn given_content_key_when_finding_then_returns_matching_heading(
    #[case] key: &str,
    #[case] number: Option<&str>,
) {
    let outline = OutlineBuilder::default().build(SAMPLE_OUTLINE);

    let found = outline.find_node_by_content_key(key).map(|n| n.number_key.as_str());

    assert_eq!(found, number);
}

#[test]
fn given_section_with_subsections_when_extracting_then_indents_by_depth() {
    let outline = OutlineBuilder::default().build(SAMPLE_OUTLINE);

    let lines = outline.extract_section("总体情况-收入情况", "  ");

    assert_eq!(
        lines,
        vec![
            "（一） 收入情况",
            "  |项目|金额|",
            "  |主营收入|100w|",
            "  1. 主营业务",
            "    主营业务占比最高。",
        ]
    );
}

#[test]
fn given_heading_without_body_when_extracting_then_single_heading_line() {
    let outline = OutlineBuilder::default().build(&["一、A", "（一）B", "二、C"]);

    let lines = outline.extract_section("A-B", DEFAULT_INDENT);

    assert_eq!(lines, vec!["（一） B"]);
}

#[test]
fn given_unknown_key_when_extracting_then_empty() {
    let outline = OutlineBuilder::default().build(SAMPLE_OUTLINE);
    assert!(outline.extract_section("不存在", DEFAULT_INDENT).is_empty());
}

#[test]
fn given_outline_when_rendering_keys_then_body_lines_follow_heading() {
    let outline = OutlineBuilder::default().build(&["一、A", "text", "（一）B"]);

    let lines = outline.render_keys("  ");

    assert_eq!(lines, vec!["[一、]  A", "  └─ text", "  [一、/（一）]  A-B"]);
}

#[test]
fn given_repeated_wording_when_finding_then_first_match_wins_and_duplicates_reported() {
    let outline = OutlineBuilder::default().build(&["一、A", "（一）X", "二、A", "（一）Y"]);

    let first = outline.find_node_by_content_key("A").unwrap();
    assert_eq!(first.number_key, "一、");
    assert_eq!(outline.find_all_by_content_key("A").len(), 2);
    assert_eq!(outline.duplicate_content_keys(), vec!["A".to_string()]);
    // second A's children are still reachable under the shared key prefix
    assert!(outline.find_by_content_key("A-Y").is_some());
}

#[test]
fn given_section_body_with_table_when_grouping_then_table_block_separated() {
    let outline = OutlineBuilder::default().build(SAMPLE_OUTLINE);
    let sections = outline.section_map();

    let (_, contents) = sections
        .iter()
        .find(|(key, _)| key == "总体情况-收入情况")
        .unwrap();
    let blocks = group_lines(contents);

    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_table());
    assert_eq!(blocks[0].lines().len(), 2);
}
