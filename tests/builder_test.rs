//! Integration tests for building outlines from flattened lines.

use rstest::rstest;

use outliner::domain::{
    HeadingPattern, HeadingPatterns, KeySeparators, OutlineBuilder, OutlineTreeConvert,
};
use outliner::util::testing::{init_test_setup, SAMPLE_OUTLINE};

#[ctor::ctor]
fn init() {
    init_test_setup();
}

const END_TO_END: &[&str] = &[
    "一、Intro",
    "（一）Background",
    "1. History",
    "Some body text.",
    "二、Methods",
];

#[test]
fn given_three_level_document_when_building_then_tree_matches_numbering() {
    let outline = OutlineBuilder::default().build(END_TO_END);

    let top: Vec<_> = outline
        .children(outline.root())
        .map(|(_, n)| n.title.as_str())
        .collect();
    assert_eq!(top, vec!["Intro", "Methods"]);

    let intro = outline.find_node_by_content_key("Intro").unwrap();
    assert_eq!(intro.children.len(), 1);
    let background = outline.find_node_by_content_key("Intro-Background").unwrap();
    assert_eq!(background.children.len(), 1);

    let history = outline
        .find_node_by_content_key("Intro-Background-History")
        .expect("History reachable by content key");
    assert_eq!(history.level, 3);
    assert_eq!(history.contents, vec!["Some body text."]);
    assert_eq!(history.full_number_key, "一、/（一）/1.");
}

#[test]
fn given_level_two_before_any_level_one_when_building_then_orphan_dropped() {
    let outline = OutlineBuilder::default().build(&["（一）Orphan", "一、A", "（一）B"]);

    assert_eq!(outline.len(), 2);
    assert!(outline.find_by_content_key("Orphan").is_none());
    assert!(outline.find_by_content_key("A-B").is_some());
}

#[test]
fn given_body_after_level_one_when_building_then_attached_to_level_one() {
    let outline = OutlineBuilder::default().build(&["一、A", "body of A", "（一）B"]);

    let a = outline.find_node_by_content_key("A").unwrap();
    assert_eq!(a.contents, vec!["body of A"]);
    assert!(outline.root_node().contents.is_empty());
}

#[test]
fn given_sample_document_when_building_then_keys_chain_through_ancestors() {
    let outline = OutlineBuilder::default().build(SAMPLE_OUTLINE);

    assert_eq!(outline.root_node().contents, vec!["项目年度报告"]);
    for (_, _, node) in outline.iter() {
        let expected_content = node.content_key.rsplit('-').next().unwrap();
        assert_eq!(expected_content, node.title);
        assert!(node.full_number_key.ends_with(&node.number_key));
        assert_eq!(
            node.full_number_key.split('/').count(),
            node.level,
            "{node}"
        );
    }
}

#[rstest]
#[case(&["一、A", "（一）B", "二、C", "1.D"], 3)]
#[case(&["一、A", "1.B"], 1)]
#[case(&["", "   ", "一、A"], 1)]
fn given_lines_when_building_then_expected_heading_count(
    #[case] lines: &[&str],
    #[case] expected: usize,
) {
    let outline = OutlineBuilder::default().build(lines);
    assert_eq!(outline.len(), expected);
}

#[test]
fn given_four_level_patterns_when_building_then_fourth_level_nests() {
    let patterns = HeadingPatterns::new(vec![
        HeadingPattern::cjk_enumeration(),
        HeadingPattern::cjk_parenthesized(),
        HeadingPattern::digit_period(),
        HeadingPattern::parenthesized_digits(),
    ])
    .unwrap();
    let builder = OutlineBuilder::new(patterns, KeySeparators::default());

    let outline = builder.build(&["一、A", "（一）B", "1.C", "（2）D"]);

    let d = outline.find_node_by_content_key("A-B-C-D").unwrap();
    assert_eq!(d.level, 4);
    assert_eq!(d.full_number_key, "一、/（一）/1./（2）");
}

#[test]
fn given_custom_separators_when_building_then_keys_use_them() {
    let separators = KeySeparators::new(" > ", ".").unwrap();
    let builder = OutlineBuilder::new(HeadingPatterns::default(), separators);

    let outline = builder.build(&["一、A", "（一）B"]);

    let b = outline.find_node_by_content_key("A.B").unwrap();
    assert_eq!(b.full_number_key, "一、 > （一）");
}

#[test]
fn given_outline_when_rendering_tree_then_root_and_headings_shown() {
    let outline = OutlineBuilder::default().build(SAMPLE_OUTLINE);

    let rendered = outline.to_tree_string().to_string();

    assert!(rendered.starts_with("ROOT (1 lines)"));
    assert!(rendered.contains("[一、/（一）/1.]  总体情况-收入情况-主营业务"));
}
