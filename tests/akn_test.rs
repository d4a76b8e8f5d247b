//! Integration tests for Akoma Ntoso output.

use judgment_parser::model::{Block, Line, SourceDocument, Table, TableCell, TableRow, VerticalMerge};
use judgment_parser::render::{build_akn, content_hash};
use judgment_parser::{to_akn, to_akn_with_stats, Judgment, JudgmentParser, RenderOptions};

fn smith_v_acme() -> Judgment {
    let mut blocks = vec![
        Block::line("Neutral Citation Number: [2021] EWCA Civ 1234"),
        Block::line("Case No: A2/2020/0123"),
        Block::line("IN THE COURT OF APPEAL (CIVIL DIVISION)"),
        Block::line("Before: LORD JUSTICE GREEN"),
        Block::line("Between:"),
        Block::line("JOHN SMITH"),
        Block::line("Appellant"),
        Block::line("- and -"),
        Block::line("ACME LIMITED"),
        Block::line("Respondent"),
        Block::Line(Line::with_text("JUDGMENT").styled("Title")),
    ];
    for number in 1..=3 {
        blocks.push(Block::line(format!("{}.\tGround {} is considered.", number, number)));
        blocks.push(Block::Line(
            Line::with_text("(a)\tA subsidiary point.").indented(0.5, 0.0),
        ));
    }
    blocks.push(Block::line("Annex"));
    blocks.push(Block::line("Chronology of events"));
    blocks.push(Block::line("Timeline agreed between the parties"));

    let source = SourceDocument::from_blocks(blocks).with_name("smith-v-acme");
    JudgmentParser::default().parse(source).unwrap()
}

#[test]
fn test_paragraph_ids() {
    let xml = to_akn(&smith_v_acme(), &RenderOptions::default()).unwrap();
    for id in ["para_1", "para_2", "para_3", "para_1_1", "para_3_1"] {
        assert!(xml.contains(&format!("eId=\"{}\"", id)), "missing {}", id);
    }
}

#[test]
fn test_annex_attachment() {
    let xml = to_akn(&smith_v_acme(), &RenderOptions::default()).unwrap();
    assert!(xml.contains("<attachments>"));
    assert!(xml.contains("name=\"annex\""));
    assert!(xml.contains("eId=\"annex_1\""));
    assert!(xml.contains("Chronology of events"));
}

#[test]
fn test_header_and_identification() {
    let options = RenderOptions::default();
    let (root, _) = build_akn(&smith_v_acme(), &options);

    let citations = root.descendants("neutralCitation");
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].text_content(), "[2021] EWCA Civ 1234");

    let this = root.descendants("FRBRthis")[0].get_attr("value").map(str::to_string);
    assert_eq!(
        this.as_deref(),
        Some("https://caselaw.nationalarchives.gov.uk/ewca/civil/2021/1234")
    );
    assert_eq!(root.descendants("uk:court")[0].text_content(), "EWCA-Civil");
    assert_eq!(root.descendants("judge")[0].text_content(), "LORD JUSTICE GREEN");
}

#[test]
fn test_hash_is_stable() {
    let judgment = smith_v_acme();
    let first = to_akn(&judgment, &RenderOptions::default()).unwrap();
    let second = to_akn(&judgment, &RenderOptions::default()).unwrap();
    assert_eq!(first, second);

    let (a, _) = build_akn(&judgment, &RenderOptions::default());
    let (b, _) = build_akn(&judgment, &RenderOptions::default().with_parser_version("9.9.9"));
    assert_eq!(content_hash(&a), content_hash(&b));
    assert_eq!(a.descendants("uk:hash")[0].text_content(), content_hash(&a));
}

#[test]
fn test_no_hash_option() {
    let xml = to_akn(&smith_v_acme(), &RenderOptions::default().with_hash(false)).unwrap();
    assert!(!xml.contains("<uk:hash>"));
}

#[test]
fn test_table_merges_repaired() {
    let mut table = Table::new();
    table.add_row(TableRow::new(vec![
        TableCell::text("2019").merge(VerticalMerge::Restart),
        TableCell::text("Claim issued"),
    ]));
    table.add_row(TableRow::new(vec![
        TableCell::empty().merge(VerticalMerge::Continue),
        TableCell::text("Defence served"),
    ]));
    let source = SourceDocument::from_blocks(vec![
        Block::line("JUDGMENT"),
        Block::line("1.\tThe chronology is as follows:"),
        Block::Table(table),
    ]);
    let judgment = JudgmentParser::default().parse(source).unwrap();
    let result = to_akn_with_stats(&judgment, &RenderOptions::default()).unwrap();

    assert!(result.content.contains("rowspan=\"2\""));
    assert_eq!(result.content.matches("<td").count(), 3);
    assert_eq!(result.stats.table_count, 1);
}

#[test]
fn test_compact_and_pretty_output() {
    let judgment = smith_v_acme();
    let pretty = to_akn(&judgment, &RenderOptions::default()).unwrap();
    let compact = to_akn(&judgment, &RenderOptions::default().with_pretty(false)).unwrap();

    assert!(pretty.lines().count() > compact.lines().count());
    assert_eq!(compact.lines().count(), 1);
    assert!(pretty.starts_with("<?xml"));
    assert!(compact.starts_with("<?xml"));
}

#[test]
fn test_stats() {
    let result = to_akn_with_stats(&smith_v_acme(), &RenderOptions::default()).unwrap();
    let stats = result.stats;
    assert_eq!(stats.decision_count, 1);
    assert_eq!(stats.paragraph_count, 3);
    assert_eq!(stats.subparagraph_count, 3);
    assert_eq!(stats.annex_count, 1);
    assert_eq!(result.metadata.citation.as_deref(), Some("[2021] EWCA Civ 1234"));
}
