//! Integration tests for structural parsing.

use judgment_parser::model::{Block, Division, DivisionKind, Line, NumberedLine, TextRun};
use judgment_parser::parser::{
    extract_all, DocumentFamily, EnglandWales, FamilyRegistry, JudgmentParser, ParseOptions, StructureParser,
};
use judgment_parser::{Error, SourceDocument};

fn header() -> Vec<Block> {
    vec![
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
    ]
}

fn twenty_blocks() -> SourceDocument {
    let mut blocks = header();
    for (number, text) in [("1", "The first ground."), ("2", "The second ground."), ("3", "The third ground.")] {
        blocks.push(Block::line(format!("{}.\t{}", number, text)));
        blocks.push(Block::Line(
            Line::with_text("(a)\tA subsidiary point.").indented(0.5, 0.0),
        ));
    }
    blocks.push(Block::line("Annex"));
    blocks.push(Block::line("Chronology of events"));
    blocks.push(Block::line("Timeline agreed between the parties"));
    assert_eq!(blocks.len(), 20);
    SourceDocument::from_blocks(blocks).with_name("smith-v-acme")
}

fn parse(lines: &[&str]) -> judgment_parser::Result<judgment_parser::Judgment> {
    let mut blocks = vec![Block::line("JUDGMENT")];
    blocks.extend(lines.iter().map(|l| Block::line(*l)));
    JudgmentParser::default().parse(SourceDocument::from_blocks(blocks))
}

#[test]
fn test_end_to_end_twenty_blocks() {
    let judgment = JudgmentParser::default().parse(twenty_blocks()).unwrap();

    assert_eq!(judgment.header.len(), 11);
    assert_eq!(judgment.body.len(), 1);

    let contents = &judgment.body[0].contents;
    assert_eq!(contents.len(), 3);
    for (i, division) in contents.iter().enumerate() {
        assert_eq!(division.kind(), DivisionKind::NumberedParagraph);
        assert_eq!(division.number().map(|n| n.text.clone()), Some(format!("{}.", i + 1)));
        let children = division.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind(), DivisionKind::Subparagraph);
        assert_eq!(children[0].number().map(|n| n.text.as_str()), Some("(a)"));
    }

    assert_eq!(judgment.annexes.len(), 1);
    let annex = &judgment.annexes[0];
    assert_eq!(annex.number.plain_text(), "Annex");
    assert_eq!(annex.contents.len(), 2);
    assert_eq!(annex.contents[0].plain_text(), "Chronology of events");

    let meta = &judgment.metadata;
    assert_eq!(meta.citation.as_deref(), Some("[2021] EWCA Civ 1234"));
    assert_eq!(meta.court.as_ref().map(|c| c.code.as_str()), Some("EWCA-Civil"));
    assert_eq!(meta.judges, vec!["LORD JUSTICE GREEN"]);
    assert_eq!(meta.title.as_deref(), Some("JOHN SMITH v ACME LIMITED"));
}

#[test]
fn test_plain_number_round_trip() {
    for number in ["1", "7", "42", "130"] {
        let text = format!("{}\tThe court heard argument.", number);
        let result = extract_all(vec![Block::line(text.as_str())]);
        let Block::NumberedLine(numbered) = &result[0] else {
            panic!("{:?} was not numbered", text);
        };
        assert_eq!(numbered.number.text, number);
        assert_eq!(numbered.plain_text(), text);
    }
}

#[test]
fn test_monotonic_letter_sequence() {
    let result = extract_all(vec![
        Block::line("A. Introduction"),
        Block::line("Some text."),
        Block::line("B. The facts"),
        Block::line("M. Dupont gave evidence for the claimant."),
        Block::line("C. The law"),
    ]);
    let numbers: Vec<Option<&str>> = result
        .iter()
        .map(|b| b.number().map(|n| n.text.as_str()))
        .collect();
    assert_eq!(numbers, vec![Some("A."), None, Some("B."), None, Some("C.")]);
    assert_eq!(result[3].plain_text(), "M. Dupont gave evidence for the claimant.");
}

#[test]
fn test_single_big_level_falls_through() {
    let judgment = parse(&["A.\tIntroduction", "1.\tText.", "2.\tMore text."]).unwrap();
    let contents = &judgment.body[0].contents;
    assert_eq!(contents.len(), 3);
    assert!(contents.iter().all(|d| d.kind() != DivisionKind::BigLevel));
}

#[test]
fn test_two_big_levels() {
    let judgment = parse(&["A.\tIntroduction", "1.\tText.", "B.\tThe facts", "2.\tMore text."]).unwrap();
    let contents = &judgment.body[0].contents;
    assert_eq!(contents.len(), 2);
    assert!(contents.iter().all(|d| d.kind() == DivisionKind::BigLevel));
    assert_eq!(
        contents[1].heading().map(Line::plain_text).as_deref(),
        Some("The facts")
    );
    assert_eq!(contents[1].children()[0].number().map(|n| n.text.as_str()), Some("2."));
}

#[test]
fn test_quoted_structure_boundary() {
    let at = |text: &str, indent: f32| Block::Line(Line::with_text(text).indented(indent, 0.0));
    let blocks = vec![
        at("The provision reads:", 0.5),
        at("\u{201C}A person commits an offence if", 1.0),
        at("he does the prohibited thing,", 1.0),
        at("or permits another to do it.\u{201D}", 1.0),
        at("That is the whole provision.", 0.5),
    ];
    let body = StructureParser::new(&blocks, &EnglandWales, &ParseOptions::default())
        .parse()
        .unwrap();
    let contents = &body.decisions[0].contents;
    assert_eq!(contents.len(), 2);

    let Division::Leaf(first) = &contents[0] else {
        panic!("expected a leaf, got {:?}", contents[0]);
    };
    assert_eq!(first.contents.len(), 2);
    let Block::Quote(quote) = &first.contents[1] else {
        panic!("expected a quoted structure");
    };
    assert_eq!(quote.contents.len(), 3);
    let text = quote.plain_text();
    assert!(text.contains("commits an offence"));
    assert!(text.contains("prohibited thing"));
    assert!(text.contains("permits another"));
    assert!(!text.contains("whole provision"));
    assert_eq!(contents[1].plain_text(), "That is the whole provision.");
}

#[test]
fn test_quotation_resumes_after_continuation() {
    let at = |text: &str, indent: f32| Block::Line(Line::with_text(text).indented(indent, 0.0));
    let blocks = vec![
        Block::NumberedLine(NumberedLine::new(
            TextRun::new("1."),
            Line::with_text("Section 2 of the Act provides:").indented(0.5, -0.5),
        )),
        at("\u{201C}(2) The landlord must keep the structure in repair.\u{201D}", 1.0),
        at("and subsection (3) reads:", 0.5),
        at("\u{201C}(3) The tenant must pay the rent.\u{201D}", 1.0),
        Block::NumberedLine(NumberedLine::new(
            TextRun::new("2."),
            Line::with_text("Both duties are engaged.").indented(0.5, -0.5),
        )),
    ];
    let body = StructureParser::new(&blocks, &EnglandWales, &ParseOptions::default())
        .parse()
        .unwrap();
    let contents = &body.decisions[0].contents;
    assert_eq!(contents.len(), 2);

    let Division::Leaf(first) = &contents[0] else {
        panic!("expected a leaf, got {:?}", contents[0]);
    };
    let kinds: Vec<&str> = first.contents.iter().map(Block::kind).collect();
    assert_eq!(kinds, vec!["line", "quoted structure", "line", "quoted structure"]);
    assert_eq!(first.contents[2].plain_text(), "and subsection (3) reads:");
    assert_eq!(contents[1].number().map(|n| n.text.as_str()), Some("2."));
}

#[test]
fn test_annex_detection() {
    let family = FamilyRegistry::with_defaults().get("ew").unwrap();
    assert!(family.is_annex_marker(&Line::with_text("Annex")));
    assert!(family.is_annex_marker(&Line::with_text("ANNEX")));
    assert!(family.is_annex_marker(&Line::with_text("  ANNEX 2 ")));
    assert!(!family.is_annex_marker(&Line::with_text("See the annex to this judgment")));
    assert!(!family.is_annex_marker(&Line::with_text("Annexed documents")));

    let judgment = parse(&[
        "1.\tThe chronology is set out in the annex to this judgment.",
        "ANNEX 1",
        "Chronology",
    ])
    .unwrap();
    assert_eq!(judgment.body[0].contents.len(), 1);
    assert_eq!(judgment.annexes.len(), 1);
    assert_eq!(judgment.annexes[0].contents.len(), 1);
}

#[test]
fn test_multiple_decisions() {
    let judgment = parse(&[
        "LORD JUSTICE GREEN:",
        "1.\tThe appeal is dismissed.",
        "LADY JUSTICE WHITE:",
        "2.\tI agree.",
    ])
    .unwrap();
    assert_eq!(judgment.decision_count(), 2);
    assert_eq!(
        judgment.body[1].author.as_ref().map(Line::plain_text).as_deref(),
        Some("LADY JUSTICE WHITE:")
    );
}

#[test]
fn test_existing_numbering_kept() {
    let numbered = Block::NumberedLine(NumberedLine::new(TextRun::new("1."), Line::with_text("Listed.")));
    let source = SourceDocument::from_blocks(vec![Block::line("JUDGMENT"), numbered]);
    let judgment = JudgmentParser::default().parse(source).unwrap();
    let contents = &judgment.body[0].contents;
    assert_eq!(contents[0].number().map(|n| n.text.as_str()), Some("1."));
}

#[test]
fn test_unconsumed_blocks_reported() {
    let err = parse(&["1.\tText.", "Annex", "Chronology", "LORD JUSTICE GREEN:"]).unwrap_err();
    match err {
        Error::UnconsumedBlocks { position, total, text } => {
            assert_eq!(position, 3);
            assert_eq!(total, 4);
            assert_eq!(text, "LORD JUSTICE GREEN:");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_tolerance_option() {
    let at = |text: &str, indent: f32| Block::Line(Line::with_text(text).indented(indent, 0.0));
    let blocks = vec![at("Heading", 0.0), at("Slightly indented text.", 0.05)];
    let loose = ParseOptions::default();
    let body = StructureParser::new(&blocks, &EnglandWales, &loose).parse().unwrap();
    assert!(body.decisions[0].contents.iter().all(|d| d.children().is_empty()));

    let strict = ParseOptions::default().with_tolerance(0.0);
    let body = StructureParser::new(&blocks, &EnglandWales, &strict).parse().unwrap();
    assert_eq!(body.decisions[0].contents[0].kind(), DivisionKind::CrossHeading);
}
