//! Integration tests for the enrichment passes.

use judgment_parser::enrich::{enrich_blocks, CaseNumbers, Citations, Dates, Enricher, Merger};
use judgment_parser::model::{Block, Inline, Line, PartyRole};
use judgment_parser::{DocumentFamily, Error, FamilyRegistry};

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
        Block::line("Hearing date: 3 March 2021"),
    ]
}

fn tagged(blocks: &[Block]) -> Vec<Inline> {
    blocks
        .iter()
        .filter_map(Block::as_line)
        .flat_map(|line| line.contents.iter().filter(|i| i.is_tagged()).cloned())
        .collect()
}

#[test]
fn test_disjoint_spans_are_order_independent() {
    let text = "Judgment handed down on 3 March 2021 in [2021] EWCA Civ 12";
    let forward: Vec<Box<dyn Enricher>> = vec![Box::new(Citations), Box::new(Dates)];
    let backward: Vec<Box<dyn Enricher>> = vec![Box::new(Dates), Box::new(Citations)];

    let a = enrich_blocks(&forward, vec![Block::line(text)]).unwrap();
    let b = enrich_blocks(&backward, vec![Block::line(text)]).unwrap();
    assert_eq!(a, b);
    assert_eq!(tagged(&a).len(), 2);
    assert_eq!(a[0].plain_text(), text);
}

#[test]
fn test_tagged_spans_are_not_retagged() {
    let once = enrich_blocks(
        &[Box::new(CaseNumbers) as Box<dyn Enricher>],
        vec![Block::line("Case No: A2/2020/0123")],
    )
    .unwrap();
    let twice = CaseNumbers.enrich_blocks(once.clone()).unwrap();
    assert_eq!(once, twice);
    assert!(matches!(&tagged(&once)[..], [Inline::CaseNumber(run)] if run.text == "A2/2020/0123"));
}

#[test]
fn test_merger_exposes_split_citation() {
    let split = || {
        Block::Line(Line::with_contents(vec![
            Inline::text("Neutral Citation Number: [2021] EW"),
            Inline::text("CA Civ 12"),
        ]))
    };

    let unmerged = Citations.enrich_block(split()).unwrap();
    assert!(tagged(&[unmerged]).is_empty());

    let stack: Vec<Box<dyn Enricher>> = vec![Box::new(Merger::new()), Box::new(Citations)];
    let merged = enrich_blocks(&stack, vec![split()]).unwrap();
    assert!(matches!(
        &tagged(&merged)[..],
        [Inline::NeutralCitation(run)] if run.text == "[2021] EWCA Civ 12"
    ));
}

#[test]
fn test_header_stack_tags_everything() {
    let family = FamilyRegistry::with_defaults().get("ew").unwrap();
    let blocks = header();
    let texts: Vec<String> = blocks.iter().map(Block::plain_text).collect();

    let enriched = enrich_blocks(&family.header_enrichers(), blocks).unwrap();
    let after: Vec<String> = enriched.iter().map(Block::plain_text).collect();
    assert_eq!(texts, after);

    let spans = tagged(&enriched);
    assert!(spans.iter().any(|i| matches!(i, Inline::NeutralCitation(_))));
    assert!(spans.iter().any(|i| matches!(i, Inline::CaseNumber(_))));
    assert!(spans
        .iter()
        .any(|i| matches!(i, Inline::CourtType { court, .. } if court == "EWCA-Civil")));
    assert!(spans
        .iter()
        .any(|i| matches!(i, Inline::Judge(run) if run.text == "LORD JUSTICE GREEN")));
    assert!(spans.iter().any(|i| matches!(
        i,
        Inline::Party { run, role: Some(PartyRole::Respondent) } if run.text == "ACME LIMITED"
    )));
    assert!(spans
        .iter()
        .any(|i| matches!(i, Inline::DocketDate { name, .. } if name == "hearing")));
}

#[test]
fn test_invalid_date_rejects_header() {
    let family = FamilyRegistry::with_defaults().get("ew").unwrap();
    let blocks = vec![Block::line("Judgment date: 31 February 2021")];
    let err = enrich_blocks(&family.header_enrichers(), blocks).unwrap_err();
    assert!(matches!(err, Error::InvalidDate(ref s) if s == "31 February 2021"));
}
