//! Akoma Ntoso tree builder.
//!
//! Walks a parsed [`Judgment`] depth-first and produces the generic output
//! tree, preserving source order. Besides the one-to-one mapping of content,
//! the builder:
//!
//! - assigns `eId`s: paragraphs numbered "123." get `para_123` when no other
//!   paragraph carries the same number, everything else gets a positional
//!   `<parent>_<index>` id;
//! - repairs vertically merged table cells;
//! - synthesizes the `meta` block and stamps a SHA-256 content hash computed
//!   with `meta` excluded.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::options::RenderOptions;
use super::result::ParseStats;
use super::tables::repair_merges;
use super::tree::{Element, Node};
use crate::model::{
    Alignment, Block, Division, DivisionKind, Inline, Judgment, Line, Metadata, Table, TableOfContents,
    TextRun,
};

/// Akoma Ntoso namespace.
pub const AKN_NAMESPACE: &str = "http://docs.oasis-open.org/legaldocml/ns/akn/3.0";

/// Namespace of the proprietary metadata.
pub const UK_NAMESPACE: &str = "https://caselaw.nationalarchives.gov.uk/akn";

const TNA_URL: &str = "https://www.nationalarchives.gov.uk/";

/// Placeholder date when the judgment date is unknown.
const UNKNOWN_DATE: &str = "1000-01-01";

static CLEAN_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.$").unwrap());

/// Build the Akoma Ntoso tree for a judgment.
pub fn build_akn(judgment: &Judgment, options: &RenderOptions) -> (Element, ParseStats) {
    let mut builder = Builder::new(judgment);

    let mut doc = Element::new("judgment").attr("name", "judgment");
    if !judgment.cover_page.is_empty() {
        doc.push(builder.container("coverPage", &judgment.cover_page));
    }
    if !judgment.header.is_empty() {
        doc.push(builder.container("header", &judgment.header));
    }
    doc.push(builder.judgment_body(judgment));
    if !judgment.conclusions.is_empty() {
        doc.push(builder.container("conclusions", &judgment.conclusions));
    }
    if !judgment.annexes.is_empty() || !judgment.attachments.is_empty() {
        doc.push(builder.attachments(judgment));
    }

    let hash = options.include_hash.then(|| content_hash(&doc));
    let meta = meta(&judgment.metadata, options, hash.as_deref());
    doc.children.insert(0, Node::Element(meta));

    builder.stats.decision_count = judgment.body.len() as u32;
    builder.stats.annex_count = judgment.annexes.len() as u32;
    builder.stats.count_text(&judgment.plain_text());

    let root = Element::new("akomaNtoso")
        .attr("xmlns", AKN_NAMESPACE)
        .attr("xmlns:uk", UK_NAMESPACE)
        .child(doc);
    (root, builder.stats)
}

/// SHA-256 over the character data of a tree, with `meta` elements excluded.
pub fn content_hash(root: &Element) -> String {
    fn feed(element: &Element, hasher: &mut Sha256) {
        for node in &element.children {
            match node {
                Node::Text(text) => hasher.update(text.as_bytes()),
                Node::Element(child) if child.name != "meta" => feed(child, hasher),
                _ => {}
            }
        }
    }
    let mut hasher = Sha256::new();
    feed(root, &mut hasher);
    hex::encode(hasher.finalize())
}

/// Lowercase identifier made of letters, digits and single dashes.
pub fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn inches(value: f32) -> String {
    format!("{}in", value)
}

struct Builder {
    stats: ParseStats,
    /// How many paragraphs carry each clean number
    clean_numbers: HashMap<String, usize>,
}

impl Builder {
    fn new(judgment: &Judgment) -> Self {
        let mut clean_numbers = HashMap::new();
        for decision in &judgment.body {
            count_clean_numbers(&decision.contents, &mut clean_numbers);
        }
        Self {
            stats: ParseStats::new(),
            clean_numbers,
        }
    }

    fn container(&mut self, name: &str, blocks: &[Block]) -> Element {
        let mut element = Element::new(name);
        for block in blocks {
            element.push(self.block(block));
        }
        element
    }

    fn judgment_body(&mut self, judgment: &Judgment) -> Element {
        let mut body = Element::new("judgmentBody");
        for (k, decision) in judgment.body.iter().enumerate() {
            let id = format!("decision_{}", k + 1);
            let mut element = Element::new("decision").attr("eId", id.as_str());
            if let Some(author) = &decision.author {
                element.push(self.line(author).attr("class", "author"));
            }
            for (i, division) in decision.contents.iter().enumerate() {
                let child_id = self.division_id(division, &id, i + 1);
                element.push(self.division(division, Some(&child_id)));
            }
            if element.is_empty() {
                element.push(Element::new("p"));
            }
            body.push(element);
        }
        if body.is_empty() {
            body.push(Element::new("decision").child(Element::new("p")));
        }
        body
    }

    fn attachments(&mut self, judgment: &Judgment) -> Element {
        let mut attachments = Element::new("attachments");
        for (k, annex) in judgment.annexes.iter().enumerate() {
            let mut main = self.container("mainBody", &annex.contents);
            if main.is_empty() {
                main.push(Element::new("p"));
            }
            let doc = Element::new("doc")
                .attr("name", "annex")
                .attr("eId", format!("annex_{}", k + 1))
                .child(Element::new("preface").child(self.line(&annex.number)))
                .child(main);
            attachments.push(Element::new("attachment").child(doc));
        }
        for attachment in &judgment.attachments {
            let kind = if attachment.external { "external" } else { "internal" };
            attachments.push(
                Element::new("attachment").child(
                    Element::new("documentRef")
                        .attr("href", attachment.href.as_str())
                        .attr("showAs", attachment.name.as_str())
                        .attr("class", kind),
                ),
            );
        }
        attachments
    }

    fn division_id(&self, division: &Division, parent: &str, index: usize) -> String {
        if let Some(number) = clean_number(division) {
            if self.clean_numbers.get(number) == Some(&1) {
                return format!("para_{}", number);
            }
        }
        format!("{}_{}", parent, index)
    }

    /// Build a division; `id` is `None` inside quoted structures.
    fn division(&mut self, division: &Division, id: Option<&str>) -> Element {
        let kind = division.kind();
        let mut element = match kind {
            DivisionKind::BigLevel => {
                self.stats.big_level_count += 1;
                Element::new("level")
            }
            DivisionKind::CrossHeading => {
                self.stats.cross_heading_count += 1;
                Element::new("hcontainer").attr("name", "crossheading")
            }
            DivisionKind::GroupOfParagraphs => Element::new("hcontainer").attr("name", "groupOfParagraphs"),
            DivisionKind::TableOfContents => Element::new("hcontainer").attr("name", "tableOfContents"),
            DivisionKind::NumberedParagraph | DivisionKind::Dummy => {
                self.stats.paragraph_count += 1;
                Element::new("paragraph")
            }
            DivisionKind::Subparagraph => {
                self.stats.subparagraph_count += 1;
                Element::new("subparagraph")
            }
        };
        if let Some(id) = id {
            element.set_attr("eId", id);
        }
        if let Some(number) = division.number() {
            let mut num = Element::new("num");
            num.extend(run_nodes(number));
            element.push(num);
        }
        if let Some(heading) = division.heading() {
            let mut el = Element::new("heading");
            el.extend(self.inlines(&heading.contents));
            element.push(el);
        }

        match division {
            Division::Leaf(leaf) => {
                if !leaf.contents.is_empty() {
                    element.push(self.container("content", &leaf.contents));
                }
            }
            Division::Branch(branch) => {
                if !branch.intro.is_empty() {
                    element.push(self.container("intro", &branch.intro));
                }
                for (i, child) in branch.children.iter().enumerate() {
                    let child_id = id.map(|parent| self.division_id(child, parent, i + 1));
                    element.push(self.division(child, child_id.as_deref()));
                }
                if !branch.wrap_up.is_empty() {
                    element.push(self.container("wrapUp", &branch.wrap_up));
                }
            }
        }
        element
    }

    fn block(&mut self, block: &Block) -> Element {
        match block {
            Block::Line(line) => self.line(line),
            Block::NumberedLine(numbered) => {
                let mut p = self.line_element(&numbered.line);
                p.extend(run_nodes(&numbered.number));
                p.push(Element::new("marker").attr("name", "tab"));
                p.extend(self.inlines(&numbered.line.contents));
                p
            }
            Block::Table(table) => self.table(table),
            Block::TableOfContents(toc) => self.toc(toc),
            Block::Quote(quote) => {
                self.stats.quoted_structure_count += 1;
                let mut structure = Element::new("embeddedStructure");
                for division in &quote.contents {
                    structure.push(self.division(division, None));
                }
                Element::new("block").attr("name", "embeddedStructure").child(structure)
            }
            Block::Mod(m) => {
                if let [Block::Line(line)] = m.contents.as_slice() {
                    let mut p = self.line_element(line);
                    let mut modification = Element::new("mod");
                    modification.extend(self.inlines(&line.contents));
                    p.push(modification);
                    return p;
                }
                if let [Block::NumberedLine(numbered)] = m.contents.as_slice() {
                    let mut p = self.line_element(&numbered.line);
                    p.extend(run_nodes(&numbered.number));
                    p.push(Element::new("marker").attr("name", "tab"));
                    let mut modification = Element::new("mod");
                    modification.extend(self.inlines(&numbered.line.contents));
                    p.push(modification);
                    return p;
                }
                let mut embedded = Element::new("embeddedStructure");
                for inner in &m.contents {
                    embedded.push(self.block(inner));
                }
                Element::new("block")
                    .attr("name", "modification")
                    .child(Element::new("mod").child(embedded))
            }
        }
    }

    /// A `p` element with the line's attributes but no content.
    fn line_element(&self, line: &Line) -> Element {
        let mut p = Element::new("p");
        if let Some(style) = &line.style {
            p.set_attr("class", style.as_str());
        }
        let mut css = Vec::new();
        if line.alignment != Alignment::Left {
            css.push(format!("text-align:{}", line.alignment.as_css()));
        }
        if line.left_indent != 0.0 {
            css.push(format!("margin-left:{}", inches(line.left_indent)));
        }
        if line.first_line_indent != 0.0 {
            css.push(format!("text-indent:{}", inches(line.first_line_indent)));
        }
        if !css.is_empty() {
            p.set_attr("style", css.join(";"));
        }
        p
    }

    fn line(&mut self, line: &Line) -> Element {
        let mut p = self.line_element(line);
        p.extend(self.inlines(&line.contents));
        p
    }

    fn table(&mut self, table: &Table) -> Element {
        self.stats.table_count += 1;
        let mut element = Element::new("table");
        for row in repair_merges(table) {
            let mut tr = Element::new("tr");
            for repaired in row.cells {
                let cell = repaired.cell;
                let mut td = Element::new(if row.is_header { "th" } else { "td" });
                if repaired.rowspan > 1 {
                    td.set_attr("rowspan", repaired.rowspan.to_string());
                }
                if cell.colspan > 1 {
                    td.set_attr("colspan", cell.colspan.to_string());
                }
                let mut css = cell.borders.to_css();
                if let Some(bg) = &cell.background_color {
                    css.push(format!("background-color:{}", bg));
                }
                if !css.is_empty() {
                    td.set_attr("style", css.join(";"));
                }
                for block in &cell.contents {
                    td.push(self.block(block));
                }
                if td.is_empty() {
                    td.push(Element::new("p"));
                }
                tr.push(td);
            }
            element.push(tr);
        }
        element
    }

    fn toc(&mut self, toc: &TableOfContents) -> Element {
        let mut element = Element::new("toc");
        for line in &toc.lines {
            let mut item = Element::new("tocItem").attr("href", "#").attr("level", "1");
            item.extend(self.inlines(&line.contents));
            element.push(item);
        }
        element
    }

    fn inlines(&mut self, inlines: &[Inline]) -> Vec<Node> {
        let mut nodes = Vec::new();
        for inline in inlines {
            match inline {
                Inline::Text(run) => nodes.extend(run_nodes(run)),
                Inline::Tab => nodes.push(Element::new("marker").attr("name", "tab").into()),
                Inline::LineBreak => nodes.push(Element::new("br").into()),
                Inline::FootnoteRef { marker, content, .. } => {
                    self.stats.footnote_count += 1;
                    let mut note = Element::new("authorialNote")
                        .attr("class", "footnote")
                        .attr("marker", marker.as_str());
                    for block in content {
                        note.push(self.block(block));
                    }
                    nodes.push(note.into());
                }
                Inline::Image { src, style } => {
                    let mut img = Element::new("img").attr("src", src.as_str());
                    if let Some(style) = style {
                        img.set_attr("style", style.as_str());
                    }
                    nodes.push(img.into());
                }
                Inline::Hyperlink { href, contents } => {
                    let mut a = Element::new("a").attr("href", href.as_str());
                    a.extend(self.inlines(contents));
                    nodes.push(a.into());
                }
                Inline::Math { mathml } => nodes.push(Node::Raw(mathml.clone())),
                Inline::Bookmark { .. } => {}
                Inline::NeutralCitation(run) => nodes.push(tagged(Element::new("neutralCitation"), run)),
                Inline::CaseNumber(run) => nodes.push(tagged(Element::new("docketNumber"), run)),
                Inline::CourtType { run, court } => nodes.push(tagged(
                    Element::new("courtType").attr("refersTo", format!("#{}", slug(court))),
                    run,
                )),
                Inline::Party { run, role } => {
                    let mut party = Element::new("party").attr("refersTo", format!("#{}", slug(&run.text)));
                    if let Some(role) = role {
                        party.set_attr("as", format!("#{}", role.as_str()));
                    }
                    nodes.push(tagged(party, run));
                }
                Inline::Judge(run) => nodes.push(tagged(
                    Element::new("judge").attr("refersTo", format!("#{}", slug(&run.text))),
                    run,
                )),
                Inline::Lawyer(run) => nodes.push(tagged(
                    Element::new("lawyer").attr("refersTo", format!("#{}", slug(&run.text))),
                    run,
                )),
                Inline::DocketDate { run, date, name } => nodes.push(tagged(
                    Element::new("docDate")
                        .attr("date", date.format("%Y-%m-%d").to_string())
                        .attr("refersTo", format!("#{}", name)),
                    run,
                )),
                Inline::Jurisdiction(run) => nodes.push(tagged(Element::new("docJurisdiction"), run)),
                Inline::QuotedText {
                    run,
                    start_quote,
                    end_quote,
                } => nodes.push(tagged(
                    Element::new("quotedText")
                        .attr("startQuote", start_quote.as_str())
                        .attr("endQuote", end_quote.as_str()),
                    run,
                )),
                Inline::Definition {
                    run,
                    start_quote,
                    end_quote,
                } => {
                    nodes.push(Node::Text(start_quote.clone()));
                    nodes.push(tagged(
                        Element::new("def").attr("refersTo", format!("#{}", slug(&run.text))),
                        run,
                    ));
                    nodes.push(Node::Text(end_quote.clone()));
                }
            }
        }
        nodes
    }
}

fn tagged(mut element: Element, run: &TextRun) -> Node {
    element.extend(run_nodes(run));
    element.into()
}

/// Nodes for a formatted run: text, wrapped in `sup`/`sub` and a styled
/// `span` as needed. Hidden runs produce nothing.
fn run_nodes(run: &TextRun) -> Vec<Node> {
    if run.style.hidden || run.text.is_empty() {
        return Vec::new();
    }
    let mut node = Node::Text(run.text.clone());
    if run.style.superscript || run.style.subscript {
        let name = if run.style.superscript { "sup" } else { "sub" };
        let mut el = Element::new(name);
        el.children.push(node);
        node = el.into();
    }
    let css = run.style.to_css();
    if !css.is_empty() {
        let mut span = Element::new("span").attr("style", css);
        span.children.push(node);
        node = span.into();
    }
    vec![node]
}

fn clean_number(division: &Division) -> Option<&str> {
    if !division.kind().is_paragraph() {
        return None;
    }
    let number = division.number()?.text.trim();
    CLEAN_NUMBER
        .captures(number)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn count_clean_numbers(divisions: &[Division], counts: &mut HashMap<String, usize>) {
    for division in divisions {
        if let Some(number) = clean_number(division) {
            *counts.entry(number.to_string()).or_insert(0) += 1;
        }
        count_clean_numbers(division.children(), counts);
    }
}

/// Work URI from the court and neutral citation, e.g. `.../ewca/civil/2021/12`.
fn work_uri(meta: &Metadata) -> Option<String> {
    let base = meta.court.as_ref()?.url.as_deref()?;
    Some(format!("{}/{}/{}", base, meta.citation_year()?, meta.citation_number()?))
}

fn meta(meta: &Metadata, options: &RenderOptions, hash: Option<&str>) -> Element {
    let uri = work_uri(meta).unwrap_or_else(|| "#".to_string());
    let date = meta
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());
    let date_name = meta.date_name.clone().unwrap_or_else(|| "dummy".to_string());
    let court_ref = meta
        .court
        .as_ref()
        .map(|c| format!("#{}", slug(&c.code)))
        .unwrap_or_else(|| "#".to_string());
    let frbr_date = || {
        Element::new("FRBRdate")
            .attr("date", date.as_str())
            .attr("name", date_name.as_str())
    };

    let mut work = Element::new("FRBRWork")
        .child(Element::new("FRBRthis").attr("value", uri.as_str()))
        .child(Element::new("FRBRuri").attr("value", uri.as_str()))
        .child(frbr_date())
        .child(Element::new("FRBRauthor").attr("href", court_ref.as_str()))
        .child(Element::new("FRBRcountry").attr("value", "GB-UKM"));
    if let Some(title) = &meta.title {
        work.push(Element::new("FRBRname").attr("value", title.as_str()));
    }
    let expression = Element::new("FRBRExpression")
        .child(Element::new("FRBRthis").attr("value", uri.as_str()))
        .child(Element::new("FRBRuri").attr("value", uri.as_str()))
        .child(frbr_date())
        .child(Element::new("FRBRauthor").attr("href", court_ref.as_str()))
        .child(Element::new("FRBRlanguage").attr("language", "eng"));
    let data_uri = format!("{}/data.xml", uri.trim_end_matches('#'));
    let manifestation = Element::new("FRBRManifestation")
        .child(Element::new("FRBRthis").attr("value", data_uri.as_str()))
        .child(Element::new("FRBRuri").attr("value", data_uri.as_str()))
        .child(frbr_date())
        .child(Element::new("FRBRauthor").attr("href", "#tna"))
        .child(Element::new("FRBRformat").attr("value", "application/xml"));
    let identification = Element::new("identification")
        .attr("source", "#tna")
        .child(work)
        .child(expression)
        .child(manifestation);

    let mut proprietary = Element::new("proprietary").attr("source", "#");
    if let Some(court) = &meta.court {
        proprietary.push(Element::new("uk:court").text(court.code.as_str()));
    }
    if let Some(year) = meta.citation_year() {
        proprietary.push(Element::new("uk:year").text(year.to_string()));
    }
    if let Some(number) = meta.citation_number() {
        proprietary.push(Element::new("uk:number").text(number.to_string()));
    }
    if let Some(cite) = &meta.citation {
        proprietary.push(Element::new("uk:cite").text(cite.as_str()));
    }
    proprietary.push(Element::new("uk:parser").text(options.parser_version.as_str()));
    if let Some(hash) = hash {
        proprietary.push(Element::new("uk:hash").text(hash));
    }

    Element::new("meta")
        .child(identification)
        .child(references(meta))
        .child(proprietary)
}

fn references(meta: &Metadata) -> Element {
    let mut references = Element::new("references").attr("source", "#tna").child(
        Element::new("TLCOrganization")
            .attr("eId", "tna")
            .attr("href", TNA_URL)
            .attr("showAs", "The National Archives"),
    );
    let mut seen: HashSet<String> = HashSet::from(["tna".to_string()]);
    let mut add = |references: &mut Element, tag: &str, id: String, href: &str, show_as: &str| {
        if !id.is_empty() && seen.insert(id.clone()) {
            references.push(
                Element::new(tag)
                    .attr("eId", id)
                    .attr("href", href)
                    .attr("showAs", show_as),
            );
        }
    };

    if let Some(court) = &meta.court {
        add(
            &mut references,
            "TLCOrganization",
            slug(&court.code),
            court.url.as_deref().unwrap_or(""),
            &court.name,
        );
    }
    for party in &meta.parties {
        add(&mut references, "TLCPerson", slug(&party.name), "", &party.name);
        if let Some(role) = party.role {
            add(&mut references, "TLCRole", role.as_str().to_string(), "", role.as_str());
        }
    }
    for judge in &meta.judges {
        add(&mut references, "TLCPerson", slug(judge), "", judge);
    }
    for lawyer in &meta.lawyers {
        add(&mut references, "TLCPerson", slug(lawyer), "", lawyer);
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Branch, Court, Decision, Leaf, Mod, NumberedLine, TextStyle};

    fn para(number: &str, text: &str) -> Division {
        Division::Leaf(Leaf::new(
            DivisionKind::NumberedParagraph,
            Some(TextRun::new(number)),
            vec![Block::line(text)],
        ))
    }

    fn judgment(contents: Vec<Division>) -> Judgment {
        Judgment {
            body: vec![Decision {
                author: None,
                contents,
            }],
            ..Default::default()
        }
    }

    fn ids(root: &Element, name: &str) -> Vec<String> {
        root.descendants(name)
            .iter()
            .filter_map(|el| el.get_attr("eId").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_para_ids() {
        let (root, stats) = build_akn(
            &judgment(vec![para("1.", "a"), para("2.", "b")]),
            &RenderOptions::default(),
        );
        assert_eq!(ids(&root, "paragraph"), vec!["para_1", "para_2"]);
        assert_eq!(stats.paragraph_count, 2);
    }

    #[test]
    fn test_duplicate_numbers_are_positional() {
        let (root, _) = build_akn(
            &judgment(vec![para("1.", "a"), para("1.", "b"), para("(3)", "c")]),
            &RenderOptions::default(),
        );
        assert_eq!(
            ids(&root, "paragraph"),
            vec!["decision_1_1", "decision_1_2", "decision_1_3"]
        );
    }

    #[test]
    fn test_child_ids() {
        let child = Division::Leaf(Leaf::new(
            DivisionKind::Subparagraph,
            Some(TextRun::new("(a)")),
            vec![Block::line("x")],
        ));
        let mut branch = Branch::new(DivisionKind::NumberedParagraph, Some(TextRun::new("4.")), vec![child]);
        branch.intro.push(Block::line("intro"));
        let (root, stats) = build_akn(&judgment(vec![Division::Branch(branch)]), &RenderOptions::default());
        assert_eq!(ids(&root, "subparagraph"), vec!["para_4_1"]);
        assert_eq!(stats.subparagraph_count, 1);
        assert_eq!(root.descendants("intro").len(), 1);
    }

    #[test]
    fn test_hash_ignores_meta() {
        let mut first = judgment(vec![para("1.", "a")]);
        let mut second = first.clone();
        first.metadata.title = Some("One".into());
        second.metadata.title = Some("Two".into());
        let options = RenderOptions::default();
        let (a, _) = build_akn(&first, &options);
        let (b, _) = build_akn(&second, &options);
        let hash = |root: &Element| root.descendants("uk:hash")[0].text_content();
        assert_eq!(hash(&a), hash(&b));
        assert_eq!(hash(&a).len(), 64);

        let (c, _) = build_akn(&judgment(vec![para("1.", "different")]), &options);
        assert_ne!(hash(&a), hash(&c));
    }

    #[test]
    fn test_no_hash() {
        let (root, _) = build_akn(&judgment(vec![]), &RenderOptions::new().with_hash(false));
        assert!(root.descendants("uk:hash").is_empty());
        assert_eq!(root.descendants("decision").len(), 1);
    }

    #[test]
    fn test_meta_from_metadata() {
        let mut j = judgment(vec![para("1.", "a")]);
        j.metadata.citation = Some("[2021] EWCA Civ 12".into());
        j.metadata.court = Some(Court {
            code: "EWCA-Civil".into(),
            name: "Court of Appeal (Civil Division)".into(),
            url: Some("https://caselaw.nationalarchives.gov.uk/ewca/civil".into()),
        });
        j.metadata.judges.push("LORD JUSTICE GREEN".into());
        let (root, _) = build_akn(&j, &RenderOptions::default());
        let this = root.descendants("FRBRthis")[0].get_attr("value").map(str::to_string);
        assert_eq!(
            this.as_deref(),
            Some("https://caselaw.nationalarchives.gov.uk/ewca/civil/2021/12")
        );
        assert_eq!(root.descendants("uk:year")[0].text_content(), "2021");
        let people: Vec<_> = root
            .descendants("TLCPerson")
            .iter()
            .filter_map(|p| p.get_attr("eId"))
            .collect();
        assert_eq!(people, vec!["lord-justice-green"]);
    }

    #[test]
    fn test_inline_mapping() {
        let mut line = Line::new();
        line.add_text("See ");
        line.contents.push(Inline::NeutralCitation(TextRun::new("[2020] UKSC 1")));
        line.add_tab();
        line.add_run(TextRun::styled(
            "2",
            TextStyle {
                superscript: true,
                ..Default::default()
            },
        ));
        let p = Builder::new(&Judgment::default()).line(&line);
        assert_eq!(p.descendants("neutralCitation")[0].text_content(), "[2020] UKSC 1");
        assert_eq!(p.descendants("marker").len(), 1);
        assert_eq!(p.descendants("sup").len(), 1);
        assert_eq!(p.text_content(), "See [2020] UKSC 12");
    }

    #[test]
    fn test_numbered_line_block() {
        let numbered = NumberedLine::new(TextRun::new("(1)"), Line::with_text("CLAIMANT"));
        let p = Builder::new(&Judgment::default()).block(&Block::NumberedLine(numbered));
        assert_eq!(p.name, "p");
        assert_eq!(p.text_content(), "(1)CLAIMANT");
    }

    #[test]
    fn test_numbered_amendment_block() {
        let numbered = NumberedLine::new(TextRun::new("(a)"), Line::with_text("omit and"));
        let block = Block::Mod(Mod {
            contents: vec![Block::NumberedLine(numbered)],
        });
        let p = Builder::new(&Judgment::default()).block(&block);
        assert_eq!(p.name, "p");
        assert_eq!(p.descendants("mod")[0].text_content(), "omit and");
        assert_eq!(p.text_content(), "(a)omit and");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Lord Justice Green"), "lord-justice-green");
        assert_eq!(slug("EWCA-Civil"), "ewca-civil");
        assert_eq!(slug("  O'Brien & Co. "), "o-brien-co");
    }
}
