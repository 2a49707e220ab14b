//! End-to-end conversions over the fixture texts

use std::path::{Path, PathBuf};
use ticha_magic::flex::{convert_flex_file, CompactExport};
use ticha_magic::{
    convert_tei_data, generate_html, outline_tei_data, preprocess_xml, AbbrChoice,
    ConvertOptions, GlossDictionary, GlossStats, OutlineOptions, SpellChoice, StylesheetParams,
    TeiStylesheet,
};
use ticha_parser::xml::parse_str;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("Failed to read fixture")
}

fn options() -> ConvertOptions {
    ConvertOptions::new("levanto_arte")
}

#[test]
fn test_pages_and_columns() {
    let html = convert_tei_data(
        &read_fixture("levanto_arte.xml"),
        &TeiStylesheet,
        &options(),
        None,
    )
    .unwrap();

    assert_eq!(
        html.matches(r#"class="printed-text-page levanto_arte""#).count(),
        3
    );
    assert!(html.contains(r#"data-n="0" data-rvn="""#));
    assert!(html.contains(r#"data-n="1" data-rvn="1""#));
    assert!(html.contains(r#"data-n="2" data-rvn="2""#));
    assert!(!html.contains("<pb"));
    assert!(!html.contains("<cb"));
    // two columns on page 1, the second carried over to page 2
    assert_eq!(html.matches(r#"class="col-xs-6""#).count(), 3);
    assert!(!html.contains("teiHeader"));
    assert!(!html.contains("Arte de la lengua"));
}

#[test]
fn test_choices_follow_params() {
    let tei = read_fixture("levanto_arte.xml");
    let default = convert_tei_data(&tei, &TeiStylesheet, &options(), None).unwrap();
    assert!(default.contains("muy\n          xi\n"));
    assert!(default.contains("elegante q~ se habla"));

    let regularized = options().with_params(StylesheetParams {
        spellchoice: SpellChoice::RegSpanish,
        abbrchoice: AbbrChoice::Expan,
    });
    let html = convert_tei_data(&tei, &TeiStylesheet, &regularized, None).unwrap();
    assert!(html.contains("muy\n          ji\n"));
    assert!(html.contains("elegante que se habla"));
}

#[test]
fn test_glosses_from_json_export() {
    let dictionary = GlossDictionary::load(fixture("flex_export.json")).unwrap();
    let tei = parse_str(&preprocess_xml(&read_fixture("levanto_arte.xml"))).unwrap();
    let conversion = generate_html(&tei, &TeiStylesheet, &options(), Some(&dictionary)).unwrap();

    // tobi (hit), cola ni (hit in 1.1), quela (miss), tobi in 1.1 (exact section, miss)
    assert_eq!(
        conversion.gloss_stats,
        Some(GlossStats {
            total_words: 4,
            missed_words: 2
        })
    );
    let html = ticha_magic::formats::html::serialize_to_html(&conversion.html).unwrap();
    assert!(html.contains("<caption>cola ni</caption>"));
    assert!(html.contains("<td>POT</td><td>say</td><td>3</td>"));
    assert!(html.contains(r#"<td colspan="3">'he will say'</td>"#));
    assert!(!html.contains("wrong section"));
    assert!(html.contains(r#"<mark>quela</mark><span class="content hide inline"></span>"#));
}

#[test]
fn test_xml_and_json_exports_agree() {
    let from_xml = GlossDictionary::load(fixture("flex_export.xml")).unwrap();
    let from_json = GlossDictionary::load(fixture("flex_export.json")).unwrap();
    for (section, word) in [
        ("levanto_arte1", "tobi"),
        ("levanto_arte1.1", "colani"),
        ("levanto_arte1.1.4", "cola ni"),
    ] {
        assert_eq!(
            from_xml.lookup(section, word),
            from_json.lookup(section, word),
            "{} in {}",
            word,
            section
        );
        assert!(from_xml.lookup(section, word).is_some());
    }
    assert!(from_xml.lookup("levanto_arte9", "colani").is_none());
    assert!(from_json.lookup("levanto_arte9", "colani").is_some());
}

#[test]
fn test_convert_flex_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("flex_export.json");
    let count = convert_flex_file(&fixture("flex_export.xml"), &output).unwrap();
    assert_eq!(count, 2);

    let export: CompactExport =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let words: Vec<&str> = export.keys().map(String::as_str).collect();
    assert_eq!(words, vec!["tobi", "colani"]);
    assert_eq!(export["colani"][0].section, "levanto_arte1.1");
    assert_eq!(export["colani"][0].flex.morphemes, vec!["co", "la", "ni"]);
}

#[test]
fn test_outline() {
    let html = outline_tei_data(
        &read_fixture("levanto_arte.xml"),
        OutlineOptions::new("levanto_arte"),
        "html",
    )
    .unwrap();
    insta::assert_snapshot!(
        html,
        @r#"<div class="index"><ul><li><a href="https://ticha.haverford.edu/en/texts/levanto_arte/0/original">1 Prologo</a></li><ul id="section1"><li><a href="https://ticha.haverford.edu/en/texts/levanto_arte/1/original">1.01 Del verbo</a></li></ul></ul></div>"#
    );
}

#[test]
fn test_preview_page() {
    let page = convert_tei_data(
        &read_fixture("levanto_arte.xml"),
        &TeiStylesheet,
        &options().with_format("preview"),
        None,
    )
    .unwrap();
    assert!(page.contains("<title>ticha Text Preview</title>"));
    assert!(page.contains(r#"<div class="printed-text-page levanto_arte" data-n="0""#));
}
