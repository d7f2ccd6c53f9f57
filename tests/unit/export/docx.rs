use std::io::Read as _;

use chrono::TimeZone as _;

use super::*;
use crate::export::delivery::InMemoryDelivery;

fn created() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_760_000_000_123).unwrap()
}

fn card(name: &str) -> NameCard {
    NameCard::new(name, vec![0x89, b'P', b'N', b'G', name.len() as u8], 2, 3)
}

fn read_entry(bytes: &[u8], path: &str) -> Vec<u8> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = zip.by_name(path).unwrap();
    let mut out = Vec::new();
    entry.read_to_end(&mut out).unwrap();
    out
}

fn document(bytes: &[u8]) -> String {
    String::from_utf8(read_entry(bytes, "word/document.xml")).unwrap()
}

#[test]
fn file_name_carries_unix_millis() {
    assert_eq!(document_file_name(created()), "NameCard_1760000000123.docx");
}

#[test]
fn two_sections_per_card_with_active_page_size() {
    let (a, b) = (card("Alice"), card("Bob"));
    let bytes = build_docx(&[&a, &b], PageSize::A4, &DocxOpts::default(), created()).unwrap();
    let doc = document(&bytes);

    assert_eq!(doc.matches("<w:sectPr>").count(), 4);
    assert_eq!(doc.matches(r#"<w:pgSz w:w="11900" w:h="16838""#).count(), 4);
    assert_eq!(doc.matches("<wp:anchor ").count(), 2);
    assert_eq!(
        doc.matches(r#"<wp:positionH relativeFrom="page"><wp:align>center</wp:align>"#)
            .count(),
        2
    );
    assert_eq!(
        doc.matches(r#"<wp:positionV relativeFrom="page"><wp:align>center</wp:align>"#)
            .count(),
        2
    );
    assert!(doc.ends_with("</w:sectPr></w:body></w:document>"));
}

#[test]
fn picture_extent_scales_page_by_magnification() {
    let a = card("Alice");
    let bytes = build_docx(&[&a], PageSize::A5, &DocxOpts::default(), created()).unwrap();
    let doc = document(&bytes);
    let cx = px_to_emu(14.82 * 30.0);
    let cy = px_to_emu(20.99 * 30.0);
    assert!(doc.contains(&format!(r#"<wp:extent cx="{cx}" cy="{cy}"/>"#)));
    assert!(doc.contains(r#"<w:pgSz w:w="8402" w:h="11900""#));
}

#[test]
fn media_and_relationships_line_up() {
    let (a, b) = (card("Alice"), card("Bob"));
    let bytes = build_docx(&[&a, &b], PageSize::A3, &DocxOpts::default(), created()).unwrap();

    assert_eq!(read_entry(&bytes, "word/media/image1.png"), a.png());
    assert_eq!(read_entry(&bytes, "word/media/image2.png"), b.png());

    let rels = String::from_utf8(read_entry(&bytes, "word/_rels/document.xml.rels")).unwrap();
    assert!(rels.contains(r#"Id="rIdImg1""#));
    assert!(rels.contains(r#"Target="media/image2.png""#));

    let doc = document(&bytes);
    assert!(doc.contains(r#"r:embed="rIdImg1""#));
    assert!(doc.contains(r#"r:embed="rIdImg2""#));

    let types = String::from_utf8(read_entry(&bytes, "[Content_Types].xml")).unwrap();
    assert!(types.contains(r#"Extension="png""#));
}

#[test]
fn names_are_escaped_in_picture_descriptions() {
    let a = card("A&B");
    let bytes = build_docx(&[&a], PageSize::A4, &DocxOpts::default(), created()).unwrap();
    assert!(document(&bytes).contains(r#"descr="A&amp;B""#));
}

#[test]
fn empty_document_is_rejected() {
    let err = build_docx(&[], PageSize::A4, &DocxOpts::default(), created()).unwrap_err();
    assert!(err.to_string().contains("at least one card"));
}

#[test]
fn bad_magnification_is_rejected() {
    let a = card("Alice");
    let opts = DocxOpts {
        image_px_per_cm: 0.0,
        ..DocxOpts::default()
    };
    assert!(build_docx(&[&a], PageSize::A4, &opts, created()).is_err());
}

#[test]
fn export_document_delivers_one_file() {
    let a = card("Alice");
    let mut delivery = InMemoryDelivery::new();
    let report = export_document(
        &[&a],
        PageSize::A4,
        &DocxOpts::default(),
        created(),
        &mut delivery,
    )
    .unwrap();
    assert_eq!(report.files, vec!["NameCard_1760000000123.docx"]);
    assert_eq!(delivery.names(), vec!["NameCard_1760000000123.docx"]);
    assert_eq!(report.bytes, delivery.files()[0].bytes.len() as u64);
}
