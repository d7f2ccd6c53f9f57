//! Minimal WordprocessingML package writer for placard documents.
//!
//! Every card becomes one section sized to the page preset, holding a single floating picture
//! centered on the page. Each card section is followed by an empty section, so `K` cards give
//! `2K` pages.

use std::fmt::Write as _;
use std::io::{Cursor, Write as _};

use chrono::{DateTime, SecondsFormat, Utc};
use zip::write::SimpleFileOptions;

use crate::card::NameCard;
use crate::export::ExportReport;
use crate::export::delivery::FileDelivery;
use crate::foundation::error::{NameCardError, NameCardResult};
use crate::foundation::math::{cm_to_twips, px_to_emu};
use crate::foundation::xml::escape_xml;
use crate::presets::PageSize;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Word's default page margin (one inch) in twips.
const MARGIN_TWIPS: u32 = 1440;
const HEADER_FOOTER_TWIPS: u32 = 708;

/// Document file extension.
pub const DOC_EXT: &str = "docx";

/// Options for document assembly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocxOpts {
    /// Picture size in CSS pixels per page centimeter. The picture keeps the page's aspect ratio.
    pub image_px_per_cm: f64,
    /// Document title written to the core properties.
    pub title: String,
}

impl Default for DocxOpts {
    fn default() -> Self {
        Self {
            image_px_per_cm: 30.0,
            title: "NameCard".to_string(),
        }
    }
}

/// `NameCard_<unix-ms>.docx`.
pub fn document_file_name(created: DateTime<Utc>) -> String {
    format!("NameCard_{}.{DOC_EXT}", created.timestamp_millis())
}

/// Assemble a `.docx` package for `cards`.
pub fn build_docx(
    cards: &[&NameCard],
    page: PageSize,
    opts: &DocxOpts,
    created: DateTime<Utc>,
) -> NameCardResult<Vec<u8>> {
    if cards.is_empty() {
        return Err(NameCardError::validation(
            "a document needs at least one card",
        ));
    }
    if !opts.image_px_per_cm.is_finite() || opts.image_px_per_cm <= 0.0 {
        return Err(NameCardError::validation(
            "image_px_per_cm must be finite and > 0",
        ));
    }

    let mut pkg = Package::new();
    pkg.add("[Content_Types].xml", content_types().as_bytes())?;
    pkg.add("_rels/.rels", package_rels().as_bytes())?;
    pkg.add("docProps/core.xml", core_props(&opts.title, created).as_bytes())?;
    pkg.add("word/_rels/document.xml.rels", document_rels(cards.len()).as_bytes())?;
    pkg.add("word/document.xml", document_xml(cards, page, opts).as_bytes())?;
    for (i, card) in cards.iter().enumerate() {
        pkg.add(&format!("word/media/image{}.png", i + 1), card.png())?;
    }
    pkg.finish()
}

/// Build the document and hand it to `delivery` as `NameCard_<unix-ms>.docx`.
pub fn export_document(
    cards: &[&NameCard],
    page: PageSize,
    opts: &DocxOpts,
    created: DateTime<Utc>,
    delivery: &mut dyn FileDelivery,
) -> NameCardResult<ExportReport> {
    let bytes = build_docx(cards, page, opts, created)?;
    let file_name = delivery.deliver(&bytes, &document_file_name(created))?;

    tracing::info!(
        cards = cards.len(),
        page = %page,
        file = %file_name,
        bytes = bytes.len(),
        "exported placard document"
    );
    let mut report = ExportReport::default();
    report.record(file_name, bytes.len());
    Ok(report)
}

struct Package {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
    opts: SimpleFileOptions,
}

impl Package {
    fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
            opts: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        }
    }

    fn add(&mut self, path: &str, bytes: &[u8]) -> NameCardResult<()> {
        self.zip
            .start_file(path, self.opts)
            .map_err(|e| NameCardError::export(format!("start '{path}': {e}")))?;
        self.zip
            .write_all(bytes)
            .map_err(|e| NameCardError::export(format!("write '{path}': {e}")))
    }

    fn finish(self) -> NameCardResult<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| NameCardError::export(format!("finish docx package: {e}")))?;
        Ok(cursor.into_inner())
    }
}

fn content_types() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Default Extension="png" ContentType="image/png"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            "</Types>"
        ),
        decl = XML_DECL
    )
}

fn package_rels() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL
    )
}

fn core_props(title: &str, created: DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        concat!(
            "{decl}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title>",
            "<dc:creator>namecard</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        decl = XML_DECL,
        title = escape_xml(title),
        stamp = stamp,
    )
}

fn image_rel_id(index: usize) -> String {
    format!("rIdImg{}", index + 1)
}

fn document_rels(count: usize) -> String {
    let mut out = String::new();
    out.push_str(XML_DECL);
    out.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 0..count {
        let _ = write!(
            out,
            r#"<Relationship Id="{id}" Type="{REL_IMAGE}" Target="media/image{n}.png"/>"#,
            id = image_rel_id(i),
            n = i + 1,
        );
    }
    out.push_str("</Relationships>");
    out
}

fn section_props(page: PageSize) -> String {
    format!(
        concat!(
            "<w:sectPr>",
            r#"<w:type w:val="nextPage"/>"#,
            r#"<w:pgSz w:w="{w}" w:h="{h}" w:orient="portrait"/>"#,
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="{hf}" w:footer="{hf}" w:gutter="0"/>"#,
            r#"<w:vAlign w:val="top"/>"#,
            "</w:sectPr>"
        ),
        w = cm_to_twips(page.width_cm()),
        h = cm_to_twips(page.height_cm()),
        m = MARGIN_TWIPS,
        hf = HEADER_FOOTER_TWIPS,
    )
}

fn picture_run(index: usize, card: &NameCard, cx: u64, cy: u64) -> String {
    let id = index + 1;
    let name = escape_xml(card.name());
    format!(
        concat!(
            "<w:r><w:drawing>",
            r#"<wp:anchor distT="0" distB="0" distL="0" distR="0" simplePos="0" relativeHeight="{id}" "#,
            r#"behindDoc="0" locked="0" layoutInCell="1" allowOverlap="1">"#,
            r#"<wp:simplePos x="0" y="0"/>"#,
            r#"<wp:positionH relativeFrom="page"><wp:align>center</wp:align></wp:positionH>"#,
            r#"<wp:positionV relativeFrom="page"><wp:align>center</wp:align></wp:positionV>"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            "<wp:wrapNone/>",
            r#"<wp:docPr id="{id}" name="Picture {id}" descr="{name}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            "<pic:pic>",
            r#"<pic:nvPicPr><pic:cNvPr id="{id}" name="image{id}.png" descr="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            "</pic:pic>",
            "</a:graphicData></a:graphic>",
            "</wp:anchor>",
            "</w:drawing></w:r>"
        ),
        id = id,
        cx = cx,
        cy = cy,
        name = name,
        rel = image_rel_id(index),
    )
}

fn document_xml(cards: &[&NameCard], page: PageSize, opts: &DocxOpts) -> String {
    let sect = section_props(page);
    let cx = px_to_emu(page.width_cm() * opts.image_px_per_cm);
    let cy = px_to_emu(page.height_cm() * opts.image_px_per_cm);

    let mut out = String::new();
    out.push_str(XML_DECL);
    out.push_str(concat!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
        r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
        "<w:body>"
    ));

    let last = cards.len() - 1;
    for (i, card) in cards.iter().enumerate() {
        // Card page: the section break lives in the paragraph that holds the picture.
        let _ = write!(
            out,
            "<w:p><w:pPr>{sect}</w:pPr>{run}</w:p>",
            run = picture_run(i, card, cx, cy),
        );
        // Blank buffer page. The final section's properties belong to the body itself.
        if i == last {
            let _ = write!(out, "<w:p/>{sect}");
        } else {
            let _ = write!(out, "<w:p><w:pPr>{sect}</w:pPr></w:p>");
        }
    }

    out.push_str("</w:body></w:document>");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/docx.rs"]
mod tests;
