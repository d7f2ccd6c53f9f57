use std::fmt::Write as _;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;

use crate::card::NameCard;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{NameCardError, NameCardResult};
use crate::foundation::math::cm_to_px;
use crate::foundation::xml::escape_xml;
use crate::input::CardParams;
use crate::presets::PageSize;
use crate::render::CardRenderer;
use crate::render::layout::{OverflowPolicy, PlacardLayout, TextMetrics};

/// Serif families tried, in order, when resolving the generic `serif` family.
const SERIF_PREFERENCE: [&str; 6] = [
    "Times New Roman",
    "Liberation Serif",
    "DejaVu Serif",
    "Noto Serif",
    "Noto Serif CJK SC",
    "FreeSerif",
];

/// Options for [`SvgCardRenderer`].
#[derive(Clone, Debug)]
pub struct SvgRendererOpts {
    /// Oversampling factor. Font pixels are `points * pixel_ratio`; the surface is
    /// `page_cm * pixel_ratio^2` pixels.
    pub pixel_ratio: f64,
    /// CSS font-family list used for both copies of the name.
    pub font_family: String,
    /// Extra font files registered before system fonts are queried.
    pub font_files: Vec<PathBuf>,
    /// Whether to scan the system font directories.
    pub load_system_fonts: bool,
    /// Handling of names wider than the surface.
    pub overflow: OverflowPolicy,
}

impl Default for SvgRendererOpts {
    fn default() -> Self {
        Self {
            pixel_ratio: 10.0,
            font_family: "serif".to_string(),
            font_files: Vec::new(),
            load_system_fonts: true,
            overflow: OverflowPolicy::Clamp,
        }
    }
}

/// CPU placard renderer.
///
/// Each placard is described as a small SVG document (two bold serif `<text>` runs, the second
/// under a half-turn transform), parsed with `usvg` and rasterized with `resvg` into one reused
/// pixmap.
pub struct SvgCardRenderer {
    opts: SvgRendererOpts,
    usvg_opts: usvg::Options<'static>,
    surface: Option<resvg::tiny_skia::Pixmap>,
}

impl SvgCardRenderer {
    /// Build a renderer and its font database.
    pub fn new(opts: SvgRendererOpts) -> NameCardResult<Self> {
        if !opts.pixel_ratio.is_finite() || opts.pixel_ratio <= 0.0 {
            return Err(NameCardError::validation(
                "pixel_ratio must be finite and > 0",
            ));
        }
        if opts.font_family.trim().is_empty() {
            return Err(NameCardError::validation("font_family must be non-empty"));
        }

        let db = build_fontdb(&opts)?;
        tracing::debug!(faces = db.len(), "font database ready");

        let mut usvg_opts = usvg::Options::default();
        usvg_opts.fontdb = Arc::new(db);

        Ok(Self {
            opts,
            usvg_opts,
            surface: None,
        })
    }

    /// Options this renderer was built with.
    pub fn opts(&self) -> &SvgRendererOpts {
        &self.opts
    }

    /// `true` when at least one font face is registered.
    pub fn has_fonts(&self) -> bool {
        !self.usvg_opts.fontdb.is_empty()
    }

    /// Surface size for a page preset.
    pub fn surface_size(&self, page: PageSize) -> NameCardResult<SurfaceSize> {
        let px_per_cm = self.opts.pixel_ratio * self.opts.pixel_ratio;
        SurfaceSize::new(
            cm_to_px(page.width_cm(), px_per_cm),
            cm_to_px(page.height_cm(), px_per_cm),
        )
    }

    /// Font size in pixels for the given parameters.
    pub fn font_px(&self, params: &CardParams) -> f64 {
        f64::from(params.font_size.points()) * self.opts.pixel_ratio
    }

    /// Measure `name` at `font_px` with the renderer's font settings.
    ///
    /// A name that lays out to nothing (zero-width characters, glyphs missing from every face)
    /// measures as an empty run one em tall, so it still gets a blank placard. Measuring without
    /// any registered font is an error.
    pub fn measure(&self, name: &str, font_px: f64) -> NameCardResult<TextMetrics> {
        if !self.has_fonts() {
            return Err(NameCardError::render(format!(
                "no font faces registered to lay out '{name}'"
            )));
        }

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = font_px.ceil().max(1.0)
        );
        self.push_text(&mut svg, name, font_px, 0.0, 0.0, None);
        svg.push_str("</svg>");

        let tree = usvg::Tree::from_str(&svg, &self.usvg_opts)
            .map_err(|e| NameCardError::render(format!("parse measurement svg: {e}")))?;
        let Some((left, top, width, height)) =
            find_text_bbox(tree.root()).filter(|&(_, _, w, h)| w > 0.0 && h > 0.0)
        else {
            tracing::warn!(
                name,
                family = %self.opts.font_family,
                "name lays out to no visible glyphs; rendering a blank placard"
            );
            return Ok(TextMetrics::empty(font_px));
        };

        Ok(TextMetrics {
            left: f64::from(left),
            top: f64::from(top),
            width: f64::from(width),
            height: f64::from(height),
        })
    }

    /// Compute the layout for `name` without rasterizing.
    pub fn layout(&self, name: &str, params: &CardParams) -> NameCardResult<PlacardLayout> {
        let surface = self.surface_size(params.page_size)?;
        let font_px = self.font_px(params);
        let metrics = self.measure(name, font_px)?;
        Ok(PlacardLayout::compute(
            surface,
            font_px,
            metrics,
            self.opts.overflow,
        ))
    }

    /// SVG document for one placard.
    pub fn placard_svg(&self, name: &str, layout: &PlacardLayout) -> String {
        let (w, h) = (layout.surface.width, layout.surface.height);
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let (x, y) = (layout.origin.x, layout.origin.y);
        self.push_text(&mut svg, name, layout.font_px, x, y, None);
        self.push_text(
            &mut svg,
            name,
            layout.font_px,
            x,
            y,
            Some(layout.half_turn.as_coeffs()),
        );
        svg.push_str("</svg>");
        svg
    }

    fn push_text(
        &self,
        out: &mut String,
        name: &str,
        font_px: f64,
        x: f64,
        y: f64,
        transform: Option<[f64; 6]>,
    ) {
        let _ = write!(
            out,
            r##"<text x="{x:.3}" y="{y:.3}" font-family="{family}" font-weight="bold" font-size="{font_px:.3}" fill="#000000" xml:space="preserve""##,
            family = escape_xml(&self.opts.font_family),
        );
        if let Some([a, b, c, d, e, f]) = transform {
            let _ = write!(
                out,
                r#" transform="matrix({a:.6} {b:.6} {c:.6} {d:.6} {e:.3} {f:.3})""#
            );
        }
        let _ = write!(out, ">{}</text>", escape_xml(name));
    }

    fn surface_for(&mut self, size: SurfaceSize) -> NameCardResult<&mut resvg::tiny_skia::Pixmap> {
        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|p| p.width() == size.width && p.height() == size.height);
        if !reuse {
            tracing::debug!(width = size.width, height = size.height, "allocating placard surface");
            let p = resvg::tiny_skia::Pixmap::new(size.width, size.height).ok_or_else(|| {
                NameCardError::render(format!(
                    "failed to allocate {}x{} surface",
                    size.width, size.height
                ))
            })?;
            self.surface = Some(p);
        }
        self.surface
            .as_mut()
            .ok_or_else(|| NameCardError::render("placard surface missing"))
    }
}

impl CardRenderer for SvgCardRenderer {
    fn render(&mut self, name: &str, params: &CardParams) -> NameCardResult<NameCard> {
        let layout = self.layout(name, params)?;
        if layout.overflowed {
            let page = layout.surface.rect();
            let overhang = layout.upright_box().x1 - page.x1;
            tracing::warn!(
                name,
                policy = ?self.opts.overflow,
                overhang_px = overhang.max(0.0).round(),
                "name is wider than the {} page",
                params.page_size
            );
        }
        tracing::trace!(
            name,
            upright = ?layout.upright_box(),
            turned = ?layout.mirrored_box(),
            "placard layout"
        );

        let svg = self.placard_svg(name, &layout);
        let tree = usvg::Tree::from_str(&svg, &self.usvg_opts)
            .map_err(|e| NameCardError::render(format!("parse placard svg: {e}")))?;

        let size = layout.surface;
        let pixmap = self.surface_for(size)?;
        pixmap.fill(resvg::tiny_skia::Color::WHITE);
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let png = encode_png(size, pixmap.data())?;
        tracing::debug!(name, bytes = png.len(), "placard rendered");
        Ok(NameCard::new(name, png, size.width, size.height))
    }
}

fn build_fontdb(opts: &SvgRendererOpts) -> NameCardResult<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    for path in &opts.font_files {
        db.load_font_file(path)
            .with_context(|| format!("load font file '{}'", path.display()))?;
    }
    if opts.load_system_fonts {
        db.load_system_fonts();
    }
    if let Some(family) = pick_serif_family(&db) {
        db.set_serif_family(family);
    }
    Ok(db)
}

/// Pick the family the generic `serif` keyword should resolve to.
///
/// Falls back to any serif-looking family, then to any family at all, so that a machine without
/// Times still renders something.
fn pick_serif_family(db: &usvg::fontdb::Database) -> Option<String> {
    let families: Vec<&str> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
        .collect();

    SERIF_PREFERENCE
        .iter()
        .find(|want| families.iter().any(|f| f.eq_ignore_ascii_case(want)))
        .map(|f| f.to_string())
        .or_else(|| {
            families
                .iter()
                .find(|f| f.contains("Serif") && !f.contains("Sans"))
                .map(|f| f.to_string())
        })
        .or_else(|| families.first().map(|f| f.to_string()))
}

/// `(left, top, width, height)` of the first text node, in the text's own coordinates.
fn find_text_bbox(group: &usvg::Group) -> Option<(f32, f32, f32, f32)> {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => {
                if let Some(r) = find_text_bbox(g.as_ref()) {
                    return Some(r);
                }
            }
            usvg::Node::Text(t) => {
                let b = t.bounding_box();
                return Some((b.left(), b.top(), b.width(), b.height()));
            }
            usvg::Node::Path(_) | usvg::Node::Image(_) => {}
        }
    }
    None
}

fn encode_png(size: SurfaceSize, rgba: &[u8]) -> NameCardResult<Vec<u8>> {
    // The surface is cleared to opaque white, so premultiplied and straight alpha agree.
    let img = image::RgbaImage::from_raw(size.width, size.height, rgba.to_vec())
        .ok_or_else(|| NameCardError::render("surface buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode placard png")?;
    Ok(buf)
}
