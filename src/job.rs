use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::docx::DocxOpts;
use crate::foundation::error::{NameCardError, NameCardResult};
use crate::input::CardInputs;
use crate::presets::{FontSize, PageSize};
use crate::render::layout::OverflowPolicy;
use crate::render::svg::SvgRendererOpts;

/// A batch description: names, presets, renderer settings and an optional selection.
///
/// Every field has a default, so `{}` is a valid (empty) job.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardJob {
    /// Names in entry order.
    pub names: Vec<String>,
    /// Font size in points.
    pub font_size: FontSize,
    /// Page preset.
    pub page_size: PageSize,
    /// Handling of names wider than the page.
    pub overflow: OverflowPolicy,
    /// CSS font-family list; `serif` when unset.
    pub font_family: Option<String>,
    /// Extra font files, relative to the job file.
    pub font_files: Vec<PathBuf>,
    /// Names to export when the job targets a selection. Empty means "all".
    pub selected: Vec<String>,
    /// Document options.
    pub docx: DocxOpts,
}

impl CardJob {
    /// Read a job from JSON. Relative font paths are resolved against the file's directory.
    pub fn from_path(path: &Path) -> NameCardResult<Self> {
        let f = File::open(path).with_context(|| format!("open job '{}'", path.display()))?;
        let mut job: CardJob = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| NameCardError::validation(format!("parse job '{}': {e}", path.display())))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for font in &mut job.font_files {
            if font.is_relative() {
                *font = base.join(&*font);
            }
        }
        Ok(job)
    }

    /// Form inputs described by this job.
    pub fn inputs(&self) -> CardInputs {
        let mut inputs = CardInputs::with_names(self.names.iter().cloned());
        inputs.set_font_size(self.font_size);
        inputs.set_page_size(self.page_size);
        inputs
    }

    /// Renderer options described by this job.
    pub fn renderer_opts(&self) -> SvgRendererOpts {
        let defaults = SvgRendererOpts::default();
        SvgRendererOpts {
            font_family: self
                .font_family
                .clone()
                .unwrap_or(defaults.font_family.clone()),
            font_files: self.font_files.clone(),
            overflow: self.overflow,
            ..defaults
        }
    }
}
