use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use namecard::{
    CardJob, DirectoryDelivery, ExportReport, ExportScope, FontSize, NameCardSession,
    OverflowPolicy, PageSize, SvgCardRenderer,
};

#[derive(Parser, Debug)]
#[command(name = "namecard", version, about = "Render names into folding placards")]
struct Cli {
    /// Log more (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export one PNG per card.
    Images(ExportArgs),
    /// Export a DOCX with one card per page, each followed by a blank page.
    Docx(ExportArgs),
    /// Print the page-size and font-size presets.
    Presets,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Job JSON; flags below override its values.
    #[arg(long)]
    job: Option<PathBuf>,

    /// Names separated by commas, spaces or full-width commas.
    #[arg(long)]
    names: Option<String>,

    /// Font size in points (12, 24, 36, 48, 64).
    #[arg(long, value_parser = parse_font_size)]
    font_size: Option<FontSize>,

    /// Page size (A3, A4, A5).
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,

    /// Export only these names (repeatable).
    #[arg(long = "selected")]
    selected: Vec<String>,

    /// Shrink names that are wider than the page instead of letting them run off the edge.
    #[arg(long)]
    shrink_to_fit: bool,

    /// CSS font-family list for the placard text.
    #[arg(long)]
    font_family: Option<String>,

    /// Extra font file to register (repeatable).
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,

    /// Fail instead of replacing existing files.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Clone, Copy, Debug)]
enum ExportKind {
    Images,
    Docx,
}

fn parse_font_size(s: &str) -> Result<FontSize, String> {
    s.parse().map_err(|e: namecard::NameCardError| e.to_string())
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    s.parse().map_err(|e: namecard::NameCardError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Images(args) => cmd_export(args, ExportKind::Images),
        Command::Docx(args) => cmd_export(args, ExportKind::Docx),
        Command::Presets => {
            cmd_presets();
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_job(args: &ExportArgs) -> anyhow::Result<CardJob> {
    let mut job = match &args.job {
        Some(path) => CardJob::from_path(path)?,
        None => CardJob::default(),
    };
    if let Some(names) = &args.names {
        job.names = namecard::parse_names(names);
    }
    if let Some(font_size) = args.font_size {
        job.font_size = font_size;
    }
    if let Some(page_size) = args.page_size {
        job.page_size = page_size;
    }
    if !args.selected.is_empty() {
        job.selected = args.selected.clone();
    }
    if args.shrink_to_fit {
        job.overflow = OverflowPolicy::ShrinkToFit;
    }
    if let Some(family) = &args.font_family {
        job.font_family = Some(family.clone());
    }
    job.font_files.extend(args.font_files.iter().cloned());
    Ok(job)
}

fn cmd_export(args: ExportArgs, kind: ExportKind) -> anyhow::Result<()> {
    let job = resolve_job(&args)?;
    if job.names.is_empty() {
        anyhow::bail!("no names given (use --names or a job file)");
    }

    let renderer = SvgCardRenderer::new(job.renderer_opts()).context("set up renderer")?;
    if !renderer.has_fonts() {
        anyhow::bail!("no fonts found; pass --font-file");
    }

    let mut session =
        NameCardSession::new(Box::new(renderer)).with_docx_opts(job.docx.clone());
    session.apply(job.inputs()).context("render cards")?;

    let scope = if job.selected.is_empty() {
        ExportScope::All
    } else {
        for name in &job.selected {
            if !session.toggle(name) {
                tracing::warn!(name = %name, "selected name has no card");
            }
        }
        ExportScope::Selected
    };

    let mut delivery = DirectoryDelivery::new(&args.out).with_overwrite(!args.no_overwrite);
    let report: ExportReport = match kind {
        ExportKind::Images => session
            .export_images(scope, &mut delivery)
            .context("export images")?,
        ExportKind::Docx => session
            .export_document(scope, &mut delivery)
            .context("export document")?,
    };

    if report.is_noop() {
        anyhow::bail!("nothing to export for {scope:?}");
    }
    for file in &report.files {
        eprintln!("wrote {}", delivery.path_for(file).display());
    }
    Ok(())
}

fn cmd_presets() {
    println!("page sizes (cm):");
    for page in PageSize::ALL {
        let (w, h) = page.dims_cm();
        let default = if page == PageSize::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {page}: {w} x {h}{default}");
    }
    println!("font sizes (pt):");
    for size in FontSize::all() {
        let default = if size == FontSize::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {size}{default}");
    }
}
