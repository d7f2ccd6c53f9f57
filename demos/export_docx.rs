use std::fmt::Write as _;
use std::path::PathBuf;

use namecard::{
    DirectoryDelivery, ExportScope, NameCardSession, PageSize, SvgCardRenderer, SvgRendererOpts,
};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn names_from_args() -> String {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        "Alice,Bob 张三".to_string()
    } else {
        args.join(" ")
    }
}

fn html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn try_main() -> anyhow::Result<()> {
    let renderer = SvgCardRenderer::new(SvgRendererOpts::default())?;
    if !renderer.has_fonts() {
        anyhow::bail!("no system fonts found");
    }

    let mut session = NameCardSession::new(Box::new(renderer));
    session.set_page_size(PageSize::A5)?;
    session.set_names_text(&names_from_args())?;
    if let Some(first) = session.cards().first().map(|c| c.name().to_string()) {
        session.toggle(&first);
    }

    let out_dir = PathBuf::from("target").join("demo");
    let mut delivery = DirectoryDelivery::new(&out_dir);
    let all = session.export_document(ExportScope::All, &mut delivery)?;
    let selected = session.export_images(ExportScope::Selected, &mut delivery)?;

    // A preview page with the cards inlined, like the on-screen card grid.
    let mut html = String::from("<!doctype html><meta charset=\"utf-8\"><body>\n");
    for card in session.cards() {
        let _ = writeln!(
            html,
            "<figure><img src=\"{}\" width=\"{}\"><figcaption>{}</figcaption></figure>",
            card.data_url(),
            card.width() / 10,
            html_text(card.name())
        );
    }
    html.push_str("</body>\n");
    let preview = out_dir.join("preview.html");
    std::fs::write(&preview, html)?;

    for file in all.files.iter().chain(&selected.files) {
        eprintln!("wrote {}", delivery.path_for(file).display());
    }
    eprintln!("wrote {}", preview.display());
    Ok(())
}
