use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use slidepress::{
    EditorState, ExportOpts, PageFormat, RenderSession,
    foundation::logging::{LoggingOpts, init_logging},
};

#[derive(Parser, Debug)]
#[command(name = "slidepress", version)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export one slide as a PNG.
    Png(PngArgs),
    /// Export every slide into a PDF.
    Pdf(PdfArgs),
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Extra font directory (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not load fonts installed on the system.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct PngArgs {
    /// Input editor document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Slide number (1-based). Defaults to the document's current slide.
    #[arg(long)]
    slide: Option<usize>,

    /// Width in pixels the slide was displayed at while editing.
    #[arg(long)]
    display_width: Option<u32>,

    /// Output directory; the file is named `slide-<n>.png`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Parser, Debug)]
struct PdfArgs {
    /// Input editor document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PDF path.
    #[arg(long, default_value = slidepress::DEFAULT_PDF_FILE_NAME)]
    out: PathBuf,

    /// Page format: a4 or letter.
    #[arg(long)]
    page: Option<PageFormat>,

    /// JPEG quality for page images (1-100).
    #[arg(long)]
    quality: Option<u8>,

    #[command(flatten)]
    fonts: FontArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingOpts {
        json: cli.log_json,
        ..LoggingOpts::default()
    });
    match cli.cmd {
        Command::Png(args) => cmd_png(args),
        Command::Pdf(args) => cmd_pdf(args),
    }
}

fn load_opts(fonts: &FontArgs) -> anyhow::Result<ExportOpts> {
    let mut opts = ExportOpts::from_env()?;
    opts.font_dirs.extend(fonts.font_dirs.iter().cloned());
    if fonts.no_system_fonts {
        opts.load_system_fonts = false;
    }
    Ok(opts)
}

fn open_session(in_path: &Path, opts: ExportOpts) -> anyhow::Result<(EditorState, RenderSession)> {
    let editor = EditorState::load(in_path)
        .with_context(|| format!("load editor document '{}'", in_path.display()))?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let session = RenderSession::new(assets_root, opts)?;
    Ok((editor, session))
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let opts = load_opts(&args.fonts)?;
    let (editor, mut session) = open_session(&args.in_path, opts)?;

    let index = match args.slide {
        Some(0) => anyhow::bail!("--slide is 1-based"),
        Some(n) => n - 1,
        None => editor.current_slide_index,
    };
    let out = slidepress::export_slide_png(&mut session, &editor, index, args.display_width)?;
    let path = out.write_to_dir(&args.out_dir)?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_pdf(args: PdfArgs) -> anyhow::Result<()> {
    let mut opts = load_opts(&args.fonts)?;
    if let Some(page) = args.page {
        opts.page = page;
    }
    if let Some(q) = args.quality {
        opts.jpeg_quality = q;
    }
    let (editor, mut session) = open_session(&args.in_path, opts)?;

    let file_name = args
        .out
        .file_name()
        .and_then(|s| s.to_str())
        .map(str::to_owned);
    let out = slidepress::export_pdf(&mut session, &editor, file_name.as_deref())?;
    out.write_to(&args.out)?;

    eprintln!("wrote {} ({} pages)", args.out.display(), out.pages);
    Ok(())
}
