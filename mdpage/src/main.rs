//! mdpage - read Markdown one page at a time in the terminal

use anyhow::{bail, Context, Result};
use clap::Parser;
use mdpage_core::{Config, Document, Session};
use mdpage_tui::App;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Page through a Markdown document split at `---`, headings or bold labels
#[derive(Parser, Debug)]
#[command(name = "mdpage")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to markdown file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start on this page (1-based)
    #[arg(long, value_name = "N")]
    page: Option<usize>,

    /// Start on the first page with this contents label, e.g. "2. Usage"
    #[arg(long, value_name = "TEXT", conflicts_with = "page")]
    label: Option<String>,

    /// Print the table of contents and exit
    #[arg(long)]
    toc: bool,

    /// Do not watch the file for changes
    #[arg(long)]
    #[cfg_attr(not(feature = "watch"), allow(dead_code))]
    no_watch: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;
    #[cfg(feature = "watch")]
    let config = {
        let mut config = config;
        if args.no_watch {
            config.watch.enabled = false;
        }
        config
    };

    let doc = match &args.file {
        Some(path) => Document::load(path)
            .with_context(|| format!("Failed to load document: {}", path.display()))?,
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("No input: pass a FILE or pipe markdown on stdin");
            }
            Document::read_from(stdin.lock())?
        }
    };

    let mut session = Session::new(doc);
    log::info!(
        "{} pages via {} strategy",
        session.page_count(),
        session.strategy()
    );

    if let Some(position) = args.page {
        let index = position
            .checked_sub(1)
            .context("Page numbers start at 1")?;
        session
            .jump_to(index)
            .with_context(|| format!("Cannot start on page {position}"))?;
    } else if let Some(label) = &args.label {
        session
            .select_by_label(label)
            .with_context(|| format!("Cannot start on label {label:?}"))?;
    }

    if args.toc {
        for label in session.labels() {
            println!("{label}");
        }
        return Ok(());
    }

    mdpage_tui::run(App::new(config, session)).context("TUI application error")?;

    Ok(())
}
