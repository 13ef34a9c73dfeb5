use anyhow::Context;
use clap::Parser;
use folio::{dom::DEFAULT_TEMPLATE, PageConfig, PageState};
use std::path::PathBuf;

/// Render a portfolio page from a profile document served at BASE_URL.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Args {
    /// Location of the page; the data path is resolved against it
    base_url: String,

    /// Relative path of the profile document
    #[arg(long, default_value = "./data.json")]
    data: String,

    /// Host page to render into (defaults to the built-in template)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Write the rendered page here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Your own domain, shown with the website icon
    #[arg(long)]
    personal_domain: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Footer year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let template = match &args.template {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let config = PageConfig {
        base_url: args.base_url,
        data_path: args.data,
        timeout_ms: args.timeout_ms,
        year: args.year,
        personal_domain: args.personal_domain,
        ..Default::default()
    };

    let renderer = folio::new_renderer(config)?;
    let (state, html) = renderer.render_html(&template)?;

    match &args.out {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", html),
    }

    if let PageState::Failed(msg) = state {
        log::error!("{}", msg);
        std::process::exit(1);
    }
    Ok(())
}
