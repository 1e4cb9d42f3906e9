use clap::{Parser, Subcommand};
use practice_site::catalog::{CatalogState, PriorityMode, SortDirection, resolve_page_param};
use practice_site::config::{self, RuntimeMode};
use practice_site::site::Site;
use practice_site::sitemap::{render_sitemap, sitemap_entries};
use practice_site::types::Language;
use practice_site::{generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "practice-site")]
#[command(about = "Static site generator for a bilingual psychotherapy practice")]
#[command(long_about = "\
Static site generator for a bilingual psychotherapy practice

Articles, static pages, and UI strings are YAML files with an English and a
Chinese version of every text. Each build writes the English site at / and
the Chinese site at /zh/.

Content structure:

  content/
  ├── config.toml                  # Site identity and build mode (optional)
  ├── articles/
  │   └── coping-with-anxiety/     # Directory name is the slug
  │       ├── metadata.yaml        # title, description, categories, flags, date
  │       └── content.yaml         # markdown body, optional image and caption
  ├── static-pages/
  │   ├── profile.yaml             # title + markdown_content
  │   └── faq.yaml                 # ### headings become FAQ questions
  ├── translations/*.yaml          # key: literal, or key: {en, zh}
  ├── config/
  │   ├── pagination.yaml          # articles_per_page
  │   └── notification.yaml        # home page banner
  └── public/                      # Copied to the output root as-is

Articles with hidden: true are left out everywhere. Listings show pinned
articles first, then sort by title.

Run 'practice-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Development mode: re-read content on every lookup
    #[arg(long, global = true)]
    dev: bool,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options for the `list` command.
#[derive(clap::Args)]
struct ListArgs {
    /// Only show articles in this category (repeatable)
    #[arg(long = "category", value_name = "KEY")]
    categories: Vec<String>,

    /// Articles to pull to the front: pinned, frontpage, or none
    #[arg(long, default_value = "pinned", value_parser = parse_priority)]
    priority: PriorityMode,

    /// Sort titles Z to A
    #[arg(long)]
    descending: bool,

    /// Language whose titles are shown and sorted: en or zh
    #[arg(long, default_value = "en", value_parser = parse_language)]
    lang: Language,

    /// Page number
    #[arg(long, default_value = "1")]
    page: String,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the static site into the output directory
    Build,
    /// Load all content and print an inventory without writing anything
    Check,
    /// Print one page of the article catalog
    List(ListArgs),
    /// Print sitemap.xml to stdout
    Sitemap,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_priority(value: &str) -> Result<PriorityMode, String> {
    PriorityMode::parse(value)
        .ok_or_else(|| format!("expected pinned, frontpage, or none, got '{value}'"))
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::parse(value).ok_or_else(|| format!("expected en or zh, got '{value}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mode = cli.dev.then_some(RuntimeMode::Development);

    match cli.command {
        Command::Build => {
            println!("==> Building {} \u{2192} {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, mode)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = Site::load(&cli.source, mode)?;
            let inventory = site.inventory()?;
            output::print_check_output(&site, &inventory);
            println!("==> Content is valid");
        }
        Command::List(args) => {
            let site = Site::load(&cli.source, mode)?;
            let items = site.store.list_items();
            let page_size = site.pagination.articles_per_page;

            let mut state = CatalogState::new(args.lang);
            state.query.priority = args.priority;
            if args.descending {
                state.set_direction(SortDirection::Descending);
            }
            for key in &args.categories {
                state.toggle_category(key);
            }

            let total_pages = state.view(&items, page_size).total_pages;
            let page = resolve_page_param(&args.page, total_pages).ok_or_else(|| {
                format!("page '{}' does not exist (1-{})", args.page, total_pages)
            })?;
            state.navigate_to(page);
            output::print_list_output(&state, &state.view(&items, page_size));
        }
        Command::Sitemap => {
            let site = Site::load(&cli.source, mode)?;
            let items = site.store.list_items();
            let entries = sitemap_entries(site.base_url(), &items, chrono::Local::now().date_naive());
            print!("{}", render_sitemap(&entries));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins when set; otherwise `warn`, or `debug`
/// with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
