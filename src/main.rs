use clap::{Parser, Subcommand};
use postdex::{config, generate, output, paging, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "postdex")]
#[command(about = "Static JSON index generator for markdown blog posts")]
#[command(long_about = "\
Static JSON index generator for markdown blog posts

Your filesystem is the data source. Markdown files under the source
directory become posts; front matter supplies titles, categories, tags,
and covers; creation dates drive the archive.

Content structure:

  posts/
  ├── config.toml                  # Site config (optional)
  ├── hello-world.md               # Post (front matter + markdown body)
  └── travel/
      ├── tokyo.md                 # Posts may nest arbitrarily
      └── skyline.jpg              # Referenced as `cover: ./skyline.jpg`

Generated layout:

  generated/
  ├── index.json / index/{n}.json          # Chronological feed
  ├── archive.json / archive/...           # Year → month → day drill-down
  ├── categories.json / categories/...     # Hierarchical categories
  ├── tags.json / tags/...                 # Flat tags
  └── posts/{id}.json                      # One manifest per post

Front matter keys (all optional): title, category (\"a/b\" nests),
tags (list), cover, createdAt (epoch milliseconds).

With no subcommand, runs a full build.

Run 'postdex gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Posts source directory
    #[arg(long, default_value = "posts", global = true)]
    source: PathBuf,

    /// Output directory for the generated index tree
    #[arg(long, default_value = "generated", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan posts and write the full index tree
    Build,
    /// Scan and report the post corpus without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            println!("==> Scanning {}", cli.source.display());
            let mut posts = scan::collect_posts(&cli.source, &config.extension);
            println!(
                "==> Generating index \u{2192} {}",
                cli.output.display()
            );
            let summary = generate::generate(&mut posts, &config, &cli.output)?;
            output::print_build_summary(&summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let mut posts = scan::collect_posts(&cli.source, &config.extension);
            paging::sort_by_create_desc(&mut posts);
            output::print_post_list(&posts);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
