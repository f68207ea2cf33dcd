mod pages;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pagedex_core::persist::{
    check_meta, detect_format, load_index, save_meta, DirSink, IndexFormat, IndexPaths, IndexSink, MetaFile, INDEX_VERSION,
};
use pagedex_core::{load_config, IndexBuilder, PageIndex, PageNo, Tokenizer, TokenizerConfig};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pagedex")]
#[command(about = "Build and inspect page-level inverted indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Bincode,
}

impl From<Format> for IndexFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => IndexFormat::Json,
            Format::Bincode => IndexFormat::Bincode,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from extracted page text
    Build {
        /// Input path: .json array, .jsonl, form-feed separated .txt, or a directory of .txt pages
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        #[arg(long, value_enum, default_value_t = Format::Bincode)]
        format: Format,
        /// Tokenize pages on all cores
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Tokenizer config (JSON)
        #[arg(long)]
        config: Option<String>,
    },
    /// Print stored entries
    Show {
        #[arg(long)]
        index: String,
        /// Defaults to whichever format is present in the directory
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Only print the entry for this word, after normalization
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, format, parallel, config } => {
            build(&input, &output, format.into(), parallel, config.as_deref())
        }
        Commands::Show { index, format, term, config } => {
            show(&index, format.map(Into::into), term.as_deref(), config.as_deref())
        }
    }
}

fn tokenizer_config(path: Option<&str>) -> Result<TokenizerConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(TokenizerConfig::default()),
    }
}

fn build(input: &str, output: &str, format: IndexFormat, parallel: bool, config: Option<&str>) -> Result<()> {
    let tokenizer = Tokenizer::new(&tokenizer_config(config)?);
    let pages = pages::read_pages(Path::new(input))?;
    tracing::info!(input, pages = pages.len(), "read pages");

    let index = IndexBuilder::with_tokenizer(&tokenizer).parallel(parallel).build(&pages);
    tracing::info!(num_pages = pages.len(), num_terms = index.len(), "indexed pages");

    let paths = IndexPaths::new(output);
    let mut sink = DirSink { paths, format };
    sink.write_index(&index)?;
    let meta = MetaFile {
        num_pages: pages.len(),
        num_terms: index.len(),
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        version: INDEX_VERSION,
    };
    save_meta(&sink.paths, &meta)?;

    tracing::info!(output, "index build complete");
    Ok(())
}

fn show(dir: &str, format: Option<IndexFormat>, term: Option<&str>, config: Option<&str>) -> Result<()> {
    let paths = IndexPaths::new(dir);
    if let Some(meta) = check_meta(&paths)? {
        tracing::info!(num_pages = meta.num_pages, num_terms = meta.num_terms, created_at = %meta.created_at, "index metadata");
    }
    let format = format.unwrap_or_else(|| detect_format(&paths));
    let index = load_index(&paths, format).with_context(|| format!("loading index from {dir}"))?;

    match term {
        Some(word) => {
            let tokenizer = Tokenizer::new(&tokenizer_config(config)?);
            let mut terms: Vec<String> = tokenizer.tokenize(word).into_iter().collect();
            terms.sort();
            if terms.is_empty() {
                tracing::info!(word, "word normalizes to no index term");
            }
            for t in terms {
                print_entry(&t, index.get(&t).unwrap_or(&[]));
            }
        }
        None => print_all(&index),
    }
    Ok(())
}

fn print_all(index: &PageIndex) {
    for (term, pages) in index.iter() {
        print_entry(term, pages);
    }
}

fn print_entry(term: &str, pages: &[PageNo]) {
    let list: Vec<String> = pages.iter().map(PageNo::to_string).collect();
    println!("{term}\t{}", list.join(","));
}
