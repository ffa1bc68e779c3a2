//! Command-line interface for the zidian_rs vocabulary browser.
//!
//! This CLI renders the filtered word list as flashcards or as a table, and
//! lists the grammar, topic and subtopic options available for filtering.

use clap::{Args, Parser, Subcommand};
use colored::*;
use log::{LevelFilter, debug, error, info};
use zidian_rs::{
    Criteria, Entry, GrammarSelection, LoadOptions, Vocabulary, VocabularyCache, error::Result,
    highlight, tables,
};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chinese vocabulary browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the word list (.xlsx or .csv); defaults to the bundled workbook
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Workbook sheet holding the word list
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show matching words as flashcards grouped by category and subtopic
    Cards {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show matching words as a table
    Table {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List the groups, tags, categories and subtopics available for filtering
    Options {
        /// Only list subtopics of this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Filter flags shared by the views. "All" (any case) is the same as leaving a flag out.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Grammatical group, e.g. "Verbs" (takes precedence over --tag)
    #[arg(short, long)]
    group: Option<String>,
    /// Single grammatical tag, as a marker ("V.") or label ("Verb")
    #[arg(short, long)]
    tag: Option<String>,
    /// Topic category, e.g. "Travel"
    #[arg(short, long)]
    category: Option<String>,
    /// Subtopic (dimension) within the category, e.g. "Transport"
    #[arg(short, long)]
    dimension: Option<String>,
    /// Word, pinyin or meaning to search for
    #[arg(short, long)]
    search: Option<String>,
    /// Match the search text as a whole word only
    #[arg(short, long, default_value_t = false)]
    whole_word: bool,
}

fn selected(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().eq_ignore_ascii_case("all"))
}

impl From<FilterArgs> for Criteria {
    fn from(args: FilterArgs) -> Self {
        Criteria {
            group: selected(args.group),
            tag: selected(args.tag),
            category: selected(args.category),
            dimension: selected(args.dimension),
            search: args.search,
            whole_word: args.whole_word,
        }
    }
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Loading word list...");
    let start_load = Instant::now();
    let cache = VocabularyCache::new(LoadOptions {
        data_path: cli.data,
        sheet_name: cli.sheet,
    });

    let vocab = match cache.get() {
        Ok(vocab) => {
            debug!("Loading took: {:?}", start_load.elapsed());
            vocab
        }
        Err(e) => {
            error!("Failed to load word list: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Cards { filters } => print_cards(vocab, &filters.into()),
        Commands::Table { filters } => print_table(vocab, &filters.into()),
        Commands::Options { category } => print_options(vocab, selected(category).as_deref()),
    }

    Ok(())
}

/// Renders the meaning with the selected tag's segment emphasised.
fn render_meaning(entry: &Entry, selection: &GrammarSelection) -> String {
    match highlight(entry, selection) {
        Some(segment) => format!(
            "{}{}{}",
            segment.before(),
            segment.text().black().on_green(),
            segment.after()
        ),
        None => entry.meaning.clone(),
    }
}

/// Flashcards view: entries grouped by category, then subtopic.
fn print_cards(vocab: &Vocabulary, criteria: &Criteria) {
    let start_filter = Instant::now();
    let entries = vocab.filter(criteria);
    debug!("Filtering took: {:?}", start_filter.elapsed());
    let selection = criteria.grammar(vocab);

    if let Some(search) = criteria.search.as_deref().map(str::trim) {
        if !search.is_empty() && !criteria.has_selection() {
            println!("🔍 Word searched: \"{}\"", search.yellow());
        }
    }
    println!("{}", format!("Showing {} words", entries.len()).bold());

    let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<&Entry>>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(entry.category.as_str())
            .or_default()
            .entry(entry.dimension.as_str())
            .or_default()
            .push(entry);
    }

    for (category, dimensions) in grouped {
        println!("\n{}", category.bold().cyan());
        for (dimension, entries) in dimensions {
            println!("  📘 {}", dimension.magenta());
            for entry in entries {
                println!(
                    "    {}  {}",
                    entry.characters.bold(),
                    entry.pinyin.green()
                );
                println!("      {}", render_meaning(entry, &selection));
            }
        }
    }
}

/// Table view: one line per entry.
fn print_table(vocab: &Vocabulary, criteria: &Criteria) {
    let entries = vocab.filter(criteria);
    println!(
        "{}",
        "Characters\tPinyin\tMeaning\tTags\tDimension\tCategory".bold()
    );
    for entry in &entries {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            entry.characters,
            entry.pinyin,
            entry.meaning,
            entry.tags.join(" "),
            entry.dimension,
            entry.category
        );
    }
    println!("{}", format!("{} of {} words", entries.len(), vocab.len()).dimmed());
}

/// Lists the values accepted by the filter flags.
fn print_options(vocab: &Vocabulary, category: Option<&str>) {
    println!("{}", "Grammatical groups".magenta());
    for group in vocab.groups() {
        println!("  {}", group);
    }

    println!("{}", "Grammatical tags".magenta());
    for label in vocab.tag_labels() {
        let marker = vocab.tag_for_label(label).unwrap_or_default();
        println!("  {} ({})", label, marker.dimmed());
    }

    println!("{}", "Categories".magenta());
    for cat in vocab.categories() {
        println!("  {}", cat);
    }

    match category {
        Some(cat) if !tables::is_known_category(cat) => {
            eprintln!("{}", format!("Unknown category '{}'", cat).yellow());
        }
        _ => {
            let heading = match category {
                Some(cat) => format!("Subtopics in {}", cat),
                None => "Subtopics".to_string(),
            };
            println!("{}", heading.magenta());
            for dim in vocab.dimensions(category) {
                println!("  {}", dim);
            }
        }
    }
}
