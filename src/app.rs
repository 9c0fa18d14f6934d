use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};
use tracing::info;

use crate::analysis::{AnalysisSettings, PhraseRanking, rank_phrases};
use crate::config::{HarvestConfig, SourceRoot};
use crate::constants::corpus::CORPUS_DIR_ENV;
use crate::corpus::{CorpusStore, TokenizerMode};
use crate::errors::ArchiveError;
use crate::ingestion::{IngestionRun, IngestionSummary};
use crate::metrics::{TagAverage, tag_averages};
use crate::report::{format_averages, format_ranking, format_summary, write_years};
use crate::source::{DirectorySource, DirectorySourceConfig, DocumentSource};
use crate::stopwords::parse_word_list;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TokenizerArg {
    Whitespace,
    WordPunct,
}

impl From<TokenizerArg> for TokenizerMode {
    fn from(value: TokenizerArg) -> Self {
        match value {
            TokenizerArg::Whitespace => TokenizerMode::Whitespace,
            TokenizerArg::WordPunct => TokenizerMode::WordPunct,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ead-collocations",
    disable_help_subcommand = true,
    about = "Extract narrative text from EAD finding aids and rank recurring phrases",
    long_about = None
)]
struct HarvestCli {
    #[arg(
        long = "source-root",
        value_name = "PATH",
        help = "Directory of finding aids, repeat as needed in processing order"
    )]
    source_roots: Vec<PathBuf>,
    #[arg(long, value_name = "PATH", help = "JSON config file; flags override its values")]
    config: Option<PathBuf>,
    #[arg(
        long = "corpus-dir",
        value_name = "DIR",
        env = CORPUS_DIR_ENV,
        help = "Directory for extracted text units"
    )]
    corpus_dir: Option<PathBuf>,
    #[arg(long = "years-path", value_name = "PATH", help = "Where to write archival years")]
    years_path: Option<PathBuf>,
    #[arg(
        long = "no-years",
        conflicts_with = "years_path",
        help = "Skip writing the archival years file"
    )]
    no_years: bool,
    #[arg(
        long = "tag",
        value_name = "TAG",
        help = "Target tag, repeat as needed in visiting order (replaces the defaults)"
    )]
    tags: Vec<String>,
    #[arg(
        long = "ignore-word",
        value_name = "WORD",
        help = "Extra word excluded from phrases, repeat as needed"
    )]
    ignore_words: Vec<String>,
    #[arg(
        long = "ignored-words-file",
        value_name = "PATH",
        help = "File of excluded words, one per line, '#' starts a comment"
    )]
    ignored_words_file: Option<PathBuf>,
    #[arg(
        long = "order",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(2..=4),
        help = "Phrase length to report, repeat as needed (default 2, 3, 4)"
    )]
    orders: Vec<u8>,
    #[arg(long = "min-frequency", value_name = "COUNT", help = "Drop rarer phrases")]
    min_frequency: Option<u64>,
    #[arg(
        long = "top-k",
        value_name = "COUNT",
        value_parser = parse_positive_usize,
        help = "Phrases kept per length"
    )]
    top_k: Option<usize>,
    #[arg(long, value_enum, help = "Corpus tokenizer")]
    tokenizer: Option<TokenizerArg>,
    #[arg(long = "no-lemmatize", help = "Count surface forms instead of lemmas")]
    no_lemmatize: bool,
    #[arg(long = "follow-links", help = "Follow symlinks while walking source roots")]
    follow_links: bool,
}

impl HarvestCli {
    fn into_config(self) -> Result<HarvestConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::from_json_file(path)?,
            None => HarvestConfig::default(),
        };
        for root in self.source_roots {
            config = config.with_source(SourceRoot::new(root));
        }
        if let Some(dir) = self.corpus_dir {
            config = config.with_corpus_dir(dir);
        }
        if self.no_years {
            config = config.with_years_path(None);
        } else if let Some(path) = self.years_path {
            config = config.with_years_path(Some(path));
        }
        if !self.tags.is_empty() {
            config = config.with_tags(self.tags);
        }
        config = config.with_ignored_words(self.ignore_words);
        if let Some(path) = self.ignored_words_file {
            let contents = fs::read_to_string(&path).map_err(|err| {
                ArchiveError::Configuration(format!("cannot read '{}': {err}", path.display()))
            })?;
            config = config.with_ignored_words(parse_word_list(&contents));
        }
        if !self.orders.is_empty() {
            config = config.with_orders(self.orders.into_iter().map(usize::from).collect());
        }
        if let Some(min_frequency) = self.min_frequency {
            config = config.with_min_frequency(min_frequency);
        }
        if let Some(top_k) = self.top_k {
            config = config.with_top_k(top_k);
        }
        if let Some(tokenizer) = self.tokenizer {
            config = config.with_tokenizer(tokenizer.into());
        }
        if self.no_lemmatize {
            config = config.with_lemmatize(false);
        }
        if self.follow_links {
            config = config.with_follow_links(true);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Everything a harvest produces.
#[derive(Clone, Debug)]
pub struct HarvestReport {
    /// Ingestion totals.
    pub summary: IngestionSummary,
    /// Ranked phrases per configured order.
    pub rankings: Vec<PhraseRanking>,
    /// Per-tag paragraph averages.
    pub averages: Vec<TagAverage>,
    /// Words excluded on top of the standard stop-word list.
    pub ignored_words: Vec<String>,
}

impl HarvestReport {
    /// Render the report as printed by the CLI.
    pub fn render(&self) -> String {
        let mut sections: Vec<String> = self.rankings.iter().map(format_ranking).collect();
        sections.push(format_summary(self.summary.processed, self.ignored_words.as_slice()));
        sections.push(format_averages(&self.averages));
        sections.join("\n")
    }
}

/// Build one directory source per configured root.
pub fn build_sources(config: &HarvestConfig) -> Vec<Box<dyn DocumentSource>> {
    config
        .sources
        .iter()
        .map(|root| {
            Box::new(DirectorySource::new(
                DirectorySourceConfig::new(root.source_id(), &root.path)
                    .with_follow_links(config.follow_links),
            )) as Box<dyn DocumentSource>
        })
        .collect()
}

/// Run ingestion over `sources`, then rank the rebuilt corpus.
///
/// The years file is written when the config names one.
pub fn harvest(
    config: &HarvestConfig,
    sources: &[Box<dyn DocumentSource>],
) -> Result<HarvestReport, ArchiveError> {
    config.validate()?;
    let summary = IngestionRun::from_config(config).run(sources)?;
    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "ingestion finished"
    );

    if let Some(path) = &config.years_path {
        write_years(path, &summary.years)?;
    }

    let store = CorpusStore::new(&config.corpus_dir).with_tokenizer(config.tokenizer);
    let rankings = rank_phrases(
        &store,
        &config.stopword_filter(),
        &AnalysisSettings::from(config),
    )?;
    let averages = tag_averages(&summary.stats);

    Ok(HarvestReport {
        summary,
        rankings,
        averages,
        ignored_words: config.ignored_words.clone(),
    })
}

/// CLI entry point: parse `args_iter`, harvest, print the report.
pub fn run_harvest<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) =
        parse_cli::<HarvestCli, _>(std::iter::once("ead-collocations".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };
    let config = cli.into_config()?;
    if config.sources.is_empty() {
        return Err("at least one --source-root (or config `sources` entry) is required".into());
    }

    let sources = build_sources(&config);
    let report = harvest(&config, &sources)?;
    println!("{}", report.render());
    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("value must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
