//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::TextRazor;
use crate::annotations::AnalyzedText;
use crate::config::{
    ClientConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_BASE_URL,
    ENV_TIMEOUT_SECS,
};
use crate::demo::{analysis_flow, dictionary_flow};
use crate::dictionary::DictionaryManager;
use crate::error::{Result, TextRazorError};
use crate::http::HttpTransport;

/// TextRazor client - analyse text and manage entity dictionaries.
#[derive(Parser)]
#[command(name = "textrazor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API key
    #[arg(long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Service base URL (default: https://api.textrazor.com)
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the dictionary walkthrough, then the analysis walkthrough.
    Demo,

    /// Analyse a piece of text.
    Analyze {
        /// Text to analyse
        text: String,

        /// Extractor to run (repeatable)
        #[arg(short, long = "extractor", default_values = ["entities", "words"])]
        extractors: Vec<String>,

        /// Enrichment query for matched entities (repeatable)
        #[arg(long = "enrichment-query")]
        enrichment_queries: Vec<String>,

        /// File holding a rules program
        #[arg(long)]
        rules_file: Option<PathBuf>,

        /// Entity dictionary to match against (repeatable)
        #[arg(long = "dictionary")]
        dictionaries: Vec<String>,
    },

    /// List the account's dictionaries.
    Dictionaries,

    /// Print one page of a dictionary's entries.
    Entries {
        /// Dictionary id
        dictionary: String,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,

        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            TextRazorError::Config(format!("no API key; pass --api-key or set {ENV_API_KEY}"))
        })?;

        let mut builder = ClientConfig::builder(api_key).timeout_secs(self.timeout_secs);
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        builder.build()
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.client_config()?;

    match cli.command {
        Commands::Demo => demo_command(&config),
        Commands::Analyze {
            text,
            extractors,
            enrichment_queries,
            rules_file,
            dictionaries,
        } => {
            let rules = rules_file.map(std::fs::read_to_string).transpose()?;
            analyze_command(&config, &text, extractors, enrichment_queries, rules, dictionaries)
        }
        Commands::Dictionaries => dictionaries_command(&config),
        Commands::Entries {
            dictionary,
            limit,
            offset,
        } => entries_command(&config, &dictionary, limit, offset),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn demo_command(config: &ClientConfig) -> Result<()> {
    let transport = HttpTransport::new(config)?;
    let mut out = std::io::stdout().lock();

    println!("{}", style("Dictionary walkthrough").bold());
    dictionary_flow(&config.api_key, &transport, &mut out)?;

    println!();
    println!("{}", style("Analysis walkthrough").bold());
    analysis_flow(&config.api_key, &transport, &mut out)?;

    Ok(())
}

fn analyze_command(
    config: &ClientConfig,
    text: &str,
    extractors: Vec<String>,
    enrichment_queries: Vec<String>,
    rules: Option<String>,
    dictionaries: Vec<String>,
) -> Result<()> {
    let mut client = TextRazor::new(config)?;
    for extractor in extractors {
        client.add_extractor(extractor);
    }
    client
        .set_enrichment_queries(enrichment_queries)
        .set_entity_dictionaries(dictionaries);
    if let Some(rules) = rules {
        client.set_rules(rules);
    }

    let pb = spinner("Analysing...");
    let result = client.analyze(text);
    pb.finish_and_clear();

    print_analysis(&result?);
    Ok(())
}

fn print_analysis(doc: &AnalyzedText) {
    if let Some(language) = doc.language() {
        println!("  Language: {}", style(language).green());
    }
    println!("  Sentences: {}", doc.sentences().count());
    println!("  Words: {}", doc.words().count());
    println!("  Entities: {}", doc.entities().len());

    for entity in doc.entities() {
        let marker = if entity.is_custom() {
            style("*").yellow().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {marker} {} {} [{}]",
            style(&entity.entity_id).cyan(),
            style(format!("\"{}\"", entity.matched_text)).dim(),
            entity.types.join(", ")
        );
        for (key, values) in entity.data.iter() {
            println!("      {key}: {}", values.join(", "));
        }
    }

    for annotation in doc.custom_annotations() {
        println!(
            "  Rule match: {}",
            style(annotation.name().unwrap_or("(unnamed)")).green()
        );
        for variable in annotation.contents() {
            let values: Vec<String> = variable
                .entities()
                .map(|e| e.entity_id.clone())
                .chain(variable.words().map(|w| w.token().to_string()))
                .collect();
            println!("      {} = {}", variable.key(), values.join(", "));
        }
    }
}

fn dictionaries_command(config: &ClientConfig) -> Result<()> {
    let manager = DictionaryManager::new(config)?;

    let pb = spinner("Listing dictionaries...");
    let result = manager.all_dictionaries();
    pb.finish_and_clear();

    for dictionary in result? {
        println!(
            "  {} (match: {}, case-insensitive: {}, language: {})",
            style(&dictionary.id).cyan(),
            dictionary.match_type.as_str(),
            dictionary.case_insensitive,
            dictionary.language.as_deref().unwrap_or("any")
        );
    }
    Ok(())
}

fn entries_command(config: &ClientConfig, dictionary: &str, limit: usize, offset: usize) -> Result<()> {
    let manager = DictionaryManager::new(config)?;

    let pb = spinner("Fetching entries...");
    let result = manager.entries_page(dictionary, limit, offset);
    pb.finish_and_clear();
    let page = result?;

    println!(
        "{} entries {}-{} of {}",
        style(dictionary).cyan(),
        page.offset,
        page.offset + page.entries.len(),
        page.total
    );
    for entry in &page.entries {
        println!("  {} {}", style(&entry.id).bold(), entry.text);
    }
    if let Some(next) = page.next_offset() {
        println!();
        println!("  Next page: --offset {next}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_analyze_defaults() {
        let cli = Cli::parse_from(["textrazor", "--api-key", "k", "analyze", "Hello world"]);

        let Commands::Analyze {
            text,
            extractors,
            enrichment_queries,
            rules_file,
            dictionaries,
        } = cli.command
        else {
            panic!("expected analyze command");
        };
        assert_eq!(text, "Hello world");
        assert_eq!(extractors, vec!["entities", "words"]);
        assert!(enrichment_queries.is_empty());
        assert!(rules_file.is_none());
        assert!(dictionaries.is_empty());
    }

    #[test]
    fn test_cli_parse_analyze_repeated_flags() {
        let cli = Cli::parse_from([
            "textrazor",
            "analyze",
            "Bjarne Stroustrup",
            "-e",
            "entities",
            "--extractor",
            "senses",
            "--dictionary",
            "developers",
            "--api-key",
            "k",
        ]);

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        let Commands::Analyze {
            extractors,
            dictionaries,
            ..
        } = cli.command
        else {
            panic!("expected analyze command");
        };
        assert_eq!(extractors, vec!["entities", "senses"]);
        assert_eq!(dictionaries, vec!["developers"]);
    }

    #[test]
    fn test_cli_parse_entries() {
        let cli = Cli::parse_from(["textrazor", "entries", "developers", "--limit", "10"]);

        let Commands::Entries {
            dictionary,
            limit,
            offset,
        } = cli.command
        else {
            panic!("expected entries command");
        };
        assert_eq!(dictionary, "developers");
        assert_eq!(limit, 10);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_client_config_requires_key() {
        let cli = Cli {
            api_key: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            command: Commands::Dictionaries,
        };
        assert!(matches!(cli.client_config(), Err(TextRazorError::Config(_))));
    }

    #[test]
    fn test_client_config_base_url() {
        let cli = Cli {
            api_key: Some("k".into()),
            base_url: Some("http://localhost:8080/".into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            command: Commands::Demo,
        };
        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_cli_parse_timeout() {
        let cli = Cli::parse_from(["textrazor", "dictionaries", "--timeout-secs", "5"]);
        assert_eq!(cli.timeout_secs, 5);

        let cli = Cli {
            api_key: Some("k".into()),
            ..cli
        };
        assert_eq!(cli.client_config().unwrap().timeout_secs, 5);
    }

    #[test]
    fn test_client_config_rejects_zero_timeout() {
        let cli = Cli {
            api_key: Some("k".into()),
            base_url: None,
            timeout_secs: 0,
            command: Commands::Dictionaries,
        };
        assert!(matches!(cli.client_config(), Err(TextRazorError::Config(_))));
    }
}
