//! Command-line interface.
//!
//! Three subcommands cover the operational lifecycle: `generate` builds and
//! persists the universal automaton for a distance bound, `compile-dict`
//! turns a one-word-per-line text file into a dictionary artifact, and
//! `query` loads both and reports every dictionary word within the bound of
//! the given query words.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::dictionary::DictionaryAutomaton;
use crate::persist::{self, PersistError};
use crate::universal::UniversalAutomaton;

/// Fuzzy dictionary search with a universal Levenshtein automaton.
#[derive(Parser)]
#[command(name = "levdict")]
#[command(about = "Fuzzy dictionary search with a universal Levenshtein automaton")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the universal automaton for a distance bound and persist it
    Generate {
        /// Maximum edit distance (at least 1)
        #[arg(short = 'm', long, value_parser = clap::value_parser!(u8).range(1..=15))]
        distance: u8,

        /// Output directory for the dist<NNN>.lev artifact
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Compile a word list (one word per line) into a dictionary artifact
    CompileDict {
        /// Input text file, one word per line
        input: PathBuf,

        /// Output dictionary file
        output: PathBuf,
    },

    /// Report dictionary words within the distance bound of the query words
    Query {
        /// Maximum edit distance (at least 1)
        #[arg(short = 'm', long, value_parser = clap::value_parser!(u8).range(1..=15))]
        distance: u8,

        /// Dictionary artifact produced by compile-dict
        #[arg(short, long)]
        dict: PathBuf,

        /// Query words
        #[arg(required = true)]
        words: Vec<String>,
    },
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate { distance, out } => generate(distance, &out),
        Commands::CompileDict { input, output } => compile_dict(&input, &output),
        Commands::Query {
            distance,
            dict,
            words,
        } => query(distance, &dict, &words),
    }
}

fn generate(distance: u8, out: &Path) -> anyhow::Result<()> {
    let automaton = UniversalAutomaton::new(distance);
    let path = persist::save_automaton(&automaton, out)
        .with_context(|| format!("writing automaton artifact into {}", out.display()))?;
    println!(
        "{} distance {} automaton ({} states) -> {}",
        "generated".green().bold(),
        distance,
        automaton.state_count(),
        path.display()
    );
    Ok(())
}

fn compile_dict(input: &Path, output: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading word list {}", input.display()))?;
    let words: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let dictionary = DictionaryAutomaton::from_words(words);
    persist::save_dictionary(&dictionary, output)
        .with_context(|| format!("writing dictionary artifact {}", output.display()))?;
    println!(
        "{} {} words ({} trie states) -> {}",
        "compiled".green().bold(),
        dictionary.len(),
        dictionary.state_count(),
        output.display()
    );
    Ok(())
}

fn query(distance: u8, dict: &Path, words: &[String]) -> anyhow::Result<()> {
    let automaton = match persist::load_automaton(distance) {
        Ok(automaton) => automaton,
        Err(PersistError::NotFound { .. }) => {
            eprintln!(
                "{} no persisted automaton for distance {}, building one",
                "note:".yellow().bold(),
                distance
            );
            UniversalAutomaton::new(distance)
        }
        Err(e) => {
            return Err(e).with_context(|| format!("loading automaton for distance {distance}"))
        }
    };

    let dictionary = persist::load_dictionary(dict)
        .with_context(|| format!("loading dictionary {}", dict.display()))?;

    let mut matches = BTreeSet::new();
    for word in words {
        matches.extend(automaton.recognize(word, &dictionary));
    }

    for word in matches {
        println!("{word}");
    }
    Ok(())
}
