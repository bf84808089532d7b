//! CLI entry point for TasteNote: plan share posts and build flavor vocabularies.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tastenote_core::config::APP_URL_ENV;
use tastenote_core::{
    app_data_dir, build_intent_url, build_vocabulary, compute_share_plan, count_terms,
    default_categories, find_note, load_categories, load_notes, save_vocabulary, set_app_url,
    set_hashtag, status, weighted_len, ShareConfig, ShareNote, VocabularyField, MAX_WEIGHTED_LEN,
};

#[derive(Parser)]
#[command(name = "tastenote")]
#[command(about = "TasteNote: whisky tasting notes, shared")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show backend status.
    Status,
    /// Show where TasteNote stores its config.
    DataDir,
    /// Plan the posts for sharing a note.
    Share {
        /// Notes export file (JSON) to pick the note from.
        #[arg(long, value_name = "PATH", requires = "id", conflicts_with = "name")]
        file: Option<PathBuf>,
        /// Id of the note in the export file.
        #[arg(long, requires = "file")]
        id: Option<i64>,
        /// Whisky name, when not reading from a file.
        #[arg(long, required_unless_present = "file")]
        name: Option<String>,
        /// Score out of 100.
        #[arg(long, conflicts_with = "file", value_parser = clap::value_parser!(i64).range(0..=100))]
        rating: Option<i64>,
        #[arg(long, conflicts_with = "file")]
        summary: Option<String>,
        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the share-intent URL for a message.
    Intent {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Build a flavor vocabulary from a notes export file.
    Vocab {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
        /// Note field to read terms from: aroma or flavor.
        #[arg(long, default_value = "aroma")]
        field: VocabularyField,
        /// Category rules (TOML). Uses the built-in rules when omitted.
        #[arg(long, value_name = "PATH")]
        categories: Option<PathBuf>,
        /// Also print this many random suggestions.
        #[arg(long, default_value_t = 0)]
        random: usize,
        /// Write the vocabulary as JSON here instead of printing a summary.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Show or change the share config.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Set the app URL posted with every share.
    SetAppUrl { url: String },
    /// Set the hashtag posted with every share.
    SetHashtag { tag: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            println!("TasteNote backend");
            println!("  core: {}", status());
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => println!("{}", p.display()),
            None => bail!("could not determine app data directory"),
        },
        Commands::Share {
            file,
            id,
            name,
            rating,
            summary,
            json,
        } => {
            let config = ShareConfig::resolve();
            let plan = match (file, id) {
                (Some(path), Some(id)) => {
                    let notes = load_notes(&path)?;
                    let note = find_note(&notes, id)
                        .with_context(|| format!("no note with id {} in {}", id, path.display()))?;
                    compute_share_plan(&note.share_note(), &config)
                }
                _ => {
                    let note = ShareNote {
                        whisky_name: name.as_deref().unwrap_or(""),
                        rating,
                        summary: summary.as_deref(),
                    };
                    compute_share_plan(&note, &config)
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }
            println!("{}", plan.primary);
            println!(
                "\n({} / {})  {}",
                weighted_len(&plan.primary),
                MAX_WEIGHTED_LEN,
                build_intent_url(&plan.primary)
            );
            if !plan.overflow.is_empty() {
                println!("\nPaste as replies ({} post(s)):\n", plan.overflow.len());
                println!("{}", plan.overflow.join("\n\n"));
            }
        }
        Commands::Intent { text } => println!("{}", build_intent_url(&text)),
        Commands::Vocab {
            file,
            field,
            categories,
            random,
            out,
        } => {
            let notes = load_notes(&file)?;
            let rules = match categories {
                Some(path) => load_categories(&path)?,
                None => default_categories(),
            };
            let counts = count_terms(&notes, field);
            let source = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let vocabulary = build_vocabulary(&counts, &rules, &source);

            if let Some(out) = out {
                save_vocabulary(&vocabulary, &out)?;
                println!(
                    "Wrote {} term(s) to {}",
                    vocabulary.metadata.total_terms,
                    out.display()
                );
            } else {
                println!(
                    "{} term(s), {} occurrence(s) in {} note(s)",
                    vocabulary.metadata.total_terms,
                    vocabulary.metadata.total_occurrences,
                    notes.len()
                );
                for category in vocabulary.available_categories() {
                    let terms: Vec<String> = vocabulary
                        .category_keywords(&category.id, 12)
                        .iter()
                        .map(|k| format!("{} ({})", k.term, k.count))
                        .collect();
                    println!("  {}: {}", category.label, terms.join(", "));
                }
            }

            if random > 0 {
                let picked = vocabulary.random_keywords(&mut rand::thread_rng(), random);
                let terms: Vec<&str> = picked.iter().map(|k| k.term.as_str()).collect();
                println!("Random: {}", terms.join(", "));
            }
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let config = ShareConfig::resolve();
                println!("app_url = {}", config.app_url);
                println!("hashtag = {}", config.hashtag);
                if std::env::var_os(APP_URL_ENV).is_some() {
                    println!("  (app_url may be overridden by {})", APP_URL_ENV);
                }
            }
            ConfigAction::SetAppUrl { url } => {
                set_app_url(&url)?;
                println!("app_url set to {}", url.trim());
            }
            ConfigAction::SetHashtag { tag } => {
                set_hashtag(&tag)?;
                println!("hashtag set to {}", tag.trim());
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tastenote").chain(args.iter().copied()))
    }

    #[test]
    fn share_from_file_or_by_name() {
        assert!(parse(&["share", "--file", "notes.json", "--id", "1"]).is_ok());
        assert!(parse(&["share", "--name", "Yamazaki 12", "--rating", "88", "--summary", "s"]).is_ok());
    }

    #[test]
    fn share_id_needs_file() {
        assert!(parse(&["share", "--name", "Yamazaki 12", "--id", "3"]).is_err());
    }

    #[test]
    fn share_from_file_rejects_manual_fields() {
        assert!(parse(&["share", "--file", "f.json", "--id", "1", "--rating", "50"]).is_err());
        assert!(parse(&["share", "--file", "f.json", "--id", "1", "--summary", "s"]).is_err());
    }

    #[test]
    fn share_rating_is_bounded() {
        assert!(parse(&["share", "--name", "X", "--rating", "101"]).is_err());
    }
}
