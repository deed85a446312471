//! `verseflow` - interactive scripture detection console.
//!
//! Reads lines from stdin, detects scripture references in them, and prints
//! the verse text. `:reset` clears the conversation context, `:prev` and
//! `:next` navigate from the last detected verse, `:quit` exits.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use verseflow::config::Config;
use verseflow::context::ParseContext;
use verseflow::dataset::DatasetLoader;
use verseflow::engine::{DetectOptions, ScriptureEngine};
use verseflow::types::DetectedReference;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::load().context("failed to load configuration")?;
    let dataset_path = config
        .dataset_path
        .clone()
        .context("no verse dataset configured; set VERSE_DATA_PATH")?;

    let engine = ScriptureEngine::with_basic_grammar(DatasetLoader::new(dataset_path));
    // Fail fast on an unreadable dataset instead of at first detection
    let dataset = engine.dataset().await?;
    eprintln!(
        "{} {} ready ({} verses loaded)",
        config.app_name(),
        config.app_version(),
        dataset.len()
    );

    let options = DetectOptions {
        aggressive_speech_normalization: config.speech_mode_default,
    };
    let mut ctx = ParseContext::new();

    let stdin = io::stdin();
    print_prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            "" => {}
            ":quit" | ":q" => break,
            ":reset" => {
                ctx.reset();
                println!("context cleared");
            }
            ":prev" | ":next" => {
                if let Some(detection) = navigate(&engine, &mut ctx, input == ":next").await {
                    println!("{}  {}", detection.display_ref, detection.verse_text);
                } else {
                    println!("nothing there");
                }
            }
            text => {
                let found = engine.detect_and_lookup(&mut ctx, text, options).await;
                if found.is_empty() {
                    println!("no reference detected");
                }
                for detection in found {
                    println!("{}  {}", detection.display_ref, detection.verse_text);
                }
            }
        }
        print_prompt()?;
    }
    Ok(())
}

/// Step from the context's current verse and update the context to the new
/// position.
async fn navigate(
    engine: &ScriptureEngine,
    ctx: &mut ParseContext,
    forward: bool,
) -> Option<DetectedReference> {
    let book = ctx.book.clone()?;
    let chapter = ctx.chapter?;
    let verse = ctx.verse?;
    let detection = engine.navigate_step(&book, chapter, verse, forward).await?;
    ctx.apply(&detection.components, false);
    Some(detection)
}

fn print_prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}
