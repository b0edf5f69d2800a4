use std::io::Read;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use threadjuice_quality::{
    analyze_content, analyze_section, extract_metaphor, get_recommended_structure,
    ContentAnalysisInput, ContentOptimizer, Emotion, EmotionalAnalysis, MetaphorInsight,
    OptimizerConfig, RewriterConfig, Story, StoryContext, StoryRewriter,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "threadjuice-quality",
    about = "Score, optimize and rewrite story documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Input {
    /// Story JSON files (reads stdin if none provided)
    files: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Score a story and list improvement suggestions
    Analyze(Input),
    /// Recommend section counts and types for a story's quality tier
    Structure(Input),
    /// Reorder sections and collect advisory recommendations
    Optimize {
        #[command(flatten)]
        input: Input,
        /// Skip the reading-time pass
        #[arg(long)]
        no_length: bool,
        /// Skip the section-structure pass
        #[arg(long)]
        no_structure: bool,
        /// Skip the engagement pass
        #[arg(long)]
        no_engagement: bool,
        /// Baseline reading time in minutes
        #[arg(long, default_value_t = 7)]
        reading_time: u32,
    },
    /// Patch a low-scoring story until it passes or attempts run out
    Rewrite {
        #[command(flatten)]
        input: Input,
        #[arg(long, default_value_t = 3)]
        max_attempts: u32,
        #[arg(long, default_value_t = threadjuice_quality::PUBLISHING_THRESHOLD)]
        target_score: f64,
    },
    /// Per-section emotional reading plus story commentary
    Emotions(Input),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmotionReport {
    sections: Vec<EmotionalAnalysis>,
    commentary: MetaphorInsight,
}

fn read_stories(input: &Input) -> Result<Vec<Story>> {
    let mut texts = Vec::new();
    if input.files.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        texts.push(("<stdin>".to_string(), buf));
    } else {
        for path in &input.files {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {path}"))?;
            texts.push((path.clone(), text));
        }
    }

    texts
        .into_iter()
        .map(|(name, text)| {
            serde_json::from_str(&text).with_context(|| format!("{name} is not a story document"))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emotion_report(story: &Story) -> EmotionReport {
    let tier = analyze_content(&ContentAnalysisInput::from_story(story)).quality_tier;
    let total = story.content.sections.len();
    let sections: Vec<EmotionalAnalysis> = story
        .content
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let context = StoryContext {
                category: story.category.clone(),
                section_type: s.section_type.clone(),
                section_index: i,
                total_sections: total,
                content_quality: tier,
            };
            analyze_section(&s.content, &context)
        })
        .collect();

    // The most intense section sets the tone of the commentary.
    let dominant = sections
        .iter()
        .fold(None::<&EmotionalAnalysis>, |best, a| match best {
            Some(b) if b.intensity >= a.intensity => Some(b),
            _ => Some(a),
        })
        .map_or(Emotion::OpeningTension, |a| a.emotion);
    let commentary = extract_metaphor(
        &story.title,
        &story.content.flattened_text(),
        &story.category,
        dominant,
    );

    EmotionReport {
        sections,
        commentary,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(input) => {
            for story in read_stories(&input)? {
                print_json(&analyze_content(&ContentAnalysisInput::from_story(&story)))?;
            }
        }
        Command::Structure(input) => {
            for story in read_stories(&input)? {
                print_json(&get_recommended_structure(
                    &ContentAnalysisInput::from_story(&story),
                ))?;
            }
        }
        Command::Optimize {
            input,
            no_length,
            no_structure,
            no_engagement,
            reading_time,
        } => {
            let optimizer = ContentOptimizer::new(OptimizerConfig {
                enable_quality_based_length: !no_length,
                enable_structure_optimization: !no_structure,
                enable_engagement_optimization: !no_engagement,
                target_reading_time: reading_time,
            });
            for story in read_stories(&input)? {
                print_json(&optimizer.optimize_story_content(&story))?;
            }
        }
        Command::Rewrite {
            input,
            max_attempts,
            target_score,
        } => {
            let rewriter = StoryRewriter::new(RewriterConfig {
                max_attempts,
                target_score,
                ..RewriterConfig::default()
            });
            for story in read_stories(&input)? {
                debug!(title = %story.title, "rewriting");
                print_json(&rewriter.rewrite_story(&story))?;
            }
        }
        Command::Emotions(input) => {
            for story in read_stories(&input)? {
                print_json(&emotion_report(&story))?;
            }
        }
    }

    Ok(())
}
