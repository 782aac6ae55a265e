use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sentchunk::{load_config, pipeline, Config, EmbeddingModelInfo, ModelRegistry};

#[derive(Parser)]
#[command(name = "sentchunk", about = "Sentence-based topic chunker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a text file into topic chunks
    Run {
        /// Text file to chunk
        input: PathBuf,

        /// Config file path
        #[arg(long, default_value = "conf/default.json")]
        conf: PathBuf,

        /// Require the remote LLM backend
        #[arg(long)]
        force_remote: bool,

        /// Output path (defaults to <input>.chunks.jsonl)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Score predicted chunks against a gold set
    Eval {
        /// Directory of gold .jsonl chunk files
        gold_dir: PathBuf,

        /// Directory of predicted .jsonl chunk files
        pred_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Run {
            input,
            conf,
            force_remote,
            output,
        } => {
            let cfg: Config = load_config(&conf)
                .with_context(|| format!("Failed to load config {}", conf.display()))?;
            if force_remote {
                cfg.require_remote()?;
            }

            let registry =
                ModelRegistry::new(&cfg.embedding.endpoint, EmbeddingModelInfo::default());
            println!(
                "Chunking {} (model: {}, review: {})",
                input.display(),
                registry.model().name,
                if cfg.detector.use_llm_review {
                    "on"
                } else {
                    "off"
                }
            );

            let out_path = pipeline::run(&input, &cfg, &registry, output).await?;
            println!("✓ Chunks written to {}", out_path.display());
        }
        Command::Eval { gold_dir, pred_dir } => {
            let f1 = sentchunk::evaluate(&gold_dir, &pred_dir)?;
            println!("Topic-Boundary F1: {f1:.4}");
        }
    }

    Ok(())
}
