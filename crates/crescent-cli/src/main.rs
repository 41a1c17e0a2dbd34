//! Crescent CLI - terminal chat host for the retrieval-augmented assistant

mod repl;
mod surface;

use clap::Parser;

/// Chat with your documents over a pre-built Qdrant index.
#[derive(Debug, Parser)]
#[command(name = "crescent", version, about)]
struct Cli {
    /// Qdrant server URL
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6334")]
    qdrant_url: String,

    /// Qdrant collection holding the passage index
    #[arg(long, env = "QDRANT_COLLECTION", default_value = "crescent")]
    collection: String,

    /// Chat model for answer generation
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    model: String,

    /// Embedding model for query embedding
    #[arg(long, env = "OPENAI_EMBEDDING_MODEL", default_value = "text-embedding-3-small")]
    embedding_model: String,

    /// Pause between words of the typing effect, in milliseconds
    #[arg(long, default_value_t = 50)]
    word_delay_ms: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // Settings come from the environment, loaded once at startup.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt().with_env_filter("info").init();
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(repl::run(cli))
}
