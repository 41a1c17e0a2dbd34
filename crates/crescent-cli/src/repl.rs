//! Interactive chat loop
//!
//! One query per line, one turn at a time. A failed turn prints an error
//! line and keeps the session; `exit`, `quit`, or EOF ends it. The session
//! log lives only for the lifetime of this loop.

use crate::Cli;
use crate::surface::TerminalSurface;
use anyhow::Context;
use colored::Colorize;
use crescent_core::chat::{ChatEngine, ChatTurn, SessionLog, TypingPresenter, greeting};
use crescent_core::llm::{OpenAIEmbedder, OpenAIGenerator, OpenAILlmConfig};
use crescent_core::rag::{QdrantRetriever, QdrantRetrieverConfig, RagPipeline};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let llm_config = OpenAILlmConfig::from_env()
        .with_model(&cli.model)
        .with_embedding_model(&cli.embedding_model);
    if llm_config.api_key.is_empty() {
        anyhow::bail!("OPENAI_API_KEY is not set");
    }

    let mut retriever_config = QdrantRetrieverConfig::new(&cli.qdrant_url, &cli.collection);
    if let Ok(api_key) = std::env::var("QDRANT_API_KEY") {
        retriever_config = retriever_config.with_api_key(api_key);
    }

    tracing::info!(collection = %cli.collection, "loading vector index");
    let embedder = Arc::new(OpenAIEmbedder::with_config(llm_config.clone()));
    let retriever = QdrantRetriever::new(retriever_config, embedder)
        .context("connecting to the vector index")?;
    let generator = OpenAIGenerator::with_config(llm_config);

    let pipeline = RagPipeline::new(Arc::new(retriever), Arc::new(generator));
    let engine = ChatEngine::new(pipeline)
        .with_presenter(TypingPresenter::with_delay(Duration::from_millis(
            cli.word_delay_ms,
        )));

    let mut session = SessionLog::new();

    let hello = greeting();
    println!("{} {hello}", "assistant >".cyan().bold());
    session.append(ChatTurn::assistant(hello));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "you >".green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        print!("{} ", "assistant >".cyan().bold());
        std::io::stdout().flush()?;

        let mut surface = TerminalSurface::new();
        if let Err(err) = engine.handle_turn(&mut session, &mut surface, input).await {
            // The turn produced no assistant message; prior turns stand.
            println!();
            eprintln!("{} {err}", "error:".red().bold());
        }
    }

    println!("{}", "bye.".dimmed());
    Ok(())
}
