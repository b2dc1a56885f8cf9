use std::sync::Arc;

use paklegal::assistant::Assistant;
use paklegal::config::{RetrievalConfig, Settings};
use paklegal::providers::GeminiClient;
use paklegal::rag::Retriever;
use paklegal::server::{start_server, AppState};

#[tokio::main]
async fn main() {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[server] configuration error: {e}");
            std::process::exit(1);
        }
    };

    let client = match GeminiClient::new(&settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("[server] provider setup failed: {e}");
            std::process::exit(1);
        }
    };

    let retriever = Arc::new(Retriever::new(client.clone(), RetrievalConfig::default()));
    let assistant = Arc::new(Assistant::new(retriever.clone(), client));

    let state = AppState {
        assistant,
        retriever,
    };
    if let Err(e) = start_server(state, settings.port).await {
        eprintln!("[server] {e}");
        std::process::exit(1);
    }
}
