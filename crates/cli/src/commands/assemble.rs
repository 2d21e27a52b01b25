//! `petal assemble` — Reassemble a token stream into text.
//!
//! Input is one token per line. A line holding a JSON string literal is
//! decoded, so `"\n"` and `""` (end of stream) can be written; any other
//! line is taken as the token verbatim.

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use petal_agent::{channel_source, stream_response};
use petal_config::AppConfig;

pub async fn run(file: Option<PathBuf>, events: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let input: Box<dyn Read> = match &file {
        Some(path) => Box::new(
            std::fs::File::open(path)
                .map_err(|e| format!("Failed to open {}: {e}", path.display()))?,
        ),
        None => Box::new(std::io::stdin()),
    };
    let tokens = read_tokens(BufReader::new(input))?;
    tracing::debug!(tokens = tokens.len(), "Read token stream");

    let mut rx = channel_source(tokens, config.stream_buffer);
    let text = stream_response(&mut rx, |event| {
        if events {
            if let Ok(json) = serde_json::to_string(&event) {
                println!("{json}");
            }
        }
    })
    .await;

    if !events {
        println!("{text}");
    }
    Ok(())
}

fn read_tokens<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.map(|l| decode_token(&l)))
        .collect()
}

fn decode_token(line: &str) -> String {
    if line.starts_with('"') {
        if let Ok(token) = serde_json::from_str::<String>(line) {
            return token;
        }
    }
    line.to_string()
}
