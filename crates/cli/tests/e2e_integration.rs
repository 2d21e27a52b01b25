//! End-to-end integration tests for the Petal runtime.
//!
//! These tests exercise the full pipeline: config and petal definitions on
//! disk, the registry, a stored conversation session, and model responses
//! reassembled from token streams.

use std::fs;
use std::sync::Arc;

use petal_agent::{NextStep, Session, StreamEvent, channel_source, stream_response};
use petal_config::{AppConfig, registry_from_definitions};
use petal_core::error::{Error, TaskError};
use petal_core::store::{ConversationId, TaskStore};
use petal_core::task::Task;
use petal_core::token::VecTokenSource;
use petal_memory::InMemoryTaskStore;

const FLORIST: &str = r#"
name: florist
goal: order a bouquet for delivery
controller: flower_order
objectives:
  - recipient
  - address
  - budget
seed:
  budget: "50"
"#;

const BAKER: &str = r#"
name: baker
goal: order a birthday cake
controller: cake_order
objectives:
  - flavor
  - servings
"#;

/// Write a config file and petal definitions into a temp dir.
fn setup() -> (tempfile::TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    let petals_dir = dir.path().join("petals");
    fs::create_dir(&petals_dir).unwrap();
    fs::write(petals_dir.join("florist.yml"), FLORIST).unwrap();
    fs::write(petals_dir.join("baker.yml"), BAKER).unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "petals_dir = {:?}\nstream_buffer = 2\n",
            petals_dir.display().to_string()
        ),
    )
    .unwrap();

    let config = AppConfig::load_from(&config_path).unwrap();
    (dir, config)
}

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

// ── Config → Registry ───────────────────────────────────────────────────

#[test]
fn petals_load_into_registry() {
    let (_dir, config) = setup();
    let definitions = config.load_petals().unwrap();
    let registry = registry_from_definitions(&definitions).unwrap();

    assert_eq!(registry.names(), vec!["baker", "florist"]);
    let florist = registry.require("florist").unwrap();
    assert_eq!(florist.task.controller_ref(), "flower_order");
    assert_eq!(
        florist.task.required_objectives_text().as_deref(),
        Some("- recipient\n- address")
    );
    assert_eq!(
        registry.find_by_hash(florist.hash()).map(|p| p.name()),
        Some("florist")
    );
}

// ── Full conversation ───────────────────────────────────────────────────

#[tokio::test]
async fn conversation_collects_objectives_across_turns() {
    let (_dir, config) = setup();
    let registry = registry_from_definitions(&config.load_petals().unwrap()).unwrap();
    let petal = registry.require("florist").unwrap();
    let store = Arc::new(InMemoryTaskStore::new());
    let id = ConversationId::new();

    // Turn 1: the petal asks, the model answers in a token stream.
    let mut session = Session::resume(id.clone(), petal, store.clone()).await.unwrap();
    let NextStep::AskUser { prompt } = session.next_step() else {
        panic!("expected the petal to ask for objectives");
    };
    assert!(prompt.ends_with("- recipient\n- address"));

    let mut rx = channel_source(
        tokens(&["Who", "are", "the", "flowers", "for", "?", ""]),
        config.stream_buffer,
    );
    let reply = stream_response(&mut rx, |_| {}).await;
    assert_eq!(reply, "Who are the flowers for?");

    session.record_answer("recipient", "Ada").await.unwrap();

    // Turn 2: a fresh session resumes from the store.
    let mut session = Session::resume(id.clone(), petal, store.clone()).await.unwrap();
    assert_eq!(
        session.task().required_objectives_text().as_deref(),
        Some("- address")
    );
    session.record_additional("card", "Happy birthday").await.unwrap();
    let step = session.record_answer("address", "1 Main St").await.unwrap();
    assert_eq!(
        step,
        NextStep::RunController {
            controller: "flower_order".into()
        }
    );

    // The controller finishes the task.
    session.finish().await.unwrap();

    let record = store.load(&id).await.unwrap().unwrap();
    let restored = Task::from_record(&record).unwrap();
    assert!(restored.is_finished());
    assert_eq!(
        restored.objectives_snapshot(),
        vec![
            ("recipient".to_string(), Some("Ada".to_string())),
            ("address".to_string(), Some("1 Main St".to_string())),
            ("budget".to_string(), Some("50".to_string())),
            ("additional_card".to_string(), Some("Happy birthday".to_string())),
        ]
    );

    // The registry's own petal is untouched by the session.
    assert_eq!(
        petal.task.required_objectives_text().as_deref(),
        Some("- recipient\n- address")
    );
}

#[tokio::test]
async fn unknown_objective_surfaces_to_caller() {
    let (_dir, config) = setup();
    let registry = registry_from_definitions(&config.load_petals().unwrap()).unwrap();
    let petal = registry.require("baker").unwrap();
    let store = Arc::new(InMemoryTaskStore::new());

    let mut session = Session::resume(ConversationId::new(), petal, store.clone())
        .await
        .unwrap();
    let err = session.record_answer("frosting", "vanilla").await.unwrap_err();
    assert!(matches!(err, Error::Task(TaskError::NoSuchObjective { .. })));
    assert_eq!(
        session.task().required_objectives_text().as_deref(),
        Some("- flavor\n- servings")
    );
}

// ── Streaming ───────────────────────────────────────────────────────────

#[tokio::test]
async fn large_numbers_stream_without_spaces() {
    let mut source = VecTokenSource::new([
        "The", "budget", "is", "1", ",", "250", "000", "dollars", ".", "",
    ]);
    let mut chunks = 0;
    let text = stream_response(&mut source, |event| {
        if let StreamEvent::Chunk { .. } = event {
            chunks += 1;
        }
    })
    .await;

    assert_eq!(text, "The budget is 1,250000 dollars.");
    assert_eq!(chunks, 9);
}
