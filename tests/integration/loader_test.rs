//! Loader and CLI Integration Tests
//!
//! Runs the pipeline from JSON files on disk, the way the binary does.

use std::collections::BTreeMap;
use std::path::Path;

use clap::Parser;
use email_advising::cli::{run, Args};
use email_advising::storage::{load_knowledge_base, load_reference_corpus};
use email_advising::{AdvisorSettings, AppError, Decision, EmailAdvisor};
use tempfile::TempDir;

use crate::fixtures::{corpus, knowledge_base};

fn write_fixtures(dir: &Path) -> (String, String) {
    let kb_path = dir.join("knowledge_base.json");
    let corpus_path = dir.join("reference_corpus.json");
    std::fs::write(&kb_path, serde_json::to_string_pretty(&knowledge_base()).unwrap()).unwrap();
    std::fs::write(&corpus_path, serde_json::to_string_pretty(&corpus()).unwrap()).unwrap();
    (
        kb_path.to_string_lossy().into_owned(),
        corpus_path.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_loaded_files_match_in_memory_fixtures() {
    let dir = TempDir::new().unwrap();
    let (kb_path, corpus_path) = write_fixtures(dir.path());

    let kb = load_knowledge_base(&kb_path).unwrap();
    let refs = load_reference_corpus(&corpus_path).unwrap();
    assert_eq!(kb, knowledge_base());
    assert_eq!(refs, corpus());

    let from_disk = EmailAdvisor::new(kb, AdvisorSettings::default())
        .unwrap()
        .with_corpus(&refs)
        .unwrap();
    let in_memory = EmailAdvisor::new(knowledge_base(), AdvisorSettings::default())
        .unwrap()
        .with_corpus(&corpus())
        .unwrap();
    let query = "I want to withdraw from my course";
    assert_eq!(
        from_disk.process(query, &BTreeMap::new()),
        in_memory.process(query, &BTreeMap::new())
    );
}

#[test]
fn test_missing_sources_are_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(load_knowledge_base(&missing), Err(AppError::NotFound(_))));
    assert!(matches!(load_reference_corpus(&missing), Err(AppError::NotFound(_))));
}

#[test]
fn test_empty_corpus_file_is_rejected_by_retriever() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "[]").unwrap();

    let corpus = load_reference_corpus(&path).unwrap();
    assert!(corpus.is_empty());
    let advisor = EmailAdvisor::new(knowledge_base(), AdvisorSettings::default()).unwrap();
    assert!(matches!(advisor.with_corpus(&corpus), Err(AppError::Config(_))));
}

#[test]
fn test_cli_json_report() {
    let dir = TempDir::new().unwrap();
    let (kb_path, corpus_path) = write_fixtures(dir.path());

    let args = Args::try_parse_from([
        "email-advising",
        "--query",
        "How do I withdraw from a class?",
        "--student-name",
        "Riley",
        "--knowledge-base",
        kb_path.as_str(),
        "--reference-corpus",
        corpus_path.as_str(),
        "--max-references",
        "1",
        "--format",
        "json",
    ])
    .unwrap();

    let output = run(&args).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["decision"], "auto_send");
    assert_eq!(json["auto_send"], true);
    assert_eq!(json["article_id"], "withdraw-course");
    assert_eq!(json["matches"].as_array().unwrap().len(), 4);
    assert_eq!(json["references"].as_array().unwrap().len(), 1);
    assert!(json["body"].as_str().unwrap().starts_with("Hi Riley,"));
}

#[test]
fn test_cli_text_report_escalation() {
    let dir = TempDir::new().unwrap();
    let (kb_path, _) = write_fixtures(dir.path());

    let args = Args::try_parse_from([
        "email-advising",
        "--query",
        "Is there parking near the stadium?",
        "--knowledge-base",
        kb_path.as_str(),
    ])
    .unwrap();

    let report = run(&args).unwrap();
    assert!(report.starts_with("Decision: ESCALATE (confidence 0.00)\nSubject: Re: Your advising question"));
    assert!(report.contains("\nReasons:\n- No knowledge base article matched the query\n"));
    assert!(!report.contains("\nReferences:\n"));
}

#[test]
fn test_cli_disable_references_skips_corpus() {
    let dir = TempDir::new().unwrap();
    let (kb_path, _) = write_fixtures(dir.path());
    let missing_corpus = dir.path().join("nope.json");

    let args = Args::try_parse_from([
        "email-advising",
        "--query",
        "How do I withdraw from a class?",
        "--knowledge-base",
        kb_path.as_str(),
        "--reference-corpus",
        missing_corpus.to_str().unwrap(),
        "--disable-references",
        "--format",
        "json",
    ])
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&run(&args).unwrap()).unwrap();
    assert!(json["references"].as_array().unwrap().is_empty());
    assert_eq!(json["decision"], serde_json::to_value(Decision::AutoSend).unwrap());
}

#[test]
fn test_cli_missing_knowledge_base_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("kb.json");
    let args = Args::try_parse_from([
        "email-advising",
        "--query",
        "hello",
        "--knowledge-base",
        missing.to_str().unwrap(),
    ])
    .unwrap();

    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("Knowledge base file not found"));
}
