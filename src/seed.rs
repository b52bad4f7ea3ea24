use std::fs;
use std::path::Path;

use anyhow::Context;
use diesel::SqliteConnection;

use crate::data::models::NewQuestion;
use crate::data::repositories::QuestionRepository;

/// Loads a question bank file (a JSON array of questions) and upserts it.
pub fn import_question_bank(conn: &mut SqliteConnection, path: &Path) -> anyhow::Result<usize> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank {}", path.display()))?;
    let entries = parse_question_bank(&content)
        .with_context(|| format!("invalid question bank {}", path.display()))?;

    let written = QuestionRepository::upsert_many(conn, &entries)?;
    log::info!("Imported {} questions from {}", written, path.display());
    Ok(written)
}

fn parse_question_bank(content: &str) -> anyhow::Result<Vec<NewQuestion>> {
    let entries: Vec<NewQuestion> = serde_json::from_str(content)?;
    if let Some(blank) = entries.iter().find(|q| q.correct_answer.trim().is_empty()) {
        anyhow::bail!("question {} has no correct answer", blank.question_id);
    }
    Ok(entries)
}
