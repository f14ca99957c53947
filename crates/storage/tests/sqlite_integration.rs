use std::collections::BTreeMap;

use med_core::model::{QuestionKey, QuizId};
use med_core::time::fixed_now;
use storage::repository::{ProgressRecord, ProgressRepository};
use storage::sqlite::SqliteRepository;

fn sample_record(answered: usize) -> ProgressRecord {
    let selected_answers: BTreeMap<QuestionKey, usize> =
        (0..answered).map(|index| (QuestionKey::flat(index), 1)).collect();
    ProgressRecord {
        current_case: 0,
        current_question: answered.saturating_sub(1),
        selected_answers,
        score: 1,
        completed: false,
        last_updated: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_round_trips_progress_records() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let quiz_id = QuizId::new("jaundice-quiz");
    assert!(repo.get(&quiz_id).await.expect("get").is_none());

    let record = sample_record(2);
    repo.put(&quiz_id, &record).await.expect("put");
    assert_eq!(repo.get(&quiz_id).await.expect("get"), Some(record.clone()));

    // overwrite wins
    let mut newer = record;
    newer.current_question = 2;
    newer.selected_answers.insert(QuestionKey::flat(2), 0);
    repo.put(&quiz_id, &newer).await.expect("put");
    assert_eq!(repo.get(&quiz_id).await.expect("get"), Some(newer));
}

#[tokio::test]
async fn sqlite_scopes_records_by_quiz_id() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_scoped?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.put(&QuizId::new("hep-quiz"), &sample_record(1))
        .await
        .expect("put");
    assert!(repo.get(&QuizId::new("jaundice-quiz")).await.expect("get").is_none());

    repo.delete(&QuizId::new("hep-quiz")).await.expect("delete");
    assert!(repo.get(&QuizId::new("hep-quiz")).await.expect("get").is_none());
    // deleting a missing record is a no-op
    repo.delete(&QuizId::new("hep-quiz")).await.expect("delete");
}

#[tokio::test]
async fn sqlite_drops_malformed_blobs_and_reports_absent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_malformed?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    // Corrupt blob written behind the repository's back.
    sqlx::query(
        "INSERT INTO quiz_progress (storage_key, state, last_updated) VALUES (?1, ?2, ?3)",
    )
    .bind("quiz_state_corrupt-quiz")
    .bind("{not json")
    .bind(fixed_now().to_rfc3339())
    .execute(repo.pool())
    .await
    .expect("insert corrupt row");

    let quiz_id = QuizId::new("corrupt-quiz");
    assert!(repo.get(&quiz_id).await.expect("get").is_none());

    // The corrupt row is gone, not just skipped.
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_progress")
        .fetch_one(repo.pool())
        .await
        .expect("count");
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn sqlite_rejects_records_with_unknown_shape_gracefully() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_shape?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    // Valid JSON, wrong shape (missing fields): also treated as unreadable.
    sqlx::query(
        "INSERT INTO quiz_progress (storage_key, state, last_updated) VALUES (?1, ?2, ?3)",
    )
    .bind("quiz_state_odd-quiz")
    .bind(r#"{"score": "twelve"}"#)
    .bind(fixed_now().to_rfc3339())
    .execute(repo.pool())
    .await
    .expect("insert odd row");

    assert!(repo.get(&QuizId::new("odd-quiz")).await.expect("get").is_none());
}
