#![allow(clippy::unwrap_used)]

use tempfile::TempDir;

use teleframe_bot::config::{DbConfig, SqliteConfig};
use teleframe_bot::context::AppContext;
use teleframe_bot::database::connection::DatabaseManager;
use teleframe_bot::database::transaction::{
    PendingWrite, SqlxTransactionManager, TransactionManager,
};

fn sqlite_config(dir: &TempDir) -> DbConfig {
    let path = dir.path().join("test.db");
    DbConfig::Sqlite(SqliteConfig {
        connector: "sqlite".to_string(),
        path: path.display().to_string(),
    })
}

async fn test_db(dir: &TempDir) -> DatabaseManager {
    let db = DatabaseManager::new(&sqlite_config(dir))
        .await
        .expect("failed to create test database");
    db.run_migrations().await.expect("failed to run migrations");
    db
}

#[tokio::test]
async fn test_commit_persists_queued_writes() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;

    let tx = db.pool.begin().await.expect("failed to begin transaction");
    let mut manager = SqlxTransactionManager::new(tx);
    manager.queue(PendingWrite::new(
        "a",
        "INSERT INTO marked_days (day) VALUES ('2024-05-10')",
    ));
    manager.queue(PendingWrite::new(
        "b",
        "INSERT INTO marked_days (day) VALUES ('2024-05-11')",
    ));
    manager.commit().await.expect("commit failed");

    let days = db.marked_days().await.expect("failed to read days");
    assert_eq!(days.len(), 2);
}

#[tokio::test]
async fn test_rollback_discards_writes() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;

    let tx = db.pool.begin().await.expect("failed to begin transaction");
    let mut manager = SqlxTransactionManager::new(tx);
    manager.queue(PendingWrite::new(
        "a",
        "INSERT INTO marked_days (day) VALUES ('2024-05-10')",
    ));
    manager.flush(None).await.expect("flush failed");
    manager.rollback().await.expect("rollback failed");

    let days = db.marked_days().await.expect("failed to read days");
    assert!(days.is_empty());
}

#[tokio::test]
async fn test_scoped_flush_runs_only_listed_keys() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;

    let tx = db.pool.begin().await.expect("failed to begin transaction");
    let mut manager = SqlxTransactionManager::new(tx);
    manager.queue(PendingWrite::new(
        "keep",
        "INSERT INTO marked_days (day) VALUES ('2024-05-10')",
    ));
    manager.queue(PendingWrite::new(
        "run",
        "INSERT INTO marked_days (day) VALUES ('2024-05-11')",
    ));

    manager.flush(Some(&["run"])).await.expect("flush failed");
    assert_eq!(manager.pending().len(), 1);
    assert_eq!(manager.pending()[0].key, "keep");

    // Commit flushes the remainder.
    manager.commit().await.expect("commit failed");
    let days = db.marked_days().await.expect("failed to read days");
    assert_eq!(days.len(), 2);
}

#[tokio::test]
async fn test_operations_after_close_fail() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;

    let tx = db.pool.begin().await.expect("failed to begin transaction");
    let mut manager = SqlxTransactionManager::new(tx);
    manager.commit().await.expect("commit failed");

    let result = manager.commit().await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already closed"));
}

#[tokio::test]
async fn test_sql_failure_propagates_unchanged() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;

    let tx = db.pool.begin().await.expect("failed to begin transaction");
    let mut manager = SqlxTransactionManager::new(tx);
    manager.queue(PendingWrite::new("bad", "INSERT INTO no_such_table VALUES (1)"));

    let result = manager.flush(None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_dropping_uncommitted_transaction_rolls_back() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;

    {
        let tx = db.pool.begin().await.expect("failed to begin transaction");
        let mut manager = SqlxTransactionManager::new(tx);
        manager.queue(PendingWrite::new(
            "a",
            "INSERT INTO marked_days (day) VALUES ('2024-05-10')",
        ));
        manager.flush(None).await.expect("flush failed");
        // Dropped without commit.
    }

    let days = db.marked_days().await.expect("failed to read days");
    assert!(days.is_empty());
}

#[tokio::test]
async fn test_app_context_request_scope() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let config = teleframe_bot::config::BotConfig {
        bot_token: "test-token".to_string(),
        storage: teleframe_bot::config::StorageConfig::Memory,
        db: sqlite_config(&dir),
        logging_config_path: "/nonexistent/logging.yml".into(),
    };

    let app = AppContext::initialize(config).await.expect("init failed");
    let mut tx = app.begin_request().await.expect("begin_request failed");
    tx.queue(PendingWrite::new(
        "w",
        "INSERT INTO marked_days (day) VALUES ('2024-07-01')",
    ));
    tx.commit().await.expect("commit failed");

    let days = app.db.marked_days().await.expect("failed to read days");
    assert_eq!(days.len(), 1);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let db = test_db(&dir).await;
    db.run_migrations().await.expect("second run failed");
}
