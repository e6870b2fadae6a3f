//! Shared helpers for rolo-db integration tests.

use rolo_db::Database;

/// Fresh in-memory database with the schema applied.
///
/// Also installs the test logging subscriber on first use, so failing tests
/// show structured store logs under `--nocapture`.
pub async fn db() -> Database {
    init_logging();
    Database::in_memory().await.expect("in-memory database")
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
