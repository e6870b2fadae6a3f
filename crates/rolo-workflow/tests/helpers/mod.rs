use std::time::Duration;

use rolo_db::Database;

/// Fresh in-memory database with the schema applied.
///
/// Also spawns a 1ms ticker task for the lifetime of the test runtime. Under
/// `start_paused` tests, tokio auto-advances the paused clock to the next
/// pending timer whenever the runtime parks; without the ticker that next
/// timer is sqlx's acquire timeout, which then fires while the SQLite worker
/// thread is still mid-roundtrip and fails every pool acquire with
/// `PoolTimedOut`. The ticker keeps the next timer 1ms away, so virtual time
/// crawls while real I/O completes, and debounce timers still fire normally.
pub async fn db() -> Database {
    tokio::spawn(async {
        loop {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    });
    Database::in_memory()
        .await
        .expect("in-memory database should open")
}
