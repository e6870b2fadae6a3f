//! Live-query plumbing.
//!
//! A live query emits its current result immediately, then re-runs and
//! re-emits whenever any table it depends on changes, signalled through the
//! [`ChangeBus`]. The stream ends only when the bus closes; consumers stop
//! observing by dropping the stream.

use std::future::Future;

use futures::stream;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tracing::debug;

use rolo_core::{ChangeBus, ChangeEvent, LiveStream, Result, Table};

struct LiveState<F> {
    rx: Receiver<ChangeEvent>,
    tables: Vec<Table>,
    query: F,
    primed: bool,
}

/// Turn a re-runnable query into a [`LiveStream`] that tracks `tables`.
///
/// The subscription is taken before the first query runs, so a mutation
/// landing between stream creation and first poll still triggers a re-emit.
/// A lagged receiver resynchronizes by re-querying, so overflow never loses
/// the final state.
pub(crate) fn live<T, F, Fut>(changes: &ChangeBus, tables: Vec<Table>, query: F) -> LiveStream<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let state = LiveState {
        rx: changes.subscribe(),
        tables,
        query,
        primed: false,
    };

    Box::pin(stream::unfold(state, |mut st| async move {
        if !st.primed {
            st.primed = true;
            let item = (st.query)().await;
            return Some((item, st));
        }
        loop {
            match st.rx.recv().await {
                Ok(ev) if st.tables.contains(&ev.table) => {
                    let item = (st.query)().await;
                    return Some((item, st));
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(missed)) => {
                    debug!(
                        subsystem = "database",
                        component = "live_query",
                        missed,
                        "live query lagged, resynchronizing"
                    );
                    let item = (st.query)().await;
                    return Some((item, st));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }))
}
