//! Fire-and-forget activity log writer. Log writes ride a spawned task so a
//! slow store never blocks the response path.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::store::Store;

/// Record a completed action.
pub fn record(store: Arc<dyn Store>, action: &'static str, details: Value) {
    tokio::spawn(async move {
        if let Err(e) = store.insert_log(action, details).await {
            tracing::error!(action, "failed to write activity log: {}", e);
        } else {
            tracing::debug!(action, "activity log recorded");
        }
    });
}

/// Record a failed action under the ERROR tag, keeping the attempted action
/// and the classified message in the details payload.
pub fn record_error(store: Arc<dyn Store>, action: &'static str, error: &str) {
    record(
        store,
        "ERROR",
        json!({ "action": action, "error": error }),
    );
}
