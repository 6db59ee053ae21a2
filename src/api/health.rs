use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::management::MovieStore;

use super::SharedStore;

/// Liveness answer, with the number of records the backend currently serves.
pub async fn health(Extension(store): Extension<SharedStore>) -> Json<Value> {
    let count = store.lock().await.count();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "movies": count
    }))
}
