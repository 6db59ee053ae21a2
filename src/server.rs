use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, info, management::CsvStore};

pub fn router(store: api::SharedStore) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/movies",
            get(api::list_movies)
                .post(api::create_movie)
                .put(api::update_movie),
        )
        .route("/movies/delete", post(api::delete_movie))
        .layer(Extension(store))
}

/// Serves the REST backend on `addr` until the process is stopped. The store
/// must already be loaded.
pub async fn start_api_server(store: CsvStore, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", addr, e))?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        "Serving {} on http://{}",
        store.path().display(),
        listener.local_addr()?
    );
    axum::serve(listener, router(Arc::new(Mutex::new(store)))).await?;
    Ok(())
}
