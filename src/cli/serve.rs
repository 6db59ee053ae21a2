use crate::{config, error, server};

use super::open_csv_store;

/// Runs the REST backend over the configured CSV file until interrupted.
pub async fn serve() {
    let store = open_csv_store().await;
    if let Err(e) = server::start_api_server(store, &config::server_addr()).await {
        error!("Server stopped. Err: {}", e);
    }
}
