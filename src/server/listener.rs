use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::http::connection::Connection;
use crate::server::RequestDispatcher;

/// Binds `listen_addr` and serves connections until the task is dropped.
pub async fn run(listen_addr: &str, dispatcher: Arc<RequestDispatcher>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    info!(
        "Listening on {} (webroot {})",
        listener.local_addr()?,
        dispatcher.config().webroot().display()
    );

    serve(listener, dispatcher).await
}

/// Accept loop over an already-bound listener.
pub async fn serve(listener: TcpListener, dispatcher: Arc<RequestDispatcher>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::debug!("Accepted connection from {}", peer);

        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, dispatcher);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
