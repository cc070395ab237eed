#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{error, info};

use tyrest_core::RestClient;

use super::router;

/// A running test server, with a client pointing at its `/api` base path.
///
/// The server is stopped when the app is dropped.
#[derive(Debug, derive_more::Deref)]
pub struct TestApp {
    #[deref]
    client: RestClient,
    address: SocketAddr,
    server: JoinHandle<()>,
}

impl TestApp {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        info!(%address, "launching server");

        let server = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router()).await {
                error!(?error, "server stopped");
            }
        });

        let client = RestClient::builder()
            .with_base_url(&format!("http://{address}/api"))?
            .with_user_agent("tyrest-tests")
            .build()?;

        Ok(Self {
            client,
            address,
            server,
        })
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A client whose target refuses connections.
pub async fn unreachable_client() -> anyhow::Result<RestClient> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);

    let client = RestClient::builder()
        .with_base_url(&format!("http://{address}/api"))?
        .build()?;
    Ok(client)
}

/// A client talking to a bare HTTP/1.1 server that answers every request with
/// the given status line and an empty body.
///
/// Stops serving when the returned handle is aborted or dropped with the runtime.
pub async fn status_line_client(status_line: &'static str) -> anyhow::Result<(RestClient, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    info!(%address, status_line, "launching raw server");

    let server = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                if let Err(error) = answer(stream, status_line).await {
                    error!(?error, "raw exchange failed");
                }
            });
        }
    });

    let client = RestClient::builder()
        .with_base_url(&format!("http://{address}/api"))?
        .build()?;
    Ok((client, server))
}

async fn answer(mut stream: TcpStream, status_line: &str) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buffer = [0; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buffer).await?;
        if read == 0 {
            return Ok(());
        }
        request.extend_from_slice(buffer.get(..read).unwrap_or_default());
    }

    let response = format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
