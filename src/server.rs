use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument, warn};

use crate::codec::DEFAULT_MAX_FRAME_SIZE;
use crate::commands;
use crate::connection::Connection;
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6379;

/// Pause after a failed accept, so a persistent error does not spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Requests that grow past this many bytes without completing are rejected.
    pub max_frame_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

pub async fn run(config: Config) -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;

    serve(listener, config).await
}

/// Accepts connections on an already bound listener, each one handled by its own task. All of
/// them share a single store.
pub async fn serve(listener: TcpListener, config: Config) -> Result<(), Error> {
    let store = Store::new();

    info!("Server listening on {}", listener.local_addr()?);

    loop {
        // Accept errors are per connection attempt or transient (descriptor exhaustion), so they
        // never stop the server.
        let (socket, client_address) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };
        let store = store.clone();
        let max_frame_size = config.max_frame_size;
        info!("Accepted connection from {:?}", client_address);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, client_address, store, max_frame_size).await
            {
                error!("Connection failed: {}", e);
            }
        });
    }
}

#[instrument(
    name = "connection",
    skip(stream, store, max_frame_size),
    fields(connection_id, client_address)
)]
async fn handle_connection(
    stream: TcpStream,
    client_address: SocketAddr,
    store: Store,
    max_frame_size: usize,
) -> Result<(), Error> {
    let mut conn = Connection::new(stream, client_address, max_frame_size);

    tracing::Span::current()
        .record("connection_id", conn.id.to_string())
        .record("client_address", client_address.to_string());

    loop {
        let request = match conn.read_request().await {
            Ok(Some(request)) => request,
            Ok(None) => break,
            Err(e) if e.is_protocol() => {
                // The rest of the stream can not be trusted to start at a request boundary.
                warn!("Closing connection after protocol error: {}", e);
                if let Err(e) = conn.write_frame(&Frame::Error(e.to_string())).await {
                    debug!("Failed to report protocol error: {}", e);
                }
                break;
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Received request from client: {:?}", request);
        let res = commands::execute(request, &store);
        debug!("Sending response to client: {}", res);

        conn.write_frame(&res).await?;
    }

    info!("Connection closed");
    Ok(())
}
