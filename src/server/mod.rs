// Server module - hyper HTTP server setup and accept loop

pub mod handlers;
pub mod response;

pub use handlers::AppContext;
pub use response::EndpointResponse;

use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::storage::Storage;
use crate::watermark::WatermarkProcessor;

/// The upload server: a bound listener plus the shared request context.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
    ctx: Arc<AppContext>,
}

impl Server {
    /// Bind the listener and assemble the request context.
    ///
    /// The actual bound port is written back into the configuration, so
    /// ephemeral (`:0`) binds still embed correct ports in returned links.
    pub async fn bind(
        mut config: AppConfig,
        storage: Storage,
        processor: Option<WatermarkProcessor>,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let addr = listener.local_addr()?;
        config.port = addr.port();

        let ctx = Arc::new(AppContext {
            config,
            storage,
            processor,
        });

        Ok(Self {
            listener,
            addr,
            ctx,
        })
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accept connections forever, one spawned task per connection.
    pub async fn serve(self) -> io::Result<()> {
        loop {
            let (stream, remote) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let ctx = self.ctx.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let ctx = ctx.clone();
                    async move { Ok::<_, Infallible>(handlers::handle(ctx, req).await) }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(error = %e, client = %remote, "Connection error");
                }
            });
        }
    }
}
