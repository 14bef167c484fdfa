// src/server/mod.rs

//! Development HTTP server and reload push channel.
//!
//! Serves the generated output directory as static files and exposes an SSE
//! endpoint that connected browsers subscribe to. After a successful run
//! the hub broadcasts `reload`; after a failed run it broadcasts
//! `build-error` with the failure message so the developer sees an overlay
//! instead of a stale page. With no subscribers, broadcasting is a no-op.
//!
//! The output directory is shared mutable state: tasks write whole files
//! into it while this server reads, and the server simply serves whatever
//! is currently on disk.

use std::convert::Infallible;
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::services::ServeDir;
use tracing::{debug, info};

use crate::engine::Notifier;
use crate::errors::{Result, SiteflowError};

/// Signal pushed to connected development clients.
#[derive(Debug, Clone)]
pub enum ReloadSignal {
    Reload,
    BuildError(String),
}

/// Broadcast hub for reload signals. Cheap to clone; all clones share the
/// same channel.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadSignal>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadSignal> {
        self.tx.subscribe()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ReloadHub {
    fn notify_reload(&self) {
        // Err means no connected clients; that's fine.
        let receivers = self.tx.send(ReloadSignal::Reload).unwrap_or(0);
        debug!(receivers, "broadcast reload");
    }

    fn notify_error(&self, message: &str) {
        let receivers = self
            .tx
            .send(ReloadSignal::BuildError(message.to_string()))
            .unwrap_or(0);
        debug!(receivers, "broadcast build error");
    }
}

/// Bind the dev-server listener up front so a busy port fails the whole
/// startup instead of surfacing later inside the serve loop.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    TcpListener::bind(addr).await.map_err(|err| {
        if err.kind() == ErrorKind::AddrInUse {
            SiteflowError::PortInUse(port)
        } else {
            SiteflowError::Io(err)
        }
    })
}

/// Serve static files from `root` plus the reload event routes, forever.
pub async fn serve(listener: TcpListener, root: PathBuf, hub: ReloadHub) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, ?root, "dev server listening");
    }

    let app = router(root, hub);
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(root: PathBuf, hub: ReloadHub) -> Router {
    Router::new()
        .route("/__siteflow/events", get(events))
        .route("/__siteflow/client.js", get(client_js))
        .with_state(hub)
        .fallback_service(ServeDir::new(root))
}

async fn events(
    State(hub): State<ReloadHub>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(hub.subscribe()).filter_map(|msg| match msg {
        Ok(ReloadSignal::Reload) => Some(Ok(Event::default().event("reload").data("changed"))),
        Ok(ReloadSignal::BuildError(message)) => {
            Some(Ok(Event::default().event("build-error").data(message)))
        }
        // A lagged receiver just skips old signals.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn client_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], CLIENT_JS)
}

/// Browser-side half of the reload channel. Pages served during development
/// can include it with `<script src="/__siteflow/client.js"></script>`.
const CLIENT_JS: &str = r#"(function () {
  var overlay = null;
  function showOverlay(message) {
    if (!overlay) {
      overlay = document.createElement("pre");
      overlay.style.cssText =
        "position:fixed;top:0;left:0;right:0;z-index:99999;margin:0;" +
        "padding:1em;background:#300;color:#fcc;white-space:pre-wrap;" +
        "font:14px/1.4 monospace;";
      document.body.appendChild(overlay);
    }
    overlay.textContent = "siteflow build failed\n\n" + message;
  }
  var source = new EventSource("/__siteflow/events");
  source.addEventListener("reload", function () {
    location.reload();
  });
  source.addEventListener("build-error", function (e) {
    showOverlay(e.data);
  });
})();
"#;
