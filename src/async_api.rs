use crate::{new_renderer, Error, PageConfig, PageState, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Render(String, oneshot::Sender<Result<(PageState, String)>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly renderer backed by a dedicated worker thread.
///
/// The worker thread owns the blocking HTTP client and renderer, so async
/// callers can await a page without blocking their runtime. The blocking
/// client must not be created or dropped inside an async context, which is
/// why it lives entirely on the worker.
#[derive(Clone)]
pub struct Renderer {
    cmd_tx: Sender<Command>,
}

impl Renderer {
    /// Create a new renderer (spawns a background thread that owns it).
    pub async fn new(config: Option<PageConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            let renderer = match new_renderer(config) {
                Ok(r) => r,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Render(template, resp) => {
                        let _ = resp.send(renderer.render_html(&template));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;

        Ok(Self { cmd_tx })
    }

    /// Load the profile document and render it into `template`
    pub async fn render(&self, template: &str) -> Result<(PageState, String)> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Render(template.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Render canceled: {}", e)))?
    }

    /// Shutdown the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}

/// One-shot convenience: render `template` with `config` and shut down.
pub async fn render_page(config: PageConfig, template: &str) -> Result<(PageState, String)> {
    let renderer = Renderer::new(Some(config)).await?;
    let out = renderer.render(template).await;
    renderer.close().await?;
    out
}
