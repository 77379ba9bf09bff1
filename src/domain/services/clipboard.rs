#[cfg(test)]
#[path = "clipboard_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

static SENDER: OnceCell<mpsc::UnboundedSender<String>> = OnceCell::new();

/// Owns the system clipboard for long running sessions. Some platforms only
/// serve clipboard contents while the owning handle is alive, so the tutor
/// keeps one open in a background task for as long as it runs.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        if SENDER.set(tx).is_err() {
            bail!("Clipboard service is already running.");
        }
        let mut clipboard = arboard::Clipboard::new()?;

        while let Some(text) = rx.recv().await {
            if let Err(err) = clipboard.set_text(text) {
                tracing::error!(error = ?err, "Failed to write to the clipboard");
            }
        }

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    /// Hands `text` to the running service.
    pub fn set(text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            tx.send(text)?;
            return Ok(());
        }

        return Err(anyhow!("Clipboard service is not initialized."));
    }

    /// Writes `text` with a short lived handle, for commands that exit right
    /// after copying.
    pub fn write(text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        return Ok(());
    }
}
