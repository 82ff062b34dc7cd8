//! Stdout / file surface
//!
//! Keeps the current markup of each region and writes it out once the action
//! has settled, so transient states (the searching placeholder) never reach
//! the output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use arcana_core::{InputField, Region, Surface};

/// Surface that prints regions to stdout or writes them to a file
#[derive(Debug, Default)]
pub struct StdoutSurface {
    out: Option<PathBuf>,
    regions: Mutex<Vec<(Region, String)>>,
}

impl StdoutSurface {
    /// Create a surface; `out` selects a file instead of stdout
    pub fn new(out: Option<PathBuf>) -> Self {
        Self {
            out,
            regions: Mutex::new(Vec::new()),
        }
    }

    /// Current content of every region, in first-written order
    pub fn snapshot(&self) -> String {
        let regions = self.regions.lock();
        let mut document = String::new();
        for (region, markup) in regions.iter() {
            let name = match region {
                Region::Main => "main",
                Region::SearchResults => "search-results",
            };
            document.push_str(&format!("<section data-region=\"{name}\">\n{markup}\n</section>\n"));
        }
        document
    }

    /// Write the current regions to the configured output
    pub async fn flush(&self) -> Result<()> {
        let document = self.snapshot();
        if document.is_empty() {
            debug!("Nothing to write");
            return Ok(());
        }

        match self.out {
            Some(ref path) => {
                tokio::fs::write(path, document.as_bytes())
                    .await
                    .with_context(|| format!("Failed to write output file: {path:?}"))?;
                info!(path = ?path, "Markup written");
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(document.as_bytes()).await?;
                stdout.flush().await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Surface for StdoutSurface {
    async fn replace(&self, region: Region, markup: String) -> Result<()> {
        let mut regions = self.regions.lock();
        match regions.iter_mut().find(|(r, _)| *r == region) {
            Some(entry) => entry.1 = markup,
            None => regions.push((region, markup)),
        }
        Ok(())
    }

    async fn clear_input(&self, field: InputField) -> Result<()> {
        debug!(?field, "Input cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_keeps_latest_markup() {
        let surface = StdoutSurface::new(None);
        surface
            .replace(Region::SearchResults, "<p>buscando</p>".to_string())
            .await
            .unwrap();
        surface
            .replace(Region::SearchResults, "<p>resultados</p>".to_string())
            .await
            .unwrap();

        let document = surface.snapshot();
        assert!(document.contains("resultados"));
        assert!(!document.contains("buscando"));
        assert!(document.contains(r#"data-region="search-results""#));
    }

    #[tokio::test]
    async fn test_flush_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reading.html");
        let surface = StdoutSurface::new(Some(path.clone()));
        surface
            .replace(Region::Main, "<h2>Cruz Celta</h2>".to_string())
            .await
            .unwrap();

        surface.flush().await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<h2>Cruz Celta</h2>"));
    }

    #[tokio::test]
    async fn test_flush_without_content_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.html");
        let surface = StdoutSurface::new(Some(path.clone()));

        surface.flush().await.unwrap();

        assert!(!path.exists());
    }
}
