use anyhow::Result;
use std::path::Path;

/// Reads a `.json` file from `path`.
///
/// ```rust,no_run
/// # async fn run() -> anyhow::Result<()> {
/// use stratest_report::{fs, ReportResult};
///
/// let result: ReportResult = fs::read_json("./buffer/SBER.json").await?;
/// # Ok(())
/// # }
/// ```
pub async fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = tokio::fs::read(path).await?;
    let data: T = serde_json::from_slice(&file)?;
    Ok(data)
}

/// Write a rendered document to `path`, replacing whatever was there.
///
/// Parent directories are created as necessary.
pub async fn write_page(path: impl AsRef<Path>, document: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(path, document).await?;
    log::debug!("{} written ({} bytes)", path.display(), document.len());
    Ok(())
}
