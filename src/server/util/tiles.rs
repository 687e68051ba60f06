use std::path::Path;

use crate::server::error::AppError;

/// Reads the banner tile list, a JSON array of tile codes.
///
/// # Returns
/// - `Ok(Vec<String>)` - Tile codes in file order
/// - `Err(AppError::IoErr)` - File could not be read
/// - `Err(AppError::JsonErr)` - File is not a JSON array of strings
pub async fn load_banner_tiles(path: impl AsRef<Path>) -> Result<Vec<String>, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let tiles: Vec<String> = serde_json::from_str(&raw)?;

    Ok(tiles)
}
