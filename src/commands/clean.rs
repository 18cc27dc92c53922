//! Clean the public directory

use anyhow::Result;
use std::fs;
use walkdir::WalkDir;

use crate::Folio;

/// Remove the generated site; returns the number of files deleted
pub fn run(folio: &Folio) -> Result<usize> {
    if !folio.public_dir.exists() {
        tracing::debug!("Nothing to clean at {:?}", folio.public_dir);
        return Ok(0);
    }

    let files = WalkDir::new(&folio.public_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count();

    fs::remove_dir_all(&folio.public_dir)?;
    tracing::info!("Deleted: {:?} ({} files)", folio.public_dir, files);

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(folio.public_dir.join("blogs/a")).unwrap();
        fs::write(folio.public_dir.join("index.html"), "x").unwrap();
        fs::write(folio.public_dir.join("blogs/a/index.html"), "y").unwrap();

        assert_eq!(run(&folio).unwrap(), 2);
        assert!(!folio.public_dir.exists());
        assert_eq!(run(&folio).unwrap(), 0);
    }
}
