use crate::errors::AppResult;
use crate::export::ensure_writable;
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the dataset log to `dest_file`, optionally replacing the copy
    /// with a zip archive. Returns the path actually written.
    pub fn backup(src: &Path, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        // 1️⃣ Check log exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Event log not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // 3️⃣ Existing destination (or archive) → ask (unless forced)
        ensure_writable(dest, force)?;
        let zip_path = zip_path_for(dest);
        if compress {
            ensure_writable(&zip_path, force)?;
        }

        // 4️⃣ Copy log
        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        // 5️⃣ Optional compression
        let final_path = if compress {
            let compressed = compress_backup(dest, &zip_path)?;

            if compressed != dest {
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        info!(src = %src.display(), dest = %final_path.display(), compress, "backup written");
        Ok(final_path)
    }
}

/// `backup.csv` → `backup.zip`; a destination already named `.zip` gets
/// `.csv.zip` so the copy is not overwritten by its own archive.
fn zip_path_for(dest: &Path) -> PathBuf {
    let zip_path = dest.with_extension("zip");
    if zip_path == dest {
        dest.with_extension("csv.zip")
    } else {
        zip_path
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "events.csv".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path.to_path_buf())
}
