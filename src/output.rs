use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use crate::image::convert::unpack_mono;
use crate::image::*;

// sibling file the bitmap is written to before being renamed over `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".part");
    path.with_file_name(file_name)
}

/// Writes the packed rows verbatim, row 0 first, no header.
pub fn write_bitmap(path: &Path, bitmap: &PackedBitmap) -> anyhow::Result<()> {
    let staging = staging_path(path);
    std::fs::write(&staging, bitmap.data())
        .with_context(|| format!("Could not create \"{}\"", staging.display()))?;
    if let Err(err) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(err).with_context(|| format!("Could not create \"{}\"", path.display()));
    }
    debug!("Wrote {} bytes to {}", bitmap.data().len(), path.display());
    Ok(())
}

pub fn save_preview(path: &Path, bitmap: &PackedBitmap) -> anyhow::Result<()> {
    let gray = unpack_mono(bitmap)?;
    ::image::save_buffer(path, &gray, bitmap.width(), bitmap.height(), ::image::ColorType::L8)
        .with_context(|| format!("Could not save preview \"{}\"", path.display()))
}

/// Two columns per pixel, "# " for dark.
pub fn render_text(bitmap: &PackedBitmap) -> crate::Result<String> {
    let gray = unpack_mono(bitmap)?;
    let mut text = String::with_capacity((bitmap.width() as usize * 2 + 1) * bitmap.height() as usize);
    for row in gray.chunks_exact(bitmap.width() as usize) {
        for level in row {
            text.push_str(if *level == convert::DARK_LEVEL { "# " } else { "  " });
        }
        text.push('\n');
    }
    Ok(text)
}
