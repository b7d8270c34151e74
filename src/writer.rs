// Idempotent frame writer. A frame already on disk under any known
// extension is never re-fetched; fresh frames are written with an
// extension derived from the response content type.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::ApiClient;

/// Extensions a previously downloaded frame may carry on disk.
const KNOWN_EXTS: [&str; 3] = [".png", ".webp", ".gif"];

/// What the writer did for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A non-empty file already existed; no request was made.
    AlreadyPresent,
    /// The frame was fetched and written.
    Downloaded,
}

/// Map a `Content-Type` header value to the on-disk extension. Parameters
/// after `;` are ignored and matching is case-insensitive; unknown types
/// fall back to `.bin`.
pub fn ext_from_content_type(content_type: &str) -> &'static str {
    let ct = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match ct.as_str() {
        "image/png" => ".png",
        "image/webp" => ".webp",
        "image/gif" => ".gif",
        _ => ".bin",
    }
}

fn frame_exists(out_dir: &Path, frame_name: &str) -> bool {
    for ext in KNOWN_EXTS {
        let path = out_dir.join(format!("{frame_name}{ext}"));
        if let Ok(meta) = fs::metadata(&path) {
            if meta.is_file() && meta.len() > 0 {
                return true;
            }
        }
    }
    false
}

/// Ensure a local file exists for the frame at `url`. Existing non-empty
/// files short-circuit without any network call; otherwise a single GET is
/// issued (no retry at this layer) and the body written verbatim.
pub async fn write_frame(
    api: &ApiClient,
    url: &str,
    out_dir: &Path,
    frame_index: u32,
) -> Result<WriteOutcome> {
    let frame_name = format!("{frame_index:03}");
    if frame_exists(out_dir, &frame_name) {
        debug!("frame already present: {}/{}", out_dir.display(), frame_name);
        return Ok(WriteOutcome::AlreadyPresent);
    }

    let frame = api.get_frame(url).await?;

    let ext = ext_from_content_type(&frame.content_type);
    let out_path = out_dir.join(format!("{frame_name}{ext}"));
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir.display()))?;
    fs::write(&out_path, &frame.bytes)
        .with_context(|| format!("write {}", out_path.display()))?;

    debug!(
        "frame written: {} ({} bytes)",
        out_path.display(),
        frame.bytes.len()
    );
    Ok(WriteOutcome::Downloaded)
}
