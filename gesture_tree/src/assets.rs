//! Image-pool loading.
//!
//! Photos are loaded once at startup and reduced to opaque swatches the
//! software renderer can stamp; the core never interprets pixel data, only
//! counts and indexes the pool.  Undecodable files are logged and skipped;
//! a missing or empty directory yields an empty pool, which is a warning,
//! not an error — the field degrades to an all-lights formation.

use std::path::Path;

use log::{info, warn};

/// One loaded photo, reduced to what the disc painter needs.
#[derive(Clone, Debug)]
pub struct TextureSwatch {
    /// Average color of the image, packed ARGB.
    pub color: u32,
    /// File stem, for diagnostics.
    pub name: String,
}

/// The session's photo pool.  Indexed cyclically by the ornament field.
#[derive(Clone, Debug, Default)]
pub struct TexturePool {
    swatches: Vec<TextureSwatch>,
}

impl TexturePool {
    pub fn empty() -> Self {
        TexturePool::default()
    }

    /// Load every decodable image directly under `dir`.
    pub fn load_dir(dir: &Path) -> Self {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot read asset dir {}: {} — continuing with no photos", dir.display(), e);
                return TexturePool::empty();
            }
        };

        let mut swatches = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match image::open(&path) {
                Ok(img) => {
                    let name = path.file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    log::debug!("loaded photo {:?}", name);
                    swatches.push(TextureSwatch { color: average_color(&img), name });
                }
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                }
            }
        }

        if swatches.is_empty() {
            warn!("no decodable images in {} — all ornaments will be lights", dir.display());
        } else {
            info!("loaded {} photo(s) from {}", swatches.len(), dir.display());
        }
        TexturePool { swatches }
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn swatch(&self, slot: usize) -> Option<&TextureSwatch> {
        self.swatches.get(slot)
    }
}

/// Mean RGB over a thumbnail of the image, packed ARGB.
fn average_color(img: &image::DynamicImage) -> u32 {
    let thumb = img.thumbnail(16, 16).to_rgb8();
    let (w, h) = thumb.dimensions();
    let n = (w * h).max(1) as u64;

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for px in thumb.pixels() {
        r += px.0[0] as u64;
        g += px.0[1] as u64;
        b += px.0[2] as u64;
    }
    0xFF00_0000 | (((r / n) as u32) << 16) | (((g / n) as u32) << 8) | ((b / n) as u32)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("gesture_tree_assets_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_dir_yields_empty_pool() {
        let pool = TexturePool::load_dir(Path::new("/nonexistent/gesture_tree"));
        assert!(pool.is_empty());
    }

    #[test]
    fn non_image_files_are_skipped() {
        let dir = temp_dir("junk");
        fs::write(dir.join("notes.txt"), b"not an image").unwrap();
        let pool = TexturePool::load_dir(&dir);
        assert!(pool.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn solid_image_averages_to_its_color() {
        let dir = temp_dir("red");
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 10]));
        img.save(dir.join("red.png")).unwrap();

        let pool = TexturePool::load_dir(&dir);
        assert_eq!(pool.len(), 1);
        let sw = pool.swatch(0).unwrap();
        assert_eq!(sw.name, "red");
        assert_eq!(sw.color, 0xFFC80A0A);
        let _ = fs::remove_dir_all(&dir);
    }
}
