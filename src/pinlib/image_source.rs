use crate::pinerr;
use crate::file_util;
use crate::result::{PinResult, to_pin, trace_ok_err};
use crate::util::natural_cmp;
use image::DynamicImage;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SUPPORTED_EXTENSIONS: [&str; 10] = [
    "PNG", "png", "JPG", "jpg", "JPEG", "jpeg", "TIF", "tif", "TIFF", "tiff",
];

/// Position in [`SUPPORTED_EXTENSIONS`](SUPPORTED_EXTENSIONS), used to pick a
/// deterministic winner when two images share one stem.
fn ext_priority(path: &Path) -> usize {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| SUPPORTED_EXTENSIONS.iter().position(|se| *se == ext))
        .unwrap_or(SUPPORTED_EXTENSIONS.len())
}

/// Hands out decoded images by key and enumerates the available keys in a
/// stable order.
pub trait ImageSource {
    fn key_list(&self) -> &[String];
    fn read_image(&self, key: &str) -> PinResult<DynamicImage>;
}

/// Images of one local folder, key = file name without extension, keys in
/// natural order.
pub struct FolderImageSource {
    image_dir: PathBuf,
    keys: Vec<String>,
    paths_by_key: HashMap<String, PathBuf>,
}

impl FolderImageSource {
    pub fn new<P>(image_dir: P) -> PinResult<Self>
    where
        P: AsRef<Path>,
    {
        let image_dir = image_dir.as_ref().to_path_buf();
        let mut paths_by_key: HashMap<String, PathBuf> = HashMap::new();
        for entry in fs::read_dir(&image_dir)
            .map_err(|e| pinerr!("could not open image folder {:?} due to {}", image_dir, e))?
            .flatten()
        {
            let path = entry.path();
            let is_image = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
            if is_image {
                // a name that does not convert to unicode cannot become a key,
                // skip the file instead of failing the whole scan
                let Some(key) = trace_ok_err(file_util::to_stem_str(&path)) else {
                    continue;
                };
                let key = key.to_string();
                match paths_by_key.get(&key) {
                    Some(prev) if ext_priority(prev) <= ext_priority(&path) => {
                        warn!("multiple images for key '{key}', ignoring {path:?}");
                    }
                    Some(prev) => {
                        warn!("multiple images for key '{key}', ignoring {prev:?}");
                        paths_by_key.insert(key, path);
                    }
                    None => {
                        paths_by_key.insert(key, path);
                    }
                }
            }
        }
        let mut keys = paths_by_key.keys().cloned().collect::<Vec<_>>();
        keys.sort_by(|k1, k2| natural_cmp(k1, k2));
        info!("found {} images in {image_dir:?}", keys.len());
        Ok(FolderImageSource {
            image_dir,
            keys,
            paths_by_key,
        })
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
}

impl ImageSource for FolderImageSource {
    fn key_list(&self) -> &[String] {
        &self.keys
    }

    fn read_image(&self, key: &str) -> PinResult<DynamicImage> {
        let path = self
            .paths_by_key
            .get(key)
            .ok_or_else(|| pinerr!("no image for key '{}' in {:?}", key, self.image_dir))?;
        image::open(path).map_err(to_pin)
    }
}
