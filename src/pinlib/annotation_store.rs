use crate::annotation::Annotation;
use crate::pinerr;
use crate::file_util;
use crate::result::{PinResult, to_pin};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ANNOTATION_EXT: &str = "json";

/// Maps image keys to their [`Annotation`](Annotation)s. The in-memory map is
/// the source of truth at runtime, the folder is its durable mirror. All
/// existing annotation files are ingested once at construction, reads never
/// hit the disk afterwards.
pub struct AnnotationStore {
    annotation_dir: PathBuf,
    annotations: HashMap<String, Annotation>,
}

impl AnnotationStore {
    /// Creates the folder if necessary and preloads every annotation file in
    /// it. A file that cannot be read or parsed fails the whole construction,
    /// dropping it would be indistinguishable from "never annotated".
    pub fn new<P>(annotation_dir: P) -> PinResult<Self>
    where
        P: AsRef<Path>,
    {
        let annotation_dir = annotation_dir.as_ref().to_path_buf();
        fs::create_dir_all(&annotation_dir).map_err(to_pin)?;
        let mut annotations = HashMap::new();
        for path in file_util::files_in_folder(&annotation_dir, ANNOTATION_EXT)? {
            let key = file_util::to_stem_str(&path)?.to_string();
            let json = file_util::read_to_string(&path)?;
            let annotation = Annotation::from_json(&json)
                .map_err(|e| pinerr!("could not preload {:?} due to {:?}", path, e))?;
            annotations.insert(key, annotation);
        }
        info!(
            "preloaded {} annotations from {annotation_dir:?}",
            annotations.len()
        );
        Ok(AnnotationStore {
            annotation_dir,
            annotations,
        })
    }

    /// File behind `key`, the key's own extension replaced by
    /// [`ANNOTATION_EXT`](ANNOTATION_EXT). No nesting is introduced, a nested
    /// key is the caller's business.
    pub fn annotation_path(&self, key: &str) -> PathBuf {
        self.annotation_dir
            .join(Path::new(key).with_extension(ANNOTATION_EXT))
    }

    /// Cached annotation of `key` or a fresh empty one if `key` has never
    /// been saved. Purely in-memory.
    pub fn load(&self, key: &str) -> Annotation {
        self.annotations.get(key).cloned().unwrap_or_default()
    }

    /// Puts `annotation` into the cache and writes it through to its file.
    /// Empty annotations are cached but not written, see
    /// [`is_empty`](Annotation::is_empty). If the write fails, the cache is
    /// already updated and the error tells the caller that memory and disk
    /// diverge.
    pub fn save(&mut self, annotation: Annotation, key: &str) -> PinResult<()> {
        let json = if annotation.is_empty() {
            None
        } else {
            Some(annotation.to_json()?)
        };
        self.annotations.insert(key.to_string(), annotation);
        if let Some(json) = json {
            let path = self.annotation_path(key);
            file_util::write(&path, json)?;
            debug!("wrote annotation of '{key}' to {path:?}");
        }
        Ok(())
    }

    pub fn annotation_dir(&self) -> &Path {
        &self.annotation_dir
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.annotations.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defer_folder_removal;
    use crate::tracing_setup::init_tracing_for_tests;

    fn make_store(test_name: &str) -> (PathBuf, AnnotationStore) {
        init_tracing_for_tests();
        let tmp = std::env::temp_dir().join(format!("pinpoint-test-{test_name}"));
        if tmp.exists() {
            fs::remove_dir_all(&tmp).unwrap();
        }
        let store = AnnotationStore::new(&tmp).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (tmp, mut store) = make_store("roundtrip");
        defer_folder_removal!(&tmp);
        let mut annotation = Annotation::new();
        annotation.add_object("ball", 10.0, 20.0, true);
        annotation.add_missing("head1");
        store.save(annotation.clone(), "frame_00001").unwrap();
        assert!(store.annotation_path("frame_00001").exists());
        assert_eq!(store.load("frame_00001"), annotation);
    }

    #[test]
    fn test_cache_coherence_without_disk() {
        let (tmp, mut store) = make_store("coherence");
        defer_folder_removal!(&tmp);
        let mut annotation = Annotation::new();
        annotation.add_object("ball", 1.0, 2.0, true);
        store.save(annotation.clone(), "k1").unwrap();
        // reads must come from memory, not from the file
        fs::remove_file(store.annotation_path("k1")).unwrap();
        assert_eq!(store.load("k1"), annotation);
    }

    #[test]
    fn test_empty_annotation_not_written() {
        let (tmp, mut store) = make_store("empty-no-write");
        defer_folder_removal!(&tmp);
        store.save(Annotation::new(), "k2").unwrap();
        assert!(!store.annotation_path("k2").exists());
        assert!(store.load("k2").is_empty());
    }

    #[test]
    fn test_emptied_annotation_leaves_stale_file() {
        let (tmp, mut store) = make_store("stale-file");
        defer_folder_removal!(&tmp);
        let mut annotation = Annotation::new();
        annotation.add_missing("ball");
        store.save(annotation, "k3").unwrap();
        // editing back to empty overwrites the cache but not the file
        store.save(Annotation::new(), "k3").unwrap();
        assert!(store.annotation_path("k3").exists());
        assert!(store.load("k3").is_empty());
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let (tmp, store) = make_store("unknown-key");
        defer_folder_removal!(&tmp);
        assert!(store.load("never-annotated").is_empty());
    }

    #[test]
    fn test_preload() {
        let (tmp, mut store) = make_store("preload");
        defer_folder_removal!(&tmp);
        let mut annotation = Annotation::new();
        annotation.add_object("ball", 5.0, 6.0, true);
        store.save(annotation.clone(), "frame_00007").unwrap();
        let reopened = AnnotationStore::new(&tmp).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.load("frame_00007"), annotation);
    }

    #[test]
    fn test_key_extension_stripped() {
        let (tmp, mut store) = make_store("key-ext");
        defer_folder_removal!(&tmp);
        let mut annotation = Annotation::new();
        annotation.add_missing("ball");
        store.save(annotation.clone(), "frame_00001.jpg").unwrap();
        assert!(tmp.join("frame_00001.json").exists());
        // after a restart the key is the file stem
        let reopened = AnnotationStore::new(&tmp).unwrap();
        assert_eq!(reopened.load("frame_00001"), annotation);
    }

    #[test]
    fn test_malformed_file_fails_construction() {
        init_tracing_for_tests();
        let tmp = std::env::temp_dir().join("pinpoint-test-malformed");
        fs::create_dir_all(&tmp).unwrap();
        defer_folder_removal!(&tmp);
        file_util::write(tmp.join("bad.json"), "{\"objects\": oops").unwrap();
        assert!(AnnotationStore::new(&tmp).is_err());
    }
}
