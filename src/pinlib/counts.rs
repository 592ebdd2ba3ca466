use crate::annotation::Annotation;
use crate::pinerr;
use crate::annotation_store::ANNOTATION_EXT;
use crate::file_util;
use crate::result::{PinResult, to_pin};
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use walkdir::WalkDir;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnnotationCounts {
    pub n_files: usize,
    pub n_objects: usize,
    pub n_missing: usize,
}
impl AnnotationCounts {
    /// Labeled points and missing-marks combined, one unit of labeling work
    /// each.
    pub fn n_total(&self) -> usize {
        self.n_objects + self.n_missing
    }
}
impl Display for AnnotationCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} objects, {} missing-marks, {} total",
            self.n_files,
            self.n_objects,
            self.n_missing,
            self.n_total()
        )
    }
}

/// Sums up the labeling work below `folder`, subfolders included. A file that
/// does not parse aborts the count.
pub fn count_annotations(folder: &Path) -> PinResult<AnnotationCounts> {
    let mut counts = AnnotationCounts::default();
    for entry in WalkDir::new(folder) {
        let entry = entry.map_err(to_pin)?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == ANNOTATION_EXT) {
            let json = file_util::read_to_string(&path)?;
            let annotation = Annotation::from_json(&json)
                .map_err(|e| pinerr!("could not count {:?} due to {:?}", path, e))?;
            counts.n_files += 1;
            counts.n_objects += annotation.objects().len();
            counts.n_missing += annotation.missing().len();
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defer_folder_removal;
    use crate::annotation_store::AnnotationStore;
    use crate::tracing_setup::init_tracing_for_tests;
    use std::fs;

    #[test]
    fn test_count_recursive() {
        init_tracing_for_tests();
        let tmp = std::env::temp_dir().join("pinpoint-test-counts");
        if tmp.exists() {
            fs::remove_dir_all(&tmp).unwrap();
        }
        defer_folder_removal!(&tmp);

        let mut store = AnnotationStore::new(&tmp).unwrap();
        let mut annotation = Annotation::new();
        annotation.add_object("ball", 1.0, 2.0, true);
        annotation.add_object("head1", 3.0, 4.0, true);
        store.save(annotation, "frame_1").unwrap();

        let mut store_sub = AnnotationStore::new(tmp.join("part2")).unwrap();
        let mut annotation = Annotation::new();
        annotation.add_missing("ball");
        store_sub.save(annotation, "frame_2").unwrap();

        let counts = count_annotations(&tmp).unwrap();
        assert_eq!(
            counts,
            AnnotationCounts {
                n_files: 2,
                n_objects: 2,
                n_missing: 1,
            }
        );
        assert_eq!(counts.n_total(), 3);
    }

    #[test]
    fn test_count_aborts_on_malformed() {
        init_tracing_for_tests();
        let tmp = std::env::temp_dir().join("pinpoint-test-counts-bad");
        fs::create_dir_all(&tmp).unwrap();
        defer_folder_removal!(&tmp);
        file_util::write(tmp.join("bad.json"), "][").unwrap();
        assert!(count_annotations(&tmp).is_err());
    }
}
