pub mod annotation;
pub mod annotation_store;
pub mod annotator;
pub mod cfg;
pub mod counts;
pub mod file_util;
pub mod image_source;
pub mod result;
pub mod tracing_setup;
mod util;
pub use annotation::{AnnoPoint, Annotation, CatState};
pub use annotation_store::{ANNOTATION_EXT, AnnotationStore};
pub use annotator::Annotator;
pub use counts::{AnnotationCounts, count_annotations};
pub use image_source::{FolderImageSource, ImageSource, SUPPORTED_EXTENSIONS};
pub use util::natural_cmp;
