use crate::annotation::{AnnoPoint, Annotation, CatState};
use crate::annotation_store::AnnotationStore;
use crate::image_source::ImageSource;
use crate::pinerr;
use crate::result::PinResult;
use image::DynamicImage;
use tracing::debug;

/// Session controller wiring navigation and edit intents to the store. The
/// displayed image and the displayed annotation always belong to the same
/// key, both are refreshed together whenever the key changes.
pub struct Annotator {
    image_source: Box<dyn ImageSource>,
    store: AnnotationStore,
    cats: Vec<String>,
    active_cat: String,
    key_list: Vec<String>,
    active_key: String,
    annotation: Annotation,
    image: DynamicImage,
}

impl Annotator {
    pub fn new(
        image_source: Box<dyn ImageSource>,
        store: AnnotationStore,
        cats: Vec<String>,
    ) -> PinResult<Self> {
        let active_cat = cats
            .first()
            .ok_or_else(|| pinerr!("cannot annotate without categories"))?
            .clone();
        let key_list = image_source.key_list().to_vec();
        let active_key = key_list
            .first()
            .ok_or_else(|| pinerr!("image source has no keys, nothing to annotate"))?
            .clone();
        let image = image_source.read_image(&active_key)?;
        let annotation = store.load(&active_key);
        Ok(Annotator {
            image_source,
            store,
            cats,
            active_cat,
            key_list,
            active_key,
            annotation,
            image,
        })
    }

    /// Makes `key` current, eagerly fetching its image and annotation.
    pub fn jump_to_key(&mut self, key: &str) -> PinResult<()> {
        if !self.key_list.iter().any(|k| k == key) {
            return Err(pinerr!("key '{}' is not in the key list", key));
        }
        self.image = self.image_source.read_image(key)?;
        self.annotation = self.store.load(key);
        self.active_key = key.to_string();
        debug!(
            "changed image to {} and annotation to {:?}",
            self.active_key, self.annotation
        );
        Ok(())
    }

    /// Steps through the key list, clamped at both ends. If the active key is
    /// not in the list the step starts from index 0.
    pub fn move_by(&mut self, step: isize) -> PinResult<()> {
        let start = self
            .key_list
            .iter()
            .position(|k| k == &self.active_key)
            .unwrap_or(0) as isize;
        let max_idx = self.key_list.len() as isize - 1;
        let idx = (start + step).clamp(0, max_idx) as usize;
        let key = self.key_list[idx].clone();
        if key != self.active_key {
            self.jump_to_key(&key)?;
        }
        Ok(())
    }

    pub fn next_image(&mut self) -> PinResult<()> {
        self.move_by(1)
    }

    pub fn prev_image(&mut self) -> PinResult<()> {
        self.move_by(-1)
    }

    /// Adds a point for the active category and saves immediately.
    pub fn add_object(&mut self, x: f64, y: f64) -> PinResult<()> {
        self.annotation.add_object(&self.active_cat, x, y, true);
        self.store.save(self.annotation.clone(), &self.active_key)
    }

    /// Marks the active category as missing and saves immediately.
    pub fn add_missing(&mut self) -> PinResult<()> {
        self.annotation.add_missing(&self.active_cat);
        self.store.save(self.annotation.clone(), &self.active_key)
    }

    pub fn set_active_cat(&mut self, cat: &str) -> PinResult<()> {
        if !self.cats.iter().any(|c| c == cat) {
            return Err(pinerr!("unknown category '{}'", cat));
        }
        self.active_cat = cat.to_string();
        Ok(())
    }

    pub fn cat_state(&self, cat: Option<&str>) -> CatState {
        self.annotation.cat_state(cat.unwrap_or(&self.active_cat))
    }

    /// Points of the current annotation filtered to the active category, for
    /// drawing the overlay.
    pub fn objects_of_active_cat(&self) -> impl Iterator<Item = &AnnoPoint> {
        self.annotation
            .objects()
            .iter()
            .filter(|p| p.cat == self.active_cat)
    }

    pub fn cats(&self) -> &[String] {
        &self.cats
    }

    pub fn active_cat(&self) -> &str {
        &self.active_cat
    }

    pub fn key_list(&self) -> &[String] {
        &self.key_list
    }

    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }
}
