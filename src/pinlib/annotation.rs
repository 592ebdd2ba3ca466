use crate::result::{PinResult, to_pin};
use crate::pinerr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// One labeled point. `cat` names the feature type, `x`/`y` are image pixel
/// coordinates and may be fractional.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AnnoPoint {
    pub cat: String,
    pub x: f64,
    pub y: f64,
}

/// State of one category within an annotation as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatState {
    /// Explicitly marked as not present in the image.
    Missing,
    /// Neither labeled nor marked missing.
    Unspecified,
    /// Labeled points, coordinates rounded for display.
    Points(Vec<(i32, i32)>),
}
impl Display for CatState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatState::Missing => write!(f, "MISSING"),
            CatState::Unspecified => write!(f, "UNSPECIFIED"),
            CatState::Points(points) => {
                let s = points
                    .iter()
                    .map(|(x, y)| format!("({x}, {y})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{s}")
            }
        }
    }
}

/// Label set of exactly one image. Categories with points and categories
/// marked missing are disjoint at all times. Both mutators re-establish this
/// themselves, hence they cannot fail.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Annotation {
    #[serde(default)]
    objects: Vec<AnnoPoint>,
    #[serde(default)]
    missing: BTreeSet<String>,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// If a category appears both in `objects` and in `missing`. Such data can
    /// only come from a bug or a corrupted file, silent repair would hide it.
    fn check_consistency(&self) {
        let problem_cats = self
            .missing
            .iter()
            .filter(|cat| self.objects.iter().any(|p| &&p.cat == cat))
            .collect::<Vec<_>>();
        assert!(
            problem_cats.is_empty(),
            "categories marked both labeled and missing: {problem_cats:?}"
        );
    }

    /// Appends a point for `cat`. With `unique`, all previous points of `cat`
    /// are replaced so the category keeps at most one point. A missing-mark of
    /// `cat` is removed either way.
    pub fn add_object(&mut self, cat: &str, x: f64, y: f64, unique: bool) {
        if unique {
            self.objects.retain(|p| p.cat != cat);
        }
        self.objects.push(AnnoPoint {
            cat: cat.to_string(),
            x,
            y,
        });
        self.missing.remove(cat);
    }

    /// Marks `cat` as not present in the image, dropping any points of `cat`.
    pub fn add_missing(&mut self, cat: &str) {
        self.objects.retain(|p| p.cat != cat);
        self.missing.insert(cat.to_string());
    }

    pub fn cat_state(&self, cat: &str) -> CatState {
        if self.missing.contains(cat) {
            CatState::Missing
        } else {
            let points = self
                .objects
                .iter()
                .filter(|p| p.cat == cat)
                // half values round away from zero, 10.5 displays as 11
                .map(|p| (p.x.round() as i32, p.y.round() as i32))
                .collect::<Vec<_>>();
            if points.is_empty() {
                CatState::Unspecified
            } else {
                CatState::Points(points)
            }
        }
    }

    /// An empty annotation carries no information and is never persisted.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.missing.is_empty()
    }

    pub fn objects(&self) -> &[AnnoPoint] {
        &self.objects
    }

    pub fn missing(&self) -> &BTreeSet<String> {
        &self.missing
    }

    pub fn to_json(&self) -> PinResult<String> {
        self.check_consistency();
        serde_json::to_string(self).map_err(to_pin)
    }

    /// # Panics
    /// If the parsed document violates the objects/missing disjointness, see
    /// [`check_consistency`](Annotation::check_consistency).
    pub fn from_json(json: &str) -> PinResult<Self> {
        let annotation: Annotation = serde_json::from_str(json)
            .map_err(|e| pinerr!("could not parse annotation due to {:?}", e))?;
        annotation.check_consistency();
        Ok(annotation)
    }
}
