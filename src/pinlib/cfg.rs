use crate::pinerr;
use crate::file_util::{self, DEFAULT_HOMEDIR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CFG_FILENAME: &str = "pinpoint_cfg.toml";

/// What to annotate: where the images live, where the annotation files go and
/// which categories can be labeled.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Cfg {
    pub image_dir: PathBuf,
    annot_dir: Option<PathBuf>,
    pub cats: Vec<String>,
}

impl Cfg {
    /// Annotations live next to the images unless configured otherwise.
    pub fn annot_dir(&self) -> &Path {
        self.annot_dir.as_deref().unwrap_or(&self.image_dir)
    }
}

pub fn get_default_cfg_path() -> PathBuf {
    DEFAULT_HOMEDIR.join(CFG_FILENAME)
}

pub fn get_log_folder() -> PathBuf {
    DEFAULT_HOMEDIR.join("logs")
}

/// There is no usable default for a missing or broken config, `image_dir` and
/// `cats` have to come from the user.
pub fn read_cfg(cfg_toml_path: &Path) -> crate::result::PinResult<Cfg> {
    let toml_str = file_util::read_to_string(cfg_toml_path)?;
    toml::from_str(&toml_str).map_err(|e| pinerr!("could not parse cfg due to {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defer_file_removal;

    #[test]
    fn test_read_cfg_file() {
        let cfg_path = std::env::temp_dir().join("pinpoint-test-cfg.toml");
        file_util::write(&cfg_path, "image_dir = \"data/frames\"\ncats = [\"ball\"]").unwrap();
        defer_file_removal!(&cfg_path);
        let cfg = read_cfg(&cfg_path).unwrap();
        assert_eq!(cfg.image_dir, PathBuf::from("data/frames"));
        assert_eq!(cfg.annot_dir(), Path::new("data/frames"));
        assert_eq!(cfg.cats, ["ball"]);
    }

    #[test]
    fn test_parse_cfg() {
        let cfg: Cfg = toml::from_str(
            r#"
            image_dir = "data/frames"
            annot_dir = "data/annotations"
            cats = ["ball", "head1", "head2"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.image_dir, PathBuf::from("data/frames"));
        assert_eq!(cfg.annot_dir(), Path::new("data/annotations"));
        assert_eq!(cfg.cats, ["ball", "head1", "head2"]);
    }

    #[test]
    fn test_annot_dir_defaults_to_image_dir() {
        let cfg: Cfg = toml::from_str(
            r#"
            image_dir = "data/frames"
            cats = ["ball"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.annot_dir(), Path::new("data/frames"));
    }

    #[test]
    fn test_missing_cfg_file_errs() {
        assert!(read_cfg(Path::new("does/not/exist.toml")).is_err());
    }
}
