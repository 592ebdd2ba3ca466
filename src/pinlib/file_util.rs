use crate::{pinerr, result::PinResult};
use lazy_static::lazy_static;
use std::{
    ffi::OsStr,
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{error, info};

lazy_static! {
    pub static ref DEFAULT_HOMEDIR: PathBuf = match dirs::home_dir() {
        Some(p) => p.join(".pinpoint"),
        _ => std::env::temp_dir().join("pinpoint"),
    };
}

pub fn read_to_string<P>(p: P) -> PinResult<String>
where
    P: AsRef<Path> + Debug,
{
    fs::read_to_string(&p).map_err(|e| pinerr!("could not read {:?} due to {:?}", p, e))
}

pub fn write<P, C>(path: P, contents: C) -> PinResult<()>
where
    P: AsRef<Path> + Debug,
    C: AsRef<[u8]>,
{
    fs::write(&path, contents).map_err(|e| pinerr!("could not write to {:?} since {:?}", path, e))
}

pub fn osstr_to_str(p: Option<&OsStr>) -> io::Result<&str> {
    p.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{p:?} not found")))?
        .to_str()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{p:?} not convertible to unicode"),
            )
        })
}

pub fn to_stem_str(p: &Path) -> PinResult<&str> {
    let stem = p.file_stem();
    if stem.is_none() {
        Ok("")
    } else {
        osstr_to_str(stem)
            .map_err(|e| pinerr!("to_stem_str could not transform '{:?}' due to '{:?}'", p, e))
    }
}

/// Non-recursive listing of all files in `folder` carrying `extension`.
pub fn files_in_folder<'a>(
    folder: &Path,
    extension: &'a str,
) -> PinResult<impl Iterator<Item = PathBuf> + 'a> {
    Ok(fs::read_dir(folder)
        .map_err(|e| pinerr!("could not open folder {:?} due to {}", folder, e))?
        .flatten()
        .map(|de| de.path())
        .filter(move |p| p.is_file() && p.extension() == Some(OsStr::new(extension))))
}

pub struct Defer<F: FnMut()> {
    pub func: F,
}
impl<F: FnMut()> Drop for Defer<F> {
    fn drop(&mut self) {
        (self.func)();
    }
}
#[macro_export]
macro_rules! defer {
    ($f:expr) => {
        let _dfr = $crate::file_util::Defer { func: $f };
    };
}
pub fn checked_remove<'a, P: AsRef<Path> + Debug>(
    path: &'a P,
    func: fn(p: &'a P) -> io::Result<()>,
) {
    match func(path) {
        Ok(_) => info!("removed {path:?}"),
        Err(e) => error!("could not remove {path:?} due to {e:?}"),
    }
}
#[macro_export]
macro_rules! defer_folder_removal {
    ($path:expr) => {
        let func = || $crate::file_util::checked_remove($path, std::fs::remove_dir_all);
        $crate::defer!(func);
    };
}
#[macro_export]
macro_rules! defer_file_removal {
    ($path:expr) => {
        let func = || $crate::file_util::checked_remove($path, std::fs::remove_file);
        $crate::defer!(func);
    };
}

#[test]
fn test_stem() {
    assert_eq!(to_stem_str(Path::new("frame_00042.jpg")).unwrap(), "frame_00042");
    assert_eq!(to_stem_str(Path::new("a/b/frame.json")).unwrap(), "frame");
    assert_eq!(to_stem_str(Path::new("")).unwrap(), "");
}

#[test]
fn test_files_in_folder() {
    let tmp = std::env::temp_dir().join("pinpoint-test-files-in-folder");
    fs::create_dir_all(&tmp).unwrap();
    defer_folder_removal!(&tmp);
    write(tmp.join("x.json"), "{}").unwrap();
    write(tmp.join("y.txt"), "nope").unwrap();
    let found = files_in_folder(&tmp, "json").unwrap().collect::<Vec<_>>();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].file_name().unwrap(), OsStr::new("x.json"));
}
