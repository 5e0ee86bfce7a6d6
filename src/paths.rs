//! Location of the packaged Hunspell dictionaries.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Dictionary directory relative to the install root.
pub const DICTIONARY_SUBDIR: &str = "vendor/hunspell_dictionaries";

const ARCHIVE_SUFFIX: &str = ".asar";
const UNPACKED_SUFFIX: &str = ".asar.unpacked";

/// Resolve the packaged dictionary directory.
///
/// The install root is the parent of the directory holding the running
/// executable. When the executable cannot be located the relative
/// [`DICTIONARY_SUBDIR`] is used as is.
pub fn dictionary_path() -> PathBuf {
    let root = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("..")));

    match root {
        Some(root) => resolve_dictionary_path(&root),
        None => PathBuf::from(DICTIONARY_SUBDIR),
    }
}

/// Resolve the dictionary directory below `root`, preferring the unpacked
/// sibling of an `.asar` archive when it exists on disk.
pub fn resolve_dictionary_path(root: &Path) -> PathBuf {
    let dict = normalize(&root.join(DICTIONARY_SUBDIR));

    match unpacked_path(&dict) {
        Some(unpacked) if unpacked.exists() => {
            log::trace!("using unpacked dictionaries at {}", unpacked.display());
            unpacked
        }
        _ => dict,
    }
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// A `..` cancels the preceding normal component. Leading `..` components
/// of a relative path are kept, and `..` directly below the root is dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component.as_os_str()),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Rewrite the first `*.asar` directory component to `*.asar.unpacked`.
///
/// Returns `None` when the path is not inside an archive. The final
/// component is never rewritten since only directories nested inside an
/// archive need it.
fn unpacked_path(path: &Path) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();
    let (last, parents) = components.split_last()?;

    let position = parents.iter().position(|c| {
        matches!(c, Component::Normal(name) if name.to_string_lossy().ends_with(ARCHIVE_SUFFIX))
    })?;

    let mut rewritten = PathBuf::new();
    for (i, component) in parents.iter().enumerate() {
        if i == position {
            let name = component.as_os_str().to_string_lossy();
            let stem = name.strip_suffix(ARCHIVE_SUFFIX).unwrap_or(&name);
            rewritten.push(OsString::from(format!("{stem}{UNPACKED_SUFFIX}")));
        } else {
            rewritten.push(component.as_os_str());
        }
    }
    rewritten.push(last.as_os_str());

    Some(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_plain_layout() {
        let dir = tempdir().unwrap();
        let resolved = resolve_dictionary_path(dir.path());
        assert_eq!(resolved, dir.path().join(DICTIONARY_SUBDIR));
    }

    #[test]
    fn test_unpacked_path_rewrite() {
        let path = Path::new("/opt/app/resources/app.asar/vendor/hunspell_dictionaries");
        assert_eq!(
            unpacked_path(path),
            Some(PathBuf::from(
                "/opt/app/resources/app.asar.unpacked/vendor/hunspell_dictionaries"
            ))
        );

        assert_eq!(unpacked_path(Path::new("/opt/app/vendor/dicts")), None);
    }

    #[test]
    fn test_only_first_archive_is_rewritten() {
        let path = Path::new("/a.asar/b.asar/dicts");
        assert_eq!(
            unpacked_path(path),
            Some(PathBuf::from("/a.asar.unpacked/b.asar/dicts"))
        );
    }

    #[test]
    fn test_archive_falls_back_when_unpacked_missing() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("app.asar");
        fs::create_dir_all(&root).unwrap();

        let resolved = resolve_dictionary_path(&root);
        assert_eq!(resolved, root.join(DICTIONARY_SUBDIR));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/opt/app.asar/bin/../vendor/./dicts")),
            PathBuf::from("/opt/app.asar/vendor/dicts")
        );
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/../../b")), PathBuf::from("../../b"));
    }

    #[test]
    fn test_unpacked_sibling_found_through_parent_dir() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("app.asar").join("bin");
        let unpacked = dir.path().join("app.asar.unpacked").join(DICTIONARY_SUBDIR);
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(&unpacked).unwrap();

        let resolved = resolve_dictionary_path(&bin.join(".."));
        assert_eq!(resolved, unpacked);
    }

    #[test]
    fn test_archive_prefers_unpacked_sibling() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("app.asar");
        let unpacked = dir.path().join("app.asar.unpacked").join(DICTIONARY_SUBDIR);
        fs::create_dir_all(&unpacked).unwrap();

        let resolved = resolve_dictionary_path(&root);
        assert_eq!(resolved, unpacked);
    }
}
