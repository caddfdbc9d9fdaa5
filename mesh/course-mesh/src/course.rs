//! Course folder scanning and batch import.
//!
//! A course export is a folder of OBJ files named `<surface>_<part>.obj`,
//! e.g. `fairway_01.obj`, `green_07.obj`, `sand_12a.obj`. Files sharing a
//! prefix form one group, and the prefix decides the surface material.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::ImportParams;
use crate::pipeline::{ImportError, ImportResult, ImportedMesh, import_obj};

/// Surface material class of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SurfaceKind {
    /// Fairway grass.
    Fairway,
    /// Putting green.
    Green,
    /// Rough.
    Rough,
    /// First cut between fairway and rough.
    FirstCut,
    /// Fringe around a green.
    Fringe,
    /// Tee box.
    Tee,
    /// Bunker.
    Sand,
    /// Water.
    River,
    /// No known keyword in the prefix.
    Other,
}

impl SurfaceKind {
    /// Keywords checked in order; the first one contained in a prefix wins.
    const KEYWORDS: [(&'static str, Self); 8] = [
        ("fairway", Self::Fairway),
        ("green", Self::Green),
        ("rough", Self::Rough),
        ("first", Self::FirstCut),
        ("fringe", Self::Fringe),
        ("tee", Self::Tee),
        ("sand", Self::Sand),
        ("river", Self::River),
    ];

    /// Classify a lower-cased group prefix.
    ///
    /// ```
    /// use course_mesh::SurfaceKind;
    ///
    /// assert_eq!(SurfaceKind::from_prefix("fairway"), SurfaceKind::Fairway);
    /// assert_eq!(SurfaceKind::from_prefix("firstcut"), SurfaceKind::FirstCut);
    /// assert_eq!(SurfaceKind::from_prefix("cartpath"), SurfaceKind::Other);
    /// ```
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| prefix.contains(keyword))
            .map_or(Self::Other, |&(_, kind)| kind)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fairway => "fairway",
            Self::Green => "green",
            Self::Rough => "rough",
            Self::FirstCut => "first-cut",
            Self::Fringe => "fringe",
            Self::Tee => "tee",
            Self::Sand => "sand",
            Self::River => "river",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Group prefix of a file: the lower-cased stem up to the first `_`, or the
/// whole stem if it has none.
#[must_use]
pub fn group_prefix(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?.to_lowercase();
    let prefix = match stem.split_once('_') {
        Some((head, _)) => head.to_string(),
        None => stem,
    };
    Some(prefix)
}

/// OBJ files sharing a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportGroup {
    /// Lower-cased file-name prefix.
    pub prefix: String,
    /// Surface class derived from the prefix.
    pub surface: SurfaceKind,
    /// Files in the group, sorted.
    pub paths: Vec<PathBuf>,
}

/// List the `*.obj` files in `dir` (not recursive) and group them by prefix.
///
/// Groups are sorted by prefix and paths within a group are sorted, so the
/// result does not depend on directory listing order. The extension match is
/// case-insensitive.
///
/// # Errors
///
/// Returns [`ImportError::NotADirectory`] if `dir` is not a directory and
/// [`ImportError::Io`] if it cannot be listed.
pub fn scan_course_folder<P: AsRef<Path>>(dir: P) -> ImportResult<Vec<ImportGroup>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ImportError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_obj = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("obj"));
        if !is_obj || !path.is_file() {
            continue;
        }
        let Some(prefix) = group_prefix(&path) else {
            warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        groups.entry(prefix).or_default().push(path);
    }

    let groups: Vec<ImportGroup> = groups
        .into_iter()
        .map(|(prefix, mut paths)| {
            paths.sort();
            let surface = SurfaceKind::from_prefix(&prefix);
            debug!(%prefix, %surface, files = paths.len(), "Found group");
            ImportGroup {
                prefix,
                surface,
                paths,
            }
        })
        .collect();

    info!(dir = %dir.display(), groups = groups.len(), "Scanned course folder");
    Ok(groups)
}

/// Meshes imported from one file.
#[derive(Debug, Clone)]
pub struct ImportedFile {
    /// Source file.
    pub path: PathBuf,
    /// One entry per non-empty segment.
    pub meshes: Vec<ImportedMesh>,
}

/// Every file of one group, imported.
#[derive(Debug, Clone)]
pub struct ImportedGroup {
    /// Lower-cased file-name prefix.
    pub prefix: String,
    /// Surface class derived from the prefix.
    pub surface: SurfaceKind,
    /// Files in path order.
    pub files: Vec<ImportedFile>,
}

impl ImportedGroup {
    /// Total meshes across all files.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.files.iter().map(|f| f.meshes.len()).sum()
    }
}

/// Scan `dir` and import every file of every group.
///
/// Files are imported one after another; each owns its own parse state.
///
/// # Errors
///
/// Stops at the first failure and returns it. See [`scan_course_folder`] and
/// [`import_obj`].
pub fn import_course<P: AsRef<Path>>(
    dir: P,
    params: &ImportParams,
) -> ImportResult<Vec<ImportedGroup>> {
    params.blend_params().validate()?;
    scan_course_folder(dir)?
        .into_iter()
        .map(|group| {
            let files = group
                .paths
                .into_iter()
                .map(|path| {
                    let meshes = import_obj(&path, params)?;
                    Ok(ImportedFile { path, meshes })
                })
                .collect::<ImportResult<Vec<_>>>()?;
            Ok(ImportedGroup {
                prefix: group.prefix,
                surface: group.surface,
                files,
            })
        })
        .collect()
}
