use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Destination category for a relocated image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Kept,
    Discarded,
}

/// What to do when the destination directory already holds a file with the same base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// Pick the first free `<stem>_<n>.<ext>` name
    #[default]
    Rename,
    /// Replace the existing file
    Overwrite,
    /// Refuse the move and abort the session
    Fail,
}

#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("source path {0:?} has no file name")]
    NoFileName(PathBuf),

    #[error("destination {dest:?} already exists")]
    Collision { dest: PathBuf },

    #[error("could not move {src:?} to {dest:?}: {source}")]
    Move {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a single relocation attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    Moved { dest: PathBuf },
    SkippedMissing,
}

/// The two fixed destination directories
#[derive(Debug, Clone)]
pub struct Destinations {
    pub kept: PathBuf,
    pub discarded: PathBuf,
}

impl Destinations {
    pub fn new(kept: impl Into<PathBuf>, discarded: impl Into<PathBuf>) -> Self {
        Self {
            kept: kept.into(),
            discarded: discarded.into(),
        }
    }

    pub fn dir_for(&self, category: Category) -> &Path {
        match category {
            Category::Kept => &self.kept,
            Category::Discarded => &self.discarded,
        }
    }

    /// Create both directories if they don't exist yet. Safe to call repeatedly.
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [&self.kept, &self.discarded] {
            fs::create_dir_all(dir)?;
            debug!("Destination directory ready: {:?}", dir);
        }
        Ok(())
    }
}

/// Moves image files into the kept or discarded directory, preserving base names
#[derive(Debug, Clone)]
pub struct Relocator {
    destinations: Destinations,
    collision: CollisionPolicy,
}

impl Relocator {
    pub fn new(destinations: Destinations, collision: CollisionPolicy) -> Self {
        Self {
            destinations,
            collision,
        }
    }

    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    /// Move `src` into the directory for `category`.
    ///
    /// A source that no longer exists is logged and reported as
    /// [`Relocation::SkippedMissing`]. Exactly one attempt is made.
    pub fn relocate(&self, src: &Path, category: Category) -> Result<Relocation, RelocationError> {
        if !src.exists() {
            warn!("Source file not found, cannot move: {:?}", src);
            return Ok(Relocation::SkippedMissing);
        }

        let file_name = src
            .file_name()
            .ok_or_else(|| RelocationError::NoFileName(src.to_path_buf()))?;
        let dest_dir = self.destinations.dir_for(category);
        let dest = self.resolve_destination(dest_dir.join(file_name))?;

        if let Err(e) = move_file(src, &dest) {
            error!("Could not move {:?} to {:?}: {}", src, dest, e);
            return Err(RelocationError::Move {
                src: src.to_path_buf(),
                dest,
                source: e,
            });
        }

        info!(
            "'{}' --> '{}'",
            file_name.to_string_lossy(),
            dest_dir.display()
        );
        Ok(Relocation::Moved { dest })
    }

    fn resolve_destination(&self, dest: PathBuf) -> Result<PathBuf, RelocationError> {
        if !dest.exists() {
            return Ok(dest);
        }

        match self.collision {
            CollisionPolicy::Overwrite => {
                warn!("Overwriting existing file {:?}", dest);
                Ok(dest)
            }
            CollisionPolicy::Fail => {
                error!("Destination already exists: {:?}", dest);
                Err(RelocationError::Collision { dest })
            }
            CollisionPolicy::Rename => {
                let renamed = next_free_name(&dest);
                info!("{:?} already exists, using {:?}", dest, renamed);
                Ok(renamed)
            }
        }
    }
}

/// First `<stem>_<n>.<ext>` sibling of `taken` that does not exist
fn next_free_name(taken: &Path) -> PathBuf {
    let stem = taken
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = taken.extension().map(|e| e.to_string_lossy().into_owned());

    let mut n = 1usize;
    loop {
        let name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = taken.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Rename `src` to `dest`, falling back to copy + remove when the rename
/// fails (e.g. across filesystems).
fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(
                "Rename {:?} -> {:?} failed ({}), trying copy + remove",
                src, dest, rename_err
            );
            if !src.exists() {
                return Err(rename_err);
            }
            copy_then_remove(src, dest)
        }
    }
}

/// Copy `src` to `dest`, then remove `src`. If the source can't be removed
/// the copy is deleted again so the file only exists in one place.
fn copy_then_remove(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest)?;

    if let Err(e) = fs::remove_file(src) {
        warn!("Could not remove {:?} after copying, undoing copy: {}", src, e);
        if let Err(cleanup) = fs::remove_file(dest) {
            error!("Could not remove copied file {:?}: {}", dest, cleanup);
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup(policy: CollisionPolicy) -> (tempfile::TempDir, Relocator) {
        let root = tempdir().unwrap();
        let destinations =
            Destinations::new(root.path().join(".chosen"), root.path().join(".discarded"));
        destinations.ensure().unwrap();
        (root, Relocator::new(destinations, policy))
    }

    fn touch(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_relocate_moves_into_category_dir() {
        let (root, relocator) = setup(CollisionPolicy::Rename);
        let src = root.path().join("a.jpg");
        touch(&src, "a");

        let outcome = relocator.relocate(&src, Category::Kept).unwrap();

        let expected = root.path().join(".chosen").join("a.jpg");
        assert_eq!(outcome, Relocation::Moved { dest: expected.clone() });
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(expected).unwrap(), "a");
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let (root, relocator) = setup(CollisionPolicy::Rename);
        let src = root.path().join("gone.jpg");

        let outcome = relocator.relocate(&src, Category::Discarded).unwrap();

        assert_eq!(outcome, Relocation::SkippedMissing);
        assert_eq!(fs::read_dir(root.path().join(".discarded")).unwrap().count(), 0);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let (_root, relocator) = setup(CollisionPolicy::Rename);
        relocator.destinations().ensure().unwrap();
        relocator.destinations().ensure().unwrap();
        assert!(relocator.destinations().kept.is_dir());
        assert!(relocator.destinations().discarded.is_dir());
    }

    #[test]
    fn test_collision_rename_picks_free_name() {
        let (root, relocator) = setup(CollisionPolicy::Rename);
        touch(&root.path().join(".chosen").join("a.jpg"), "old");
        touch(&root.path().join(".chosen").join("a_1.jpg"), "old too");
        let src = root.path().join("a.jpg");
        touch(&src, "new");

        let outcome = relocator.relocate(&src, Category::Kept).unwrap();

        let expected = root.path().join(".chosen").join("a_2.jpg");
        assert_eq!(outcome, Relocation::Moved { dest: expected.clone() });
        assert_eq!(fs::read_to_string(expected).unwrap(), "new");
        assert_eq!(
            fs::read_to_string(root.path().join(".chosen").join("a.jpg")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_collision_overwrite_replaces_file() {
        let (root, relocator) = setup(CollisionPolicy::Overwrite);
        let existing = root.path().join(".discarded").join("a.jpg");
        touch(&existing, "old");
        let src = root.path().join("a.jpg");
        touch(&src, "new");

        relocator.relocate(&src, Category::Discarded).unwrap();

        assert_eq!(fs::read_to_string(existing).unwrap(), "new");
        assert!(!src.exists());
    }

    #[test]
    fn test_collision_fail_leaves_source_in_place() {
        let (root, relocator) = setup(CollisionPolicy::Fail);
        touch(&root.path().join(".chosen").join("a.jpg"), "old");
        let src = root.path().join("a.jpg");
        touch(&src, "new");

        let err = relocator.relocate(&src, Category::Kept).unwrap_err();

        assert!(matches!(err, RelocationError::Collision { .. }));
        assert!(src.exists());
    }

    #[test]
    fn test_move_into_missing_dir_fails() {
        let root = tempdir().unwrap();
        let relocator = Relocator::new(
            Destinations::new(root.path().join("nope"), root.path().join("nope2")),
            CollisionPolicy::Rename,
        );
        let src = root.path().join("a.jpg");
        touch(&src, "a");

        let err = relocator.relocate(&src, Category::Kept).unwrap_err();

        assert!(matches!(err, RelocationError::Move { .. }));
        assert!(src.exists());
    }

    #[test]
    fn test_copy_then_remove_moves_contents() {
        let root = tempdir().unwrap();
        let src = root.path().join("a.jpg");
        let dest = root.path().join("b.jpg");
        touch(&src, "pixels");

        copy_then_remove(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), "pixels");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_then_remove_undoes_copy_when_source_is_stuck() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempdir().unwrap();
        let locked = root.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let src = locked.join("a.jpg");
        let dest = root.path().join("a.jpg");
        touch(&src, "pixels");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits don't stop root, so there is nothing to check there
        if fs::write(locked.join("writable"), "").is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = copy_then_remove(&src, &dest);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_err());
        assert!(!dest.exists());
        assert_eq!(fs::read_to_string(src).unwrap(), "pixels");
    }

    #[test]
    fn test_next_free_name_without_extension() {
        let root = tempdir().unwrap();
        let taken = root.path().join("README");
        touch(&taken, "");
        assert_eq!(next_free_name(&taken), root.path().join("README_1"));
    }
}
