//! Preparation of the directory that receives the working copy.

use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::error::LocalError;

const GIT_DIR: &str = ".git";

/// What the workflow knows about the target directory.
///
/// Only directories in the [`DirectoryState::Created`] state are removed when
/// a later step fails; pre-existing directories are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryState {
    /// The directory has not been touched yet.
    #[default]
    Unknown,
    /// This run created the directory.
    Created,
    /// The directory was already present (and empty) before this run.
    Existed,
}

impl DirectoryState {
    /// Whether compensation should remove the directory.
    #[must_use]
    pub const fn was_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Outcome of a side-effect-free inspection of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// Nothing exists at the target; it will be created.
    Absent,
    /// An empty directory exists at the target; it will be reused.
    EmptyDirectory,
}

fn io_error(path: &Utf8Path, error: &io::Error) -> LocalError {
    LocalError::Path {
        path: path.to_string(),
        message: error.to_string(),
    }
}

/// Opens the parent of `path` and returns it with the final segment.
fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), LocalError> {
    let (parent, leaf) = path
        .parent()
        .zip(path.file_name())
        .ok_or_else(|| LocalError::MissingParent {
            path: path.to_string(),
        })?;

    match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => Ok((dir, leaf)),
        Err(error)
            if matches!(
                error.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            Err(LocalError::MissingParent {
                path: parent.to_string(),
            })
        }
        Err(error) => Err(io_error(parent, &error)),
    }
}

fn inspect_leaf(parent: &Dir, leaf: &str, path: &Utf8Path) -> Result<TargetStatus, LocalError> {
    let metadata = match parent.metadata(leaf) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(TargetStatus::Absent),
        Err(error) => return Err(io_error(path, &error)),
    };

    if !metadata.is_dir() {
        return Err(LocalError::NotADirectory {
            path: path.to_string(),
        });
    }

    let target = parent.open_dir(leaf).map_err(|error| io_error(path, &error))?;
    if target.exists(GIT_DIR) {
        return Err(LocalError::AlreadyRepository {
            path: path.to_string(),
        });
    }

    let mut entries = target.entries().map_err(|error| io_error(path, &error))?;
    if entries.next().is_some() {
        return Err(LocalError::NotEmpty {
            path: path.to_string(),
        });
    }

    Ok(TargetStatus::EmptyDirectory)
}

/// Checks that `path` can receive a working copy without touching it.
///
/// # Errors
///
/// Returns [`LocalError::MissingParent`] when the parent is missing,
/// [`LocalError::NotADirectory`], [`LocalError::AlreadyRepository`] or
/// [`LocalError::NotEmpty`] when the target cannot be reused, and
/// [`LocalError::Path`] for other filesystem failures.
pub fn inspect_target(path: &Utf8Path) -> Result<TargetStatus, LocalError> {
    let (parent, leaf) = open_parent(path)?;
    inspect_leaf(&parent, leaf, path)
}

/// Ensures `path` exists as an empty directory, creating only the final
/// segment, and reports whether this call created it.
///
/// # Errors
///
/// Returns the same errors as [`inspect_target`], plus [`LocalError::Path`]
/// when the directory cannot be created.
pub fn prepare_directory(path: &Utf8Path) -> Result<DirectoryState, LocalError> {
    let (parent, leaf) = open_parent(path)?;
    match inspect_leaf(&parent, leaf, path)? {
        TargetStatus::Absent => {
            parent
                .create_dir(leaf)
                .map_err(|error| io_error(path, &error))?;
            Ok(DirectoryState::Created)
        }
        TargetStatus::EmptyDirectory => Ok(DirectoryState::Existed),
    }
}

/// Removes `path` and everything below it.
///
/// A target that is already gone counts as removed: Git may clean up a
/// directory itself after a failed clone.
///
/// # Errors
///
/// Returns [`LocalError::Remove`] when the directory cannot be removed or
/// its parent cannot be opened.
pub fn remove_directory(path: &Utf8Path) -> Result<(), LocalError> {
    let removal_error = |message: String| LocalError::Remove {
        path: path.to_string(),
        message,
    };
    let (parent, leaf) = open_parent(path).map_err(|error| removal_error(error.to_string()))?;
    match parent.remove_dir_all(leaf) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(removal_error(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use cap_std::ambient_authority;
    use cap_std::fs_utf8::Dir;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    struct Sandbox {
        _temp: TempDir,
        root: Utf8PathBuf,
        dir: Dir,
    }

    impl Sandbox {
        fn path(&self, relative: &str) -> Utf8PathBuf {
            self.root.join(relative)
        }
    }

    #[fixture]
    fn sandbox() -> Sandbox {
        let temp = TempDir::new().expect("should create temp directory");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_owned())
            .expect("temp path should be UTF-8");
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("should open sandbox");
        Sandbox {
            _temp: temp,
            root,
            dir,
        }
    }

    #[rstest]
    fn creates_missing_leaf(sandbox: Sandbox) {
        let target = sandbox.path("new-repo");

        let state = prepare_directory(&target).expect("preparation should succeed");

        assert_eq!(state, DirectoryState::Created, "state mismatch");
        assert!(sandbox.dir.is_dir("new-repo"), "directory should exist");
    }

    #[rstest]
    fn reuses_existing_empty_directory(sandbox: Sandbox) {
        sandbox.dir.create_dir("new-repo").expect("should create directory");
        let target = sandbox.path("new-repo");

        let state = prepare_directory(&target).expect("preparation should succeed");

        assert_eq!(state, DirectoryState::Existed, "state mismatch");
    }

    #[rstest]
    fn refuses_missing_parent(sandbox: Sandbox) {
        let target = sandbox.path("missing/new-repo");

        let result = prepare_directory(&target);

        assert_eq!(
            result,
            Err(LocalError::MissingParent {
                path: sandbox.path("missing").to_string()
            }),
            "expected MissingParent"
        );
        assert!(!sandbox.dir.exists("missing"), "parent must not be created");
    }

    #[rstest]
    fn refuses_file_target(sandbox: Sandbox) {
        sandbox.dir.write("new-repo", "x").expect("should write file");

        let result = prepare_directory(&sandbox.path("new-repo"));

        assert!(
            matches!(result, Err(LocalError::NotADirectory { .. })),
            "expected NotADirectory, got {result:?}"
        );
    }

    #[rstest]
    fn refuses_existing_repository(sandbox: Sandbox) {
        sandbox
            .dir
            .create_dir_all("new-repo/.git")
            .expect("should create .git");

        let result = prepare_directory(&sandbox.path("new-repo"));

        assert!(
            matches!(result, Err(LocalError::AlreadyRepository { .. })),
            "expected AlreadyRepository, got {result:?}"
        );
    }

    #[rstest]
    fn refuses_non_empty_directory(sandbox: Sandbox) {
        sandbox
            .dir
            .create_dir_all("new-repo/src")
            .expect("should create directory");

        let result = prepare_directory(&sandbox.path("new-repo"));

        assert!(
            matches!(result, Err(LocalError::NotEmpty { .. })),
            "expected NotEmpty, got {result:?}"
        );
    }

    #[rstest]
    fn inspection_has_no_side_effects(sandbox: Sandbox) {
        let status = inspect_target(&sandbox.path("new-repo")).expect("inspection should succeed");

        assert_eq!(status, TargetStatus::Absent, "status mismatch");
        assert!(!sandbox.dir.exists("new-repo"), "inspection must not create");
    }

    #[rstest]
    fn removes_created_directory(sandbox: Sandbox) {
        sandbox
            .dir
            .create_dir_all("new-repo/.git/objects")
            .expect("should create tree");

        remove_directory(&sandbox.path("new-repo")).expect("removal should succeed");

        assert!(!sandbox.dir.exists("new-repo"), "directory should be gone");
    }

    #[rstest]
    fn removing_vanished_directory_succeeds(sandbox: Sandbox) {
        let result = remove_directory(&sandbox.path("never-created"));

        assert_eq!(result, Ok(()), "a missing target counts as removed");
    }

    #[rstest]
    fn removal_failure_is_reported(sandbox: Sandbox) {
        let result = remove_directory(&sandbox.path("missing/never-created"));

        assert!(
            matches!(result, Err(LocalError::Remove { .. })),
            "expected Remove error, got {result:?}"
        );
    }

    #[rstest]
    fn root_has_no_parent() {
        let result = prepare_directory(Utf8Path::new("/"));

        assert!(
            matches!(result, Err(LocalError::MissingParent { .. })),
            "expected MissingParent, got {result:?}"
        );
    }
}
