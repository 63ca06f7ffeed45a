//! Repository access built on top of libgit2.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use git2::{ErrorClass, ErrorCode, Repository as GitRepository};

use crate::{
    api::{RemoteDescriptor, WorkspaceCandidate},
    Error, Result,
};

/// Lightweight handle to the repository a shared file lives in.
pub struct Repository {
    inner: GitRepository,
    root: PathBuf,
}

impl Repository {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be canonicalized, does not resolve
    /// to a git repository, or the repository is bare.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let original = path.as_ref();
        let canonical = std::fs::canonicalize(original).map_err(|source| Error::Io {
            path: display_path(original),
            source,
        })?;

        let repo = match GitRepository::discover(&canonical) {
            Ok(repo) => repo,
            Err(err)
                if err.class() == ErrorClass::Repository && err.code() == ErrorCode::NotFound =>
            {
                return Err(Error::NotARepository {
                    path: display_path(&canonical),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
            path: display_path(&canonical),
        })?;
        let root = std::fs::canonicalize(workdir).map_err(|source| Error::Io {
            path: display_path(workdir),
            source,
        })?;

        Ok(Self { inner: repo, root })
    }

    /// Returns the absolute path to the working tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remotes with a fetch URL, in the order git reports them.
    ///
    /// # Errors
    ///
    /// Propagates libgit2 failures while reading the remote configuration.
    pub fn remotes(&self) -> Result<Vec<RemoteDescriptor>> {
        let names = self.inner.remotes()?;
        let mut remotes = Vec::with_capacity(names.len());

        for name in names.iter().flatten() {
            let remote = self.inner.find_remote(name)?;
            match remote.url() {
                Some(url) => remotes.push(RemoteDescriptor::new(name, url)),
                None => log::debug!(
                    "remote {name} in {} has no UTF-8 fetch URL; skipping",
                    self.root.display()
                ),
            }
        }

        Ok(remotes)
    }

    /// Name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoBranch`] for a detached or unborn HEAD and
    /// propagates other libgit2 failures.
    pub fn current_branch(&self) -> Result<String> {
        let no_branch = || Error::NoBranch {
            path: display_path(&self.root),
        };

        let head = match self.inner.head() {
            Ok(head) => head,
            Err(err)
                if matches!(
                    (err.class(), err.code()),
                    (
                        ErrorClass::Reference,
                        ErrorCode::NotFound | ErrorCode::UnbornBranch
                    )
                ) =>
            {
                return Err(no_branch())
            }
            Err(err) => return Err(Error::from(err)),
        };

        if !head.is_branch() {
            return Err(no_branch());
        }
        head.shorthand().map(str::to_owned).ok_or_else(no_branch)
    }

    /// Path of `file` relative to the working tree root, `/`-separated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be canonicalized and
    /// [`Error::OutsideRepository`] when it is not under the root.
    pub fn relative_path(&self, file: impl AsRef<Path>) -> Result<String> {
        let file = file.as_ref();
        let absolute = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root.join(file)
        };
        let canonical = std::fs::canonicalize(&absolute).map_err(|source| Error::Io {
            path: display_path(&absolute),
            source,
        })?;

        let outside = || Error::OutsideRepository {
            path: display_path(&canonical),
            root: display_path(&self.root),
        };
        let relative = canonical.strip_prefix(&self.root).map_err(|_| outside())?;

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str().ok_or_else(outside)?),
                _ => return Err(outside()),
            }
        }
        if parts.is_empty() {
            return Err(outside());
        }
        Ok(parts.join("/"))
    }
}

/// A workspace folder together with the working tree it belongs to.
///
/// The folder may sit anywhere inside the working tree, so paths from links
/// are resolved against `root` rather than `folder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    /// Folder as the editor reported it.
    pub folder: PathBuf,
    /// Canonical working tree root containing `folder`.
    pub root: PathBuf,
}

impl AsRef<Path> for Checkout {
    fn as_ref(&self) -> &Path {
        &self.root
    }
}

/// Build match candidates for workspace folders, preserving their order.
///
/// Folders that are not inside a git repository, or whose remotes cannot be
/// read, are skipped with a warning.
#[must_use]
pub fn discover_candidates<P: AsRef<Path>>(folders: &[P]) -> Vec<WorkspaceCandidate<Checkout>> {
    let mut candidates = Vec::with_capacity(folders.len());

    for folder in folders {
        let folder = folder.as_ref();
        let opened = Repository::open(folder)
            .and_then(|repo| Ok((repo.remotes()?, repo.root().to_path_buf())));
        match opened {
            Ok((remotes, root)) => {
                log::debug!(
                    "workspace {} (root {}) has {} remote(s)",
                    folder.display(),
                    root.display(),
                    remotes.len()
                );
                let checkout = Checkout {
                    folder: folder.to_path_buf(),
                    root,
                };
                candidates.push(WorkspaceCandidate::new(checkout, remotes));
            }
            Err(Error::NotARepository { .. }) => {
                log::debug!("skipping {}: not a git repository", folder.display());
            }
            Err(err) => log::warn!("skipping workspace {}: {err}", folder.display()),
        }
    }

    candidates
}

pub(crate) fn display_path(path: &Path) -> String {
    path.to_path_buf()
        .into_os_string()
        .to_string_lossy()
        .into_owned()
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remotes_keep_configured_urls() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        let git_repo = GitRepository::init(temp.path())?;
        git_repo.remote("origin", "git@github.com:acme/widget.git")?;

        let repo = Repository::open(temp.path())?;
        let remotes = repo.remotes()?;

        assert_eq!(
            remotes,
            [RemoteDescriptor::new("origin", "git@github.com:acme/widget.git")]
        );
        Ok(())
    }

    #[test]
    fn unborn_head_has_no_branch() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        GitRepository::init(temp.path())?;

        let repo = Repository::open(temp.path())?;
        assert!(matches!(repo.current_branch(), Err(Error::NoBranch { .. })));
        Ok(())
    }

    #[test]
    fn relative_path_uses_forward_slashes() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        GitRepository::init(temp.path())?;
        let nested = temp.path().join("src").join("bin");
        std::fs::create_dir_all(&nested).expect("create dirs");
        std::fs::write(nested.join("main.rs"), "fn main() {}\n").expect("write file");

        let repo = Repository::open(&nested)?;
        assert_eq!(repo.relative_path(nested.join("main.rs"))?, "src/bin/main.rs");
        assert_eq!(repo.relative_path("src/bin/main.rs")?, "src/bin/main.rs");
        Ok(())
    }

    #[test]
    fn files_outside_the_root_are_rejected() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        let repo_dir = temp.path().join("repo");
        std::fs::create_dir_all(&repo_dir).expect("create repo dir");
        GitRepository::init(&repo_dir)?;
        std::fs::write(temp.path().join("stray.txt"), "x\n").expect("write file");

        let repo = Repository::open(&repo_dir)?;
        assert!(matches!(
            repo.relative_path(temp.path().join("stray.txt")),
            Err(Error::OutsideRepository { .. })
        ));
        Ok(())
    }

    #[test]
    fn nested_workspace_folder_records_repository_root() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        let git_repo = GitRepository::init(temp.path())?;
        git_repo.remote("origin", "https://github.com/acme/monorepo.git")?;
        let package = temp.path().join("packages").join("app");
        std::fs::create_dir_all(&package).expect("create package dir");
        let plain = TempDir::new().expect("tempdir");

        let candidates = discover_candidates(&[package.as_path(), plain.path()]);

        assert_eq!(candidates.len(), 1);
        let checkout = &candidates[0].id;
        assert_eq!(checkout.folder, package);
        assert_eq!(
            checkout.root,
            std::fs::canonicalize(temp.path()).expect("canonical root")
        );
        assert_eq!(candidates[0].remotes[0].name, "origin");
        Ok(())
    }

    #[test]
    fn open_non_repository_returns_error() {
        let temp = TempDir::new().expect("tempdir");
        let err = Repository::open(temp.path());
        assert!(matches!(err, Err(Error::NotARepository { .. })));
    }
}
