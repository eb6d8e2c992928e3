//! Local git repository tag lookups.
//!
//! The email step only needs to know whether a preview tag exists for the
//! released version, so the repository interface is a single existence
//! query. The lookup runs against the repository checked out by CI, which
//! must be fetched with tags for the result to be meaningful.
use git2::ErrorCode;
use log::*;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::Result;

#[cfg_attr(test, automock)]
pub trait TagLookup {
    /// Whether a tag named `name` exists.
    fn tag_exists(&self, name: &str) -> Result<bool>;
}

/// Repository opened from the local filesystem.
pub struct LocalRepository {
    repo: git2::Repository,
}

impl LocalRepository {
    /// Open the repository containing `path`, searching parent directories
    /// the same way git does.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        debug!("opened repository at: {}", repo.path().display());
        Ok(Self { repo })
    }
}

impl TagLookup for LocalRepository {
    fn tag_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/tags/{name}");

        match self.repo.find_reference(&reference) {
            Ok(_) => Ok(true),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(false),
            Err(err) if err.code() == ErrorCode::InvalidSpec => {
                debug!("{reference} is not a valid reference name: {err}");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}
