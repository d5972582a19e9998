#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Throwaway git repositories for end-to-end scenarios, built with
//! `tempfile` + `git2`.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};
use tempfile::TempDir;

pub struct Fixture {
    dir: TempDir,
    repo: Repository,
}

impl Fixture {
    pub fn init() -> Self {
        let dir = TempDir::new().expect("create fixture tempdir");
        let repo = Repository::init(dir.path()).expect("init fixture repo");
        Self { dir, repo }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent dir");
        }
        fs::write(path, content).expect("write fixture file");
    }

    pub fn remove(&self, relative: &str) {
        let _ = fs::remove_file(self.dir.path().join(relative));
    }

    /// Stages every change in the working tree (adds, modifications, and
    /// deletions alike) and commits it, returning the new commit's oid.
    pub fn commit(&self, message: &str) -> Oid {
        let mut index = self.repo.index().expect("open fixture index");
        index.update_all(["*"].iter(), None).expect("stage deletions");
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None).expect("stage additions");
        index.write().expect("write fixture index");
        let tree_id = index.write_tree().expect("write fixture tree");
        let tree = self.repo.find_tree(tree_id).expect("find fixture tree");
        let sig = Signature::now("Fixture", "fixture@example.invalid").expect("fixture signature");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit fixture state")
    }
}
