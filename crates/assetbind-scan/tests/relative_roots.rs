//! Discovery with roots given relative to the working directory.
//!
//! The working directory is process-wide, so every test here holds
//! `CWD_LOCK` while it is switched into a fixture.

use assetbind_scan::{IgnorePatterns, InputSpec, discover_inputs};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::TempDir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Switches into a directory and restores the previous one on drop.
struct InDir {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl InDir {
    fn enter(dir: &Path) -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for InDir {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

fn create_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("static/img")).unwrap();
    fs::write(root.join("a.txt"), "").unwrap();
    fs::write(root.join("static/b.txt"), "").unwrap();
    fs::write(root.join("static/skip.txt"), "").unwrap();
    fs::write(root.join("static/img/c.png"), "").unwrap();

    temp
}

/// Discover `inputs` and return `(name, func)` pairs in order.
fn run(inputs: &[InputSpec], prefix: &str, ignore: &[&str]) -> Vec<(String, String)> {
    let ignore = IgnorePatterns::compile(ignore).unwrap();
    let catalog = discover_inputs(inputs, prefix, &ignore).unwrap();
    catalog
        .iter()
        .map(|a| (a.name.to_string(), a.func.to_string()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(n, f)| (n.to_string(), f.to_string()))
        .collect()
}

#[test]
fn test_current_dir_root_without_prefix() {
    let temp = create_site();
    let _cwd = InDir::enter(temp.path());

    assert_eq!(
        run(&[InputSpec::new(".", false)], "", &[]),
        pairs(&[("a.txt", "aTxt")])
    );
    assert_eq!(
        run(&[InputSpec::parse("...")], "", &[]),
        pairs(&[
            ("a.txt", "aTxt"),
            ("static/b.txt", "staticBTxt"),
            ("static/img/c.png", "staticImgCPng"),
            ("static/skip.txt", "staticSkipTxt"),
        ])
    );
}

#[test]
fn test_relative_roots_are_cleaned() {
    let temp = create_site();
    let _cwd = InDir::enter(temp.path());

    let expected = pairs(&[
        ("static/b.txt", "staticBTxt"),
        ("static/skip.txt", "staticSkipTxt"),
    ]);
    for root in ["./static", "static/", "static/../static", "./static/./"] {
        assert_eq!(
            run(&[InputSpec::new(root, false)], "", &[]),
            expected,
            "root {root:?}"
        );
    }
}

#[test]
fn test_relative_file_root() {
    let temp = create_site();
    let _cwd = InDir::enter(temp.path());

    assert_eq!(
        run(&[InputSpec::new("./a.txt", false)], "", &[]),
        pairs(&[("a.txt", "aTxt")])
    );
    assert_eq!(
        run(&[InputSpec::new("static/img/../b.txt", false)], "", &[]),
        pairs(&[("static/b.txt", "staticBTxt")])
    );
}

#[test]
fn test_ignore_anchored_on_cleaned_path() {
    let temp = create_site();
    let _cwd = InDir::enter(temp.path());

    assert_eq!(
        run(&[InputSpec::new("./static", true)], "", &["^static/skip"]),
        pairs(&[
            ("static/b.txt", "staticBTxt"),
            ("static/img/c.png", "staticImgCPng"),
        ])
    );
    assert_eq!(
        run(&[InputSpec::parse("...")], "", &["^static/img$"]),
        pairs(&[
            ("a.txt", "aTxt"),
            ("static/b.txt", "staticBTxt"),
            ("static/skip.txt", "staticSkipTxt"),
        ])
    );
    assert_eq!(
        run(&[InputSpec::parse("static/../static/...")], "", &["^static/img$"]),
        pairs(&[
            ("static/b.txt", "staticBTxt"),
            ("static/skip.txt", "staticSkipTxt"),
        ])
    );
}

#[test]
fn test_relative_prefix_is_stripped() {
    let temp = create_site();
    let _cwd = InDir::enter(temp.path());

    let expected = pairs(&[
        ("b.txt", "bTxt"),
        ("img/c.png", "imgCPng"),
        ("skip.txt", "skipTxt"),
    ]);
    for root in ["static", "./static/", "static/../static"] {
        assert_eq!(
            run(&[InputSpec::new(root, true)], "static", &[]),
            expected,
            "root {root:?}"
        );
    }
}

#[test]
fn test_relative_prefix_mismatch_falls_back_to_cleaned_root() {
    let temp = create_site();
    let _cwd = InDir::enter(temp.path());

    assert_eq!(
        run(&[InputSpec::new("./static", true)], "elsewhere", &[r"skip\.txt$"]),
        pairs(&[
            ("static/b.txt", "staticBTxt"),
            ("static/img/c.png", "staticImgCPng"),
        ])
    );

    // `a.txt` is outside the prefix; everything under `static` is inside it.
    assert_eq!(
        run(&[InputSpec::new(".", true)], "static", &[]),
        pairs(&[
            ("a.txt", "aTxt"),
            ("b.txt", "bTxt"),
            ("img/c.png", "imgCPng"),
            ("skip.txt", "skipTxt"),
        ])
    );
}
