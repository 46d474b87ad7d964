//! Edge case and error handling tests for treecopy


use harness::{TestDir, is_unreadable, run_treecopy};
use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::Path;

fn set_mode(path: &Path, mode: u32) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms).expect("Failed to set permissions");
}

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
fn test_symlink_to_file_is_listed() {
    let dir = TestDir::named("root");
    dir.add_file("target.rs", "");
    symlink(dir.path().join("target.rs"), dir.path().join("link.rs"))
        .expect("Failed to create symlink");

    let (stdout, _stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    assert_eq!(stdout, "root/\n├── link.rs\n└── target.rs\n");
}

#[test]
fn test_symlink_to_directory_is_descended() {
    let dir = TestDir::named("root");
    dir.add_file("realdir/file.rs", "");
    symlink(dir.path().join("realdir"), dir.path().join("linkdir"))
        .expect("Failed to create dir symlink");

    let (stdout, stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    assert_eq!(
        stdout,
        "root/\n├── linkdir/\n│   └── file.rs\n└── realdir/\n    └── file.rs\n"
    );
    assert!(stderr.is_empty(), "unexpected stderr: {}", stderr);
}

#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let dir = TestDir::named("root");
    dir.add_file("subdir/file.rs", "");
    symlink("..", dir.path().join("subdir").join("parent"))
        .expect("Failed to create parent symlink");

    let (stdout, stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success, "treecopy should not hang on parent symlink");
    assert_eq!(
        stdout,
        "root/\n└── subdir/\n    ├── file.rs\n    └── parent/\n"
    );
    assert!(stderr.contains("points back to"), "stderr: {}", stderr);
}

#[test]
fn test_broken_symlink() {
    let dir = TestDir::named("root");
    dir.add_file("real.rs", "");
    symlink("nonexistent.rs", dir.path().join("broken_link.rs"))
        .expect("Failed to create broken symlink");

    let (stdout, _stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success, "treecopy should handle broken symlinks");
    assert!(stdout.contains("broken_link.rs"));
    assert!(stdout.contains("real.rs"));
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[test]
fn test_unreadable_subdirectory() {
    let dir = TestDir::named("root");
    dir.add_file("readable/file.rs", "");
    dir.add_file("unreadable/hidden.rs", "");
    dir.add_file("zz.txt", "");

    let unreadable = dir.path().join("unreadable");
    set_mode(&unreadable, 0o000);
    let denied = is_unreadable(&unreadable);

    let (stdout, stderr, success) = run_treecopy(dir.path(), &[]);

    set_mode(&unreadable, 0o755);

    assert!(success, "an unreadable subdirectory must not fail the render");
    assert!(stdout.contains("readable/"), "{}", stdout);
    assert!(stdout.contains("file.rs"), "{}", stdout);
    assert!(stdout.contains("zz.txt"), "siblings after it still render: {}", stdout);

    if denied {
        assert_eq!(
            stdout,
            "root/\n├── readable/\n│   └── file.rs\n├── unreadable/\n└── zz.txt\n"
        );
        assert!(stderr.contains("warning"), "{}", stderr);
        assert!(stderr.contains("unreadable"), "{}", stderr);
    }
}

#[test]
fn test_unreadable_subdirectory_quiet() {
    let dir = TestDir::named("root");
    dir.add_dir("locked");
    let locked = dir.path().join("locked");
    set_mode(&locked, 0o000);

    let (stdout, stderr, success) = run_treecopy(dir.path(), &["--quiet"]);

    set_mode(&locked, 0o755);

    assert!(success);
    assert_eq!(stdout, "root/\n└── locked/\n");
    assert!(stderr.is_empty(), "{}", stderr);
}

#[test]
fn test_unreadable_root() {
    let dir = TestDir::named("root");
    dir.add_file("inner.txt", "");
    set_mode(dir.path(), 0o000);
    let denied = is_unreadable(dir.path());

    let (stdout, stderr, success) = run_treecopy(dir.path(), &[]);

    set_mode(dir.path(), 0o755);

    if denied {
        assert!(!success, "unreadable root should exit non-zero");
        assert!(stdout.is_empty(), "{}", stdout);
        assert!(stderr.contains("error"), "{}", stderr);
    } else {
        assert!(success);
        assert_eq!(stdout, "root/\n└── inner.txt\n");
    }
}

#[test]
fn test_unreadable_gitignore_degrades() {
    let dir = TestDir::named("root");
    let gitignore = dir.write_gitignore("*.log\n");
    dir.add_file("x.log", "");
    set_mode(&gitignore, 0o000);
    let denied = fs::read_to_string(&gitignore).is_err();

    let (stdout, stderr, success) = run_treecopy(dir.path(), &[]);

    set_mode(&gitignore, 0o644);

    assert!(success);
    if denied {
        assert!(stdout.contains("x.log"), "no gitignore filtering: {}", stdout);
        assert!(stderr.contains(".gitignore"), "{}", stderr);
    } else {
        assert!(!stdout.contains("x.log"), "{}", stdout);
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_invalid_gitignore_pattern_warns_once() {
    let dir = TestDir::named("root");
    dir.write_gitignore("*.log\n{a,b\n");
    dir.add_file("x.log", "");

    let (stdout, stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    assert!(stdout.contains("x.log"), "gitignore disabled entirely: {}", stdout);
    assert_eq!(stderr.matches("warning").count(), 1, "{}", stderr);
    assert!(stderr.contains("line 2"), "{}", stderr);
}

#[test]
fn test_invalid_ignore_flag_pattern_warns() {
    let dir = TestDir::named("root");
    dir.add_file("a[", "");
    dir.add_file("b", "");

    let (stdout, stderr, success) = run_treecopy(dir.path(), &["-I", "a["]);
    assert!(success);
    assert_eq!(stdout, "root/\n└── b\n");
    assert!(stderr.contains("invalid ignore pattern"), "{}", stderr);
}

// ============================================================================
// Special Filenames
// ============================================================================

#[test]
fn test_filename_with_spaces() {
    let dir = TestDir::named("root");
    dir.add_file("file with spaces.rs", "");
    dir.add_file("dir with spaces/nested.rs", "");

    let (stdout, _stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    assert_eq!(
        stdout,
        "root/\n├── dir with spaces/\n│   └── nested.rs\n└── file with spaces.rs\n"
    );
}

#[test]
fn test_filename_with_unicode() {
    let dir = TestDir::named("root");
    dir.add_file("日本語.rs", "");
    dir.add_file("émoji_🎉.rs", "");
    dir.add_file("ascii.rs", "");

    let (stdout, _stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    // UTF-8 byte order: ASCII < é (U+00E9) < 日 (U+65E5)
    assert_eq!(stdout, "root/\n├── ascii.rs\n├── émoji_🎉.rs\n└── 日本語.rs\n");
}

#[test]
fn test_deep_nesting_prefixes() {
    let dir = TestDir::named("root");
    dir.add_file("a/b/c/d.txt", "");
    dir.add_file("a/x.txt", "");
    dir.add_file("z.txt", "");

    let (stdout, _stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    let expected = "\
root/
├── a/
│   ├── b/
│   │   └── c/
│   │       └── d.txt
│   └── x.txt
└── z.txt
";
    assert_eq!(stdout, expected);
}

#[test]
fn test_gitignore_in_subdirectory_is_not_read() {
    let dir = TestDir::named("root");
    dir.add_file("sub/.gitignore", "*.txt\n");
    dir.add_file("sub/a.txt", "");

    let (stdout, _stderr, success) = run_treecopy(dir.path(), &[]);
    assert!(success);
    assert!(stdout.contains("a.txt"), "only the root .gitignore applies: {}", stdout);
}
