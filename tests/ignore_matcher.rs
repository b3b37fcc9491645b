use std::path::Path;

use reloadwatch::watch::IgnoreMatcher;

fn matcher(patterns: &[&str]) -> IgnoreMatcher {
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
    IgnoreMatcher::new("/proj", &patterns)
}

#[test]
fn directory_pattern_covers_everything_below_it() {
    let m = matcher(&["/proj/node_modules", "/proj/build"]);

    assert!(m.is_ignored(Path::new("/proj/node_modules")));
    assert!(m.is_ignored(Path::new("/proj/node_modules/x.js")));
    assert!(m.is_ignored(Path::new("/proj/build/nested/y.js")));
    assert!(!m.is_ignored(Path::new("/proj/src/z.js")));
    assert!(!m.is_ignored(Path::new("/proj/buildscripts/a.sh")));
}

#[test]
fn dot_segments_are_always_ignored() {
    let m = matcher(&[]);

    assert!(m.is_ignored(Path::new("/proj/.git/HEAD")));
    assert!(m.is_ignored(Path::new("/proj/src/.hidden.js")));
    assert!(m.is_ignored(Path::new("/proj/.cache")));
    assert!(!m.is_ignored(Path::new("/proj/src/visible.js")));
}

#[test]
fn dot_directories_above_the_base_do_not_count() {
    let m = IgnoreMatcher::new("/home/dev/.work/proj", &[]);

    assert!(!m.is_ignored(Path::new("/home/dev/.work/proj/src/a.js")));
    assert!(m.is_ignored(Path::new("/home/dev/.work/proj/.env")));
}

#[test]
fn single_star_does_not_cross_directories() {
    let m = matcher(&["/proj/*.log"]);

    assert!(m.is_ignored(Path::new("/proj/debug.log")));
    assert!(!m.is_ignored(Path::new("/proj/logs/debug.log")));
}

#[test]
fn double_star_default_patterns() {
    let m = matcher(&["/proj/node_modules/**", "/proj/bower_components/**"]);

    assert!(m.is_ignored(Path::new("/proj/node_modules/pkg/index.js")));
    assert!(m.is_ignored(Path::new("/proj/bower_components/x/y/z.html")));
    assert!(!m.is_ignored(Path::new("/proj/src/index.js")));
    assert_eq!(m.pattern_count(), 2);
}

#[test]
fn double_star_pattern_covers_the_directory_itself() {
    let m = matcher(&["/proj/node_modules/**", "/proj/bower_components/**"]);

    assert!(m.is_ignored(Path::new("/proj/node_modules")));
    assert!(m.is_ignored(Path::new("/proj/bower_components")));
    assert!(m.is_ignored(Path::new("node_modules")));
    assert!(!m.is_ignored(Path::new("/proj/node_modules_old")));
    assert!(!m.is_ignored(Path::new("/proj")));
}

#[test]
fn matching_is_case_sensitive() {
    let m = matcher(&["/proj/build"]);

    assert!(!m.is_ignored(Path::new("/proj/Build/y.js")));
}

#[test]
fn relative_paths_are_taken_from_the_base_dir() {
    let m = matcher(&["/proj/node_modules"]);

    assert!(m.is_ignored(Path::new("node_modules/x.js")));
    assert!(!m.is_ignored(Path::new("src/x.js")));
}

#[test]
fn invalid_patterns_are_skipped() {
    let m = matcher(&["/proj/[", "/proj/build"]);

    assert_eq!(m.pattern_count(), 1);
    assert!(m.is_ignored(Path::new("/proj/build/y.js")));
    assert!(!m.is_ignored(Path::new("/proj/src/y.js")));
}
