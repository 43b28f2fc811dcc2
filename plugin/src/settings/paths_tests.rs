//! Unit tests for path validation.

use super::*;
use crate::test_utils::MemoryFileSystem;
use rstest::rstest;
use std::io;

fn full_settings() -> PathSettings {
    PathSettings {
        cache_dir: "/cache".to_owned(),
        content_dir: "/content".to_owned(),
        config_dir: "/config".to_owned(),
        environment: "dev".to_owned(),
        config_file: "config.toml".to_owned(),
        layout_dir: "/layout".to_owned(),
        output_dir: "/build".to_owned(),
        source_dir: "/source".to_owned(),
    }
}

fn full_filesystem() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_dir("/cache")
        .with_dir("/content")
        .with_file("/config/config.toml")
        .with_dir("/layout")
        .with_dir("/source")
}

#[test]
fn empty_settings_are_valid_on_an_empty_filesystem() {
    let fs = MemoryFileSystem::new();
    validate_paths(&fs, &PathSettings::default()).expect("empty settings are valid");
}

#[test]
fn existing_paths_are_valid() {
    validate_paths(&full_filesystem(), &full_settings()).expect("all paths exist");
}

#[test]
fn output_directory_and_environment_are_not_checked() {
    let settings = PathSettings {
        output_dir: "/does/not/exist".to_owned(),
        environment: "production".to_owned(),
        ..PathSettings::default()
    };
    validate_paths(&MemoryFileSystem::new(), &settings).expect("output is created by the engine");
}

#[rstest]
#[case::cache("/cache", PathKind::CacheDirectory)]
#[case::config_dir("/config", PathKind::ConfigDirectory)]
#[case::content("/content", PathKind::ContentDirectory)]
#[case::layout("/layout", PathKind::LayoutDirectory)]
#[case::source("/source", PathKind::SourceDirectory)]
fn single_missing_directory_is_reported(#[case] missing: &str, #[case] expected: PathKind) {
    let fs = MemoryFileSystem::new();
    for dir in ["/cache", "/content", "/config", "/layout", "/source"] {
        if dir != missing {
            fs.add_dir(dir);
        }
    }
    if missing != "/config" {
        fs.add_file("/config/config.toml");
    }

    let err = validate_paths(&fs, &full_settings()).expect_err("missing path should fail");
    match err {
        PathError::NotFound { which, path } => {
            assert_eq!(which, expected);
            assert_eq!(path, missing);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_config_file_is_reported_with_joined_path() {
    let fs = MemoryFileSystem::new().with_dir("/config");
    let settings = PathSettings {
        config_dir: "/config".to_owned(),
        config_file: "config.toml".to_owned(),
        ..PathSettings::default()
    };

    let err = validate_paths(&fs, &settings).expect_err("missing file should fail");
    assert_eq!(err.to_string(), "no config found @ /config/config.toml");
}

#[test]
fn config_file_without_directory_fails_even_if_file_exists() {
    let fs = MemoryFileSystem::new()
        .with_file("config.toml")
        .with_file("/config/config.toml");
    let settings = PathSettings {
        config_file: "config.toml".to_owned(),
        ..PathSettings::default()
    };

    let err = validate_paths(&fs, &settings).expect_err("config directory is required");
    assert!(matches!(err, PathError::MissingConfigDirectory));
}

#[test]
fn every_comma_separated_config_file_is_checked() {
    let fs = MemoryFileSystem::new().with_file("/config/config.toml");
    let settings = PathSettings {
        config_dir: "/config".to_owned(),
        config_file: "config.toml,params.toml".to_owned(),
        ..PathSettings::default()
    };

    let err = validate_paths(&fs, &settings).expect_err("second file is missing");
    assert!(matches!(
        err,
        PathError::NotFound { which: PathKind::ConfigFile, ref path } if path == "/config/params.toml"
    ));
}

#[test]
fn checks_stop_at_first_failure_in_fixed_order() {
    // Both cache and source are missing; cache is checked first.
    let settings = PathSettings {
        cache_dir: "/cache".to_owned(),
        source_dir: "/source".to_owned(),
        ..PathSettings::default()
    };

    let err = validate_paths(&MemoryFileSystem::new(), &settings).expect_err("should fail");
    assert_eq!(err.which(), Some(PathKind::CacheDirectory));
}

#[test]
fn directory_setting_pointing_at_file_is_wrong_kind() {
    let fs = MemoryFileSystem::new().with_file("/content");
    let settings = PathSettings {
        content_dir: "/content".to_owned(),
        ..PathSettings::default()
    };

    let err = validate_paths(&fs, &settings).expect_err("file is not a directory");
    assert!(matches!(
        err,
        PathError::WrongKind {
            which: PathKind::ContentDirectory,
            ..
        }
    ));
}

#[test]
fn other_filesystem_errors_are_not_reported_as_missing() {
    let fs = MemoryFileSystem::new();
    fs.fail_with("/layout", io::ErrorKind::PermissionDenied);
    let settings = PathSettings {
        layout_dir: "/layout".to_owned(),
        ..PathSettings::default()
    };

    let err = validate_paths(&fs, &settings).expect_err("stat fails");
    match err {
        PathError::Io { which, source, .. } => {
            assert_eq!(which, PathKind::LayoutDirectory);
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected Io, got {other:?}"),
    }
}
