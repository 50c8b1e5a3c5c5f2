//! End-to-end tests for organizing recordings in a temporary directory.

use std::collections::{HashSet, VecDeque};
use std::fs::{self, File};
use std::path::Path;

use tempfile::TempDir;

use clip_sort::organize::{
    AutoDecisions, DecisionPort, DiagnosticKind, FilePattern, OrganizeConfig, OrganizeError, Organizer,
    OverwriteDecision, RunStatus,
};

/// Decision port that answers prefix questions from a script and records the offered defaults.
struct ScriptedPort {
    prefixes: VecDeque<Option<String>>,
    offered_defaults: Vec<String>,
    merge: bool,
}

impl ScriptedPort {
    fn new(prefixes: &[Option<&str>]) -> Self {
        Self {
            prefixes: prefixes.iter().map(|answer| answer.map(ToString::to_string)).collect(),
            offered_defaults: Vec::new(),
            merge: true,
        }
    }
}

impl DecisionPort for ScriptedPort {
    fn ask_prefix(&mut self, _group: &str, _sample_path: &Path, default_value: &str) -> Option<String> {
        self.offered_defaults.push(default_value.to_string());
        self.prefixes.pop_front().flatten()
    }

    fn ask_merge_existing(&mut self, _path: &Path) -> bool {
        self.merge
    }

    fn ask_overwrite(&mut self, _existing_path: &Path, _source_path: &Path) -> OverwriteDecision {
        OverwriteDecision::Renumber
    }
}

fn create_files(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

fn file_names(dir: &Path) -> HashSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect()
}

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(ToString::to_string).collect()
}

fn no_ask_config() -> OrganizeConfig {
    OrganizeConfig {
        ask_prefix: false,
        ..OrganizeConfig::default()
    }
}

#[test]
fn groups_are_moved_into_subdirectories() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH020010.MP4", "GH010011.MP4"]);

    let organizer = Organizer::new(dir.path().to_path_buf(), no_ask_config()).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert_eq!(report.placed.len(), 3);
    assert!(file_names(dir.path()).is_empty());
    assert_eq!(
        file_names(&dir.path().join("0010")),
        set(&["0010_01.MP4", "0010_02.MP4"])
    );
    assert_eq!(file_names(&dir.path().join("0011")), set(&["0011_01.MP4"]));

    let content = fs::read_to_string(dir.path().join("0010").join("0010_02.MP4")).unwrap();
    assert_eq!(content, "GH020010.MP4");
}

#[test]
fn in_place_renames_inside_input_directory() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GX010042.mp4", "GX020042.mp4", "notes.txt"]);

    let config = OrganizeConfig {
        create_subdirectory: false,
        ..no_ask_config()
    };
    let organizer = Organizer::new(dir.path().to_path_buf(), config).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert_eq!(
        file_names(dir.path()),
        set(&["0042_01.MP4", "0042_02.MP4", "notes.txt"])
    );
}

#[test]
fn copy_keeps_source_files() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH020010.MP4"]);

    let config = OrganizeConfig {
        copy: true,
        ..no_ask_config()
    };
    let organizer = Organizer::new(dir.path().to_path_buf(), config).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert_eq!(file_names(dir.path()), set(&["GH010010.MP4", "GH020010.MP4"]));
    assert_eq!(
        file_names(&dir.path().join("0010")),
        set(&["0010_01.MP4", "0010_02.MP4"])
    );
}

#[test]
fn collisions_continue_after_existing_chapters() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("0010");
    fs::create_dir(&destination).unwrap();
    File::create(destination.join("0010_01.MP4")).unwrap();
    File::create(destination.join("0010_02.MP4")).unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH020010.MP4"]);

    let organizer = Organizer::new(dir.path().to_path_buf(), no_ask_config()).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert!(file_names(dir.path()).is_empty());
    assert_eq!(
        file_names(&destination),
        set(&["0010_01.MP4", "0010_02.MP4", "0010_3.MP4", "0010_4.MP4"])
    );
    // Existing files are never replaced
    assert!(fs::read(destination.join("0010_01.MP4")).unwrap().is_empty());
}

#[test]
fn carried_prefix_is_offered_and_shared() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH020010.MP4", "GH010011.MP4"]);

    let organizer = Organizer::new(dir.path().to_path_buf(), OrganizeConfig::default()).unwrap();
    let mut port = ScriptedPort::new(&[Some("trip"), Some("trip")]);
    let report = organizer.run(&mut port).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert_eq!(port.offered_defaults.len(), 2);
    assert_eq!(port.offered_defaults[1], "trip");
    // Which group is renumbered depends on listing order
    let placed = file_names(&dir.path().join("trip"));
    assert_eq!(placed.len(), 3);
    assert!(placed.contains("trip_01.MP4"));
    assert!(placed.contains("trip_3.MP4"));
}

#[test]
fn cancel_keeps_earlier_groups_placed() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GH010001.MP4", "GH010002.MP4", "GH010003.MP4"]);

    let organizer = Organizer::new(dir.path().to_path_buf(), OrganizeConfig::default()).unwrap();
    let mut port = ScriptedPort::new(&[Some("first"), None]);
    let report = organizer.run(&mut port).unwrap();

    assert_eq!(report.status(), RunStatus::Cancelled);
    assert_eq!(report.placed.len(), 1);
    assert_eq!(file_names(&dir.path().join("first")), set(&["first_01.MP4"]));
    assert_eq!(file_names(dir.path()).len(), 2);
}

#[test]
fn declined_merge_skips_group_and_continues() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("0010")).unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH010011.MP4"]);

    let config = OrganizeConfig {
        confirm_merge: true,
        ..no_ask_config()
    };
    let organizer = Organizer::new(dir.path().to_path_buf(), config).unwrap();
    let mut port = ScriptedPort::new(&[]);
    port.merge = false;
    let report = organizer.run(&mut port).unwrap();

    assert_eq!(report.status(), RunStatus::CompletedWithErrors);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].group, "0010");
    assert!(dir.path().join("GH010010.MP4").exists());
    assert!(file_names(&dir.path().join("0010")).is_empty());
    assert_eq!(file_names(&dir.path().join("0011")), set(&["0011_01.MP4"]));
}

#[test]
fn dryrun_changes_nothing() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH020010.MP4"]);

    let config = OrganizeConfig {
        dryrun: true,
        ..no_ask_config()
    };
    let organizer = Organizer::new(dir.path().to_path_buf(), config).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.placed.len(), 2);
    assert!(!dir.path().join("0010").exists());
    assert_eq!(file_names(dir.path()), set(&["GH010010.MP4", "GH020010.MP4"]));
}

#[test]
fn reversed_pattern_uses_first_capture_as_group() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["cam1234_part01.mp4", "cam1234_part02.mp4"]);

    let config = OrganizeConfig {
        pattern: FilePattern::new(r"cam([0-9]{4})_part([0-9]{2})", true).unwrap(),
        ..no_ask_config()
    };
    let organizer = Organizer::new(dir.path().to_path_buf(), config).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert_eq!(
        file_names(&dir.path().join("1234")),
        set(&["1234_01.MP4", "1234_02.MP4"])
    );
}

#[test]
fn only_configured_extensions_are_organized() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["GH010010.MP4", "GH020010.mov", "GH030010.txt"]);

    let config = OrganizeConfig {
        extensions: OrganizeConfig::normalize_extensions(["mp4", ".MOV"]),
        ..no_ask_config()
    };
    let organizer = Organizer::new(dir.path().to_path_buf(), config).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.status(), RunStatus::Ok);
    assert_eq!(file_names(dir.path()), set(&["GH030010.txt"]));
    assert_eq!(
        file_names(&dir.path().join("0010")),
        set(&["0010_01.MP4", "0010_02.MOV"])
    );
}

#[test]
fn renumbered_chapters_are_plain_numbers() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("0010");
    fs::create_dir(&destination).unwrap();
    File::create(destination.join("0010_01.MP4")).unwrap();
    File::create(destination.join("0010_02.MP4")).unwrap();
    create_files(dir.path(), &["GH010010.MP4"]);

    let organizer = Organizer::new(dir.path().to_path_buf(), no_ask_config()).unwrap();
    let report = organizer.run(&mut AutoDecisions).unwrap();

    assert_eq!(report.placed.len(), 1);
    assert_eq!(report.placed[0].destination, destination.join("0010_3.MP4"));
}

#[test]
fn path_like_prefix_is_rejected() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("videos");
    fs::create_dir(&root).unwrap();
    create_files(&root, &["GH010010.MP4"]);

    let organizer = Organizer::new(root.clone(), OrganizeConfig::default()).unwrap();
    let mut port = ScriptedPort::new(&[Some("../escape")]);
    let report = organizer.run(&mut port).unwrap();

    assert_eq!(report.status(), RunStatus::CompletedWithErrors);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::InvalidPrefix);
    assert!(!dir.path().join("escape").exists());
    assert!(root.join("GH010010.MP4").exists());
}

#[test]
fn no_matching_files_is_an_error() {
    let dir = TempDir::new().unwrap();
    create_files(dir.path(), &["holiday.mp4", "notes.txt"]);

    let organizer = Organizer::new(dir.path().to_path_buf(), no_ask_config()).unwrap();
    let result = organizer.run(&mut AutoDecisions);

    assert!(matches!(result, Err(OrganizeError::NoMatchingFiles(_))));
    assert_eq!(file_names(dir.path()), set(&["holiday.mp4", "notes.txt"]));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = Organizer::new(dir.path().join("missing"), no_ask_config());
    assert!(matches!(result, Err(OrganizeError::NotFound(_))));
}
