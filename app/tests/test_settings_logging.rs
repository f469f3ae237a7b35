//! FILENAME: tests/test_settings_logging.rs
//! Integration tests for configuration loading and the unified log file.

mod common;

use app_lib::merge_commands::{get_merged_regions, merge_cells};
use app_lib::{get_log_path, init_log_file, init_logger, MergeCellsSettings};
use common::{assert_regions, TestHarness};
use merge_engine::{GridSize, MergeRegion};

#[test]
fn test_settings_from_json_with_invalid_entries() {
    let settings = MergeCellsSettings::from_json(
        r#"{"mergeCells": [
            {"row": 0, "col": 0, "rowspan": 2, "colspan": 2},
            {"row": 1, "col": 1, "rowspan": 3, "colspan": 3},
            {"row": 4, "col": 4, "rowspan": 1, "colspan": 1},
            {"row": 6, "col": 0, "rowspan": 1, "colspan": 4}
        ]}"#,
    )
    .unwrap();
    let harness = TestHarness::with_settings(GridSize::new(10, 10), settings);

    // Invalid entries are skipped, valid ones keep their order
    assert_regions(
        &harness,
        &[MergeRegion::new(0, 0, 2, 2), MergeRegion::new(6, 0, 1, 4)],
    );
}

#[test]
fn test_settings_entry_past_last_row_index_skipped() {
    let settings = MergeCellsSettings::from_json(
        r#"{"mergeCells": [
            {"row": 4294967295, "col": 0, "rowspan": 2, "colspan": 1},
            {"row": 0, "col": 4294967294, "rowspan": 1, "colspan": 4},
            {"row": 0, "col": 0, "rowspan": 2, "colspan": 2}
        ]}"#,
    )
    .unwrap();
    let harness = TestHarness::with_settings(GridSize::new(10, 10), settings);
    assert_regions(&harness, &[MergeRegion::new(0, 0, 2, 2)]);
}

#[test]
fn test_two_instances_are_independent() {
    let mut first = TestHarness::new();
    let second = TestHarness::new();

    first.merge(0, 0, 2, 2);
    assert_eq!(get_merged_regions(&first.state).len(), 1);
    assert!(get_merged_regions(&second.state).is_empty());
}

#[test]
fn test_disable_then_reenable() {
    let mut harness = TestHarness::new();
    harness.merge(0, 0, 2, 2);

    harness.state.update_settings(&MergeCellsSettings::default());
    assert!(merge_cells(&mut harness.state, 3, 3, 2, 2).is_err());
    assert!(harness.regions().is_empty());

    harness.state.update_settings(&MergeCellsSettings::enabled());
    assert!(merge_cells(&mut harness.state, 3, 3, 2, 2).is_ok());
}

#[test]
fn test_log_file_receives_command_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("merge.log");
    init_log_file(&path).unwrap();
    assert_eq!(get_log_path(), Some(path.clone()));
    // Route engine `log` records into the same file
    init_logger(log::LevelFilter::Debug).unwrap();

    let mut harness = TestHarness::new();
    harness.merge(0, 0, 2, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("|MERGE|Merged"))
        .expect("merge should be logged");
    let fields: Vec<&str> = line.splitn(4, '|').collect();
    assert_eq!(fields.len(), 4);
    assert!(fields[0].parse::<u64>().is_ok());
    assert_eq!(fields[1], "I");

    assert!(
        contents.lines().any(|l| l.contains("|D|COLLECTION|merged")),
        "engine debug line missing:\n{}",
        contents
    );
}
