use ndarray::Array3;
use std::fs::{self, File};
use std::io::Write;

use clipset::labels::{expand_timestamps, ClassTable};
use clipset::loader::{per_frame_samples, whole_label_samples, DecodePolicy};
use clipset::merge::{class_for_prefix, merge_label_files, rewrite_entry_path};
use clipset::types::{ClipSource, LabelEntry, LabelSet};
use clipset::video::{stack_frames, zero_frame};
use clipset::{DatasetError, LoaderConfig};

fn sample_classes() -> ClassTable {
    ClassTable::from_names(["not_visible", "glass", "x"])
}

fn entry(file_path: &str, time_stamps: Vec<usize>) -> LabelEntry {
    LabelEntry {
        file_path: file_path.to_string(),
        time_stamps,
    }
}

#[test]
fn test_expand_timestamps_pairs() {
    let labels = expand_timestamps(&entry("x/video_1.avi", vec![3, 7]), &sample_classes(), 10)
        .unwrap();
    assert_eq!(labels.to_vec(), vec![0, 0, 0, 2, 2, 2, 2, 0, 0, 0]);
}

#[test]
fn test_expand_timestamps_odd_count_stays_visible() {
    let labels =
        expand_timestamps(&entry("x/video_1.avi", vec![3]), &sample_classes(), 6).unwrap();
    assert_eq!(labels.to_vec(), vec![0, 0, 0, 2, 2, 2]);
}

#[test]
fn test_expand_timestamps_duplicate_is_noop() {
    let classes = sample_classes();
    let with_duplicate =
        expand_timestamps(&entry("x/video_1.avi", vec![3, 3, 7]), &classes, 10).unwrap();
    let without =
        expand_timestamps(&entry("x/video_1.avi", vec![3, 7]), &classes, 10).unwrap();
    assert_eq!(with_duplicate, without);
}

#[test]
fn test_expand_timestamps_clamps_past_end() {
    let labels =
        expand_timestamps(&entry("x/video_1.avi", vec![3, 20]), &sample_classes(), 5).unwrap();
    assert_eq!(labels.to_vec(), vec![0, 0, 0, 2, 2]);
}

#[test]
fn test_expand_timestamps_unknown_class() {
    let result = expand_timestamps(&entry("unknown/video.avi", vec![3]), &sample_classes(), 5);
    assert!(matches!(result, Err(DatasetError::UnknownClass(_))));
}

#[test]
fn test_expand_timestamps_requires_not_visible() {
    let classes = ClassTable::from_names(["glass", "x"]);
    let result = expand_timestamps(&entry("x/video_1.avi", vec![3]), &classes, 5);
    assert!(matches!(result, Err(DatasetError::MissingNotVisibleClass)));
}

#[test]
fn test_class_table_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let table_path = temp_dir.path().join("classes.names");
    let mut table_file = File::create(&table_path).unwrap();
    writeln!(table_file, "not_visible\nglass\nhair").unwrap();

    let classes = ClassTable::load(&table_path).unwrap();
    assert_eq!(classes.len(), 3);
    assert_eq!(classes.get(1), Some("glass"));
    assert_eq!(classes.not_visible_index().unwrap(), 0);
    assert_eq!(classes.match_path("hair/rec_3/video.avi").unwrap(), 2);
}

#[test]
fn test_class_table_load_missing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = ClassTable::load(&temp_dir.path().join("classes.names"));
    assert!(matches!(result, Err(DatasetError::MissingFile(_))));
}

#[test]
fn test_class_for_prefix() {
    assert_eq!(class_for_prefix('g').unwrap(), "glass");
    assert_eq!(class_for_prefix('f').unwrap(), "fiber");
    assert!(matches!(
        class_for_prefix('z'),
        Err(DatasetError::UnknownClassPrefix('z'))
    ));
}

#[test]
fn test_rewrite_entry_path() {
    assert_eq!(
        rewrite_entry_path("data/g01/video_1.avi").unwrap(),
        "glass/g01/video_1.avi"
    );
    assert_eq!(
        rewrite_entry_path("data/s12/rec/video_4.mp4").unwrap(),
        "steel/s12/rec/video_4.mp4"
    );
}

fn write_label_file(path: &std::path::Path, entries: Vec<LabelEntry>) {
    let file = File::create(path).unwrap();
    serde_json::to_writer_pretty(file, &LabelSet { entries }).unwrap();
}

#[test]
fn test_merge_label_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input_dir = temp_dir.path().join("recordings");
    fs::create_dir(&input_dir).unwrap();
    write_label_file(
        &input_dir.join("a.json"),
        vec![entry("data/g01/video_1.avi", vec![3, 7])],
    );
    write_label_file(
        &input_dir.join("b.json"),
        vec![entry("data/h02/video_2.avi", vec![5])],
    );

    let output_dir = temp_dir.path().join("merged");
    let output_path = merge_label_files(&input_dir, &output_dir).unwrap();

    let merged: LabelSet = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(merged.entries.len(), 2);
    assert_eq!(merged.entries[0].file_path, "glass/g01/video_1.avi");
    assert_eq!(merged.entries[0].time_stamps, vec![3, 7]);
    assert_eq!(merged.entries[1].file_path, "hair/h02/video_2.avi");
}

#[test]
fn test_merge_refuses_existing_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input_dir = temp_dir.path().join("recordings");
    fs::create_dir(&input_dir).unwrap();
    write_label_file(
        &input_dir.join("a.json"),
        vec![entry("data/g01/video_1.avi", vec![3, 7])],
    );

    let output_dir = temp_dir.path().join("merged");
    let output_path = merge_label_files(&input_dir, &output_dir).unwrap();
    let first_run = fs::read_to_string(&output_path).unwrap();

    // Add another input; the second run must fail without touching the output
    write_label_file(
        &input_dir.join("b.json"),
        vec![entry("data/h02/video_2.avi", vec![5])],
    );
    let result = merge_label_files(&input_dir, &output_dir);
    assert!(matches!(result, Err(DatasetError::OutputExists(_))));
    assert_eq!(fs::read_to_string(&output_path).unwrap(), first_run);
}

#[test]
fn test_merge_unknown_prefix() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input_dir = temp_dir.path().join("recordings");
    fs::create_dir(&input_dir).unwrap();
    write_label_file(
        &input_dir.join("a.json"),
        vec![entry("data/z01/video_1.avi", vec![3])],
    );

    let result = merge_label_files(&input_dir, &temp_dir.path().join("merged"));
    assert!(matches!(result, Err(DatasetError::UnknownClassPrefix('z'))));
}

fn fake_video_tree(root: &std::path::Path, class_name: &str, count: usize) {
    let class_dir = root.join(class_name);
    fs::create_dir_all(&class_dir).unwrap();
    for i in 0..count {
        File::create(class_dir.join(format!("video_{}.avi", i))).unwrap();
    }
}

#[test]
fn test_whole_label_enumeration() {
    let temp_dir = tempfile::tempdir().unwrap();
    fake_video_tree(temp_dir.path(), "glass", 3);
    fake_video_tree(temp_dir.path(), "hair", 3);

    let classes = ClassTable::from_names(["glass", "hair"]);
    let config = LoaderConfig::default();
    let samples =
        whole_label_samples(temp_dir.path(), &classes, None, DecodePolicy::Lazy, &config).unwrap();

    assert_eq!(samples.len(), 6);
    assert!(samples
        .iter()
        .all(|sample| matches!(sample.source, ClipSource::Video(_))));
    assert_eq!(samples.iter().filter(|sample| sample.class == 0).count(), 3);
    assert_eq!(samples.iter().filter(|sample| sample.class == 1).count(), 3);
}

#[test]
fn test_whole_label_limit_caps_total() {
    let temp_dir = tempfile::tempdir().unwrap();
    fake_video_tree(temp_dir.path(), "glass", 3);
    fake_video_tree(temp_dir.path(), "hair", 3);

    let classes = ClassTable::from_names(["glass", "hair"]);
    let config = LoaderConfig::default();
    let samples = whole_label_samples(
        temp_dir.path(),
        &classes,
        Some(4),
        DecodePolicy::Lazy,
        &config,
    )
    .unwrap();

    assert_eq!(samples.len(), 4);
}

#[test]
fn test_per_frame_requires_label_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = per_frame_samples(
        temp_dir.path(),
        &sample_classes(),
        None,
        DecodePolicy::Lazy,
        &LoaderConfig::default(),
    );
    assert!(matches!(result, Err(DatasetError::MissingFile(_))));
}

#[test]
fn test_per_frame_requires_video() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_label_file(
        &temp_dir.path().join("labels.json"),
        vec![entry("glass/missing.avi", vec![3])],
    );

    let result = per_frame_samples(
        temp_dir.path(),
        &sample_classes(),
        None,
        DecodePolicy::Lazy,
        &LoaderConfig::default(),
    );
    assert!(matches!(result, Err(DatasetError::MissingFile(_))));
}

#[test]
fn test_zero_frame_matches_configured_shape() {
    let gray = LoaderConfig::new(8, true, 48, 64);
    assert_eq!(zero_frame(&gray).shape(), &[64, 48, 1]);

    let rgb = LoaderConfig::new(8, false, 48, 64);
    assert_eq!(zero_frame(&rgb).shape(), &[64, 48, 3]);
}

#[test]
fn test_stack_frames_adds_leading_axis() {
    let frames = vec![Array3::<u8>::zeros((4, 5, 3)), Array3::<u8>::zeros((4, 5, 3))];
    let stacked = stack_frames(frames).unwrap();
    assert_eq!(stacked.dim(), (2, 4, 5, 3));

    let empty = stack_frames(Vec::new()).unwrap();
    assert_eq!(empty.dim(), (0, 0, 0, 0));
}

#[test]
fn test_stack_frames_rejects_mixed_shapes() {
    let frames = vec![Array3::<u8>::zeros((4, 5, 3)), Array3::<u8>::zeros((4, 4, 3))];
    assert!(matches!(
        stack_frames(frames),
        Err(DatasetError::Shape(_))
    ));
}
