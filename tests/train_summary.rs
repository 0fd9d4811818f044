use clap::Parser;
use qmaze::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "qmaze-train",
        "--epochs",
        "5",
        "--seed",
        "1",
        "--start",
        "9",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 5);
    assert_eq!(parsed["metadata"]["seed"], 1);
    assert_eq!(parsed["walk"]["start"], 9);
    assert_eq!(parsed["walk"]["steps"], 1);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args(["qmaze-train", "--epochs", "3", "--summary", &summary_arg]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 3);
}

#[test]
fn train_writes_q_table_and_observations() {
    let tmp = tempdir().unwrap();
    let csv_path = tmp.path().join("table.csv");
    let obs_path = tmp.path().join("episodes.jsonl");

    let args = parse_args([
        "qmaze-train",
        "--epochs",
        "4",
        "--seed",
        "2",
        "--q-table-out",
        csv_path.to_str().unwrap(),
        "--observations",
        obs_path.to_str().unwrap(),
    ]);

    execute(args).expect("training with export paths should succeed");

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 13, "header plus one row per state");

    let observations = std::fs::read_to_string(&obs_path).unwrap();
    assert_eq!(observations.lines().count(), 4);
}

#[test]
fn negative_abort_threshold_parses() {
    let args = parse_args(["qmaze-train", "--abort-threshold", "-25.5"]);
    assert_eq!(args.abort_threshold, -25.5);
}
