//! Full runs over real directories: walk, parse, schedule and render.

use std::collections::BTreeSet;

use cli::{SinkReport, run_analysis};
use pretty_assertions::assert_eq;
use symlen_core::{Config, OutputFormat, Target};
use tempfile::TempDir;

struct Fixture {
  _dir: TempDir,
  good: Target,
  broken: Target,
  empty: Target,
}

fn fixture() -> Fixture {
  let dir = TempDir::new().unwrap();
  let good = dir.path().join("good");
  let broken = dir.path().join("broken");
  let empty = dir.path().join("empty");
  for d in [&good, &broken, &empty] {
    std::fs::create_dir_all(d).unwrap();
  }
  std::fs::write(good.join("main.py"), "x = foo(x)\n").unwrap();
  std::fs::write(broken.join("broken.py"), "def broken(:\n").unwrap();
  std::fs::write(empty.join("notes.txt"), "nothing to parse\n").unwrap();

  Fixture {
    good: Target::new(good),
    broken: Target::new(broken),
    empty: Target::new(empty),
    _dir: dir,
  }
}

fn config(limit: usize, format: OutputFormat) -> Config {
  let mut config = Config::default();
  config.scheduler.concurrency_limit = limit;
  config.output.format = format;
  config
}

async fn run(targets: Vec<Target>, config: &Config) -> (SinkReport, String, String) {
  let mut out = Vec::new();
  let mut err = Vec::new();
  let report = run_analysis(targets, config, &mut out, &mut err).await.unwrap();
  (report, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[tokio::test]
async fn test_success_and_failure_both_reported() {
  let fx = fixture();
  let (report, out, err) = run(vec![fx.good.clone(), fx.broken.clone()], &config(2, OutputFormat::Text)).await;

  assert_eq!(report.succeeded, 1);
  assert_eq!(report.failed, 1);
  assert_eq!(report.exit_code(), 1);

  let expected = format!(
    r#"{}: identifiers: 3 total: 5 average: 1.66667 min: 1 max: 3 ("foo")"#,
    fx.good
  );
  assert_eq!(out.trim_end(), expected);

  assert_eq!(err.lines().count(), 1);
  assert!(err.starts_with(&format!("error: {}: syntax error in ", fx.broken)), "{err}");
}

#[tokio::test]
async fn test_limit_does_not_change_the_outcome_set() {
  let fx = fixture();
  let targets = vec![fx.good.clone(), fx.broken.clone(), fx.empty.clone()];

  let (serial, serial_out, serial_err) = run(targets.clone(), &config(1, OutputFormat::Text)).await;
  let (wide, wide_out, wide_err) = run(targets, &config(64, OutputFormat::Text)).await;

  assert_eq!(serial, wide);
  let lines = |s: &str| s.lines().map(str::to_owned).collect::<BTreeSet<_>>();
  assert_eq!(lines(&serial_out), lines(&wide_out));
  assert_eq!(lines(&serial_err), lines(&wide_err));
}

#[tokio::test]
async fn test_target_without_sources_prints_no_data() {
  let fx = fixture();
  let (report, out, err) = run(vec![fx.empty.clone()], &config(4, OutputFormat::Text)).await;

  assert_eq!(
    report,
    SinkReport {
      succeeded: 1,
      failed: 0,
      empty: 1
    }
  );
  assert_eq!(report.exit_code(), 0);
  assert!(out.contains("identifiers: 0 total: 0 average: no data"), "{out}");
  assert!(!out.contains("NaN"));
  assert!(err.is_empty());
}

#[tokio::test]
async fn test_missing_target_is_a_failure_not_an_abort() {
  let fx = fixture();
  let missing = Target::new(fx._dir.path().join("nope"));
  let (report, out, err) = run(vec![missing.clone(), fx.good.clone()], &config(2, OutputFormat::Text)).await;

  assert_eq!(report.total(), 2);
  assert_eq!(report.failed, 1);
  assert_eq!(out.lines().count(), 1);
  assert_eq!(err.trim_end(), format!("error: {missing}: no such file or directory"));
}

#[tokio::test]
async fn test_no_targets_produces_no_output() {
  let (report, out, err) = run(Vec::new(), &config(3, OutputFormat::Text)).await;
  assert_eq!(report, SinkReport::default());
  assert!(out.is_empty());
  assert!(err.is_empty());
}

#[tokio::test]
async fn test_json_output() {
  let fx = fixture();
  let (_, out, err) = run(vec![fx.good.clone(), fx.broken.clone()], &config(2, OutputFormat::Json)).await;

  let record: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
  assert_eq!(record["count"], 3);
  assert_eq!(record["longest"], "foo");

  let failure: serde_json::Value = serde_json::from_str(err.trim_end()).unwrap();
  assert_eq!(failure["target"], fx.broken.to_string());
}

#[tokio::test]
async fn test_zero_limit_is_rejected_before_dispatch() {
  let fx = fixture();
  let mut out = Vec::new();
  let mut err = Vec::new();
  let result = run_analysis(vec![fx.good.clone()], &config(0, OutputFormat::Text), &mut out, &mut err).await;

  assert!(result.is_err());
  assert!(out.is_empty());
  assert!(err.is_empty());
}
