mod common;

use postlens_core::Period;
use postlens_salience::Analysis;
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn test_env_config_changes_pipeline() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"min_text_length": 1, "period": "day", "bucket_top_terms": 1}"#,
    )
    .unwrap();

    std::env::set_var(postlens_io::CONFIG_ENV, &config_path);
    let config = postlens_io::load_config(None);
    std::env::remove_var(postlens_io::CONFIG_ENV);
    let config = config.unwrap();
    assert_eq!(config.period, Period::Day);

    let archive = common::write_archive(dir.path());
    let analysis = Analysis::run(postlens_io::load_archive(&archive).unwrap(), config);

    // "hi" clears a one-character threshold
    assert_eq!(analysis.diagnostics.qualifying, 4);
    let report = analysis.report();
    assert_eq!(report.buckets.len(), 3);
    assert!(report.buckets.iter().all(|b| b.top_terms.len() <= 1));
}

#[test]
#[serial]
fn test_explicit_config_overrides_env() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join("env.json");
    let explicit = dir.path().join("explicit.json");
    std::fs::write(&env_path, r#"{"num_results": 7}"#).unwrap();
    std::fs::write(&explicit, r#"{"num_results": 2}"#).unwrap();

    std::env::set_var(postlens_io::CONFIG_ENV, &env_path);
    let config = postlens_io::load_config(Some(&explicit));
    std::env::remove_var(postlens_io::CONFIG_ENV);

    assert_eq!(config.unwrap().num_results, 2);
}

#[test]
#[serial]
fn test_invalid_config_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"density_quantiles": {"low": 0.8, "high": 0.2}}"#,
    )
    .unwrap();

    let err = postlens_io::load_config(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid configuration"));
}
