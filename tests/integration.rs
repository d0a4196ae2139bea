use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Command pinned to the fixture region list so results do not depend on
/// the built-in commercial region table.
fn cmd() -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("posture-audit");
    c.arg("--config").arg(fixtures_path().join("regions.yaml"));
    c
}

fn json_output(args: &[&str], cache: &str) -> serde_json::Value {
    let output = cmd()
        .args(args)
        .arg("--format")
        .arg("json")
        .arg(fixtures_path().join(cache))
        .output()
        .unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

mod exit_codes {
    use super::*;

    #[test]
    fn test_failing_findings_exit_one() {
        cmd()
            .arg(fixtures_path().join("cache.json"))
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("KMS key not found for Notebook Instance"))
            .stdout(predicate::str::contains("Direct Internet access is enabled"))
            .stdout(predicate::str::contains("FAILED"));
    }

    #[test]
    fn test_clean_cache_exit_zero() {
        cmd()
            .arg(fixtures_path().join("clean_cache.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("PASSED"));
    }

    #[test]
    fn test_missing_cache_exit_two() {
        cmd()
            .arg(fixtures_path().join("does-not-exist.json"))
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("Cache snapshot not found"));
    }

    #[test]
    fn test_truncated_cache_exit_two() {
        cmd()
            .arg(fixtures_path().join("truncated.json"))
            .assert()
            .failure()
            .code(2);
    }

    #[test]
    fn test_invalid_config_exit_two() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("audit.json");
        fs::write(&config, "{ not json").unwrap();

        cargo_bin_cmd!("posture-audit")
            .arg("--config")
            .arg(&config)
            .arg(fixtures_path().join("clean_cache.json"))
            .assert()
            .failure()
            .code(2);
    }
}

mod json_report {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let report = json_output(&[], "cache.json");
        let summary = &report["summary"];
        assert_eq!(summary["ok"], 3);
        assert_eq!(summary["fail"], 2);
        assert_eq!(summary["warn"], 0);
        assert_eq!(summary["unknown"], 1);
        assert_eq!(summary["passed"], false);
    }

    #[test]
    fn test_two_findings_per_instance_sharing_resource() {
        let report = json_output(&[], "cache.json");
        let findings = report["rules"][0]["findings"].as_array().unwrap();
        let arn = "arn:aws:sagemaker:us-east-1:111122223333:notebook-instance/scratch-nb";

        let for_instance: Vec<&serde_json::Value> =
            findings.iter().filter(|f| f["resource"] == arn).collect();
        assert_eq!(for_instance.len(), 2);
        assert!(for_instance.iter().all(|f| f["status"] == "fail"));
        assert!(for_instance.iter().all(|f| f["region"] == "us-east-1"));
    }

    #[test]
    fn test_collection_error_is_unknown_without_resource() {
        let report = json_output(&[], "cache.json");
        let findings = report["rules"][0]["findings"].as_array().unwrap();

        let eu: Vec<&serde_json::Value> =
            findings.iter().filter(|f| f["region"] == "eu-west-1").collect();
        assert_eq!(eu.len(), 1);
        assert_eq!(eu[0]["status"], "unknown");
        assert!(eu[0].get("resource").is_none());
        assert!(
            eu[0]["message"]
                .as_str()
                .unwrap()
                .starts_with("Unable to query for Notebook Instances: User is not authorized")
        );
    }

    #[test]
    fn test_empty_region_reports_ok() {
        let report = json_output(&[], "cache.json");
        let findings = report["rules"][0]["findings"].as_array().unwrap();
        assert!(findings.iter().any(|f| f["region"] == "us-west-2"
            && f["status"] == "ok"
            && f["message"] == "No Notebook Instances found"));
    }

    #[test]
    fn test_absent_region_is_silent_but_traced() {
        let report = json_output(&[], "clean_cache.json");
        let rule = &report["rules"][0];
        let findings = rule["findings"].as_array().unwrap();

        assert!(!findings.iter().any(|f| f["region"] == "eu-west-1"));
        assert_eq!(
            rule["source"]["sagemaker:listNotebookInstances:eu-west-1"],
            "absent"
        );
    }

    #[test]
    fn test_restricted_partition_from_config() {
        let output = cargo_bin_cmd!("posture-audit")
            .arg("--config")
            .arg(fixtures_path().join("govcloud.toml"))
            .arg("--format")
            .arg("json")
            .arg(fixtures_path().join("cache.json"))
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let rule = &report["rules"][0];
        assert!(rule["findings"].as_array().unwrap().is_empty());
        let paths: Vec<&String> = rule["source"].as_object().unwrap().keys().collect();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.contains(":us-gov-")));
    }
}

mod terminal_report {
    use super::*;

    #[test]
    fn test_passing_findings_hidden_unless_verbose() {
        cmd()
            .arg(fixtures_path().join("cache.json"))
            .assert()
            .stdout(predicate::str::contains("KMS key found for Notebook Instance").not());

        cmd()
            .arg("--verbose")
            .arg(fixtures_path().join("cache.json"))
            .assert()
            .stdout(predicate::str::contains("KMS key found for Notebook Instance"));
    }

    #[test]
    fn test_help() {
        cargo_bin_cmd!("posture-audit")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--restricted-partition"));
    }
}
