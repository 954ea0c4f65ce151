use tempfile::TempDir;

use crate::common::{run_check, write_snippet};

#[test]
fn test_no_snippet_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;

    let (stdout, _stderr, code) = run_check(directory.path(), &["."]);
    assert!(stdout.contains("All checks passed!"));
    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_parsing_error() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "f(");

    let (_stdout, stderr, code) = run_check(directory.path(), &["."]);
    assert!(stderr.contains("Error"));
    assert!(stderr.contains("test.vx"));
    assert_eq!(code, 1);

    Ok(())
}

#[test]
fn test_no_findings() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "x = compute(a, b)\n");

    let (stdout, _stderr, code) = run_check(directory.path(), &["."]);
    assert!(stdout.contains("All checks passed!"));
    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_one_finding_with_suggestion() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "i = i + 1\n");

    let (stdout, _stderr, code) = run_check(directory.path(), &["."]);
    assert!(stdout.contains("test.vx [1:1] assign_op suggested: i++"));
    assert!(stdout.contains("suggestion: i++"));
    assert!(stdout.contains("Found 1 issue."));
    assert_eq!(code, 1);

    Ok(())
}

#[test]
fn test_several_findings_several_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "a.vx", "nil != err\n");
    write_snippet(directory.path(), "b.vx", "x == x\n");

    let (stdout, _stderr, code) = run_check(directory.path(), &["."]);
    assert!(stdout.contains("yoda_expr"));
    assert!(stdout.contains("dup_sub_expr"));
    assert!(stdout.contains("Found 2 issues."));
    // Output is sorted by filename.
    let a_pos = stdout.find("a.vx").unwrap();
    let b_pos = stdout.find("b.vx").unwrap();
    assert!(a_pos < b_pos);
    assert_eq!(code, 1);

    Ok(())
}

#[test]
fn test_rule_selection() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "nil != err\ni = i + 1\n");

    let (stdout, _stderr, _code) =
        run_check(directory.path(), &[".", "--select-rules", "yoda_expr"]);
    assert!(stdout.contains("yoda_expr"));
    assert!(!stdout.contains("assign_op"));

    let (stdout, _stderr, _code) =
        run_check(directory.path(), &[".", "--ignore-rules", "yoda_expr"]);
    assert!(!stdout.contains("yoda_expr"));
    assert!(stdout.contains("assign_op"));

    Ok(())
}

#[test]
fn test_unknown_rule_is_an_error() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "x = 1\n");

    let (_stdout, stderr, code) =
        run_check(directory.path(), &[".", "--select-rules", "no_such_rule"]);
    assert!(stderr.contains("no_such_rule"));
    assert_eq!(code, 2);

    Ok(())
}

#[test]
fn test_json_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "i = i + 1\n");

    let (stdout, _stderr, _code) =
        run_check(directory.path(), &[".", "--output-format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(parsed[0]["rule"], "assign_op");
    assert_eq!(parsed[0]["suggestion"], "i++");
    assert_eq!(parsed[0]["location"]["row"], 1);

    Ok(())
}

#[test]
fn test_skip_matched_suppresses_nested_findings() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    // The outer comparison duplicates a subexpression that itself
    // duplicates one.
    write_snippet(directory.path(), "test.vx", "(x == x) == (x == x)\n");

    let (stdout, _stderr, _code) = run_check(directory.path(), &["."]);
    assert!(stdout.contains("Found 3 issues."));

    let (stdout, _stderr, _code) = run_check(directory.path(), &[".", "--skip-matched"]);
    assert!(stdout.contains("Found 1 issue."));

    Ok(())
}

#[test]
fn test_match_budget_becomes_a_warning() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(
        directory.path(),
        "test.vx",
        "m = map[string]int{k1: 1, k2: 2, k3: 3, k4: 4, k5: 5, k6: 6, k7: 7, k8: 8}\n",
    );

    let (stdout, stderr, code) =
        run_check(directory.path(), &[".", "--match-budget", "10"]);
    assert!(stderr.contains("match budget exceeded"));
    // Budget aborts are diagnostics, not findings.
    assert!(stdout.contains("All checks passed!"));
    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_checking_is_idempotent() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    write_snippet(directory.path(), "test.vx", "copy(buf, buf)\nlen(xs) >= 0\n");

    let (first, _stderr, _code) = run_check(directory.path(), &["."]);
    let (second, _stderr, _code) = run_check(directory.path(), &["."]);
    assert_eq!(first, second);
    assert!(first.contains("Found 2 issues."));

    Ok(())
}
