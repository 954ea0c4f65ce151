use std::path::Path;

/// Run `vakt check <args>` in `dir` and return (stdout, stderr, exit
/// code). Colors are disabled so assertions can match plain text.
pub fn run_check(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = assert_cmd::Command::cargo_bin("vakt")
        .expect("vakt binary builds")
        .env("NO_COLOR", "1")
        .current_dir(dir)
        .arg("check")
        .args(args)
        .output()
        .expect("vakt runs");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Write a snippet file into `dir`.
pub fn write_snippet(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("snippet written");
}
