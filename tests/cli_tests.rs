use std::fs;
use std::path::Path;
use std::process::Command;

const BODY: &str = "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
author A U Thor <author@example.com> 1112911993 -0700\n\
committer C O Mitter <committer@example.com> 1112912053 +0200\n\
\n\
hello\n";

fn have_git() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "A U Thor")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "C O Mitter")
        .env("GIT_COMMITTER_EMAIL", "committer@example.com");
    cmd
}

/// The tool with the same isolated git environment, run inside `dir`.
fn brute(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_commitbrute"));
    cmd.current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "A U Thor")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "C O Mitter")
        .env("GIT_COMMITTER_EMAIL", "committer@example.com");
    cmd
}

fn head(dir: &Path) -> String {
    let out = git(dir).args(["rev-parse", "HEAD"]).output().unwrap();
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

#[test]
fn object_hash_prints_id_and_dates() {
    let exe = env!("CARGO_BIN_EXE_object_hash");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("commit.txt");
    fs::write(&input, BODY).unwrap();

    let output = Command::new(exe).arg(&input).output().expect("run failed");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next().unwrap(), commitbrute::object_id(BODY.as_bytes()));
    assert_eq!(lines.next().unwrap(), "author    1112911993 -0700");
    assert_eq!(lines.next().unwrap(), "committer 1112912053 +0200");
}

#[test]
fn object_hash_prefix_check_fails() {
    let exe = env!("CARGO_BIN_EXE_object_hash");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("commit.txt");
    fs::write(&input, BODY).unwrap();
    let id = commitbrute::object_id(BODY.as_bytes());
    let wrong = if id.starts_with('0') { "1" } else { "0" };

    let ok = Command::new(exe)
        .arg(&input)
        .args(["--prefix", &id[..3]])
        .status()
        .unwrap();
    assert!(ok.success());
    let bad = Command::new(exe)
        .arg(&input)
        .args(["--prefix", wrong])
        .output()
        .unwrap();
    assert!(!bad.status.success());
    assert!(String::from_utf8_lossy(&bad.stderr).contains("does not start with"));
}

#[test]
fn missing_object_file_error() {
    let exe = env!("CARGO_BIN_EXE_object_hash");
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(exe)
        .arg(dir.path().join("absent.txt"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Check that the file exists"));
}

#[test]
fn non_hex_prefix_is_rejected() {
    let exe = env!("CARGO_BIN_EXE_commitbrute");
    let output = Command::new(exe)
        .args(["--prefix", "xyz", "--no-progress"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("isn't hex"));
}

#[test]
fn amends_head_to_requested_prefix() {
    if !have_git() {
        eprintln!("git not available, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();
    assert!(git(repo).args(["init", "-q"]).status().unwrap().success());
    fs::write(repo.join("file.txt"), "contents\n").unwrap();
    assert!(git(repo).args(["add", "file.txt"]).status().unwrap().success());
    assert!(git(repo)
        .args(["commit", "-q", "-m", "first commit"])
        .env("GIT_AUTHOR_DATE", "1000000000 +0000")
        .env("GIT_COMMITTER_DATE", "1000000000 +0000")
        .status()
        .unwrap()
        .success());
    let before = head(repo);

    let prefix = if before.starts_with("00") { "11" } else { "00" };
    let run = brute(repo)
        .args(["--prefix", prefix, "--cpus", "2", "--no-progress", "--json"])
        .output()
        .unwrap();
    assert!(
        run.status.success(),
        "{}",
        String::from_utf8_lossy(&run.stderr)
    );
    let after = head(repo);
    assert!(after.starts_with(prefix), "{after}");

    let report: serde_json::Value = serde_json::from_slice(&run.stdout).unwrap();
    assert_eq!(report["hash"], after.as_str());
    assert_eq!(report["amended"], true);
    assert!(report["elapsed_ms"].is_u64());
    assert_eq!(report["solution"]["author"]["tz"], "+0000");
    let solution: commitbrute::Solution =
        serde_json::from_value(report["solution"].clone()).unwrap();
    assert!(solution.author.seconds <= 1_000_000_000);
    assert!(solution.committer.seconds <= 1_000_000_000);

    // Already matching: nothing to do without --force.
    let again = brute(repo)
        .args(["--prefix", prefix, "--no-progress"])
        .status()
        .unwrap();
    assert!(again.success());
    assert_eq!(head(repo), after);
}
