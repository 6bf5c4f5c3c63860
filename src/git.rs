//! Thin wrappers around the `git` executable.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::worker::Solution;
use crate::BruteError;

fn git(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    cmd
}

fn check(command: &str, output: Output) -> Result<Vec<u8>, BruteError> {
    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(BruteError::Git {
            command: command.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Object id of `HEAD`.
pub fn head_hash(repo: &Path) -> Result<String, BruteError> {
    let out = check("rev-parse", git(repo).args(["rev-parse", "HEAD"]).output()?)?;
    let text = String::from_utf8_lossy(&out);
    Ok(text.lines().next().unwrap_or_default().trim().to_string())
}

/// Raw content of the commit object `hash`.
pub fn cat_commit(repo: &Path, hash: &str) -> Result<Vec<u8>, BruteError> {
    check("cat-file", git(repo).args(["cat-file", "-p", hash]).output()?)
}

/// Amend `HEAD` in place with the dates from `solution`, keeping `message`.
pub fn amend(repo: &Path, solution: &Solution, message: &[u8]) -> Result<(), BruteError> {
    let mut child = git(repo)
        .args(["commit", "--allow-empty", "--amend", "--cleanup=verbatim", "--file=-"])
        .arg(format!("--date={}", solution.author))
        .env("GIT_COMMITTER_DATE", solution.committer.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(message)?;
    }
    let output = child.wait_with_output()?;
    log::debug!("{}", String::from_utf8_lossy(&output.stdout).trim());
    check("commit --amend", output).map(|_| ())
}
