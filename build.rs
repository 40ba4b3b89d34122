//! Stamps the binary with a commit hash and build time for `--version`.
//!
//! Both values can be pinned through env vars for reproducible builds; when
//! neither env nor tooling provides them the stamp reads "unknown".

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const GIT_HASH_VAR: &str = "CERBERUS_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "CERBERUS_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Some(reference) = std::fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.trim().strip_prefix("ref: ").map(str::to_string))
    {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }
    println!("cargo:rerun-if-env-changed={GIT_HASH_VAR}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_VAR}");

    let git_hash = env::var(GIT_HASH_VAR)
        .ok()
        .or_else(|| command_stdout("git", &["rev-parse", "--short=12", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = env::var(TIMESTAMP_VAR)
        .ok()
        .or_else(|| command_stdout("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            format!("unix:{secs}")
        });

    println!("cargo:rustc-env={GIT_HASH_VAR}={git_hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}
