//! Running `az` (Azure CLI) commands.

use colored::Colorize;
use regex::Regex;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Largest stdout accepted from a CLI command.
const MAX_OUTPUT_BYTES: usize = 64_000;

/// Splits on whitespace, keeping '...' and "..." groups together.
static ARG_REGEX: OnceLock<Regex> = OnceLock::new();

fn arg_regex() -> &'static Regex {
    ARG_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a command line and return its stdout.
///
/// # Returns
/// * `Ok(String)` - stdout on exit code 0
/// * `Err` - if the program can't start, exits non-zero, or prints too much
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    let args = split_args(cmd);
    let (program, rest) = args
        .split_first()
        .filter(|(p, _)| !p.is_empty())
        .ok_or_else(|| format!("Empty command: {cmd:?}"))?;
    log::debug!("run {program} {}", rest.join(" ").on_blue());

    let output = Command::new(program).args(rest).output().map_err(|e| {
        log::error!("Could not start {program}: {e}");
        format!("Could not start {program}: {e}")
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::warn!(
            "{failed} {program} exit={code:?}",
            failed = "failed".on_red(),
            code = output.status.code()
        );
        log::trace!("stderr=\n{}", stderr.red());
        return Err(format!("{program} failed: {}", stderr.trim()).into());
    }

    if output.stdout.len() > MAX_OUTPUT_BYTES {
        return Err(format!(
            "{program} output too large: {} bytes",
            output.stdout.len()
        )
        .into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {e}"))?;
    Ok(stdout)
}

/// [`run`] on tokio's blocking pool, for callers on the async runtime.
pub async fn run_blocking(cmd: &str) -> Result<String, Box<dyn Error>> {
    let cmd = cmd.to_string();
    let stdout = tokio::task::spawn_blocking(move || run(&cmd).map_err(|e| e.to_string()))
        .await
        .map_err(|e| format!("Command task failed: {e}"))??;
    Ok(stdout)
}

fn split_args(input: &str) -> Vec<&str> {
    arg_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .filter(|s| !s.is_empty())
        .collect()
}
