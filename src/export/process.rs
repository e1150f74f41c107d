// src/export/process.rs
//! Fire-and-forget spawning of external tools

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Start `command` without waiting for it. Inside a tokio runtime the exit
/// status is logged from a background task; outside one the child is detached.
pub(crate) fn spawn_detached(mut command: Command, label: &'static str) -> Result<()> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    let program = command.get_program().to_string_lossy().into_owned();

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            let mut child = tokio::process::Command::from(command)
                .spawn()
                .with_context(|| format!("Failed to execute {} command: {}", label, program))?;
            let task_program = program.clone();
            handle.spawn(async move {
                match child.wait().await {
                    Ok(status) if status.success() => {
                        app_log!(info, "{} finished: {}", label, task_program)
                    }
                    Ok(status) => {
                        app_log!(warn, "{} exited with {}: {}", label, status, task_program)
                    }
                    Err(e) => app_log!(warn, "{} could not be awaited: {}", label, e),
                }
            });
        }
        Err(_) => {
            command
                .spawn()
                .with_context(|| format!("Failed to execute {} command: {}", label, program))?;
        }
    }

    app_log!(info, "Started {}: {}", label, program);
    Ok(())
}

/// Locate an executable either by path or on `PATH`
pub(crate) fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_inside_runtime_reports_start() {
        let Some(program) = ["true", "sh"].into_iter().find_map(find_executable) else {
            return;
        };
        let command = Command::new(program);
        assert!(spawn_detached(command, "test").is_ok());
    }

    #[test]
    fn test_spawn_missing_program_fails() {
        let command = Command::new("definitely-not-a-real-binary-4711");
        let err = spawn_detached(command, "test").unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-binary-4711"));
    }

    #[test]
    fn test_find_executable() {
        assert!(find_executable("definitely-not-a-real-binary-4711").is_none());
        assert!(find_executable("/nonexistent/dir/tool").is_none());
    }
}
