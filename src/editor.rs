//! Editor dispatch for `FILE LINE` pairs
//!
//! Files with the viewer extension open in the diagram viewer (which has no
//! notion of a line); everything else opens in the text editor at
//! `path:line`.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Errors from launching an external tool
#[derive(Debug, Error)]
pub enum EditorError {
    /// The program could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
}

/// Programs the dispatcher chooses between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Extension routed to the viewer, dot included
    pub viewer_extension: String,
    pub viewer: String,
    pub editor: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewer_extension: ".tikz".to_string(),
            viewer: "tikzit".to_string(),
            editor: "subl".to_string(),
        }
    }
}

/// A program invocation chosen by [`dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub program: String,
    pub args: Vec<String>,
}

/// Capability to run an external program
pub trait Launcher {
    /// Run `launch` and return its exit code (`None` if killed by a signal)
    fn launch(&mut self, launch: &Launch) -> Result<Option<i32>, EditorError>;
}

/// Runs programs as child processes and waits for them
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, launch: &Launch) -> Result<Option<i32>, EditorError> {
        let status = Command::new(&launch.program)
            .args(&launch.args)
            .status()
            .map_err(|source| EditorError::Launch {
                program: launch.program.clone(),
                source,
            })?;
        Ok(status.code())
    }
}

/// Choose the program and arguments for `path` at `line`.
#[must_use]
pub fn dispatch(config: &EditorConfig, path: &str, line: &str) -> Launch {
    if !config.viewer_extension.is_empty() && path.ends_with(&config.viewer_extension) {
        Launch {
            program: config.viewer.clone(),
            args: vec![path.to_string()],
        }
    } else {
        Launch {
            program: config.editor.clone(),
            args: vec![format!("{path}:{line}")],
        }
    }
}

/// Open `path` at `line` with whichever tool [`dispatch`] picks.
pub fn open<L: Launcher>(
    launcher: &mut L,
    config: &EditorConfig,
    path: &Path,
    line: &str,
) -> Result<Option<i32>, EditorError> {
    let path = path.to_string_lossy();
    info!("{path}");
    info!("{line}");

    let launch = dispatch(config, &path, line);
    launcher.launch(&launch)
}
