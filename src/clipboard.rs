/*!
 * Clipboard support for repo-export
 *
 * Copies the finished document through whichever clipboard command the
 * system provides.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to run the clipboard command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Clipboard commands, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Tmux,
    MacOS,
    Wsl,
    Wayland,
    Xsel,
    Xclip,
    Termux,
}

impl ClipboardProvider {
    const ALL: [ClipboardProvider; 7] = [
        Self::Tmux,
        Self::MacOS,
        Self::Wsl,
        Self::Wayland,
        Self::Xsel,
        Self::Xclip,
        Self::Termux,
    ];

    /// Program reading the text on stdin
    pub fn program(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::MacOS => "pbcopy",
            Self::Wsl => "clip.exe",
            Self::Wayland => "wl-copy",
            Self::Xsel => "xsel",
            Self::Xclip => "xclip",
            Self::Termux => "termux-clipboard-set",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["load-buffer", "-w", "-"],
            Self::Xsel => &["-b", "-i"],
            Self::Xclip => &["-selection", "clipboard", "-in"],
            _ => &[],
        }
    }

    /// Whether this provider can be used right now
    fn is_available(self) -> bool {
        let program = self.program();
        match self {
            Self::Tmux => env::var_os("TMUX").is_some() && command_exists(program),
            Self::Wayland => env::var_os("WAYLAND_DISPLAY").is_some() && command_exists(program),
            Self::Xsel | Self::Xclip => {
                env::var_os("DISPLAY").is_some() && command_exists(program)
            }
            _ => command_exists(program),
        }
    }

    /// Send `text` to the clipboard
    pub fn copy(self, text: &str) -> Result<()> {
        let program = self.program();
        let mut child = Command::new(program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::CommandFailed(format!("{}: {}", program, e)))?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                ClipboardError::CommandFailed(format!("{}: stdin unavailable", program))
            })?;
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with status: {}",
                program, status
            )))
        }
    }
}

/// First available clipboard provider, if any
pub fn detect_provider() -> Option<ClipboardProvider> {
    ClipboardProvider::ALL
        .into_iter()
        .find(|provider| provider.is_available())
}

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = detect_provider().ok_or(ClipboardError::NoClipboardFound)?;
    log::debug!("Copying {} bytes with {:?}", text.len(), provider);
    provider.copy(text)
}

/// Check whether `command` is an executable on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}
