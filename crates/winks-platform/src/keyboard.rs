//! On-screen keyboard launcher.
//!
//! Candidates are tried in order; the first one that spawns wins. Launched
//! processes are detached, nothing waits on them.

use std::process::{Command, Stdio};
use tracing::{info, warn};
use winks_core::{InputError, InputResult, KeyboardConfig, PlatformServices};

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn spawn(&self) -> std::io::Result<()> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }
}

pub struct VirtualKeyboardLauncher {
    candidates: Vec<LaunchCommand>,
}

impl VirtualKeyboardLauncher {
    /// Use the configured command if any, otherwise the platform default.
    pub fn new(config: &KeyboardConfig) -> Self {
        let configured = config
            .command
            .as_ref()
            .and_then(|parts| parts.split_first())
            .map(|(program, args)| LaunchCommand {
                program: program.clone(),
                args: args.to_vec(),
            });

        let candidates = match configured {
            Some(cmd) => vec![cmd],
            None => Self::platform_default(),
        };
        Self { candidates }
    }

    pub fn with_candidates(candidates: Vec<LaunchCommand>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[LaunchCommand] {
        &self.candidates
    }

    /// The OS keyboard for the current platform, in fallback order.
    pub fn platform_default() -> Vec<LaunchCommand> {
        if cfg!(windows) {
            vec![
                LaunchCommand::new(
                    r"C:\Program Files\Common Files\Microsoft Shared\ink\TabTip.exe",
                ),
                LaunchCommand::new("osk.exe"),
            ]
        } else if cfg!(target_os = "macos") {
            vec![LaunchCommand::new("osascript").arg("-e").arg(
                r#"tell application "System Events" to key code 102 using {command down, option down}"#,
            )]
        } else if cfg!(target_os = "linux") {
            vec![LaunchCommand::new("onboard")]
        } else {
            Vec::new()
        }
    }
}

impl PlatformServices for VirtualKeyboardLauncher {
    fn open_virtual_keyboard(&self) -> InputResult<()> {
        let mut last_error = None;

        for cmd in &self.candidates {
            match cmd.spawn() {
                Ok(()) => {
                    info!(program = %cmd.program, "On-screen keyboard launched");
                    return Ok(());
                }
                Err(e) => {
                    warn!(program = %cmd.program, error = %e, "On-screen keyboard launch failed");
                    last_error = Some(InputError::Launch {
                        program: cmd.program.clone(),
                        source: e,
                    });
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            InputError::Unsupported("no on-screen keyboard for this platform".into())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_command_replaces_default() {
        let launcher = VirtualKeyboardLauncher::new(&KeyboardConfig {
            command: Some(vec!["florence".into(), "--focus".into()]),
        });
        assert_eq!(
            launcher.candidates(),
            &[LaunchCommand::new("florence").arg("--focus")]
        );
    }

    #[test]
    fn test_empty_command_uses_platform_default() {
        let launcher = VirtualKeyboardLauncher::new(&KeyboardConfig {
            command: Some(Vec::new()),
        });
        assert_eq!(
            launcher.candidates(),
            VirtualKeyboardLauncher::platform_default().as_slice()
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_falls_back_to_osk() {
        let defaults = VirtualKeyboardLauncher::platform_default();
        assert!(defaults[0].program.ends_with("TabTip.exe"));
        assert_eq!(defaults[1].program, "osk.exe");
    }

    #[test]
    fn test_no_candidates_is_unsupported() {
        let launcher = VirtualKeyboardLauncher::with_candidates(Vec::new());
        assert!(matches!(
            launcher.open_virtual_keyboard(),
            Err(InputError::Unsupported(_))
        ));
    }

    #[test]
    fn test_missing_program_reports_last_failure() {
        let launcher = VirtualKeyboardLauncher::with_candidates(vec![
            LaunchCommand::new("winks-no-such-keyboard-a"),
            LaunchCommand::new("winks-no-such-keyboard-b"),
        ]);
        match launcher.open_virtual_keyboard() {
            Err(InputError::Launch { program, .. }) => {
                assert_eq!(program, "winks-no-such-keyboard-b");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
