use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use super::{TextTransformer, TransformMode};
use crate::engine::config::TransformConfig;
use crate::engine::error::TransformError;

pub const ENV_MODE: &str = "SPEEDREAD_MODE";
pub const ENV_LANGUAGE: &str = "SPEEDREAD_LANGUAGE";

/// Collaborator backed by an external command.
///
/// The command runs through the platform shell. Input arrives on stdin,
/// the replacement text is read from stdout. `SPEEDREAD_MODE` tells it what
/// to do (`summarize`, `optimize` or `generate`) and `SPEEDREAD_LANGUAGE`
/// is forwarded as configured.
#[derive(Debug, Clone, Default)]
pub struct CommandTransformer {
    command: Option<String>,
    language: Option<String>,
}

impl CommandTransformer {
    pub fn new(command: Option<String>, language: Option<String>) -> Self {
        Self { command, language }
    }

    pub fn from_config(config: &TransformConfig) -> Self {
        Self::new(config.command.clone(), config.language.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }

    fn shell() -> (&'static str, &'static str) {
        if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        }
    }

    fn run(&self, mode: &str, input: &str) -> Result<String, TransformError> {
        let command = self.command.as_deref().ok_or_else(|| {
            TransformError::Unavailable("no transform command configured".to_string())
        })?;

        let (shell, flag) = Self::shell();
        let mut process = Command::new(shell);
        process
            .arg(flag)
            .arg(command)
            .env(ENV_MODE, mode)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(language) = &self.language {
            process.env(ENV_LANGUAGE, language);
        }

        debug!(mode, command, bytes = input.len(), "starting transform command");
        let mut child = process.spawn().map_err(|e| {
            TransformError::Failed(format!("could not start `{}`: {}", command, e))
        })?;

        // Feed stdin from a separate thread so a chatty command cannot
        // deadlock on a full stdout pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|e| {
            TransformError::Failed(format!("`{}` did not complete: {}", command, e))
        })?;

        if let Some(writer) = writer {
            // A command that ignores stdin closes the pipe early; not an error.
            if let Ok(Err(e)) = writer.join() {
                debug!(error = %e, "transform command did not consume stdin");
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(mode, status = %output.status, "transform command failed");
            return Err(TransformError::Failed(format!(
                "`{}` exited with {}: {}",
                command,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8(output.stdout).map_err(|_| {
            TransformError::Failed(format!("`{}` produced invalid UTF-8", command))
        })?;

        if text.trim().is_empty() {
            return Err(TransformError::Failed(format!(
                "`{}` returned no text",
                command
            )));
        }

        Ok(text)
    }
}

impl TextTransformer for CommandTransformer {
    fn transform(&self, text: &str, mode: TransformMode) -> Result<String, TransformError> {
        self.run(mode.as_str(), text)
    }

    fn generate(&self, topic: &str) -> Result<String, TransformError> {
        self.run("generate", topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_command(command: &str) -> CommandTransformer {
        CommandTransformer::new(Some(command.to_string()), None)
    }

    #[test]
    fn test_unconfigured_is_unavailable() {
        let transformer = CommandTransformer::default();
        assert!(!transformer.is_configured());
        let result = transformer.transform("text", TransformMode::Summarize);
        assert!(matches!(result, Err(TransformError::Unavailable(_))));
        assert!(matches!(
            transformer.generate("topic"),
            Err(TransformError::Unavailable(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = TransformConfig {
            command: Some("cat".to_string()),
            language: Some("fr".to_string()),
        };
        let transformer = CommandTransformer::from_config(&config);
        assert!(transformer.is_configured());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_reads_stdin() {
        let transformer = with_command("tr a-z A-Z");
        let result = transformer.transform("quiet words", TransformMode::Optimize);
        assert_eq!(result.unwrap(), "QUIET WORDS");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_mode_and_language() {
        let transformer = CommandTransformer::new(
            Some("printf '%s/%s' \"$SPEEDREAD_MODE\" \"$SPEEDREAD_LANGUAGE\"".to_string()),
            Some("pt-BR".to_string()),
        );
        assert_eq!(
            transformer.transform("x", TransformMode::Summarize).unwrap(),
            "summarize/pt-BR"
        );
        assert_eq!(transformer.generate("x").unwrap(), "generate/pt-BR");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_ignoring_stdin_still_succeeds() {
        let transformer = with_command("echo generated");
        let result = transformer.generate(&"topic ".repeat(50_000));
        assert_eq!(result.unwrap().trim(), "generated");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failed() {
        let transformer = with_command("echo 'quota exceeded' >&2; exit 3");
        match transformer.transform("text", TransformMode::Summarize) {
            Err(TransformError::Failed(msg)) => assert!(msg.contains("quota exceeded")),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_blank_output_is_failed() {
        let transformer = with_command("printf '  \\n'");
        let result = transformer.transform("text", TransformMode::Summarize);
        assert!(matches!(result, Err(TransformError::Failed(_))));
    }
}
