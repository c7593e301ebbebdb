//! Rewrite git history with `git-filter-repo`, replacing every built-in
//! secret pattern in blob contents (and optionally commit messages).

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

use crate::{DEFAULT_PLACEHOLDER, Redactor};

pub const FILTER_REPO_BIN: &str = "git-filter-repo";

#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("git-filter-repo not found on PATH: {0}")]
    ToolNotFound(#[from] which::Error),

    #[error("Placeholder cannot be used in an expressions file: {0:?}")]
    InvalidPlaceholder(String),

    #[error("Repository not found: {}", .0.display())]
    RepoNotFound(PathBuf),

    #[error("git-filter-repo failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrubError>;

#[derive(Debug, Clone)]
pub struct ScrubOutcome {
    pub stdout: String,
}

pub struct HistoryScrubber {
    repo: PathBuf,
    redactor: Redactor,
    force: bool,
    include_messages: bool,
}

impl HistoryScrubber {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            redactor: Redactor::with_placeholder(DEFAULT_PLACEHOLDER),
            force: true,
            include_messages: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.redactor = Redactor::with_placeholder(placeholder);
        self
    }

    /// Pass `--force` (needed unless the repo is a fresh clone)
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Also rewrite commit messages
    pub fn include_messages(mut self, include: bool) -> Self {
        self.include_messages = include;
        self
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Contents of the `--replace-text` expressions file. The replacement side
    /// is a Python `re.sub` template, so backslashes are escaped to keep the
    /// placeholder literal.
    pub fn replace_text_rules(&self) -> Result<String> {
        let placeholder = self.redactor.placeholder();
        if placeholder.contains(['\n', '\r']) || placeholder.contains("==>") {
            return Err(ScrubError::InvalidPlaceholder(placeholder.to_string()));
        }
        let replacement = placeholder.replace('\\', "\\\\");

        Ok(self
            .redactor
            .patterns()
            .map(|(_, source)| format!("regex:{}==>{}\n", source, replacement))
            .collect())
    }

    /// Build the filter-repo invocation for a written expressions file
    pub fn command(&self, program: &Path, expressions: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(&self.repo);
        cmd.args(self.args(expressions));
        cmd
    }

    pub fn args(&self, expressions: &Path) -> Vec<OsString> {
        let mut args = Vec::new();

        if self.force {
            args.push(OsString::from("--force"));
        }

        args.push(OsString::from("--replace-text"));
        args.push(expressions.as_os_str().to_owned());

        if self.include_messages {
            args.push(OsString::from("--replace-message"));
            args.push(expressions.as_os_str().to_owned());
        }

        args
    }

    /// Run git-filter-repo over the whole history
    pub fn run(&self) -> Result<ScrubOutcome> {
        if !self.repo.is_dir() {
            return Err(ScrubError::RepoNotFound(self.repo.clone()));
        }

        let rules = self.replace_text_rules()?;
        let program = which::which(FILTER_REPO_BIN)?;
        debug!("Using {}", program.display());

        let mut expressions = tempfile::NamedTempFile::new()?;
        expressions.write_all(rules.as_bytes())?;
        expressions.flush()?;

        info!("Rewriting history of {}", self.repo.display());
        let output = self.command(&program, expressions.path()).output()?;

        if !output.status.success() {
            return Err(ScrubError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(ScrubOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_text_rules() {
        let rules = HistoryScrubber::new(".").replace_text_rules().unwrap();
        let lines: Vec<_> = rules.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.starts_with("regex:")));
        assert!(lines.iter().all(|l| l.ends_with("==>[REDACTED]")));
        assert_eq!(
            lines[3],
            r"regex:https://[a-z0-9]+\.supabase\.co==>[REDACTED]"
        );
    }

    #[test]
    fn test_custom_placeholder_in_rules() {
        let rules = HistoryScrubber::new(".")
            .with_placeholder("***")
            .replace_text_rules()
            .unwrap();

        assert!(rules.lines().all(|l| l.ends_with("==>***")));
    }

    #[test]
    fn test_placeholder_backslashes_escaped() {
        let rules = HistoryScrubber::new(".")
            .with_placeholder(r"\1-gone\n")
            .replace_text_rules()
            .unwrap();

        assert_eq!(rules.lines().count(), 5);
        assert!(rules.lines().all(|l| l.ends_with(r"==>\\1-gone\\n")));
    }

    #[test]
    fn test_placeholder_breaking_expressions_rejected() {
        for placeholder in ["line\nbreak", "a==>b"] {
            let err = HistoryScrubber::new(".")
                .with_placeholder(placeholder)
                .replace_text_rules()
                .unwrap_err();
            assert!(matches!(err, ScrubError::InvalidPlaceholder(p) if p == placeholder));
        }
    }

    #[test]
    fn test_invalid_placeholder_fails_before_running() {
        let err = HistoryScrubber::new(".")
            .with_placeholder("a==>b")
            .run()
            .unwrap_err();
        assert!(matches!(err, ScrubError::InvalidPlaceholder(_)));
    }

    #[test]
    fn test_args_default() {
        let args = HistoryScrubber::new(".").args(Path::new("/tmp/expr.txt"));
        assert_eq!(args, vec!["--force", "--replace-text", "/tmp/expr.txt"]);
    }

    #[test]
    fn test_args_messages_without_force() {
        let args = HistoryScrubber::new(".")
            .force(false)
            .include_messages(true)
            .args(Path::new("expr.txt"));

        assert_eq!(
            args,
            vec!["--replace-text", "expr.txt", "--replace-message", "expr.txt"]
        );
    }

    #[test]
    fn test_command_runs_in_repo() {
        let scrubber = HistoryScrubber::new("/srv/repo");
        let cmd = scrubber.command(Path::new("git-filter-repo"), Path::new("e.txt"));

        assert_eq!(cmd.get_program(), "git-filter-repo");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/srv/repo")));
        assert_eq!(cmd.get_args().count(), 3);
    }

    #[test]
    fn test_missing_repo() {
        let err = HistoryScrubber::new("/definitely/not/a/repo").run().unwrap_err();
        assert!(matches!(err, ScrubError::RepoNotFound(_)));
    }
}
