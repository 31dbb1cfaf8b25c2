//! Search invocation
//!
//! Applying a filter hands its include and exclude strings, verbatim, to the
//! host's search. `PrintLauncher` writes them out for scripts;
//! `CommandLauncher` runs a shell command template.
//!
//! Pattern strings can come from a workspace file checked into a repository,
//! so they never become shell text. `CommandLauncher` exports them as
//! `SEARCH_INCLUDE` and `SEARCH_EXCLUDE` and rewrites each placeholder into a
//! quoted reference to the matching variable.

use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

/// Placeholder replaced by the include patterns
pub const INCLUDE_PLACEHOLDER: &str = "{include}";
/// Placeholder replaced by the exclude patterns
pub const EXCLUDE_PLACEHOLDER: &str = "{exclude}";

/// Environment variable carrying the include patterns
pub const INCLUDE_ENV: &str = "SEARCH_INCLUDE";
/// Environment variable carrying the exclude patterns
pub const EXCLUDE_ENV: &str = "SEARCH_EXCLUDE";

/// Errors raised while starting a search
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The search command could not be spawned
    #[error("Failed to execute search command: {0}")]
    Spawn(#[from] std::io::Error),

    /// The search command exited unsuccessfully
    #[error("Search command failed with status: {0}")]
    Status(std::process::ExitStatus),
}

/// Something that can run a search for an include/exclude pair
pub trait SearchLauncher {
    /// Start a search
    ///
    /// # Errors
    ///
    /// Returns `LaunchError` if the search cannot be started or fails.
    fn launch(&self, include: &str, exclude: &str) -> Result<(), LaunchError>;
}

/// Prints the two pattern strings on stdout, one per line
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintLauncher;

impl SearchLauncher for PrintLauncher {
    fn launch(&self, include: &str, exclude: &str) -> Result<(), LaunchError> {
        println!("{include}");
        println!("{exclude}");
        Ok(())
    }
}

/// Runs a shell command with `{include}` and `{exclude}` bound to the patterns
///
/// A placeholder may stand alone or be wrapped in single or double quotes;
/// either way it expands to exactly one argument. The template can also use
/// `$SEARCH_INCLUDE` and `$SEARCH_EXCLUDE` directly, e.g. `-g "!$SEARCH_EXCLUDE"`.
///
/// # Examples
///
/// ```no_run
/// use search_filters::launch::{CommandLauncher, SearchLauncher};
///
/// let launcher = CommandLauncher::new("code --search-include '{include}' --search-exclude '{exclude}'");
/// launcher.launch("src/**", "**/*.snap").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    template: String,
    working_dir: Option<PathBuf>,
}

impl CommandLauncher {
    /// Create a launcher for a command template
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            working_dir: None,
        }
    }

    /// Run the command from `dir`
    #[must_use]
    pub fn in_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// The shell script that runs; patterns are only referenced, never inlined
    #[must_use]
    pub fn render(&self) -> String {
        let mut script = self.template.clone();
        for (placeholder, var) in [(INCLUDE_PLACEHOLDER, INCLUDE_ENV), (EXCLUDE_PLACEHOLDER, EXCLUDE_ENV)] {
            let reference = format!("\"${var}\"");
            for quote in ['\'', '"'] {
                script = script.replace(&format!("{quote}{placeholder}{quote}"), &reference);
            }
            script = script.replace(placeholder, &reference);
        }
        script
    }
}

impl SearchLauncher for CommandLauncher {
    fn launch(&self, include: &str, exclude: &str) -> Result<(), LaunchError> {
        let script = self.render();
        tracing::debug!(command = %script, include, exclude, "Running search command");

        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&script)
            .env(INCLUDE_ENV, include)
            .env(EXCLUDE_ENV, exclude);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let status = command.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Status(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_references_variables() {
        let launcher = CommandLauncher::new("rg -g '{include}' -g {exclude} TODO");
        assert_eq!(
            launcher.render(),
            r#"rg -g "$SEARCH_INCLUDE" -g "$SEARCH_EXCLUDE" TODO"#
        );
    }

    #[test]
    fn test_render_unwraps_double_quoted_placeholder() {
        let launcher = CommandLauncher::new(r#"search "{include}" [{exclude}]"#);
        assert_eq!(launcher.render(), r#"search "$SEARCH_INCLUDE" ["$SEARCH_EXCLUDE"]"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_launcher_reports_failure() {
        assert!(CommandLauncher::new("true {include}").launch("a", "b").is_ok());
        assert!(matches!(
            CommandLauncher::new("false").launch("", ""),
            Err(LaunchError::Status(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_patterns_never_run_as_shell() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("pwned");
        let out = dir.path().join("out");
        let include = format!("x'; touch {}; echo '", marker.display());
        let exclude = format!("$(touch {})", marker.display());

        for template in ["true '{include}' '{exclude}'", "true {include} {exclude}", r#"true "{include}""#] {
            assert!(CommandLauncher::new(template).launch(&include, &exclude).is_ok());
        }
        assert!(!marker.exists());

        let launcher = CommandLauncher::new("printf '%s|%s' '{include}' {exclude} > out").in_dir(dir.path().to_path_buf());
        launcher.launch(&include, &exclude).unwrap();
        assert!(!marker.exists());
        assert_eq!(fs::read_to_string(out).unwrap(), format!("{include}|{exclude}"));
    }
}
