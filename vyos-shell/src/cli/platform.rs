//! CLI platform definition: prompt modes, failure strings and session setup.

use std::fmt;

use regex::bytes::Regex;

/// A CLI mode recognised by its prompt.
#[derive(Debug, Clone)]
pub struct CommandMode {
    /// Name of this mode (e.g., "operational", "configuration").
    pub name: String,

    /// Regex matching the prompt printed in this mode.
    pub pattern: Regex,
}

impl CommandMode {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Check if this mode's prompt matches.
    pub fn matches(&self, prompt: &str) -> bool {
        self.pattern.is_match(prompt.as_bytes())
    }
}

/// Everything the CLI session needs to know about a device family.
#[derive(Clone)]
pub struct Platform {
    /// Platform name.
    pub name: String,

    /// Prompt modes in match priority order.
    pub modes: Vec<CommandMode>,

    /// Output substrings that mark a command as failed.
    pub failed_when_contains: Vec<String>,

    /// Commands sent once after the first prompt.
    pub on_open_commands: Vec<String>,

    /// Combined prompt pattern for all modes.
    prompt_pattern: Regex,
}

impl Platform {
    /// Build a platform from its modes. At least one mode is required.
    pub fn new(name: impl Into<String>, modes: Vec<CommandMode>) -> Result<Self, regex::Error> {
        let combined = modes
            .iter()
            .map(|mode| format!("(?:{})", mode.pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let prompt_pattern = Regex::new(&combined)?;

        Ok(Self {
            name: name.into(),
            modes,
            failed_when_contains: vec![],
            on_open_commands: vec![],
            prompt_pattern,
        })
    }

    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    /// Pattern matching the prompt of any mode.
    pub fn prompt_pattern(&self) -> &Regex {
        &self.prompt_pattern
    }

    /// Mode whose prompt matches, first match wins.
    pub fn mode_for_prompt(&self, prompt: &str) -> Option<&CommandMode> {
        self.modes.iter().find(|mode| mode.matches(prompt))
    }

    /// The failure string contained in `output`, if any.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|pattern| output.contains(pattern.as_str()))
            .map(String::as_str)
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("name", &self.name)
            .field("modes", &self.modes.iter().map(|m| &m.name).collect::<Vec<_>>())
            .field("failed_when_contains", &self.failed_when_contains)
            .field("on_open_commands", &self.on_open_commands)
            .finish()
    }
}

pub mod vyos {
    //! VyOS platform definition.
    //!
    //! VyOS drops the user into operational mode with a shell-like prompt
    //! (`vyos@router:~$`). `configure` switches to configuration mode, whose
    //! prompt ends in `#` and is preceded by an `[edit]` line.

    use super::{CommandMode, Platform};

    pub const PLATFORM_NAME: &str = "vyos";

    pub const OPERATIONAL: &str = "operational";
    pub const CONFIGURATION: &str = "configuration";

    /// Create the VyOS platform definition.
    pub fn platform() -> Result<Platform, regex::Error> {
        let operational = CommandMode::new(OPERATIONAL, r"(?m)^[\w.\-]+@[\w.\-]+:[^\r\n#$]*\$\s*$")?;
        let configuration = CommandMode::new(CONFIGURATION, r"(?m)^[\w.\-]+@[\w.\-]+#\s*$")?;

        Ok(Platform::new(PLATFORM_NAME, vec![operational, configuration])?
            .with_failure_pattern("Invalid command")
            .with_failure_pattern("Incomplete command")
            .with_failure_pattern("Set failed")
            .with_failure_pattern("Commit failed")
            .with_on_open_command("set terminal length 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::vyos::{self, CONFIGURATION, OPERATIONAL};

    #[test]
    fn test_vyos_platform() {
        let p = vyos::platform().unwrap();
        assert_eq!(p.name, "vyos");
        assert_eq!(p.modes.len(), 2);
        assert_eq!(p.on_open_commands, vec!["set terminal length 0".to_string()]);
    }

    #[test]
    fn test_operational_prompt() {
        let p = vyos::platform().unwrap();
        assert_eq!(p.mode_for_prompt("vyos@vyos:~$ ").unwrap().name, OPERATIONAL);
        assert_eq!(p.mode_for_prompt("admin@edge-1.lab:/config$").unwrap().name, OPERATIONAL);
        assert!(p.prompt_pattern().is_match(b"output line\r\nvyos@vyos:~$ "));
    }

    #[test]
    fn test_configuration_prompt() {
        let p = vyos::platform().unwrap();
        assert_eq!(p.mode_for_prompt("[edit]\r\nvyos@vyos# ").unwrap().name, CONFIGURATION);
        assert!(p.prompt_pattern().is_match(b"[edit]\nvyos@vyos#"));
    }

    #[test]
    fn test_output_is_not_a_prompt() {
        let p = vyos::platform().unwrap();
        assert!(p.mode_for_prompt("eth0  192.0.2.1/24  u/u").is_none());
        assert!(!p.prompt_pattern().is_match(b"Codes: S - State, L - Link, u - Up, D - Down"));
    }

    #[test]
    fn test_failure_detection() {
        let p = vyos::platform().unwrap();
        assert_eq!(p.detect_failure("\r\n  Invalid command: show [interfacez]"), Some("Invalid command"));
        assert_eq!(p.detect_failure("eth0  192.0.2.1/24  u/u"), None);
    }
}
