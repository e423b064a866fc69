//! Permission change applied on the remote side after a transfer.

/// Default `chmod` mode
pub const DEFAULT_CHMOD_MODE: &str = "g+w,a+rX";
/// Default `chmod` options
pub const DEFAULT_CHMOD_OPTIONS: &str = "-Rf";

/// A `chmod` run against the repository base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionChange {
    pub enabled: bool,
    pub options: String,
    pub mode: String,
}

impl PermissionChange {
    /// Build the shell command for `basedir`
    pub fn command_for(&self, basedir: &str) -> String {
        [self.options.trim(), self.mode.trim(), basedir]
            .iter()
            .filter(|part| !part.is_empty())
            .fold(String::from("chmod"), |mut cmd, part| {
                cmd.push(' ');
                cmd.push_str(part);
                cmd
            })
    }
}

impl Default for PermissionChange {
    fn default() -> Self {
        Self {
            enabled: true,
            options: DEFAULT_CHMOD_OPTIONS.to_string(),
            mode: DEFAULT_CHMOD_MODE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command() {
        let chmod = PermissionChange::default();
        assert!(chmod.enabled);
        assert_eq!(
            chmod.command_for("/var/www/"),
            "chmod -Rf g+w,a+rX /var/www/"
        );
    }

    #[test]
    fn empty_options_are_dropped() {
        let chmod = PermissionChange {
            enabled: true,
            options: String::new(),
            mode: "755".to_string(),
        };
        assert_eq!(chmod.command_for("/srv"), "chmod 755 /srv");
    }
}
