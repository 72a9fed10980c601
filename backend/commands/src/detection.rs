//! Chat command detection.

/// A detected and parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Upper-cased command name.
    pub name: String,
    pub args: Vec<String>,
}

/// Detect a command line. Command names are case-insensitive; arguments are
/// whitespace-separated and passed through verbatim.
pub fn detect_command(line: &str) -> Option<CommandInvocation> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    Some(CommandInvocation {
        name: name.to_uppercase(),
        args: parts.map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_name_case_insensitively() {
        let inv = detect_command("filehost info").unwrap();
        assert_eq!(inv.name, "FILEHOST");
        assert_eq!(inv.args, vec!["info"]);
    }

    #[test]
    fn empty_line_is_no_command() {
        assert_eq!(detect_command("   "), None);
    }

    #[test]
    fn bare_command_has_no_args() {
        let inv = detect_command("FILEHOST").unwrap();
        assert!(inv.args.is_empty());
    }
}
