//! # Repo Registry
//!
//! The static, ordered list of external repositories the comparison runs
//! against. Each entry pairs a clone URL with the argument list handed to the
//! formatter under test.
//!
//! The registry is literal configuration: building it performs no I/O and no
//! network access, and its declaration order is significant — it defines both
//! the processing order and the order of sections in the rendered report, so
//! it is kept as a `Vec` of structs rather than any kind of map.

/// One target repository for the comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Short name, used for the workspace directory and diff prefixes.
    pub name: String,
    /// Clone URL.
    pub url: String,
    /// Arguments passed to the tool under test, already split into tokens.
    pub command: Vec<String>,
}

impl RepoEntry {
    /// Create an entry, splitting a whitespace-separated command string into
    /// discrete argument tokens.
    ///
    /// Splitting happens once here, at registration time, so the argument
    /// list stays auditable and is never re-interpreted by a shell.
    pub fn new(name: &str, url: &str, command: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            command: command.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// The built-in registry of repositories to compare against.
pub fn builtin() -> Vec<RepoEntry> {
    vec![
        RepoEntry::new("roact", "https://github.com/Roblox/roact.git", "src"),
        RepoEntry::new("neovim", "https://github.com/neovim/neovim.git", "."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_is_declaration_order() {
        let repos = builtin();
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["roact", "neovim"]);
    }

    #[test]
    fn test_command_split_single_token() {
        let entry = RepoEntry::new("sample", "https://example.com/sample.git", "src");
        assert_eq!(entry.command, vec!["src"]);
    }

    #[test]
    fn test_command_split_multiple_tokens() {
        let entry = RepoEntry::new("sample", "https://example.com/sample.git", "src --verify lib");
        assert_eq!(entry.command, vec!["src", "--verify", "lib"]);
    }

    #[test]
    fn test_command_split_collapses_whitespace() {
        let entry = RepoEntry::new("sample", "https://example.com/sample.git", "  src   lib  ");
        assert_eq!(entry.command, vec!["src", "lib"]);
    }

    #[test]
    fn test_builtin_commands_are_tokenized() {
        for entry in builtin() {
            assert!(!entry.command.is_empty());
            for token in &entry.command {
                assert!(!token.contains(char::is_whitespace));
            }
        }
    }
}
