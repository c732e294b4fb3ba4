//! MCP server registry entries and the built-in server table.

use crate::constants::{API_KEY_ASSIGNMENT, API_KEY_TOKEN};
use crate::core::SetupError;
use serde::Serialize;

/// One environment variable a server expects, with its placeholder or default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    /// Variable name (e.g. `FIRECRAWL_API_KEY`)
    pub name: String,
    /// Placeholder (`YOUR-API-KEY`) or usable default (`https://gitlab.com/api/v4`)
    pub default: String,
}

impl EnvVar {
    /// Whether the default is a placeholder the user must replace.
    ///
    /// ```rust
    /// use setup_mcp::registry::EnvVar;
    ///
    /// let token = EnvVar { name: "T".into(), default: "your-token-here".into() };
    /// assert!(token.is_placeholder());
    /// let url = EnvVar { name: "U".into(), default: "https://gitlab.com/api/v4".into() };
    /// assert!(!url.is_placeholder());
    /// ```
    pub fn is_placeholder(&self) -> bool {
        let lowered = self.default.to_ascii_lowercase();
        lowered.is_empty() || lowered.contains("your-") || lowered.contains("your_")
    }
}

/// How a server's configuration fragment is produced.
///
/// Entries that leave the kind unset get one from their shape; see
/// [`ServerEntry::builder_kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderKind {
    /// Command and arguments written verbatim
    Static,
    /// API key written into every required environment variable
    EnvSecret,
    /// API key replaces the argument equal to `YOUR_API_KEY`
    ArgToken,
    /// API key replaces the `API_KEY=...` argument
    ArgAssignment,
    /// Serena's `--context` and optional `--project` arguments
    Serena,
    /// Last argument replaced by a path or connection string.
    /// `None` offers the project directory as the default.
    PathArg { default: Option<String> },
    /// Every required environment variable is asked for
    EnvPrompt,
}

impl BuilderKind {
    /// Whether this kind captures an API key.
    pub fn captures_secret(&self) -> bool {
        matches!(self, Self::EnvSecret | Self::ArgToken | Self::ArgAssignment)
    }
}

/// Static description of one MCP server integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    /// Registry key, also the key written into the servers container
    pub key: String,

    /// Human-readable name
    pub display_name: String,

    /// Executable that launches the server
    pub command: String,

    /// Launch arguments; may contain placeholder tokens
    pub args: Vec<String>,

    /// Whether an API key must be captured before a fragment can be built
    pub requires_api_key: bool,

    /// Where to obtain credentials or read about the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_link: Option<String>,

    /// Environment variables the server reads, in prompt order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_env: Vec<EnvVar>,

    /// Explicit builder kind, if any
    #[serde(skip)]
    pub builder: Option<BuilderKind>,
}

impl ServerEntry {
    /// Create an entry with no API key, link or environment.
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        command: impl Into<String>,
        args: &[&str],
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            command: command.into(),
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
            requires_api_key: false,
            documentation_link: None,
            required_env: Vec::new(),
            builder: None,
        }
    }

    /// Mark the server as requiring an API key.
    #[must_use]
    pub fn with_api_key(mut self) -> Self {
        self.requires_api_key = true;
        self
    }

    /// Attach a documentation link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.documentation_link = Some(link.into());
        self
    }

    /// Append a required environment variable.
    #[must_use]
    pub fn with_env(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.required_env.push(EnvVar {
            name: name.into(),
            default: default.into(),
        });
        self
    }

    /// Pin the builder kind instead of deriving it from the entry's shape.
    #[must_use]
    pub fn with_builder(mut self, kind: BuilderKind) -> Self {
        self.builder = Some(kind);
        self
    }

    /// The builder kind this entry is configured with.
    ///
    /// Unset kinds follow the entry's shape: required environment variables
    /// are prompted for, anything else is static. An entry that requires an
    /// API key always gets a secret-capturing kind, found from its arguments
    /// or environment; one with nowhere to put the key is rejected.
    ///
    /// ```rust
    /// use setup_mcp::registry::{BuilderKind, ServerEntry};
    ///
    /// let args = ["--api-key", "YOUR_API_KEY"];
    /// let entry = ServerEntry::new("k", "K", "npx", &args).with_api_key();
    /// assert_eq!(entry.builder_kind().unwrap(), BuilderKind::ArgToken);
    ///
    /// let entry = ServerEntry::new("k", "K", "npx", &["pkg"]).with_api_key();
    /// assert!(entry.builder_kind().is_err());
    /// ```
    pub fn builder_kind(&self) -> Result<BuilderKind, SetupError> {
        let kind = match &self.builder {
            Some(kind) => kind.clone(),
            None if !self.requires_api_key && !self.required_env.is_empty() => {
                BuilderKind::EnvPrompt
            }
            None => BuilderKind::Static,
        };

        if !self.requires_api_key || kind.captures_secret() {
            return Ok(kind);
        }

        self.secret_kind_from_shape().ok_or_else(|| SetupError::NoSecretTarget {
            server: self.key.clone(),
        })
    }

    fn secret_kind_from_shape(&self) -> Option<BuilderKind> {
        if self.args.iter().any(|arg| arg == API_KEY_TOKEN) {
            Some(BuilderKind::ArgToken)
        } else if self.args.iter().any(|arg| arg.starts_with(&format!("{API_KEY_ASSIGNMENT}="))) {
            Some(BuilderKind::ArgAssignment)
        } else if !self.required_env.is_empty() {
            Some(BuilderKind::EnvSecret)
        } else {
            None
        }
    }
}

const MCP_SERVERS_REPO: &str = "https://github.com/modelcontextprotocol/servers";

/// The servers supported out of the box, in prompt order.
pub fn builtin_servers() -> Vec<ServerEntry> {
    vec![
        ServerEntry::new("playwright", "Playwright", "npx", &["@playwright/mcp@latest"]),
        ServerEntry::new("firecrawl-mcp", "Firecrawl", "npx", &["-y", "firecrawl-mcp"])
            .with_api_key()
            .with_builder(BuilderKind::EnvSecret)
            .with_env("FIRECRAWL_API_KEY", "YOUR-API-KEY")
            .with_link("https://www.firecrawl.dev/"),
        ServerEntry::new(
            "context7-mcp",
            "Context7",
            "npx",
            &["-y", "@upstash/context7-mcp", "--api-key", "YOUR_API_KEY"],
        )
        .with_api_key()
        .with_builder(BuilderKind::ArgToken)
        .with_link("https://context7.com/"),
        ServerEntry::new("shadcn-mcp", "ShadCN", "npx", &["shadcn@latest", "mcp"])
            .with_link("https://ui.shadcn.com/"),
        ServerEntry::new("browsermcp", "BrowserMCP", "npx", &["@browsermcp/mcp@latest"])
            .with_link("https://github.com/browsermcp"),
        ServerEntry::new(
            "magic-mcp",
            "21st Magic",
            "npx",
            &["-y", "@21st-dev/magic@latest", "API_KEY=\"your-api-key\""],
        )
        .with_api_key()
        .with_builder(BuilderKind::ArgAssignment)
        .with_link("https://github.com/21st-dev/magic"),
        ServerEntry::new(
            "serena-mcp",
            "Serena",
            "uvx",
            &["--from", "git+https://github.com/oraios/serena", "serena", "start-mcp-server"],
        )
        .with_builder(BuilderKind::Serena)
        .with_link("https://github.com/oraios/serena"),
        ServerEntry::new(
            "filesystem",
            "Filesystem",
            "npx",
            &["-y", "@modelcontextprotocol/server-filesystem", "/path/to/allowed/directory"],
        )
        .with_builder(BuilderKind::PathArg { default: None })
        .with_link(MCP_SERVERS_REPO),
        ServerEntry::new("github", "GitHub", "npx", &["-y", "@modelcontextprotocol/server-github"])
            .with_builder(BuilderKind::EnvPrompt)
            .with_env("GITHUB_PERSONAL_ACCESS_TOKEN", "your-token-here")
            .with_link(MCP_SERVERS_REPO),
        ServerEntry::new("gitlab", "GitLab", "npx", &["-y", "@modelcontextprotocol/server-gitlab"])
            .with_builder(BuilderKind::EnvPrompt)
            .with_env("GITLAB_PERSONAL_ACCESS_TOKEN", "your-token-here")
            .with_env("GITLAB_API_URL", "https://gitlab.com/api/v4")
            .with_link(MCP_SERVERS_REPO),
        ServerEntry::new(
            "postgres",
            "PostgreSQL",
            "npx",
            &["-y", "@modelcontextprotocol/server-postgres", "postgresql://localhost/mydb"],
        )
        .with_builder(BuilderKind::PathArg {
            default: Some("postgresql://localhost/mydb".to_string()),
        })
        .with_link(MCP_SERVERS_REPO),
        ServerEntry::new(
            "sqlite",
            "SQLite",
            "npx",
            &["-y", "@modelcontextprotocol/server-sqlite", "/path/to/database.db"],
        )
        .with_builder(BuilderKind::PathArg {
            default: Some("./database.db".to_string()),
        })
        .with_link(MCP_SERVERS_REPO),
        ServerEntry::new(
            "brave-search",
            "Brave Search",
            "npx",
            &["-y", "@modelcontextprotocol/server-brave-search"],
        )
        .with_builder(BuilderKind::EnvPrompt)
        .with_env("BRAVE_API_KEY", "your-api-key-here")
        .with_link(MCP_SERVERS_REPO),
        ServerEntry::new("memory", "Memory", "npx", &["-y", "@modelcontextprotocol/server-memory"])
            .with_link(MCP_SERVERS_REPO),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_server_keys_are_unique() {
        let servers = builtin_servers();
        let keys: HashSet<_> = servers.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys.len(), servers.len());
        assert_eq!(servers[0].key, "playwright");
    }

    #[test]
    fn test_api_key_servers() {
        let api_key_servers: Vec<_> = builtin_servers()
            .into_iter()
            .filter(|s| s.requires_api_key)
            .map(|s| s.key)
            .collect();
        assert_eq!(api_key_servers, vec!["firecrawl-mcp", "context7-mcp", "magic-mcp"]);
    }

    #[test]
    fn test_gitlab_env_order_and_defaults() {
        let gitlab = builtin_servers().into_iter().find(|s| s.key == "gitlab").unwrap();
        let names: Vec<_> = gitlab.required_env.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["GITLAB_PERSONAL_ACCESS_TOKEN", "GITLAB_API_URL"]);
        assert!(gitlab.required_env[0].is_placeholder());
        assert!(!gitlab.required_env[1].is_placeholder());
    }

    #[test]
    fn test_builtin_builder_kinds() {
        let kinds: Vec<_> = builtin_servers()
            .iter()
            .map(|s| (s.key.clone(), s.builder_kind().unwrap()))
            .collect();
        let kind_of =
            |key: &str| kinds.iter().find(|(k, _)| k == key).map(|(_, kind)| kind.clone());

        assert_eq!(kind_of("playwright"), Some(BuilderKind::Static));
        assert_eq!(kind_of("memory"), Some(BuilderKind::Static));
        assert_eq!(kind_of("firecrawl-mcp"), Some(BuilderKind::EnvSecret));
        assert_eq!(kind_of("context7-mcp"), Some(BuilderKind::ArgToken));
        assert_eq!(kind_of("magic-mcp"), Some(BuilderKind::ArgAssignment));
        assert_eq!(kind_of("serena-mcp"), Some(BuilderKind::Serena));
        assert_eq!(kind_of("filesystem"), Some(BuilderKind::PathArg { default: None }));
        assert_eq!(
            kind_of("sqlite"),
            Some(BuilderKind::PathArg {
                default: Some("./database.db".to_string())
            })
        );
        assert_eq!(kind_of("gitlab"), Some(BuilderKind::EnvPrompt));
        assert_eq!(kind_of("brave-search"), Some(BuilderKind::EnvPrompt));
    }

    #[test]
    fn test_api_key_entries_always_capture_a_secret() {
        let by_token = ServerEntry::new("ctx", "Ctx", "npx", &["--api-key", "YOUR_API_KEY"])
            .with_api_key();
        assert_eq!(by_token.builder_kind().unwrap(), BuilderKind::ArgToken);

        let by_assignment =
            ServerEntry::new("mg", "Mg", "npx", &["pkg", "API_KEY=\"x\""]).with_api_key();
        assert_eq!(by_assignment.builder_kind().unwrap(), BuilderKind::ArgAssignment);

        let by_env = ServerEntry::new("fc", "Fc", "npx", &["pkg"])
            .with_api_key()
            .with_builder(BuilderKind::Static)
            .with_env("FC_KEY", "YOUR-API-KEY");
        assert_eq!(by_env.builder_kind().unwrap(), BuilderKind::EnvSecret);

        let nowhere = ServerEntry::new("bare", "Bare", "npx", &["pkg"]).with_api_key();
        assert!(matches!(
            nowhere.builder_kind(),
            Err(SetupError::NoSecretTarget { ref server }) if server == "bare"
        ));
    }

    #[test]
    fn test_unset_kind_follows_shape() {
        let plain = ServerEntry::new("p", "P", "npx", &["pkg"]);
        assert_eq!(plain.builder_kind().unwrap(), BuilderKind::Static);

        let with_env = ServerEntry::new("e", "E", "npx", &["pkg"]).with_env("TOKEN", "your-token");
        assert_eq!(with_env.builder_kind().unwrap(), BuilderKind::EnvPrompt);
    }

    #[test]
    fn test_firecrawl_placeholder_is_detected() {
        let firecrawl = builtin_servers().into_iter().find(|s| s.key == "firecrawl-mcp").unwrap();
        assert!(firecrawl.required_env[0].is_placeholder());
    }
}
