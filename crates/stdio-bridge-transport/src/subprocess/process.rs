//! Process configuration for the forwarded child

use std::collections::HashMap;

/// Default package runner used by the context7 forwarder
pub const DEFAULT_PROGRAM: &str = "npx";

/// Default arguments: fetch and run the context7 MCP server package
pub const DEFAULT_ARGS: &[&str] = &["-y", "@upstash/context7-mcp"];

/// Configuration for spawning the forwarded process
#[derive(Clone, Debug)]
pub struct ProcessConfig {
    /// Program to execute (resolved through `PATH`)
    pub program: String,

    /// Arguments to pass to the program
    pub args: Vec<String>,

    /// Extra environment variables, layered over the inherited environment
    pub env: HashMap<String, String>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
            env: HashMap::new(),
        }
    }
}

impl ProcessConfig {
    /// Create a configuration for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Add an argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add several arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable
    ///
    /// Unlike a sandboxed spawn, the child keeps the parent's environment
    /// (`npx` needs `PATH`, `HOME` and the npm cache settings); values set
    /// here are added on top and win over inherited ones.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Human-readable command line, used in logs and error messages
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
