//! Context7 MCP forwarder
//!
//! Runs `npx -y @upstash/context7-mcp` on this process's own stdin, stdout
//! and stderr, then exits with the child's exit code (`0` if the child was
//! killed by a signal).
//!
//! Any arguments replace the default command line:
//!
//! ```bash
//! context7-forwarder                      # npx -y @upstash/context7-mcp
//! context7-forwarder node ./server.js     # node ./server.js
//! ```

use stdio_bridge_transport::{ProcessConfig, ProcessForwarder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stdio_bridge::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.split_first() {
        Some((program, rest)) => ProcessConfig::new(program).with_args(rest.iter().cloned()),
        None => ProcessConfig::default(),
    };

    let code = ProcessForwarder::new(config).run().await?;
    std::process::exit(code);
}
