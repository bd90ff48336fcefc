//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# breakline configuration

# Lowest severity that makes `breakline check` exit with status 1
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.max-len-newline-perchained-call]
enabled = true
# severity = "warning"  # Override default severity
ignore_chain_with_depth = 2
# max_len = 100
# tab_width = 4

[rules.multiline-if-statement]
enabled = true

[rules.multiline-logical-expression]
enabled = true
max_length = 80
max_items = 3
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("breakline.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created breakline.toml");
    println!("\nNext steps:");
    println!("  1. Edit breakline.toml to configure rules");
    println!("  2. Run: breakline check");

    Ok(())
}
