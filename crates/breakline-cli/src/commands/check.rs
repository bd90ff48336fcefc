//! Check command implementation.

use anyhow::{Context, Result};
use breakline_core::{Analyzer, Config, RuleBox};
use breakline_rules::rules_from_config;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the check command.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run.
    pub rules_filter: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Whether to write fixes back.
    pub fix: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    let fail_on = config.fail_threshold();

    let mut rules = rules_from_config(&config).context("Invalid rule configuration")?;
    if let Some(filter) = &options.rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = filter_rules(rules, &names);
    }

    let mut builder = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .fix(options.fix);
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.base_dir())?;

    if options.fix && result.files_fixed > 0 {
        tracing::info!("Fixed {} file(s)", result.files_fixed);
    }

    // Exit with error code if anything at or above the threshold remains
    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Keeps the rules named in `names`, by rule name or code.
fn filter_rules(rules: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    for name in names {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|r| names.contains(&r.name()) || names.contains(&r.code()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakline_rules::all_rules;

    #[test]
    fn filter_by_name_or_code() {
        let rules = filter_rules(all_rules(), &["multiline-if-statement", "BL003", "nope"]);
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["multiline-if-statement", "multiline-logical-expression"]
        );
    }

    #[test]
    fn default_source_loads_default_config() {
        let config = load_config(&ConfigSource::Default).expect("default config");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let source = ConfigSource::Explicit("/nonexistent/breakline.toml".into());
        assert!(load_config(&source).is_err());
    }
}
