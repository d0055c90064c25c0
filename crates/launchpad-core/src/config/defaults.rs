//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "launchpad.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "launchpad.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".launchpad.toml",
        ".launchpad.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Launchpad Configuration

[workspace]
marker_file = "lerna.json"
packages_dir = "packages"

[versioning]
tag_prefix = "v"

[registry]
on_unpublished = "error"

[publish]
remote = "origin"
skip_ci_marker = "[skip ci]"
dry_run = false
lerna_command = "npx lerna"

[changelog]
indent = "  "
"#;
