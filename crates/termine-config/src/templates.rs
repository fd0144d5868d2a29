//! Configuration templates written by `termine init`.
//!
//! Each template is a complete, valid `.termine.toml` documenting every setting.
//! It is handed out fully commented so a fresh file changes nothing until the
//! user opts in line by line.

/// Template for a project `.termine.toml`.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.termine.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the commented project template.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the commented global template.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every setting line with `# `, leaving comments and blank lines.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}
