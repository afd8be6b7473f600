use std::path::{Path, PathBuf};

use super::environment::{EnvLookup, home_dir, process_env};

/// Resolves a leading `~` against the home directory
///
/// Paths without a leading `~` (and `~user` forms) are returned unchanged.
///
/// # Examples
///
/// ```no_run
/// use cchistory::expand_tilde;
///
/// // "/Users/alice/.claude-history" if HOME=/Users/alice
/// let data_dir = expand_tilde("~/.claude-history");
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, &process_env)
}

pub(crate) fn expand_tilde_with(path: &str, env: EnvLookup<'_>) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match home_dir(env) {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// Only whole leading components are replaced, so `/Users/alice2` is left
/// alone when the home directory is `/Users/alice`.
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_with(path, &process_env)
}

pub(crate) fn format_path_with_tilde_with(path: &Path, env: EnvLookup<'_>) -> String {
    if let Some(home) = home_dir(env)
        && let Ok(rest) = path.strip_prefix(&home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
