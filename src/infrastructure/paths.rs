//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host's working directory.
const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// `/host` maps to the cwd Zellij was started from, normally the home
/// directory, so this resolves to `~/.local/share/zellij/bookscout`.
///
/// ```
/// use bookscout::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/bookscout"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("bookscout")
}

/// Rewrites a leading `~` to the sandbox host mount.
///
/// ```
/// use bookscout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/abs/dusk.toml"), "/abs/dusk.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        HOST_ROOT.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else {
        path.to_string()
    }
}

/// Resolves a user-supplied path to where the plugin can read it.
///
/// `~`-relative paths go through [`expand_tilde`]; other relative paths are
/// taken relative to the host mount; absolute paths are kept.
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    let expanded = expand_tilde(path.trim());
    let candidate = PathBuf::from(&expanded);

    if candidate.is_absolute() {
        candidate
    } else {
        PathBuf::from(HOST_ROOT).join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert_eq!(expand_tilde("~user/b"), "~user/b");
    }

    #[test]
    fn relative_paths_resolve_under_host() {
        assert_eq!(resolve_host_path("themes/dusk.toml"), PathBuf::from("/host/themes/dusk.toml"));
        assert_eq!(resolve_host_path(" ~/dusk.toml "), PathBuf::from("/host/dusk.toml"));
        assert_eq!(resolve_host_path("/etc/dusk.toml"), PathBuf::from("/etc/dusk.toml"));
    }
}
