//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host directory Zellij was started from.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the trace files.
///
/// Resolves to `~/.local/share/zellij/popcorn` on the host when Zellij is
/// started from the home directory.
///
/// ```
/// use popcorn::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/popcorn"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/popcorn")
}

/// Maps `~` and `~/...` onto the sandbox host mount, leaving other paths alone.
///
/// Used for the `theme_file` option, which users write with host paths.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from(HOST_ROOT),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("{HOST_ROOT}{rest}")),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host() {
        assert_eq!(expand_tilde("~"), PathBuf::from("/host"));
        assert_eq!(expand_tilde("~/themes/dark.toml"), PathBuf::from("/host/themes/dark.toml"));
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/etc/popcorn.toml"), PathBuf::from("/etc/popcorn.toml"));
        assert_eq!(expand_tilde("~user/theme.toml"), PathBuf::from("~user/theme.toml"));
        assert_eq!(expand_tilde("themes/dark.toml"), PathBuf::from("themes/dark.toml"));
    }
}
