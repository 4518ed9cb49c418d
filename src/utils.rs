use std::path::PathBuf;

/// Double every `$` so the text survives a later interpolation pass unchanged.
pub fn escape_dollars(s: &str) -> String {
    s.replace('$', "$$")
}

/// Expand a leading `~/` against the home directory; other paths are returned as written.
pub fn expand_home(raw_path: &str) -> PathBuf {
    let path_str = raw_path.trim();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(path_str)
}
