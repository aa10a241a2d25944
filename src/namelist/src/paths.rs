// src/paths.rs

//! User and environment expansion of paths given to `read`/`write`.

use std::path::{Path, PathBuf};

/// Expand `$VAR` / `${VAR}` references, then a leading `~`.
///
/// Unknown variables and a missing home directory leave the text as is.
pub fn expand(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    let expanded = shellexpand::full_with_context_no_errors(text, home_dir, |name| {
        std::env::var(name).ok()
    });
    PathBuf::from(expanded.into_owned())
}

fn home_dir() -> Option<String> {
    dirs::home_dir().and_then(|home| home.to_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_vars() {
        std::env::set_var("ESPRESSORS_TEST_DIR", "/scratch/run");
        assert_eq!(
            expand(Path::new("$ESPRESSORS_TEST_DIR/pw.in")),
            PathBuf::from("/scratch/run/pw.in")
        );
        assert_eq!(
            expand(Path::new("${ESPRESSORS_TEST_DIR}.bak/pw.in")),
            PathBuf::from("/scratch/run.bak/pw.in")
        );
    }

    #[test]
    fn test_unknown_variables_are_kept() {
        assert_eq!(
            expand(Path::new("$ESPRESSORS_UNSET_VAR/a/${ESPRESSORS_UNSET_VAR}")),
            PathBuf::from("$ESPRESSORS_UNSET_VAR/a/${ESPRESSORS_UNSET_VAR}")
        );
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand(Path::new("~/pw.in")), home.join("pw.in"));
            assert_eq!(expand(Path::new("~")), home);
        }
        assert_eq!(
            expand(Path::new("relative/pw.in")),
            PathBuf::from("relative/pw.in")
        );
    }
}
