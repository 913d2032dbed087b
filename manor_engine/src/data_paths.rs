use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Environment variable that overrides data directory detection.
pub const DATA_DIR_ENV: &str = "MANOR_DATA_DIR";

const BUNDLED_DATA: &str = "manor_engine/data";

/// Cached path to the directory containing the game's scenario and config files.
static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_data_root);

/// Construct a data path relative to the resolved data root.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

/// Resolve the most likely location of the runtime data directory.
fn detect_data_root() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    let exe_path = env::current_exe().ok();
    candidate_roots(exe_path.as_deref())
        .into_iter()
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from(BUNDLED_DATA))
}

/// Places the data directory is looked for, in order: relative to the working
/// directory, beside the executable, then one level above it.
fn candidate_roots(exe_path: Option<&Path>) -> Vec<PathBuf> {
    let mut bases = vec![PathBuf::new()];
    if let Some(dir) = exe_path.and_then(Path::parent) {
        bases.push(dir.to_path_buf());
        if let Some(parent) = dir.parent() {
            bases.push(parent.to_path_buf());
        }
    }
    bases
        .iter()
        .flat_map(|base| [base.join(BUNDLED_DATA), base.join("data")])
        .collect()
}
