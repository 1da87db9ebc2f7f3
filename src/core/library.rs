use std::io;
use std::path::{Path, PathBuf};

/// All `.mp3` files below `root`, sorted.
pub fn scan_mp3s(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_dir(root, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk_dir(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", dir.display())))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_dir() {
            walk_dir(&path, out)?;
        } else if is_mp3(&path) {
            out.push(path);
        }
    }

    Ok(())
}

pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}
