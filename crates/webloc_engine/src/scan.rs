use std::io;
use std::path::Path;

use engine_logging::engine_debug;
use walkdir::WalkDir;

use crate::shortcut::ShortcutStore;
use crate::ShortcutInput;

pub const SHORTCUT_EXTENSION: &str = "webloc";

/// Recursively collects shortcut files under `root`, in file-name order.
///
/// Files with the shortcut extension that the store cannot decode are skipped.
pub fn scan_shortcuts(root: &Path, store: &dyn ShortcutStore) -> io::Result<Vec<ShortcutInput>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", root.display()),
        ));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                engine_debug!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_shortcut_extension(entry.path()) {
            continue;
        }
        match store.read_url(entry.path()) {
            Some(url) => found.push(ShortcutInput::new(entry.path(), url)),
            None => engine_debug!("not a shortcut: {}", entry.path().display()),
        }
    }
    Ok(found)
}

fn has_shortcut_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SHORTCUT_EXTENSION))
}
