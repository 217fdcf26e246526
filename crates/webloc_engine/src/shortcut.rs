use std::path::Path;

/// Read-only access to the URL stored in a shortcut file.
pub trait ShortcutStore {
    /// Returns the embedded URL, or `None` when `path` is not a valid shortcut.
    fn read_url(&self, path: &Path) -> Option<String>;
}

/// `.webloc` files: XML or binary property lists with a top-level `URL` string.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlistShortcutStore;

impl ShortcutStore for PlistShortcutStore {
    fn read_url(&self, path: &Path) -> Option<String> {
        let value = plist::Value::from_file(path).ok()?;
        let url = value.as_dictionary()?.get("URL")?.as_string()?.trim();
        (!url.is_empty()).then(|| url.to_string())
    }
}
