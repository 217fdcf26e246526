use std::collections::HashMap;
use std::path::PathBuf;

use crate::ShortcutRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    First,
    Duplicate { of: PathBuf },
}

/// First-seen-wins map from canonical URL to the path that claimed it.
///
/// Single-threaded by contract; there is no removal.
#[derive(Debug, Default)]
pub struct DedupStore {
    claimed: HashMap<String, PathBuf>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, record: &ShortcutRecord) -> Decision {
        if let Some(original) = self.claimed.get(record.canonical_url()) {
            return Decision::Duplicate {
                of: original.clone(),
            };
        }
        self.claimed
            .insert(record.canonical_url().to_string(), record.path().to_path_buf());
        Decision::First
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins() {
        let mut store = DedupStore::new();
        let a = ShortcutRecord::new("/x/a.webloc", "https://example.com");
        let b = ShortcutRecord::new("/x/b.webloc", "https://example.com");
        let c = ShortcutRecord::new("/x/c.webloc", "https://example.org");

        assert_eq!(store.offer(&a), Decision::First);
        assert_eq!(
            store.offer(&b),
            Decision::Duplicate {
                of: PathBuf::from("/x/a.webloc")
            }
        );
        assert_eq!(store.offer(&c), Decision::First);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn repeated_offer_of_same_record_is_duplicate_of_itself() {
        let mut store = DedupStore::new();
        let a = ShortcutRecord::new("/x/a.webloc", "u");
        store.offer(&a);
        assert_eq!(
            store.offer(&a),
            Decision::Duplicate {
                of: PathBuf::from("/x/a.webloc")
            }
        );
    }
}
