//! Source access port for the runner.
//!
//! Each operation independently re-reads its target through the store and
//! persists at most one write; two operations on the same file never race
//! because order is guaranteed by program order alone.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;

pub trait SourceStore {
    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String>;
    fn write(&mut self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()>;
    fn exists(&self, rel: &Utf8Path) -> bool;
}

/// Filesystem store rooted at the repo root. Writes go straight to disk.
pub struct FsStore {
    root: Utf8PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn abs(&self, rel: &Utf8Path) -> Utf8PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

impl SourceStore for FsStore {
    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(rel);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }

    fn write(&mut self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        let abs = self.abs(rel);
        fs::write(&abs, contents).with_context(|| format!("write {}", abs))
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.abs(rel).exists()
    }
}

/// Dry-run store: reads fall through to the inner store until a write lands
/// in the in-memory overlay, after which later operations see the overlay.
/// Nothing ever reaches the inner store.
pub struct OverlayStore<S> {
    inner: S,
    overlay: BTreeMap<Utf8PathBuf, String>,
}

impl<S: SourceStore> OverlayStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            overlay: BTreeMap::new(),
        }
    }
}

impl<S: SourceStore> SourceStore for OverlayStore<S> {
    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        if let Some(contents) = self.overlay.get(rel) {
            return Ok(contents.clone());
        }
        self.inner.read_to_string(rel)
    }

    fn write(&mut self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        self.overlay.insert(rel.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.overlay.contains_key(rel) || self.inner.exists(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayStore, SourceStore};
    use camino::{Utf8Path, Utf8PathBuf};
    use std::collections::BTreeMap;

    struct MapStore(BTreeMap<Utf8PathBuf, String>);

    impl SourceStore for MapStore {
        fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
            self.0
                .get(rel)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("missing {}", rel))
        }

        fn write(&mut self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
            self.0.insert(rel.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn exists(&self, rel: &Utf8Path) -> bool {
            self.0.contains_key(rel)
        }
    }

    #[test]
    fn overlay_composes_writes_without_touching_inner() {
        let mut inner = BTreeMap::new();
        inner.insert(Utf8PathBuf::from("a.ts"), "old".to_string());
        let mut store = OverlayStore::new(MapStore(inner));

        store.write(Utf8Path::new("a.ts"), "new").unwrap();
        assert_eq!(store.read_to_string(Utf8Path::new("a.ts")).unwrap(), "new");
        assert_eq!(
            store.inner.read_to_string(Utf8Path::new("a.ts")).unwrap(),
            "old"
        );
    }

    #[test]
    fn overlay_reads_fall_through_before_first_write() {
        let mut inner = BTreeMap::new();
        inner.insert(Utf8PathBuf::from("a.ts"), "old".to_string());
        let store = OverlayStore::new(MapStore(inner));
        assert_eq!(store.read_to_string(Utf8Path::new("a.ts")).unwrap(), "old");
        assert!(store.exists(Utf8Path::new("a.ts")));
        assert!(!store.exists(Utf8Path::new("b.ts")));
    }
}
