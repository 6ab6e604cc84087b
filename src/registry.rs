use std::collections::HashMap;
use std::path::PathBuf;
#[cfg(test)]
use std::path::Path;

use crate::FileIdentity;

/// All registered paths sharing one identity key
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub key: FileIdentity,
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    pub fn is_duplicate(&self) -> bool {
        self.count() > 1
    }
}

/// Groups with more than one path, in first-seen key order
#[derive(Debug)]
pub struct DuplicateReport<'a> {
    pub groups: Vec<&'a DuplicateGroup>,
    /// Sum of group sizes over the reported groups
    pub duplicate_files: usize,
}

impl DuplicateReport<'_> {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Collects paths by identity key for the lifetime of one run.
///
/// Groups live in a vector in first-seen order; the map only indexes into it.
/// Paths are appended, never removed.
#[derive(Debug, Default)]
pub struct DuplicateRegistry {
    index: HashMap<FileIdentity, usize>,
    groups: Vec<DuplicateGroup>,
}

impl DuplicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: FileIdentity, path: impl Into<PathBuf>) {
        let path = path.into();

        if let Some(&slot) = self.index.get(&key) {
            self.groups[slot].paths.push(path);
            return;
        }

        self.index.insert(key.clone(), self.groups.len());
        self.groups.push(DuplicateGroup {
            key,
            paths: vec![path],
        });
    }

    #[cfg(test)]
    pub fn get(&self, key: &FileIdentity) -> Option<&DuplicateGroup> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    #[cfg(test)]
    /// Every group, including singletons, in first-seen order
    pub fn groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter()
    }

    /// Number of distinct keys seen
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[cfg(test)]
    pub fn contains_path(&self, path: &Path) -> bool {
        self.groups.iter().any(|g| g.paths.iter().any(|p| p == path))
    }

    pub fn report(&self) -> DuplicateReport<'_> {
        let groups: Vec<&DuplicateGroup> =
            self.groups.iter().filter(|g| g.is_duplicate()).collect();
        let duplicate_files = groups.iter().map(|g| g.count()).sum();

        DuplicateReport {
            groups,
            duplicate_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_same_key_collects_all_paths() {
        let mut registry = DuplicateRegistry::new();
        let key = FileIdentity::Inode(42);
        for name in ["a", "b", "c", "d"] {
            registry.register(key.clone(), format!("/x/{}", name));
        }

        let group = registry.get(&key).unwrap();
        assert_eq!(group.count(), 4);
        let mut paths: Vec<_> = group.paths.iter().map(|p| p.display().to_string()).collect();
        paths.sort();
        assert_eq!(paths, ["/x/a", "/x/b", "/x/c", "/x/d"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_singleton_excluded_from_report() {
        let mut registry = DuplicateRegistry::new();
        registry.register(FileIdentity::Inode(1), "/only");

        assert_eq!(registry.len(), 1);
        assert!(registry.contains_path(Path::new("/only")));
        let report = registry.report();
        assert!(report.is_empty());
        assert_eq!(report.duplicate_files, 0);
        assert_eq!(report.group_count(), 0);
    }

    #[test]
    fn test_report_keeps_first_seen_order() {
        let mut registry = DuplicateRegistry::new();
        registry.register(FileIdentity::Inode(30), "/c1");
        registry.register(FileIdentity::Inode(10), "/a1");
        registry.register(FileIdentity::Inode(20), "/b1");
        registry.register(FileIdentity::Inode(10), "/a2");
        registry.register(FileIdentity::Inode(30), "/c2");
        registry.register(FileIdentity::Inode(30), "/c3");

        let report = registry.report();
        let keys: Vec<_> = report.groups.iter().map(|g| g.key.clone()).collect();
        assert_eq!(keys, [FileIdentity::Inode(30), FileIdentity::Inode(10)]);
        assert_eq!(report.duplicate_files, 5);
        assert_eq!(report.group_count(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = DuplicateRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.report().is_empty());
        assert_eq!(registry.groups().count(), 0);
    }
}
