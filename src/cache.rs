//! Memoised dataset previews.
//!
//! A preview is materialised once per dataset version. The version is a token
//! the exploration context bumps each time a different provider is loaded, so
//! invalidation is explicit instead of relying on pointer identity.

use std::fmt;

/// Identity of a loaded dataset. Strictly increasing within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DatasetVersion(u64);

impl DatasetVersion {
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DatasetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Size-bounded, version-keyed memo of an expensive preview accessor.
#[derive(Debug)]
pub struct PreviewCache<T> {
    max_rows: usize,
    entry: Option<(DatasetVersion, T)>,
    computations: usize,
}

impl<T> PreviewCache<T> {
    /// `max_rows` is fixed for the lifetime of the cache.
    pub fn new(max_rows: usize) -> Self {
        Self {
            max_rows,
            entry: None,
            computations: 0,
        }
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Make sure the cached value belongs to `version`.
    ///
    /// `compute` receives the row bound and only runs when the cache is empty
    /// or holds another version. Returns whether it ran.
    pub fn refresh<F>(&mut self, version: DatasetVersion, compute: F) -> bool
    where
        F: FnOnce(usize) -> T,
    {
        if self.version() == Some(version) {
            return false;
        }
        log::debug!("materialising preview for dataset {version} (max {} rows)", self.max_rows);
        self.entry = Some((version, compute(self.max_rows)));
        self.computations += 1;
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    pub fn version(&self) -> Option<DatasetVersion> {
        self.entry.as_ref().map(|(v, _)| *v)
    }

    /// How many times the accessor has been invoked.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_per_version() {
        let mut cache = PreviewCache::new(50);
        let v1 = DatasetVersion::initial();

        assert!(cache.refresh(v1, |n| vec![0; n]));
        assert!(!cache.refresh(v1, |_| panic!("must not recompute")));
        assert_eq!(cache.get().map(Vec::len), Some(50));
        assert_eq!(cache.computations(), 1);

        let v2 = v1.next();
        assert!(cache.refresh(v2, |n| vec![1; n / 2]));
        assert_eq!(cache.get().map(Vec::len), Some(25));
        assert_eq!(cache.version(), Some(v2));
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn versions_increase() {
        let v = DatasetVersion::initial();
        assert!(v.next() > v);
        assert_eq!(v.to_string(), "v1");
    }
}
