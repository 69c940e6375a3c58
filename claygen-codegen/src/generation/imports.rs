//! Package alias bookkeeping.

use std::collections::HashMap;

use claygen_core::base_name;
use claygen_ir::GoPackage;
use indexmap::IndexMap;

/// Session-wide table of package aliases.
///
/// Every import path used by generated code is bound to exactly one local
/// name, and no two paths share a local name. Bindings are never removed.
///
/// # Example
///
/// ```
/// use claygen_codegen::ImportRegistry;
///
/// let mut registry = ImportRegistry::new();
/// let a = registry.bind("a/pkg");
/// let b = registry.bind("b/pkg");
///
/// assert_eq!(a.local_name(), "pkg");
/// assert_eq!(b.local_name(), "pkg_0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    /// Local name -> import path, in reservation order.
    aliases: IndexMap<String, String>,
    /// Import path -> local name.
    paths: HashMap<String, String>,
}

impl ImportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `alias` for `path`.
    ///
    /// Succeeds if the alias is free or already reserved for the same path.
    /// Fails if the alias belongs to another path, or if `path` is already
    /// bound under a different alias.
    pub fn reserve(&mut self, alias: &str, path: &str) -> bool {
        if let Some(taken) = self.aliases.get(alias) {
            return taken == path;
        }
        if self.paths.contains_key(path) {
            return false;
        }
        self.aliases.insert(alias.to_string(), path.to_string());
        self.paths.insert(path.to_string(), alias.to_string());
        true
    }

    /// Bind `path` under its last path segment, aliasing on collision.
    pub fn bind(&mut self, path: &str) -> GoPackage {
        let name = base_name(path).to_string();
        self.bind_as(path, &name)
    }

    /// Bind `path` with a preferred package name.
    ///
    /// Returns the existing binding if `path` was bound before. Otherwise tries
    /// `name`, then `name_0`, `name_1`, ... until a reservation succeeds.
    pub fn bind_as(&mut self, path: &str, name: &str) -> GoPackage {
        let mut pkg = GoPackage::new(path, name);

        if let Some(existing) = self.paths.get(path) {
            if existing != name {
                pkg.alias = Some(existing.clone());
            }
            return pkg;
        }

        if self.reserve(name, path) {
            return pkg;
        }

        let mut counter: u64 = 0;
        loop {
            let alias = format!("{}_{}", name, counter);
            if self.reserve(&alias, path) {
                pkg.alias = Some(alias);
                return pkg;
            }
            counter += 1;
        }
    }

    /// Local name bound to `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.paths.get(path).map(String::as_str)
    }

    /// Iterate over `(local name, path)` pairs in reservation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of bound paths.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Ordered import list, deduplicated by path.
///
/// The first package inserted for a path wins; later inserts for the same
/// path are ignored.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    packages: IndexMap<String, GoPackage>,
}

impl ImportSet {
    /// Create a new empty import set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. Returns false if its path was already present.
    pub fn insert(&mut self, pkg: GoPackage) -> bool {
        if self.packages.contains_key(&pkg.path) {
            return false;
        }
        self.packages.insert(pkg.path.clone(), pkg);
        true
    }

    /// Check if a path is already imported.
    pub fn contains(&self, path: &str) -> bool {
        self.packages.contains_key(path)
    }

    /// Iterate over packages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GoPackage> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Consume the set, returning packages in insertion order.
    pub fn into_vec(self) -> Vec<GoPackage> {
        self.packages.into_values().collect()
    }
}

impl Extend<GoPackage> for ImportSet {
    fn extend<T: IntoIterator<Item = GoPackage>>(&mut self, iter: T) {
        for pkg in iter {
            self.insert(pkg);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_reserve() {
        let mut registry = ImportRegistry::new();

        assert!(registry.reserve("pkg", "a/pkg"));
        assert!(registry.reserve("pkg", "a/pkg"));
        assert!(!registry.reserve("pkg", "b/pkg"));
        // a/pkg already has a name
        assert!(!registry.reserve("other", "a/pkg"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_bind_collision_gets_suffix() {
        let mut registry = ImportRegistry::new();

        let a = registry.bind("a/pkg");
        let b = registry.bind("b/pkg");
        let c = registry.bind("c/pkg");

        assert_eq!(a.alias, None);
        assert_eq!(a.name, "pkg");
        assert_eq!(b.alias.as_deref(), Some("pkg_0"));
        assert_eq!(c.alias.as_deref(), Some("pkg_1"));
    }

    #[test]
    fn test_rebind_is_stable() {
        let mut registry = ImportRegistry::new();

        registry.bind("a/pkg");
        let first = registry.bind("b/pkg");
        let again = registry.bind("b/pkg");

        assert_eq!(first, again);
        assert_eq!(registry.lookup("b/pkg"), Some("pkg_0"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_bind_skips_suffixes_taken_by_other_paths() {
        let mut registry = ImportRegistry::new();
        assert!(registry.reserve("pkg_0", "x/pkg_0"));

        registry.bind("a/pkg");
        let b = registry.bind("b/pkg");

        assert_eq!(b.local_name(), "pkg_1");
    }

    #[test]
    fn test_bind_as_uses_declared_name() {
        let mut registry = ImportRegistry::new();

        let v1 = registry.bind_as("github.com/acme/api/v1", "apiv1");
        let plain = registry.bind("github.com/acme/api/v1");

        assert_eq!(v1.local_name(), "apiv1");
        // rebinding under a different preferred name keeps the first binding
        assert_eq!(plain.name, "v1");
        assert_eq!(plain.local_name(), "apiv1");
    }

    #[test]
    fn test_bindings_form_a_bijection() {
        let paths = [
            "context",
            "github.com/pkg/errors",
            "a/errors",
            "b/errors",
            "a/pkg",
            "b/pkg",
            "a/errors",
            "errors_0",
            "c/errors",
        ];

        let mut registry = ImportRegistry::new();
        let mut seen: HashMap<String, String> = HashMap::new();

        for path in paths {
            let pkg = registry.bind(path);
            let name = pkg.local_name().to_string();
            if let Some(previous) = seen.insert(path.to_string(), name.clone()) {
                assert_eq!(previous, name, "rebinding {path} changed its name");
            }
        }

        let names: HashSet<_> = seen.values().collect();
        assert_eq!(names.len(), seen.len());
        assert_eq!(registry.len(), seen.len());
    }

    #[test]
    fn test_iter_in_reservation_order() {
        let mut registry = ImportRegistry::new();
        registry.bind("context");
        registry.bind("github.com/pkg/errors");

        let entries: Vec<_> = registry.iter().collect();
        assert_eq!(
            entries,
            vec![("context", "context"), ("errors", "github.com/pkg/errors")]
        );
    }

    #[test]
    fn test_import_set_dedups_by_path() {
        let mut imports = ImportSet::new();

        assert!(imports.insert(GoPackage::new("context", "context")));
        assert!(imports.insert(GoPackage::new("b/pkg", "pkg").with_alias("pkg_0")));
        assert!(!imports.insert(GoPackage::new("context", "ctx")));

        let names: Vec<_> = imports.iter().map(GoPackage::local_name).collect();
        assert_eq!(names, vec!["context", "pkg_0"]);
        assert!(imports.contains("b/pkg"));
    }
}
