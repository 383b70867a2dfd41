//! Post-decode validation of package keys.
//!
//! The decoder passes package keys through untouched. Whether a key still
//! names something installable depends on the software catalog, which loads
//! independently of link decoding; callers run this step once the catalog
//! is available.

use rustc_hash::FxHashSet;

/// The set of package keys currently offered by the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    keys: FxHashSet<String>,
}

impl CatalogContext {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a valid package key.
    pub fn add_package(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Returns true if the catalog offers `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CatalogContext {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of [`validate_packages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageValidation {
    /// Keys present in the catalog, in their original order.
    pub valid: Vec<String>,
    /// Number of keys the catalog does not offer.
    pub invalid: usize,
}

/// Splits decoded package keys into those the catalog offers and a count of
/// those it does not.
pub fn validate_packages(keys: &[String], catalog: &CatalogContext) -> PackageValidation {
    let valid: Vec<String> = keys
        .iter()
        .filter(|key| catalog.contains(key))
        .cloned()
        .collect();
    PackageValidation {
        invalid: keys.len() - valid.len(),
        valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogContext {
        ["Steam.Steam", "Discord.Discord", "Mozilla.Firefox"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_validate_mixed() {
        let keys = vec![
            "Discord.Discord".to_string(),
            "Retired.Tool".to_string(),
            "Steam.Steam".to_string(),
        ];
        let result = validate_packages(&keys, &catalog());
        assert_eq!(result.valid, vec!["Discord.Discord".to_string(), "Steam.Steam".to_string()]);
        assert_eq!(result.invalid, 1);
    }

    #[test]
    fn test_validate_empty_catalog() {
        let keys = vec!["Steam.Steam".to_string()];
        let result = validate_packages(&keys, &CatalogContext::new());
        assert!(result.valid.is_empty());
        assert_eq!(result.invalid, 1);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut catalog = CatalogContext::new();
        catalog.add_package("Steam.Steam");
        assert!(catalog.contains("Steam.Steam"));
        assert!(!catalog.contains("steam.steam"));
        assert_eq!(catalog.len(), 1);
    }
}
