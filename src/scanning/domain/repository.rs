/// A repository as enumerated by the forge's organization listing.
///
/// References are immutable and never persisted; they only address
/// BOM fetches during a scan. The fully-qualified name `owner/name`
/// is the key under which a fetched document is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
    pub visibility: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, visibility: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            visibility: visibility.into(),
        }
    }

    /// Fully-qualified name, the storage key for this repository's document.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn is_public(&self) -> bool {
        self.visibility == "public"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let repo = RepositoryRef::new("acme", "widgets", "public");
        assert_eq!(repo.full_name(), "acme/widgets");
    }

    #[test]
    fn test_is_public() {
        assert!(RepositoryRef::new("acme", "widgets", "public").is_public());
        assert!(!RepositoryRef::new("acme", "secret", "private").is_public());
        assert!(!RepositoryRef::new("acme", "internal", "internal").is_public());
    }
}
