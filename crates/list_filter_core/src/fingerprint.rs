use std::fmt;

use sha2::{Digest, Sha256};

const LEADING_NAMES: usize = 3;

/// Approximate identity of the list currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ListFingerprint(String);

impl ListFingerprint {
    /// Builds the fingerprint from the extracted names (in list order) and the
    /// total candidate count. Only the first three names are used.
    pub fn from_names<'a, I>(names: I, candidate_count: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut key = candidate_count.to_string();
        for name in names.into_iter().take(LEADING_NAMES) {
            key.push('|');
            key.push_str(name);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short hex digest, safe to log.
    pub fn digest(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut hex = String::with_capacity(8);
        for byte in digest.iter().take(4) {
            use std::fmt::Write;
            let _ = write!(&mut hex, "{byte:02x}");
        }
        hex
    }
}

impl fmt::Display for ListFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ListFingerprint;

    #[test]
    fn uses_count_and_first_three_names() {
        let fp = ListFingerprint::from_names(["a", "b", "c", "d"], 4);
        assert_eq!(fp.as_str(), "4|a|b|c");
    }

    #[test]
    fn count_change_changes_identity() {
        let short = ListFingerprint::from_names(["a", "b", "c"], 3);
        let long = ListFingerprint::from_names(["a", "b", "c"], 30);
        assert_ne!(short, long);
        assert_ne!(short.digest(), long.digest());
        assert_eq!(short.digest().len(), 8);
    }
}
