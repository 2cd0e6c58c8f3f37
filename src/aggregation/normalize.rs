//! Per-value normalization applied before comparison and grouping.

/// How raw cell values are canonicalized before they are compared.
///
/// Whitespace stripping runs first, then case-folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationPolicy {
    /// Remove every whitespace character (not just leading/trailing).
    pub normalize: bool,
    /// Case-fold to lowercase.
    pub lowercase: bool,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self {
            normalize: true,
            lowercase: false,
        }
    }
}

impl NormalizationPolicy {
    /// Leave values exactly as read.
    pub const RAW: Self = Self {
        normalize: false,
        lowercase: false,
    };

    /// Create a policy from both flags.
    pub fn new(normalize: bool, lowercase: bool) -> Self {
        Self {
            normalize,
            lowercase,
        }
    }

    /// Builder-style setter for [`Self::lowercase`].
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Canonicalize one raw value.
    pub fn apply(&self, raw: &str) -> String {
        let value: String = if self.normalize {
            raw.chars().filter(|c| !c.is_whitespace()).collect()
        } else {
            raw.to_owned()
        };
        if self.lowercase {
            value.to_lowercase()
        } else {
            value
        }
    }
}
