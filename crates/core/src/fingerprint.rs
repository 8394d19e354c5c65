//! Build-flag fingerprint
//!
//! The revision a package stamps is `<upstream version>+<fingerprint>`,
//! where the fingerprint digests everything that can change the produced
//! artifact besides the version: build mode, link mode, host OS and the
//! descriptor's own flag-relevant inputs. Changing any of those invalidates
//! the stamp without anyone maintaining a revision counter by hand.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::settings::Settings;

/// Truncation keeps revision strings readable; 12 hex chars is plenty for a
/// cache key compared against exactly one expected value.
const FINGERPRINT_LEN: usize = 12;

/// Digest of a package's build-affecting inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest the settings plus descriptor-specific `extra` inputs.
    ///
    /// Inputs are fed with separators so `["ab", "c"]` and `["a", "bc"]`
    /// digest differently.
    pub fn compute<I, S>(settings: &Settings, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hasher = Sha256::new();
        for part in [
            settings.build_mode().as_str(),
            settings.link_mode().as_str(),
            settings.os().as_str(),
        ] {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        for part in extra {
            hasher.update(part.as_ref().as_bytes());
            hasher.update([0u8]);
        }

        let full = hex::encode(hasher.finalize());
        Fingerprint(full[..FINGERPRINT_LEN].to_string())
    }

    /// Digest of the settings alone, for descriptors without extra inputs.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::compute(settings, std::iter::empty::<&str>())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
