//! Cache-busting suffix for static asset and template URLs.
//!
//! DESIGN
//! ======
//! The suffix is `?v=<release>` when the deployed release is known, so
//! browser caches survive reloads and are dropped on deploy. Development
//! builds ship an empty release string and get a random token instead,
//! which defeats caching for every fresh application load.
//!
//! The value is computed once per load and read many times; the process-wide
//! copy lives in a `OnceLock`.

#[cfg(test)]
#[path = "version_test.rs"]
mod version_test;

use std::fmt;
use std::sync::OnceLock;

/// Length of the random token used when no release version is known.
pub const RANDOM_VERSION_STRING_LENGTH: usize = 5;

/// DOM id of the hidden input carrying the release version.
pub const VERSION_ELEMENT_ID: &str = "EDUMFA_VERSION_NUMBER";

static SUFFIX: OnceLock<VersionSuffix> = OnceLock::new();

/// A `?v=...` query suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionSuffix(String);

impl VersionSuffix {
    /// Compute the suffix for one application load.
    ///
    /// A non-empty `release` is used verbatim; an empty one yields a fresh
    /// random alphanumeric token of `random_len` characters.
    #[must_use]
    pub fn new(release: &str, random_len: usize) -> Self {
        let value = if release.is_empty() {
            random_token(random_len)
        } else {
            release.to_owned()
        };
        Self(format!("?v={value}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after `?v=`.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0[3..]
    }

    /// Append the suffix to a URL.
    #[must_use]
    pub fn decorate(&self, url: &str) -> String {
        format!("{url}{}", self.0)
    }
}

impl fmt::Display for VersionSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Install the process-wide suffix. The first call wins; later calls return
/// the already installed value unchanged.
pub fn install(release: &str, random_len: usize) -> &'static VersionSuffix {
    SUFFIX.get_or_init(|| {
        let suffix = VersionSuffix::new(release, random_len);
        log::debug!("version suffix {suffix}");
        suffix
    })
}

/// The installed suffix, installing it from the DOM on first use.
pub fn suffix() -> &'static VersionSuffix {
    SUFFIX.get_or_init(|| {
        let release = crate::util::dom::input_value(VERSION_ELEMENT_ID).unwrap_or_default();
        VersionSuffix::new(&release, RANDOM_VERSION_STRING_LENGTH)
    })
}

/// Lowercase hex drawn from v4 UUIDs; every character is alphanumeric.
fn random_token(len: usize) -> String {
    let mut out = String::with_capacity(len + 32);
    while out.len() < len {
        out.push_str(&uuid::Uuid::new_v4().simple().to_string());
    }
    out.truncate(len);
    out
}
