use crate::ident::Identifier;
use crate::UrlError;
use std::fmt;
use url::Url;

/// Validated base URL that profile links are derived from
///
/// A profile link is the plain concatenation of the base and the identifier,
/// so the base must end with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBase {
    url: Url,
}

impl ProfileBase {
    /// Parses and validates a base URL
    ///
    /// # Arguments
    ///
    /// * `base` - The base URL string, e.g. `https://steamcommunity.com/id/`
    ///
    /// # Returns
    ///
    /// * `Ok(ProfileBase)` - The base is an absolute HTTP(S) URL ending with `/`
    /// * `Err(UrlError)` - The base could not be used to build profile links
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_sweep::url::ProfileBase;
    /// use profile_sweep::Identifier;
    ///
    /// let base = ProfileBase::parse("https://example.com/id/").unwrap();
    /// let id = Identifier::new("abc");
    /// assert_eq!(base.link_for(&id), "https://example.com/id/abc");
    /// ```
    pub fn parse(base: &str) -> Result<Self, UrlError> {
        let url = Url::parse(base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }

        if url.query().is_some() || url.fragment().is_some() || !url.path().ends_with('/') {
            return Err(UrlError::MissingTrailingSlash(base.to_string()));
        }

        Ok(Self { url })
    }

    /// Returns the profile link for an identifier
    pub fn link_for(&self, identifier: &Identifier) -> String {
        format!("{}{}", self.url, identifier)
    }

    /// Returns the base as a string slice
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ProfileBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
