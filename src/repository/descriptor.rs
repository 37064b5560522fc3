//! Immutable description of the repository being scaffolded.

use camino::{Utf8Path, Utf8PathBuf};
use url::Url;

use super::error::ValidationError;
use super::host::derive_api_base;
use super::visibility::Visibility;

const URL_SUFFIX: &str = ".git";

/// Owner, target directory, visibility and remote base URL of a repository.
///
/// The repository name, full name and clone URL are derived on access from
/// the stored fields, so two descriptors built from the same inputs are
/// interchangeable. Fields are private and validated once in
/// [`RepositoryDescriptor::new`]; nothing can change them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryDescriptor {
    owner: String,
    directory: Utf8PathBuf,
    visibility: Visibility,
    base_url: Url,
}

impl RepositoryDescriptor {
    /// Validates the inputs and builds a descriptor.
    ///
    /// The owner is trimmed and the base URL gains a trailing `/` when it
    /// lacks one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyOwner`] or
    /// [`ValidationError::InvalidOwner`] for a blank or malformed owner,
    /// [`ValidationError::RelativeDirectory`] when the directory is not
    /// absolute, [`ValidationError::MissingName`] when no name can be derived
    /// from the directory, and [`ValidationError::InvalidBaseUrl`] when the base
    /// URL does not parse or cannot carry a path.
    pub fn new(
        owner: &str,
        directory: impl Into<Utf8PathBuf>,
        visibility: Visibility,
        base_url: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            owner: validate_owner(owner)?,
            directory: validate_directory(directory.into())?,
            visibility,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Repository owner (user or organisation login).
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Absolute path of the local working copy.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Requested visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Base URL of the hosting service, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Repository name: the last segment of the directory.
    #[must_use]
    pub fn name(&self) -> &str {
        self.directory.file_name().unwrap_or_default()
    }

    /// `owner/name` identifier used by the hosting service.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name())
    }

    /// Clone URL: the base URL followed by `owner/name.git`.
    #[must_use]
    pub fn remote_url(&self) -> Url {
        let mut url = self.base_url.clone();
        // Construction rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.owner)
                .push(&format!("{}{URL_SUFFIX}", self.name()));
        }
        url
    }

    /// REST API base for the hosting service behind [`Self::base_url`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidBaseUrl`] when the base URL has no
    /// host, as is the case for `file://` URLs.
    pub fn api_base(&self) -> Result<Url, ValidationError> {
        derive_api_base(&self.base_url)
    }
}

fn validate_owner(owner: &str) -> Result<String, ValidationError> {
    let trimmed = owner.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyOwner);
    }
    if trimmed.contains('/') || trimmed.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidOwner {
            owner: owner.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

fn validate_directory(directory: Utf8PathBuf) -> Result<Utf8PathBuf, ValidationError> {
    if !directory.is_absolute() {
        return Err(ValidationError::RelativeDirectory {
            directory: directory.into_string(),
        });
    }
    match directory.file_name() {
        Some(name) if !name.trim().is_empty() => Ok(directory),
        _ => Err(ValidationError::MissingName {
            directory: directory.into_string(),
        }),
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ValidationError> {
    let mut parsed = Url::parse(base_url.trim()).map_err(|error| {
        ValidationError::InvalidBaseUrl {
            message: format!("{base_url}: {error}"),
        }
    })?;

    if parsed.cannot_be_a_base() {
        return Err(ValidationError::InvalidBaseUrl {
            message: format!("{base_url}: URL cannot carry a repository path"),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::InvalidBaseUrl {
            message: format!("{base_url}: query strings and fragments are not allowed"),
        });
    }

    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn descriptor(directory: &str, base_url: &str) -> RepositoryDescriptor {
        RepositoryDescriptor::new("acme", directory, Visibility::Public, base_url)
            .expect("descriptor should be valid")
    }

    #[rstest]
    fn derives_name_full_name_and_url() {
        let repo = descriptor("/tmp/x/new-repo", "https://host/");

        assert_eq!(repo.name(), "new-repo", "name mismatch");
        assert_eq!(repo.full_name(), "acme/new-repo", "full name mismatch");
        assert_eq!(
            repo.remote_url().as_str(),
            "https://host/acme/new-repo.git",
            "remote URL mismatch"
        );
    }

    #[rstest]
    #[case::without_trailing_slash("https://ghe.example.com/git", "https://ghe.example.com/git/acme/svc.git")]
    #[case::with_trailing_slash("https://ghe.example.com/git/", "https://ghe.example.com/git/acme/svc.git")]
    #[case::file_scheme("file:///srv/remotes", "file:///srv/remotes/acme/svc.git")]
    fn appends_full_name_to_base_path(#[case] base_url: &str, #[case] expected: &str) {
        let repo = descriptor("/work/svc", base_url);

        assert_eq!(repo.remote_url().as_str(), expected, "remote URL mismatch");
        assert!(
            repo.base_url().path().ends_with('/'),
            "base URL should be normalised with a trailing slash"
        );
    }

    #[rstest]
    fn trailing_separator_does_not_hide_the_name() {
        let repo = descriptor("/tmp/x/new-repo/", "https://host/");

        assert_eq!(repo.name(), "new-repo", "name mismatch");
    }

    #[rstest]
    fn owner_is_trimmed() {
        let repo = RepositoryDescriptor::new("  acme ", "/tmp/r", Visibility::Private, "https://h/")
            .expect("descriptor should be valid");

        assert_eq!(repo.owner(), "acme", "owner should be trimmed");
        assert_eq!(repo.full_name(), "acme/r", "full name mismatch");
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn rejects_blank_owner(#[case] owner: &str) {
        let result = RepositoryDescriptor::new(owner, "/tmp/r", Visibility::Public, "https://h/");

        assert_eq!(result, Err(ValidationError::EmptyOwner), "expected EmptyOwner");
    }

    #[rstest]
    #[case::slash("acme/team")]
    #[case::inner_space("ac me")]
    fn rejects_malformed_owner(#[case] owner: &str) {
        let result = RepositoryDescriptor::new(owner, "/tmp/r", Visibility::Public, "https://h/");

        assert!(
            matches!(result, Err(ValidationError::InvalidOwner { .. })),
            "expected InvalidOwner, got {result:?}"
        );
    }

    #[rstest]
    fn rejects_relative_directory() {
        let result = RepositoryDescriptor::new("acme", "repos/r", Visibility::Public, "https://h/");

        assert!(
            matches!(result, Err(ValidationError::RelativeDirectory { .. })),
            "expected RelativeDirectory, got {result:?}"
        );
    }

    #[rstest]
    #[case::root("/")]
    #[case::parent_reference("/tmp/..")]
    fn rejects_directory_without_name(#[case] directory: &str) {
        let result = RepositoryDescriptor::new("acme", directory, Visibility::Public, "https://h/");

        assert!(
            matches!(result, Err(ValidationError::MissingName { .. })),
            "expected MissingName, got {result:?}"
        );
    }

    #[rstest]
    #[case::not_a_url("not a url")]
    #[case::cannot_be_base("mailto:someone@example.com")]
    #[case::query("https://host/?x=1")]
    fn rejects_unusable_base_url(#[case] base_url: &str) {
        let result = RepositoryDescriptor::new("acme", "/tmp/r", Visibility::Public, base_url);

        assert!(
            matches!(result, Err(ValidationError::InvalidBaseUrl { .. })),
            "expected InvalidBaseUrl, got {result:?}"
        );
    }

    #[rstest]
    fn equality_is_structural() {
        let first = descriptor("/tmp/r", "https://host");
        let second = descriptor("/tmp/r", "https://host/");

        assert_eq!(first, second, "identical inputs should produce equal descriptors");
    }

    #[rstest]
    #[case::public("public", Visibility::Public)]
    #[case::private_upper("PRIVATE", Visibility::Private)]
    #[case::internal_padded(" internal ", Visibility::Internal)]
    fn parses_visibility(#[case] raw: &str, #[case] expected: Visibility) {
        assert_eq!(raw.parse::<Visibility>(), Ok(expected), "visibility mismatch");
    }

    #[rstest]
    fn rejects_unknown_visibility() {
        let result = "secret".parse::<Visibility>();

        assert_eq!(
            result,
            Err(ValidationError::UnknownVisibility {
                value: "secret".to_owned()
            }),
            "expected UnknownVisibility"
        );
    }
}
