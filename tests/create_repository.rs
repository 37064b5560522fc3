//! End-to-end workflow tests against bare repositories on the local
//! filesystem.

use camino::{Utf8Path, Utf8PathBuf};
use git2::Repository;
use rstest::{fixture, rstest};
use scaffold::local::{CommitIdentity, InitialCommit, LocalError};
use scaffold::remote::FilesystemRemoteHost;
use scaffold::test_support::ScriptedVcs;
use scaffold::{
    CreateRepositoryRequest, Git2Vcs, LocalSetup, RepositoryDescriptor, Visibility,
    create_repository,
};
use tempfile::TempDir;
use url::Url;

struct Sandbox {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Sandbox {
    fn remotes_url(&self) -> String {
        let remotes = self.root.join("remotes");
        std::fs::create_dir(&remotes).expect("should create remotes directory");
        Url::from_directory_path(remotes.as_std_path())
            .expect("remotes path should convert to a URL")
            .to_string()
    }

    fn workspace(&self) -> Utf8PathBuf {
        let workspace = self.root.join("work");
        std::fs::create_dir(&workspace).expect("should create workspace directory");
        workspace
    }

    fn bare_remote(&self) -> Utf8PathBuf {
        self.root.join("remotes/acme/widgets.git")
    }
}

#[fixture]
fn sandbox() -> Sandbox {
    let temp = TempDir::new().expect("should create temp directory");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_owned()).expect("UTF-8 temp path");
    Sandbox { _temp: temp, root }
}

fn vcs() -> Git2Vcs {
    Git2Vcs::new().with_identity(Some(CommitIdentity::new("Test User", "test@example.com")))
}

fn origin_of(directory: &Utf8Path) -> String {
    let repository = Repository::open(directory.as_std_path()).expect("should be a repository");
    let origin = repository.find_remote("origin").expect("origin should exist");
    origin.url().expect("origin URL should be UTF-8").to_owned()
}

#[rstest]
#[tokio::test]
async fn creates_remote_and_clones_into_new_directory(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.workspace().join("widgets");
    let request = CreateRepositoryRequest::new("acme", target.clone(), "public", base_url);

    let repository = create_repository(&FilesystemRemoteHost, &vcs(), &request)
        .await
        .expect("workflow should succeed");

    assert!(
        Repository::open_bare(sandbox.bare_remote().as_std_path()).is_ok(),
        "bare remote should exist"
    );
    assert_eq!(origin_of(&target), repository.remote_url().as_str());
}

#[rstest]
#[tokio::test]
async fn reuses_existing_empty_directory(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.workspace().join("widgets");
    std::fs::create_dir(&target).expect("should pre-create target");
    let request = CreateRepositoryRequest::new("acme", target.clone(), "private", base_url);

    create_repository(&FilesystemRemoteHost, &vcs(), &request)
        .await
        .expect("workflow should succeed");

    assert!(target.join(".git").is_dir(), "working copy should be cloned in place");
}

#[rstest]
#[tokio::test]
async fn initialises_and_pushes_purpose_commit(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.workspace().join("widgets");
    let commit = InitialCommit::new("inventory service")
        .expect("purpose should be accepted")
        .on_branch("main");
    let request = CreateRepositoryRequest::new("acme", target, "public", base_url)
        .with_setup(LocalSetup::Initialize(commit));

    create_repository(&FilesystemRemoteHost, &vcs(), &request)
        .await
        .expect("workflow should succeed");

    let remote = Repository::open_bare(sandbox.bare_remote().as_std_path())
        .expect("bare remote should exist");
    let head = remote
        .find_reference("refs/heads/main")
        .and_then(|reference| reference.peel_to_commit())
        .expect("pushed branch should exist");
    assert_eq!(head.message(), Some("Repo Purpose: inventory service"));
}

#[rstest]
#[tokio::test]
async fn clone_failure_removes_remote_and_created_directory(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.workspace().join("widgets");
    let failure = LocalError::Clone {
        url: "file:///remotes/acme/widgets.git".to_owned(),
        message: "transport closed".to_owned(),
    };
    let vcs = ScriptedVcs::new().failing(failure.clone());
    let request = CreateRepositoryRequest::new("acme", target.clone(), "public", base_url);

    let error = create_repository(&FilesystemRemoteHost, &vcs, &request)
        .await
        .expect_err("clone failure should abort the workflow");

    assert_eq!(error.to_string(), failure.to_string());
    assert!(!sandbox.bare_remote().exists(), "remote should be deleted");
    assert!(!target.exists(), "created directory should be removed");
    assert_eq!(vcs.targets(), vec![target]);
}

#[rstest]
#[tokio::test]
async fn clone_failure_keeps_pre_existing_directory(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.workspace().join("widgets");
    std::fs::create_dir(&target).expect("should pre-create target");
    let vcs = ScriptedVcs::new().failing(LocalError::Clone {
        url: "file:///remotes/acme/widgets.git".to_owned(),
        message: "transport closed".to_owned(),
    });
    let request = CreateRepositoryRequest::new("acme", target.clone(), "public", base_url);

    let error = create_repository(&FilesystemRemoteHost, &vcs, &request)
        .await
        .expect_err("clone failure should abort the workflow");

    assert!(error.is_clean(), "cleanup should succeed: {error}");
    assert!(target.is_dir(), "pre-existing directory must survive");
    assert!(!sandbox.bare_remote().exists(), "remote should be deleted");
}

#[rstest]
#[tokio::test]
async fn retry_after_clean_failure_succeeds(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.workspace().join("widgets");
    let request = CreateRepositoryRequest::new("acme", target.clone(), "public", base_url);
    let failing = ScriptedVcs::new().failing(LocalError::Clone {
        url: "file:///remotes/acme/widgets.git".to_owned(),
        message: "transport closed".to_owned(),
    });

    let error = create_repository(&FilesystemRemoteHost, &failing, &request)
        .await
        .expect_err("first attempt should fail");
    assert!(error.is_clean(), "first attempt should leave nothing behind: {error}");
    assert!(!sandbox.bare_remote().exists(), "remote should be deleted");
    assert!(!target.exists(), "created directory should be removed");

    let repository = create_repository(&FilesystemRemoteHost, &vcs(), &request)
        .await
        .expect("retry with the same request should succeed");

    assert!(target.join(".git").is_dir(), "retry should clone the working copy");
    assert!(sandbox.bare_remote().is_dir(), "retry should recreate the remote");
    assert_eq!(origin_of(&target), repository.remote_url().as_str());
}

#[rstest]
#[tokio::test]
async fn missing_parent_is_never_created(sandbox: Sandbox) {
    let base_url = sandbox.remotes_url();
    let target = sandbox.root.join("absent/widgets");
    let request = CreateRepositoryRequest::new("acme", target, "public", base_url);

    let error = create_repository(&FilesystemRemoteHost, &vcs(), &request)
        .await
        .expect_err("missing parent should be rejected");

    assert!(!sandbox.root.join("absent").exists(), "parent must not be created");
    assert!(!sandbox.bare_remote().exists(), "no remote should be created");
    assert!(error.is_clean());
}

#[rstest]
#[case::trailing_slash("https://git.example.com/")]
#[case::no_trailing_slash("https://git.example.com")]
fn descriptors_with_equal_inputs_are_equal(#[case] base_url: &str) {
    let first = RepositoryDescriptor::new("acme", "/srv/widgets", Visibility::Public, base_url)
        .expect("descriptor should be valid");
    let second = RepositoryDescriptor::new(
        "acme",
        "/srv/widgets",
        Visibility::Public,
        "https://git.example.com/",
    )
    .expect("descriptor should be valid");

    assert_eq!(first, second);
    assert_eq!(first.name(), "widgets");
    assert_eq!(first.full_name(), "acme/widgets");
    assert_eq!(
        first.remote_url().as_str(),
        "https://git.example.com/acme/widgets.git"
    );
}
