//! End-to-end tests for the generate workflow.
//!
//! These tests drive the real workflow, driver and submission pipeline with a
//! mock sealer, so no cluster or `kubeseal` binary is needed.

use std::collections::BTreeMap;
use std::fs;

use tempfile::TempDir;

use kryptos::core::config::load_dir;
use kryptos::core::manifest::{build_document, ValidationError};
use kryptos::core::paths::RepoPaths;
use kryptos::core::types::{AppConfig, Secret, SecretField};
use kryptos::engine::{self, SubmitError};
use kryptos::sealer::mock::{FailOn, MockSealer};
use kryptos::sealer::SealError;
use kryptos::ui::prompts::Scripted;
use kryptos::ui::terminal::{self, Outcome};
use kryptos::ui::workflow::Workflow;

const LEGACY_DEMO: &str = r#"
app_name: demo
display_name: Demo
namespace: demo-prod
secrets:
  - name: demo-admin
    display_name: Demo Admin
    type: Opaque
    keys: [username, password]
"#;

/// A GitOps repository with `configs/demo.yaml` and `apps/demo/`.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("configs")).unwrap();
        fs::create_dir_all(dir.path().join("apps/demo")).unwrap();
        fs::write(dir.path().join("configs/demo.yaml"), LEGACY_DEMO).unwrap();
        Self { dir }
    }

    fn apps(&self) -> Vec<AppConfig> {
        let loaded = load_dir(&self.dir.path().join("configs")).unwrap();
        assert!(loaded.warnings.is_empty());
        loaded.apps
    }

    fn paths(&self) -> RepoPaths {
        RepoPaths::discover(&self.dir.path().join("configs"))
    }

    fn output(&self) -> std::path::PathBuf {
        self.dir.path().join("apps/demo/secrets/demo-admin.yaml")
    }
}

/// Drive the workflow with `lines` and submit whatever it produces.
fn run_lines(
    repo: &TestRepo,
    sealer: &MockSealer,
    lines: &[&str],
) -> Option<Result<std::path::PathBuf, SubmitError>> {
    let apps = repo.apps();
    let mut source = Scripted::new(lines.iter().copied());
    let outcome = terminal::run(Workflow::new(&apps), &mut source, &mut Vec::<u8>::new()).unwrap();

    match outcome {
        Outcome::Quit => None,
        Outcome::Submit(sub) => Some(engine::submit(
            sealer,
            &repo.paths(),
            sub.app,
            sub.secret,
            &sub.entered,
        )),
    }
}

#[test]
fn legacy_demo_generates_password() {
    let repo = TestRepo::new();
    let sealer = MockSealer::new();

    let path = run_lines(&repo, &sealer, &["", "1", "admin", "secure", ""])
        .expect("expected a submission")
        .unwrap();
    assert_eq!(path, repo.output());
    assert!(fs::read_to_string(&path).unwrap().contains("kind: SealedSecret"));

    let calls = sealer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].namespace, "demo-prod");
    assert_eq!(calls[0].name, "demo-admin");

    let doc: serde_yaml::Value = serde_yaml::from_str(&calls[0].plaintext).unwrap();
    assert_eq!(doc["kind"], "Secret");
    assert_eq!(doc["metadata"]["namespace"], "demo-prod");
    assert_eq!(doc["stringData"]["username"], "admin");

    let password = doc["stringData"]["password"].as_str().unwrap();
    assert_ne!(password, "secure");
    assert_eq!(password.len(), 32);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn quitting_writes_nothing() {
    let repo = TestRepo::new();
    let sealer = MockSealer::new();

    assert!(run_lines(&repo, &sealer, &["", "q"]).is_none());
    assert!(sealer.calls().is_empty());
    assert!(!repo.dir.path().join("apps/demo/secrets").exists());
}

#[test]
fn seal_failure_leaves_no_file() {
    let repo = TestRepo::new();
    let sealer = MockSealer::new().fail_on(FailOn::Seal(SealError::Rejected {
        status: "exit status: 1".into(),
        stderr: "error: cannot fetch certificate".into(),
    }));

    let err = run_lines(&repo, &sealer, &["", "1", "admin", "hunter22", ""])
        .expect("expected a submission")
        .unwrap_err();

    assert!(err.to_string().contains("cannot fetch certificate"));
    assert!(!err.to_string().contains("hunter22"));
    assert!(!repo.output().exists());
}

#[test]
fn connectivity_failure_is_advisory() {
    use kryptos::sealer::Sealer;

    let repo = TestRepo::new();
    let sealer = MockSealer::new().fail_on(FailOn::CheckConnectivity(SealError::Unreachable {
        status: "exit status: 1".into(),
        output: "no controller".into(),
    }));

    assert!(sealer.check_connectivity().is_err());
    let path = run_lines(&repo, &sealer, &["", "1", "admin", "pw", ""])
        .expect("expected a submission")
        .unwrap();
    assert!(path.exists());
}

#[test]
fn round_trip_two_required_fields_with_static_override() {
    let secret = Secret {
        name: "db".into(),
        fields: vec![
            SecretField {
                required: true,
                ..SecretField::new("user")
            },
            SecretField {
                required: true,
                ..SecretField::new("password")
            },
        ],
        string_data: BTreeMap::from([
            ("user".to_string(), "static".to_string()),
            ("host".to_string(), "db.internal".to_string()),
        ]),
        ..Default::default()
    };
    let app = AppConfig {
        app_name: "db".into(),
        display_name: "Database".into(),
        namespace: "data".into(),
        secrets: vec![secret.clone()],
    };

    let entered = BTreeMap::from([
        ("user".to_string(), "typed".to_string()),
        ("password".to_string(), "p4ss".to_string()),
    ]);
    let doc = build_document(&app, &secret, &entered).unwrap();

    assert_eq!(
        doc.string_data,
        BTreeMap::from([
            ("user".to_string(), "static".to_string()),
            ("password".to_string(), "p4ss".to_string()),
            ("host".to_string(), "db.internal".to_string()),
        ])
    );

    let mut missing = entered.clone();
    missing.remove("password");
    assert_eq!(
        build_document(&app, &secret, &missing).unwrap_err(),
        ValidationError::MissingField("password".into())
    );
}

#[test]
fn required_field_missing_never_writes() {
    let repo = TestRepo::new();
    let mut apps = repo.apps();
    apps[0].secrets[0].fields[1].required = true;

    let mut source = Scripted::new(["", "1", "admin", "", ""]);
    let outcome = terminal::run(Workflow::new(&apps), &mut source, &mut Vec::<u8>::new()).unwrap();
    let Outcome::Submit(sub) = outcome else {
        panic!("expected a submission");
    };

    let sealer = MockSealer::new();
    let err = engine::submit(&sealer, &repo.paths(), sub.app, sub.secret, &sub.entered).unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
    assert!(sealer.calls().is_empty());
    assert!(!repo.output().exists());
}
