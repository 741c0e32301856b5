//! End-to-end tests for the harness orchestration
//!
//! The Go toolchain and the `mc` client are replaced by a scripted
//! `CommandRunner`, and the server health endpoint by a tiny HTTP responder,
//! so these tests need neither Go nor a running MinIO server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use minio_tests::cli::run_suite;
use minio_tests::common::config::Config;
use minio_tests::common::{CommandOutput, CommandRunner, CommandSpec};
use minio_tests::setup::{launch, EnvSnapshot, LaunchOptions};
use minio_tests::Error;

/// Records every invocation and answers like `go` and `mc` would
struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    go_version: Option<&'static str>,
    /// Client subcommand that exits non-zero
    fail_on: Option<&'static str>,
}

impl ScriptedRunner {
    fn new(go_version: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            go_version: Some(go_version),
            fail_on: None,
        }
    }

    fn failing_on(mut self, subcommand: &'static str) -> Self {
        self.fail_on = Some(subcommand);
        self
    }

    fn without_go(mut self) -> Self {
        self.go_version = None;
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn client_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("mc "))
            .collect()
    }
}

fn ok(output: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        output: output.to_string(),
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, cmd: &CommandSpec) -> minio_tests::Result<CommandOutput> {
        self.calls.lock().unwrap().push(cmd.clone());

        if cmd.program == "go" {
            let Some(version) = self.go_version else {
                return Err(Error::SpawnFailed {
                    program: "go".to_string(),
                    reason: "No such file or directory (os error 2)".to_string(),
                });
            };
            return Ok(match cmd.args.first().map(String::as_str) {
                Some("version") => ok(&format!("go version {} linux/amd64\n", version)),
                _ => ok(""),
            });
        }

        // args[0] is --json, args[1] the subcommand
        let subcommand = cmd.args.get(1).map(String::as_str);
        if subcommand.is_some() && subcommand == self.fail_on {
            return Ok(CommandOutput {
                success: false,
                code: Some(1),
                output: format!(
                    "{}\n",
                    r#"{"status":"error","error":{"message":"Unable to set access policy.","cause":{"message":"Access Denied."}}}"#
                ),
            });
        }

        Ok(ok(r#"{"status":"success"}"#))
    }
}

/// Serve `status_line` to every request, counting connections
async fn spawn_health_server(status_line: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}/", addr), hits)
}

fn config_for(url: &str) -> Config {
    let mut config = Config::default();
    config.server.health_url = url.to_string();
    config.server.request_timeout_secs = 5;
    config
}

fn good_env() -> EnvSnapshot {
    EnvSnapshot {
        required: Some("/home/tester/go".to_string()),
        path: Some("/usr/local/bin:/usr/bin:/home/tester/go/bin".to_string()),
    }
}

// ============== Tests ==============

#[tokio::test]
async fn test_full_sequence_passes() {
    let (url, hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.21.3");

    let result = run_suite(&runner, &config_for(&url), &good_env(), "myminio", "corpus/", false)
        .await
        .unwrap();

    assert!(result.passed());
    assert_eq!(result.steps_run, 5);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        runner.calls(),
        [
            "go version",
            "mc --json ls myminio",
            "mc --json mb myminio/testbucket",
            "mc --json access set readonly myminio/testbucket",
            "mc --json cp corpus/... myminio/testbucket",
            "mc --json rm --force myminio/testbucket...",
        ]
    );
}

#[tokio::test]
async fn test_failing_access_step_stops_sequence() {
    let (url, _hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.21.3").failing_on("access");

    let result = run_suite(&runner, &config_for(&url), &good_env(), "myminio", "corpus", false)
        .await
        .unwrap();

    assert!(!result.passed());
    assert_eq!(result.steps_run, 3);
    assert_eq!(result.steps_total, 5);

    let client_calls = runner.client_calls();
    assert_eq!(client_calls.len(), 3);
    assert!(client_calls.iter().all(|c| !c.contains(" cp ") && !c.contains(" rm ")));

    let err = result.into_result().unwrap_err();
    assert_eq!(err.exit_code(), 5);
    match err {
        Error::CommandFailed {
            command, message, ..
        } => {
            assert_eq!(command, "mc --json access set readonly myminio/testbucket");
            assert_eq!(message, "Unable to set access policy.");
        }
        other => panic!("Expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_env_stops_before_network_and_tests() {
    let (url, hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.21.3");
    let env = EnvSnapshot {
        required: None,
        path: Some("/usr/bin".to_string()),
    };

    let err = run_suite(&runner, &config_for(&url), &env, "myminio", "corpus", false)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EnvNotSet(ref var) if var == "GOPATH"));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(runner.calls(), ["go version"]);
}

#[tokio::test]
async fn test_unhealthy_server_runs_no_tests() {
    let (url, hits) = spawn_health_server("500 Internal Server Error").await;
    let runner = ScriptedRunner::new("go1.21.3");

    let err = run_suite(&runner, &config_for(&url), &good_env(), "myminio", "corpus", false)
        .await
        .unwrap_err();

    match &err {
        Error::ServerUnhealthy { status } => assert!(status.starts_with("500")),
        other => panic!("Expected ServerUnhealthy, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 4);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(runner.client_calls().is_empty());
}

#[tokio::test]
async fn test_old_go_version_rejected() {
    let (url, hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.4.3");

    let err = run_suite(&runner, &config_for(&url), &good_env(), "myminio", "corpus", false)
        .await
        .unwrap_err();

    match &err {
        Error::RuntimeVersion { found, required } => {
            assert_eq!(found, "1.4.3");
            assert_eq!(required, "1.5.1");
        }
        other => panic!("Expected RuntimeVersion, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_prerelease_go_version_accepted() {
    let (url, _hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.6beta1");

    let result = run_suite(&runner, &config_for(&url), &good_env(), "myminio", "corpus", false)
        .await
        .unwrap();
    assert!(result.passed());
}

#[tokio::test]
async fn test_missing_go_toolchain() {
    let (url, _hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.21.3").without_go();

    let err = run_suite(&runner, &config_for(&url), &good_env(), "myminio", "corpus", false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ToolNotFound(ref tool) if tool == "go"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_install_client_runs_before_tests() {
    let (url, _hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.21.3");

    // `sh` stands in for a client that `go install` put on PATH
    let mut config = config_for(&url);
    config.tools.client.binary = "sh".to_string();

    run_suite(&runner, &config, &good_env(), "myminio", "corpus", true)
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls[1], "go install github.com/minio/mc@latest");
    assert_eq!(calls[2], "sh --json ls myminio");
}

#[tokio::test]
async fn test_installed_client_missing_from_path() {
    let (url, _hits) = spawn_health_server("200 OK").await;
    let runner = ScriptedRunner::new("go1.21.3");

    let mut config = config_for(&url);
    config.tools.client.binary = "minio-tests-no-such-client-3f1c".to_string();

    let err = run_suite(&runner, &config, &good_env(), "myminio", "corpus", true)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NotFoundAfterInstall(ref binary) if binary == "minio-tests-no-such-client-3f1c"
    ));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(runner.calls().last().unwrap(), "go install github.com/minio/mc@latest");
}

#[cfg(unix)]
#[tokio::test]
async fn test_launch_installs_then_runs_server() {
    let base = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new("go1.21.3");

    // `true` stands in for a server that starts and exits cleanly
    let mut config = Config::default();
    config.tools.server.binary = "true".to_string();

    let opts = LaunchOptions {
        base_dir: base.path().to_path_buf(),
        skip_install: false,
        cleanup: false,
    };
    launch(&runner, &config, &opts).await.unwrap();

    assert_eq!(runner.calls(), ["go install github.com/minio/minio@latest"]);

    let retained: Vec<_> = std::fs::read_dir(base.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(retained.len(), 1);
    assert!(retained[0].starts_with("automated-tests"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_launch_cleanup_removes_test_dir() {
    let base = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new("go1.21.3");

    let mut config = Config::default();
    config.tools.server.binary = "false".to_string();

    let opts = LaunchOptions {
        base_dir: base.path().to_path_buf(),
        skip_install: true,
        cleanup: true,
    };
    let err = launch(&runner, &config, &opts).await.unwrap_err();

    assert!(matches!(err, Error::CommandFailed { .. }));
    assert!(runner.calls().is_empty());
    assert_eq!(std::fs::read_dir(base.path()).unwrap().count(), 0);
}
