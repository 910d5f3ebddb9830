use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;

/// An isolated place for the CLI to keep its token.
pub struct Workspace {
    _dir: TempDir,
    pub token_path: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let token_path = dir.path().join("token.json");
        Self {
            _dir: dir,
            token_path,
        }
    }

    /// Pretend an earlier login saved `token`.
    pub fn seed_token(&self, token: &str) {
        let json = serde_json::json!({ "token": token }).to_string();
        std::fs::write(&self.token_path, json).unwrap();
    }

    /// The token currently on disk, if any.
    pub fn stored_token(&self) -> Option<String> {
        let json = std::fs::read_to_string(&self.token_path).ok()?;
        let value: serde_json::Value = serde_json::from_str(&json).ok()?;
        value["token"].as_str().map(str::to_string)
    }
}

/// Run the CLI binary against `api_url`, keeping the session in `token_path`.
pub async fn run_cli(args: &[&str], api_url: &str, token_path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .env("FOLIO_API_URL", api_url)
        .env("FOLIO_TOKEN_PATH", token_path)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FOLIO_VALIDATE_TIMEOUT_SECS")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], api_url: &str, token_path: &Path) -> String {
    let output = run_cli(args, api_url, token_path).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_failure(args: &[&str], api_url: &str, token_path: &Path) -> String {
    let output = run_cli(args, api_url, token_path).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
