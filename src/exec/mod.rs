//! Reqwest-based client for a Piston-compatible code execution API.

use std::{fmt, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::ExecError};

pub const DEFAULT_API_BASE: &str = "https://emkc.org/api/v2/piston";

/// One submission: built fresh for every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub source: String,
    /// Execution identifier, e.g. `python` or `csharp.net`.
    pub language: String,
    pub stdin: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Code(i32),
    Signal(String),
    Unknown,
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Code(c) => write!(f, "{c}"),
            ExitStatus::Signal(s) => write!(f, "killed by {s}"),
            ExitStatus::Unknown => f.write_str("unknown"),
        }
    }
}

/// Which step of the job produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Run,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
    pub wall_time: Option<Duration>,
    pub stage: Stage,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.status == ExitStatus::Code(0)
    }
}

/// Anything that can run an [`ExecutionRequest`].
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(
        &self,
        request: &ExecutionRequest,
        timeout: Duration,
    ) -> Result<ExecutionResult, ExecError>;
}

#[derive(Debug, Clone)]
pub struct PistonClient {
    http: reqwest::Client,
    base_url: String,
    version: String,
}

impl PistonClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let base = cfg.get("API_BASE_URL").unwrap_or_else(|| "default".into());
        let base = if base == "default" { DEFAULT_API_BASE.to_string() } else { base };
        let version = cfg.get("RUNTIME_VERSION").unwrap_or_else(|| "*".into());
        Self::new(base, version)
    }

    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tias/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            version: version.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Executor for PistonClient {
    async fn execute(
        &self,
        request: &ExecutionRequest,
        timeout: Duration,
    ) -> Result<ExecutionResult, ExecError> {
        let url = format!("{}/execute", self.base_url);
        let body = ExecuteBody {
            language: &request.language,
            version: &self.version,
            files: [SourceFile { content: &request.source }],
            stdin: join_stdin(&request.stdin),
        };
        tracing::debug!(
            url = %url,
            language = %request.language,
            bytes = request.source.len(),
            stdin_tokens = request.stdin.len(),
            "submitting code"
        );

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| transport_error(e, timeout))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("{} {}", status, text.trim()).trim().to_string());
            tracing::warn!(%status, "execution service rejected the request");
            return Err(ExecError::Service(message));
        }

        let parsed: ExecuteResponse = serde_json::from_str(&text)
            .map_err(|e| ExecError::Service(format!("malformed response: {e}")))?;
        let result = parsed.into_result()?;
        tracing::info!(language = %request.language, status = %result.status, "execution finished");
        Ok(result)
    }
}

fn join_stdin(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return String::new();
    }
    let mut s = tokens.join("\n");
    s.push('\n');
    s
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> ExecError {
    if e.is_timeout() {
        return ExecError::Timeout(timeout);
    }
    // reqwest's own message hides the cause; walk the chain for it
    let mut msg = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    ExecError::Network(msg)
}

#[derive(Debug, Serialize)]
struct ExecuteBody<'a> {
    language: &'a str,
    version: &'a str,
    files: [SourceFile<'a>; 1],
    stdin: String,
}

#[derive(Debug, Serialize)]
struct SourceFile<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    run: Option<StageResponse>,
    compile: Option<StageResponse>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StageResponse {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    code: Option<i32>,
    signal: Option<String>,
    /// Milliseconds; only some deployments report it.
    wall_time: Option<u64>,
}

impl StageResponse {
    fn failed(&self) -> bool {
        self.signal.is_some() || self.code.is_some_and(|c| c != 0)
    }

    fn into_result(self, stage: Stage) -> ExecutionResult {
        let status = match (self.code, self.signal) {
            (_, Some(sig)) => ExitStatus::Signal(sig),
            (Some(code), None) => ExitStatus::Code(code),
            (None, None) => ExitStatus::Unknown,
        };
        ExecutionResult {
            stdout: self.stdout,
            stderr: self.stderr,
            status,
            wall_time: self.wall_time.map(Duration::from_millis),
            stage,
        }
    }
}

impl ExecuteResponse {
    fn into_result(self) -> Result<ExecutionResult, ExecError> {
        if let Some(compile) = self.compile {
            if compile.failed() {
                return Ok(compile.into_result(Stage::Compile));
            }
        }
        match (self.run, self.message) {
            (Some(run), _) => Ok(run.into_result(Stage::Run)),
            (None, Some(message)) => Err(ExecError::Service(message)),
            (None, None) => Err(ExecError::Service("response has no run stage".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ExecutionResult, ExecError> {
        serde_json::from_str::<ExecuteResponse>(json).unwrap().into_result()
    }

    #[test]
    fn run_stage_maps_to_result() {
        let r = parse(
            r#"{"language":"python","version":"3.10.0",
                "run":{"stdout":"hi\n","stderr":"","code":0,"signal":null,"output":"hi\n"}}"#,
        )
        .unwrap();
        assert_eq!(r.stdout, "hi\n");
        assert_eq!(r.status, ExitStatus::Code(0));
        assert_eq!(r.stage, Stage::Run);
        assert!(r.wall_time.is_none());
        assert!(r.success());
    }

    #[test]
    fn signal_wins_over_code() {
        let r = parse(r#"{"run":{"stdout":"","stderr":"","code":null,"signal":"SIGKILL","wall_time":3000}}"#)
            .unwrap();
        assert_eq!(r.status, ExitStatus::Signal("SIGKILL".into()));
        assert_eq!(r.wall_time, Some(Duration::from_secs(3)));
        assert_eq!(r.status.to_string(), "killed by SIGKILL");
    }

    #[test]
    fn failed_compile_is_reported_instead_of_run() {
        let r = parse(
            r#"{"compile":{"stdout":"","stderr":"error: expected ';'","code":1,"signal":null},
                "run":{"stdout":"","stderr":"","code":null,"signal":null}}"#,
        )
        .unwrap();
        assert_eq!(r.stage, Stage::Compile);
        assert_eq!(r.stderr, "error: expected ';'");
        assert_eq!(r.status, ExitStatus::Code(1));
    }

    #[test]
    fn message_without_run_is_service_error() {
        let err = parse(r#"{"message":"runtime is unknown"}"#).unwrap_err();
        assert!(matches!(err, ExecError::Service(m) if m == "runtime is unknown"));
    }

    #[test]
    fn stdin_tokens_become_lines() {
        assert_eq!(join_stdin(&[]), "");
        assert_eq!(join_stdin(&["1".into(), "2".into()]), "1\n2\n");
    }
}
