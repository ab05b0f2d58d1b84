//! # Command Execution Module / 命令执行模块
//!
//! The external process contracts of the driver: configure, build and test a
//! preset, translate the repository path for WSL, and check whether a tool is
//! available. [`Executor`] is the seam between the driver and the operating
//! system; [`SystemExecutor`] is the real implementation.
//!
//! 驱动程序的外部进程契约：configure、build 和 test 预设，为 WSL 转换仓库路径，
//! 以及检查工具是否可用。[`Executor`] 是驱动程序与操作系统之间的接口；
//! [`SystemExecutor`] 是真实实现。

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::core::models::{ExecContext, PresetKind};
use crate::infra::output::Output;

/// Exit code recorded when a process could not be started or was killed by a signal.
pub const SPAWN_FAILURE_CODE: i32 = 1;

/// The operations the driver needs from the outside world.
/// All calls are awaited one at a time.
///
/// 驱动程序需要从外部环境获得的操作。所有调用都逐个等待完成。
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Whether `tool` can be found in the given context.
    async fn is_available(&mut self, context: ExecContext, tool: &str, output: &mut Output) -> bool;

    /// The repository root as seen from inside WSL, or `None` if translation failed.
    async fn translate_root(&mut self, output: &mut Output) -> Option<String>;

    /// Runs one configure, build or test step and returns its exit code.
    async fn run_step(
        &mut self,
        context: ExecContext,
        kind: PresetKind,
        preset: &str,
        output: &mut Output,
    ) -> i32;
}

/// The program and arguments of a native step.
/// 原生步骤的程序和参数。
pub fn native_command(kind: PresetKind, preset: &str) -> (&'static str, Vec<String>) {
    let preset = preset.to_string();
    match kind {
        PresetKind::Configure => ("cmake", vec!["--preset".into(), preset]),
        PresetKind::Build => ("cmake", vec!["--build".into(), "--preset".into(), preset]),
        PresetKind::Test => ("ctest", vec!["--preset".into(), preset]),
    }
}

/// The shell fragment that runs a step inside WSL from the translated root.
/// 在 WSL 中从转换后的根目录运行步骤的 shell 片段。
pub fn wsl_script(kind: PresetKind, preset: &str, wsl_root: &str) -> String {
    let (program, args) = native_command(kind, preset);
    let quoted_args: Vec<String> = args.iter().map(|arg| quote(arg)).collect();
    format!(
        "cd {} && {} {}",
        quote(wsl_root),
        program,
        quoted_args.join(" ")
    )
}

fn quote(arg: &str) -> String {
    shlex::try_quote(arg)
        .map(|quoted| quoted.into_owned())
        .unwrap_or_else(|_| format!("'{}'", arg))
}

/// Joins a program and its arguments for echoing.
pub fn display_command(program: &str, args: &[String]) -> String {
    let words = std::iter::once(program).chain(args.iter().map(String::as_str));
    shlex::try_join(words).unwrap_or_else(|_| {
        std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Strips the `\\?\` verbatim prefix that `canonicalize` adds on Windows,
/// which `wslpath` does not understand.
fn plain_path(path: &Path) -> String {
    let text = path.display().to_string();
    text.strip_prefix(r"\\?\").map(str::to_string).unwrap_or(text)
}

/// The captured result of a finished process.
/// 已完成进程的捕获结果。
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: std::io::Result<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns a command and captures its stdout and stderr.
/// The two streams are read concurrently so neither pipe can fill up and block the child.
///
/// 派生一个命令并捕获其 stdout 和 stderr。
/// 两个流被并发读取，因此任何一个管道都不会填满而阻塞子进程。
pub async fn spawn_and_capture(mut cmd: Command) -> CapturedOutput {
    let mut child = match cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(e) => {
            return CapturedOutput {
                status: Err(e),
                stdout: String::new(),
                stderr: String::new(),
            };
        }
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return CapturedOutput {
            status: Err(std::io::Error::other("failed to capture child output")),
            stdout: String::new(),
            stderr: String::new(),
        };
    };

    let (stdout, stderr) = tokio::join!(read_all(stdout), read_all(stderr));
    let status = child.wait().await;

    CapturedOutput {
        status,
        stdout,
        stderr,
    }
}

/// Drains `reader` to the end. Invalid UTF-8 is replaced rather than ending the read.
async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> String {
    let mut buffer = Vec::new();
    if let Err(e) = reader.read_to_end(&mut buffer).await {
        tracing::debug!(error = %e, "failed to read child output");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Runs `program` to completion, echoing it and routing its output through `output`.
/// Returns the exit code, or [`SPAWN_FAILURE_CODE`] if it could not run.
pub async fn run_to_completion(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    output: &mut Output,
) -> i32 {
    output.echo_command(&display_command(program, args));
    let (stdout, stderr) = output.child_stdio();

    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null()).stdout(stdout).stderr(stderr);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    match cmd.status().await {
        Ok(status) => status.code().unwrap_or(SPAWN_FAILURE_CODE),
        Err(e) => {
            tracing::warn!(program, error = %e, "failed to start process");
            SPAWN_FAILURE_CODE
        }
    }
}

/// Runs processes on the real system.
/// 在真实系统上运行进程。
#[derive(Debug)]
pub struct SystemExecutor {
    root: PathBuf,
    wsl_root: Option<String>,
}

impl SystemExecutor {
    /// `root` is the repository the presets belong to; native steps run there.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            wsl_root: None,
        }
    }

    async fn run_in_wsl(&mut self, script: &str, output: &mut Output) -> i32 {
        let args = vec![
            "-e".to_string(),
            "bash".to_string(),
            "-lc".to_string(),
            script.to_string(),
        ];
        run_to_completion("wsl.exe", &args, None, output).await
    }
}

impl Executor for SystemExecutor {
    async fn is_available(&mut self, context: ExecContext, tool: &str, output: &mut Output) -> bool {
        match context {
            ExecContext::Native => which::which(tool).is_ok(),
            ExecContext::Wsl => {
                let script = format!("command -v {} >/dev/null 2>&1", quote(tool));
                self.run_in_wsl(&script, output).await == 0
            }
        }
    }

    async fn translate_root(&mut self, output: &mut Output) -> Option<String> {
        let args = vec!["-e".to_string(), "wslpath".to_string(), "-u".to_string(), plain_path(&self.root)];
        let mut cmd = Command::new("wsl.exe");
        cmd.args(&args).stdin(Stdio::null());
        let captured = spawn_and_capture(cmd).await;

        if output.is_file() {
            output.echo_command(&display_command("wsl.exe", &args));
            output.write_raw(&captured.stdout);
        }
        if let Err(e) = &captured.status {
            tracing::warn!(error = %e, "wslpath could not be started");
            return None;
        }

        let translated = captured.stdout.trim().to_string();
        if translated.is_empty() {
            tracing::warn!(stderr = %captured.stderr.trim(), "wslpath returned nothing");
            return None;
        }
        self.wsl_root = Some(translated.clone());
        Some(translated)
    }

    async fn run_step(
        &mut self,
        context: ExecContext,
        kind: PresetKind,
        preset: &str,
        output: &mut Output,
    ) -> i32 {
        match context {
            ExecContext::Native => {
                let (program, args) = native_command(kind, preset);
                run_to_completion(program, &args, Some(self.root.as_path()), output).await
            }
            ExecContext::Wsl => {
                let Some(wsl_root) = self.wsl_root.clone() else {
                    tracing::warn!(preset, "WSL step requested before the root was translated");
                    return SPAWN_FAILURE_CODE;
                };
                let script = wsl_script(kind, preset, &wsl_root);
                self.run_in_wsl(&script, output).await
            }
        }
    }
}
