//! # Output Sink Module / 输出目标模块
//!
//! Everything the driver prints (progress lines, echoed commands, the final
//! summary) goes through a single [`Output`], which writes either to standard
//! output or to a log file. It also decides where child processes send their
//! own output.
//!
//! 驱动程序打印的所有内容（进度行、回显的命令、最终摘要）都通过单个
//! [`Output`] 输出，写入标准输出或日志文件。它还决定子进程的输出去向。

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

enum Sink {
    Stdout,
    File { file: File, path: PathBuf },
    Memory(Vec<u8>),
}

/// The single writable destination for a run. Dropping it flushes the log file.
/// 一次运行的唯一可写目标。丢弃时会刷新日志文件。
pub struct Output {
    sink: Sink,
    verbose: bool,
}

impl Output {
    /// Writes to standard output.
    pub fn stdout(verbose: bool) -> Self {
        Self {
            sink: Sink::Stdout,
            verbose,
        }
    }

    /// Creates (truncating) the log file at `path`.
    /// 在 `path` 处创建（截断）日志文件。
    pub fn log_file(path: &Path, verbose: bool) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        Ok(Self {
            sink: Sink::File {
                file,
                path: path.to_path_buf(),
            },
            verbose,
        })
    }

    /// Collects everything in memory; used by tests.
    pub fn in_memory(verbose: bool) -> Self {
        Self {
            sink: Sink::Memory(Vec::new()),
            verbose,
        }
    }

    /// Whether output goes to a log file.
    pub fn is_file(&self) -> bool {
        matches!(self.sink, Sink::File { .. })
    }

    pub fn log_path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Text written so far, for in-memory sinks.
    pub fn captured(&self) -> Option<String> {
        match &self.sink {
            Sink::Memory(buffer) => Some(String::from_utf8_lossy(buffer).into_owned()),
            _ => None,
        }
    }

    /// Writes one line.
    pub fn emit(&mut self, message: impl AsRef<str>) {
        if let Err(e) = self.write_line(message.as_ref()) {
            eprintln!("Failed to write output: {}", e);
        }
    }

    fn write_line(&mut self, message: &str) -> io::Result<()> {
        match &mut self.sink {
            Sink::Stdout => {
                println!("{}", message);
                Ok(())
            }
            Sink::File { file, .. } => {
                writeln!(file, "{}", message)?;
                file.flush()
            }
            Sink::Memory(buffer) => writeln!(buffer, "{}", message),
        }
    }

    /// Writes raw text that already carries its own line breaks.
    pub fn write_raw(&mut self, text: &str) {
        let result = match &mut self.sink {
            Sink::Stdout => {
                print!("{}", text);
                io::stdout().flush()
            }
            Sink::File { file, .. } => file.write_all(text.as_bytes()).and_then(|_| file.flush()),
            Sink::Memory(buffer) => buffer.write_all(text.as_bytes()),
        };
        if let Err(e) = result {
            eprintln!("Failed to write output: {}", e);
        }
    }

    /// Echoes a command line as `[cmd] ...` when running verbose or logging to a file.
    pub fn echo_command(&mut self, command_line: &str) {
        if self.verbose || self.is_file() {
            self.emit(format!("[cmd] {}", command_line));
        }
    }

    /// Stdout/stderr handles for a child process: the log file when logging,
    /// the terminal when verbose, otherwise discarded.
    ///
    /// 子进程的 stdout/stderr 句柄：记录日志时为日志文件，
    /// 详细模式下为终端，否则丢弃。
    pub fn child_stdio(&mut self) -> (Stdio, Stdio) {
        match &mut self.sink {
            Sink::File { file, .. } => {
                if let Err(e) = file.flush() {
                    eprintln!("Failed to flush log file: {}", e);
                }
                match (file.try_clone(), file.try_clone()) {
                    (Ok(out), Ok(err)) => (Stdio::from(out), Stdio::from(err)),
                    _ => (Stdio::null(), Stdio::null()),
                }
            }
            Sink::Stdout if self.verbose => (Stdio::inherit(), Stdio::inherit()),
            _ => (Stdio::null(), Stdio::null()),
        }
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        if let Sink::File { file, .. } = &mut self.sink {
            let _ = file.flush();
        }
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sink = match &self.sink {
            Sink::Stdout => "stdout",
            Sink::File { .. } => "file",
            Sink::Memory(_) => "memory",
        };
        f.debug_struct("Output")
            .field("sink", &sink)
            .field("log_path", &self.log_path())
            .field("verbose", &self.verbose)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_echoed_only_when_verbose() {
        let mut quiet = Output::in_memory(false);
        quiet.echo_command("cmake --preset x");
        assert_eq!(quiet.captured().unwrap(), "");

        let mut verbose = Output::in_memory(true);
        verbose.echo_command("cmake --preset x");
        assert_eq!(verbose.captured().unwrap(), "[cmd] cmake --preset x\n");
    }

    #[test]
    fn log_file_receives_lines_and_echoes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        {
            let mut output = Output::log_file(&path, false).unwrap();
            output.emit("Running cfg configure...");
            output.echo_command("cmake --preset cfg");
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Running cfg configure...\n[cmd] cmake --preset cfg\n");
    }
}
