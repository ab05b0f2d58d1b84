//! # Commands Module / 命令模块
//!
//! Entry points behind the command-line interface.
//!
//! 命令行接口背后的入口点。

pub mod run;
