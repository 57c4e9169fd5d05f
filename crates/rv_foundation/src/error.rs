// crates/rv_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `RvError` 枚举和 `RvResult` 类型别名。
//! 物理计算相关的错误在 `rv_physics` 中定义，配置错误在 `rv_config` 中定义。
//!
//! # 示例
//!
//! ```
//! use rv_foundation::error::{RvError, RvResult};
//!
//! fn open_dict() -> RvResult<()> {
//!     Err(RvError::parse("system/setFieldsDict", 3, "括号不匹配"))
//! }
//! assert!(open_dict().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type RvResult<T> = Result<T, RvError>;

/// Rivulet 错误类型
#[derive(Error, Debug)]
pub enum RvError {
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始，0 表示未知）
        line: usize,
        /// 错误信息
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RvError {
    /// 创建 IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 创建 IO 错误（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 是否为 IO 类错误
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::FileNotFound { .. })
    }
}

impl From<std::io::Error> for RvError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::io_with_source("文件或目录不存在", err)
        } else {
            Self::io_with_source(err.to_string(), err)
        }
    }
}
