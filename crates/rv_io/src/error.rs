// crates/rv_io/src/error.rs
//! IO 错误类型定义
//!
//! 字典解析错误携带文件与行号；底层文件错误经由 `RvError` 传递。

use rv_foundation::RvError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 字典中没有 regions 列表
    #[error("未找到 regions 列表: {file}")]
    MissingRegions {
        /// 字典文件
        file: String,
    },

    /// 括号或注释不匹配
    #[error("括号不匹配: {file}:{line} - {message}")]
    Unbalanced {
        /// 字典文件
        file: String,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 绘图失败
    #[error("绘图失败: {0}")]
    Plot(String),

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] RvError),
}

impl IoError {
    /// 创建括号不匹配错误
    pub fn unbalanced(file: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Unbalanced {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Foundation(err.into())
    }
}

impl From<IoError> for RvError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::MissingRegions { file } => RvError::parse(file, 0, "未找到 regions 列表"),
            IoError::Unbalanced { file, line, message } => RvError::parse(file, line, message),
            IoError::Plot(msg) => RvError::io(format!("绘图失败: {msg}")),
            IoError::Foundation(rv_err) => rv_err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbalanced_converts_to_parse_error() {
        let err: RvError = IoError::unbalanced("setFieldsDict", 7, "缺少 ')'").into();
        assert!(matches!(err, RvError::ParseError { line: 7, .. }));
    }

    #[test]
    fn test_io_error_is_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: IoError = io.into();
        assert!(matches!(err, IoError::Foundation(ref e) if e.is_io()));
    }
}
