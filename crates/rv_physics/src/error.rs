// crates/rv_physics/src/error.rs

//! 物理层错误类型
//!
//! 参数错误在积分开始前抛出；积分失败或结果出现非有限值时
//! 报告 `NumericalDivergence`，不会返回部分结果。

use rv_foundation::validation::ValidationError;
use thiserror::Error;

/// 物理层结果类型
pub type SolverResult<T> = Result<T, SolverError>;

/// 物理层错误
#[derive(Debug, Error)]
pub enum SolverError {
    /// 无效参数
    #[error("无效参数 {name}={value}: {reason}")]
    InvalidParameter {
        /// 参数名称
        name: &'static str,
        /// 参数值
        value: f64,
        /// 原因
        reason: String,
    },

    /// 数值发散
    #[error("数值发散 (x={x:.6e}): {reason}")]
    NumericalDivergence {
        /// 发生位置（流向坐标）
        x: f64,
        /// 原因
        reason: String,
    },

    /// 严格模式下的未知液体
    #[error("未知液体: {name} (可用: {available:?})")]
    UnknownFluid {
        /// 请求的名称
        name: String,
        /// 可用的液体名称
        available: Vec<&'static str>,
    },
}

impl SolverError {
    /// 创建无效参数错误
    pub fn invalid(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// 创建数值发散错误
    pub fn divergence(x: f64, reason: impl Into<String>) -> Self {
        Self::NumericalDivergence {
            x,
            reason: reason.into(),
        }
    }

    /// 是否为数值发散
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::NumericalDivergence { .. })
    }
}

impl From<ValidationError> for SolverError {
    fn from(err: ValidationError) -> Self {
        let reason = err.to_string();
        Self::InvalidParameter {
            name: err.field(),
            value: err.value().unwrap_or(f64::NAN),
            reason,
        }
    }
}
