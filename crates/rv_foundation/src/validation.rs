// crates/rv_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于物理参数与求解结果的检查。
//!
//! # 示例
//!
//! ```
//! use rv_foundation::validation::{check_open_range, ValidationReport};
//!
//! let mut report = ValidationReport::new();
//! check_open_range(&mut report, "inclination", 2.0, 0.0, std::f64::consts::FRAC_PI_2);
//! assert!(report.has_errors());
//! ```

use std::fmt;

/// 验证报告
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 第一个错误
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// 合并另一个报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.errors.len())?;
        writeln!(f, "  警告: {} 个", self.warnings.len())?;

        if self.has_errors() {
            writeln!(f, "\n错误详情:")?;
            for (i, err) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, err)?;
            }
        }

        if self.has_warnings() {
            writeln!(f, "\n警告详情:")?;
            for (i, warn) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, warn)?;
            }
        }

        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 非有限值
    NonFinite {
        /// 字段名称
        field: &'static str,
        /// 非有限的数值
        value: f64,
    },
    /// 非正值
    NotPositive {
        /// 字段名称
        field: &'static str,
        /// 实际值
        value: f64,
    },
    /// 数据超出开区间 (min, max)
    OutOfRange {
        /// 字段名称
        field: &'static str,
        /// 实际值
        value: f64,
        /// 下界（不含）
        min: f64,
        /// 上界（不含）
        max: f64,
    },
    /// 自定义错误
    Custom {
        /// 字段名称
        field: &'static str,
        /// 自定义消息
        message: String,
    },
}

impl ValidationError {
    /// 出错的字段名称
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonFinite { field, .. }
            | Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Custom { field, .. } => field,
        }
    }

    /// 出错的数值（自定义错误无数值）
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::NonFinite { value, .. }
            | Self::NotPositive { value, .. }
            | Self::OutOfRange { value, .. } => Some(*value),
            Self::Custom { .. } => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, value } => {
                write!(f, "字段{}={} (非有限值)", field, value)
            }
            Self::NotPositive { field, value } => {
                write!(f, "字段{}={} 必须为正", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "字段{}={} 超出范围({}, {})", field, value, min, max)
            }
            Self::Custom { field, message } => {
                write!(f, "字段{}: {}", field, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// 数值偏离常用范围
    Unusual {
        /// 字段名称
        field: &'static str,
        /// 实际值
        value: f64,
        /// 说明
        message: String,
    },
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unusual {
                field,
                value,
                message,
            } => write!(f, "字段{}={}: {}", field, value, message),
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}

// ============================================================================
// 验证辅助函数
// ============================================================================

/// 检查值是否有限
pub fn check_finite(report: &mut ValidationReport, field: &'static str, value: f64) -> bool {
    if !value.is_finite() {
        report.add_error(ValidationError::NonFinite { field, value });
        false
    } else {
        true
    }
}

/// 检查值是否为有限正数
pub fn check_positive(report: &mut ValidationReport, field: &'static str, value: f64) -> bool {
    if !check_finite(report, field, value) {
        return false;
    }
    if value <= 0.0 {
        report.add_error(ValidationError::NotPositive { field, value });
        false
    } else {
        true
    }
}

/// 检查值是否位于开区间 (min, max) 内
pub fn check_open_range(
    report: &mut ValidationReport,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> bool {
    if !check_finite(report, field, value) {
        return false;
    }
    if value <= min || value >= max {
        report.add_error(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
        false
    } else {
        true
    }
}

/// 值超出常用范围 [low, high] 时添加警告
pub fn warn_if_unusual(
    report: &mut ValidationReport,
    field: &'static str,
    value: f64,
    low: f64,
    high: f64,
) {
    if value < low || value > high {
        report.add_warning(ValidationWarning::Unusual {
            field,
            value,
            message: format!("常用范围为 [{}, {}]", low, high),
        });
    }
}
