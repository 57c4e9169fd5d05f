// crates/rv_foundation/src/lib.rs

//! Rivulet Foundation Layer
//!
//! 基础层，提供整个工作区共享的错误类型与验证工具。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `RvError` / `RvResult`
//! - [`validation`]: 验证报告与参数检查函数
//! - [`float`]: 浮点数辅助函数
//!
//! # 示例
//!
//! ```
//! use rv_foundation::validation::{check_positive, ValidationReport};
//!
//! let mut report = ValidationReport::new();
//! check_positive(&mut report, "viscosity", 1.0e-2);
//! assert!(report.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod validation;

pub use error::{RvError, RvResult};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};
