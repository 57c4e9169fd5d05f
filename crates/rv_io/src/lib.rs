// crates/rv_io/src/lib.rs

//! Rivulet IO 模块 (Layer 4)
//!
//! # 模块
//!
//! - [`set_fields`]: setFieldsDict 解析、条目渲染与拼接
//! - [`atomic`]: 原子文件写入
//! - [`diagnostics`]: 剖面诊断（CSV，可选 SVG）
//! - [`error`]: IO 错误类型
//!
//! # 可选特性
//!
//! - `plot`: 启用 plotters 绘制诊断图
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use rv_io::set_fields::patch_file;
//!
//! let ic = rv_physics::solve(&config)?;
//! patch_file(Path::new("system/setFieldsDict"), &ic.primitives, SpliceMode::Prepend)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod diagnostics;
pub mod error;
pub mod set_fields;

pub use atomic::write_atomic;
pub use diagnostics::{write_diagnostics, write_profile_csv};
pub use error::{IoError, IoResult};
pub use set_fields::{patch_file, patch_text, SetFieldsDict, SpliceSummary};
