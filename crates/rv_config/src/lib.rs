// crates/rv_config/src/lib.rs

//! Rivulet Config Layer (Layer 2)
//!
//! 配置层，描述一次初始条件生成所需的全部输入。
//! 所有数值均为 f64，角度以度为单位存储，进入物理层时再转换。
//!
//! # 模块概览
//!
//! - [`case_config`]: `CaseConfig` 算例配置（JSON）
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: rv_cli        ─> uses CaseConfig
//! Layer 4: rv_io         ─> SpliceMode, FieldNames
//! Layer 3: rv_physics    ─> CaseConfig -> PhysicalParameters / GeometryParameters
//! Layer 2: rv_config     (本层)
//! Layer 1: rv_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case_config;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use case_config::{
    CaseConfig, CustomFluid, FieldNames, FluidConfig, FluidSpec, IntegratorConfig,
    IntegratorKind, OutputConfig, PhysicsConfig, PlateConfig, SpliceMode,
};
pub use error::ConfigError;
