// crates/rv_physics/src/lib.rs

//! Rivulet Physics Layer (Layer 3)
//!
//! 倾斜平板上溪流的初始形状代理模型，以及由其生成的区域初始化基元。
//!
//! - [`fluid`]: 液体物性表与查找
//! - [`params`]: 物理参数与几何参数
//! - [`model`]: 半宽常微分方程与闭式关系
//! - [`numerics`]: 自适应 ODE 积分器
//! - [`profile`]: 铺展剖面
//! - [`primitives`]: 几何区域基元
//! - [`solver`]: 求解流程
//!
//! # 示例
//!
//! ```
//! use rv_config::CaseConfig;
//!
//! let mut config = CaseConfig::default();
//! config.plate.cells_x = 10;
//! let ic = rv_physics::solve(&config).unwrap();
//! assert_eq!(ic.counts().cylinders, 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fluid;
pub mod model;
pub mod numerics;
pub mod params;
pub mod primitives;
pub mod profile;
pub mod solver;

pub use error::{SolverError, SolverResult};
pub use fluid::{
    available_fluids, lookup, lookup_strict, resolve, FluidLookup, FluidProperties, FALLBACK_FLUID,
};
pub use model::{InletCondition, SpreadingModel};
pub use numerics::{create_integrator, OdeIntegrator, OdeOptions, OdeStats, ScalarOde};
pub use params::{GeometryParameters, PhysicalParameters, STANDARD_GRAVITY};
pub use primitives::{FieldValue, GeometricPrimitive, PrimitiveBuilder, PrimitiveCounts, Vec3};
pub use profile::{ProfileSample, SpreadingProfile};
pub use solver::{solve, RivuletInitialCondition, RivuletSolver};
