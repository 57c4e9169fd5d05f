// crates/rv_physics/src/solver.rs

//! 溪流初始条件求解器
//!
//! 流程：
//!
//! 1. 校验物理与几何参数，计算入口条件 (h, a0)
//! 2. 在 `[-h, L]` 上等距取 `nCellsX + round(nCellsX h / L) + 1` 个点，
//!    从 a0 出发积分半宽方程
//! 3. 由半宽得到接触角与中心线高度，构成 [`SpreadingProfile`]
//! 4. 每个平板单元生成一个液体圆柱，并沿高度生成一列速度/压力盒；
//!    可选地用一个旋转盒填充入口区
//!
//! 采样间距为 `(L + h)/(n - 1)` 而非 `deltaX`，因此平板区的首个采样是最接近
//! `x = 0` 的点，不一定恰好位于 `x = 0`。圆柱从该采样起沿 x 方向延伸 `deltaX`。
//!
//! 求解是输入的纯函数，失败时不返回部分结果。
//!
//! ```ignore
//! use rv_physics::{GeometryParameters, PhysicalParameters, RivuletSolver, lookup};
//!
//! let physics = PhysicalParameters::from_fluid(0.26e-6, &lookup("DC10").properties(), 1.047, 3e-5);
//! let geometry = GeometryParameters::new(0.06, 150, 3e-3, 15);
//! let ic = RivuletSolver::new(physics, geometry).solve()?;
//! println!("{} 个区域", ic.primitives.len());
//! ```

use rv_config::{CaseConfig, FieldNames, IntegratorConfig};
use rv_foundation::float::linspace;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{SolverError, SolverResult};
use crate::fluid::{resolve, FluidLookup};
use crate::model::{InletCondition, SpreadingModel};
use crate::numerics::{create_integrator, OdeStats};
use crate::params::{GeometryParameters, PhysicalParameters};
use crate::primitives::{GeometricPrimitive, PrimitiveBuilder, PrimitiveCounts};
use crate::profile::{ProfileSample, SpreadingProfile};

/// 入口填充旋转盒的横向尺度 [m]
const INLET_FILL_EXTENT: f64 = 10.0;

/// 求解结果
#[derive(Debug, Clone, Serialize)]
pub struct RivuletInitialCondition {
    /// 铺展剖面
    pub profile: SpreadingProfile,
    /// 区域基元
    pub primitives: Vec<GeometricPrimitive>,
    /// 入口条件
    pub inlet: InletCondition,
    /// 液体解析结果（由配置构建时存在）
    pub fluid: Option<FluidLookup>,
    /// 积分统计
    pub stats: OdeStats,
}

impl RivuletInitialCondition {
    /// 各类基元数量
    pub fn counts(&self) -> PrimitiveCounts {
        PrimitiveCounts::of(&self.primitives)
    }
}

/// 溪流初始条件求解器
#[derive(Debug, Clone)]
pub struct RivuletSolver {
    physics: PhysicalParameters,
    geometry: GeometryParameters,
    integrator: IntegratorConfig,
    fields: FieldNames,
    fill_inlet: bool,
    fluid: Option<FluidLookup>,
}

impl RivuletSolver {
    /// 使用默认积分器设置与场名称创建求解器
    pub fn new(physics: PhysicalParameters, geometry: GeometryParameters) -> Self {
        Self {
            physics,
            geometry,
            integrator: IntegratorConfig::default(),
            fields: FieldNames::default(),
            fill_inlet: true,
            fluid: None,
        }
    }

    /// 由算例配置创建求解器，同时解析液体
    pub fn from_config(config: &CaseConfig) -> SolverResult<Self> {
        let fluid = resolve(&config.fluid)?;
        let physics = PhysicalParameters::from_config(config, &fluid.properties());
        Ok(Self::new(physics, GeometryParameters::from_config(config))
            .with_integrator(config.integrator.clone())
            .with_fields(config.output.fields.clone())
            .with_inlet_fill(config.output.fill_inlet)
            .with_fluid(fluid))
    }

    /// 设置积分器
    pub fn with_integrator(mut self, integrator: IntegratorConfig) -> Self {
        self.integrator = integrator;
        self
    }

    /// 设置场名称
    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }

    /// 是否填充入口区
    pub fn with_inlet_fill(mut self, fill_inlet: bool) -> Self {
        self.fill_inlet = fill_inlet;
        self
    }

    /// 记录液体来源
    pub fn with_fluid(mut self, fluid: FluidLookup) -> Self {
        self.fluid = Some(fluid);
        self
    }

    /// 物理参数
    pub fn physics(&self) -> &PhysicalParameters {
        &self.physics
    }

    /// 几何参数
    pub fn geometry(&self) -> &GeometryParameters {
        &self.geometry
    }

    /// 入口区采样数 round(nCellsX h / L)
    pub fn inlet_sample_count(&self, inlet: &InletCondition) -> usize {
        let g = &self.geometry;
        (g.cells_x as f64 * inlet.height / g.length).round() as usize
    }

    /// 求解
    pub fn solve(&self) -> SolverResult<RivuletInitialCondition> {
        self.physics.validate()?;
        self.geometry.validate()?;

        let model = SpreadingModel::new(self.physics);
        let inlet = model.inlet();
        if !inlet.height.is_finite() || inlet.height <= 0.0 {
            return Err(SolverError::invalid(
                "inlet_height",
                inlet.height,
                "入口液面高度必须为有限正数",
            ));
        }
        let singular = model.singular_half_width();
        if inlet.half_width <= singular {
            return Err(SolverError::invalid(
                "regularization_length",
                self.physics.regularization_length,
                format!(
                    "入口半宽 {:.4e} m 不大于对数奇点 2e²l = {:.4e} m",
                    inlet.half_width, singular
                ),
            ));
        }

        let g = &self.geometry;
        let n_inlet = self.inlet_sample_count(&inlet);
        let n_samples = g.cells_x + n_inlet + 1;
        let xs = linspace(-inlet.height, g.length, n_samples);

        let integrator = create_integrator(&self.integrator);
        info!(
            "求解溪流剖面: h={:.4e} m, a0={:.4e} m, {} 个采样 (入口 {}), 积分器 {}",
            inlet.height,
            inlet.half_width,
            n_samples,
            n_inlet,
            integrator.name()
        );
        let solution = integrator.integrate(&model, inlet.half_width, &xs)?;

        let profile = SpreadingProfile::from_half_widths(&model, &xs, &solution.values, n_inlet)?;
        let primitives = self.emit_primitives(&model, &profile, &inlet)?;

        let ic = RivuletInitialCondition {
            profile,
            primitives,
            inlet,
            fluid: self.fluid.clone(),
            stats: solution.stats,
        };
        let counts = ic.counts();
        debug!(
            "生成区域: {} 圆柱, {} 盒, {} 旋转盒",
            counts.cylinders, counts.boxes, counts.rotated_boxes
        );
        Ok(ic)
    }

    fn emit_primitives(
        &self,
        model: &SpreadingModel,
        profile: &SpreadingProfile,
        inlet: &InletCondition,
    ) -> SolverResult<Vec<GeometricPrimitive>> {
        let g = &self.geometry;
        let dx = g.cell_width();
        let dz = g.cell_height();
        let mut builder = PrimitiveBuilder::new(self.fields.clone())
            .with_capacity(1 + g.cells_x * (1 + g.cells_z));

        if self.fill_inlet {
            let run = INLET_FILL_EXTENT / self.physics.inclination.tan();
            builder.liquid_rotated_box(
                [-inlet.height, -INLET_FILL_EXTENT, 0.0],
                [-run, 0.0, -INLET_FILL_EXTENT],
                [0.0, 2.0 * INLET_FILL_EXTENT, 0.0],
                [INLET_FILL_EXTENT, 0.0, -run],
            );
        }

        for sample in profile.plate_region().iter().take(g.cells_x) {
            emit_cell(&mut builder, model, sample, dx, dz)?;
        }

        Ok(builder.build())
    }
}

/// 单个平板单元：一个液体圆柱加一列速度/压力盒
fn emit_cell(
    builder: &mut PrimitiveBuilder,
    model: &SpreadingModel,
    sample: &ProfileSample,
    dx: f64,
    dz: f64,
) -> SolverResult<()> {
    let x = sample.x;
    let h0 = sample.centerline_height;
    let radius = sample.arc_radius();
    let offset = sample.arc_offset();
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SolverError::divergence(x, format!("截面半径 R={} 非有限或非正", radius)));
    }
    builder.liquid_cylinder([x, 0.0, -offset], [x + dx, 0.0, -offset], radius);

    let pressure = model.capillary_pressure(sample.half_width, sample.contact_angle);
    let n_boxes = ((h0 / dz).ceil() as usize).max(1);
    for j in 0..n_boxes {
        let z = j as f64 * dz;
        let depth = h0 - z;
        let chord = ((radius - depth / 2.0) * 8.0 * depth).sqrt();
        if !chord.is_finite() {
            return Err(SolverError::divergence(x, format!("z={:.4e} 处弦长非有限", z)));
        }
        let u = model.film_velocity(h0, z);
        builder.flow_box([x, -chord, z], [x + dx, chord, z + dz], [u, 0.0, 0.0], pressure);
    }
    Ok(())
}

/// 由算例配置直接求解
pub fn solve(config: &CaseConfig) -> SolverResult<RivuletInitialCondition> {
    RivuletSolver::from_config(config)?.solve()
}
