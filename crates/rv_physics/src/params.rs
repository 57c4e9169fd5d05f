// crates/rv_physics/src/params.rs

//! 物理参数与几何参数
//!
//! 两者均为不可变记录，构造后通过 `validate` 检查不变量。

use std::f64::consts::FRAC_PI_2;

use rv_config::CaseConfig;
use rv_foundation::validation::{check_open_range, check_positive, ValidationReport};
use serde::Serialize;

use crate::error::{SolverError, SolverResult};
use crate::fluid::FluidProperties;

/// 标准重力加速度 [m/s²]
pub const STANDARD_GRAVITY: f64 = 9.81;

/// 物理参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalParameters {
    /// 体积流量 Q0 [m³/s]
    pub flow_rate: f64,
    /// 密度 rho [kg/m³]
    pub density: f64,
    /// 动力黏度 mu [Pa·s]
    pub viscosity: f64,
    /// 表面张力 sigma [N/m]
    pub surface_tension: f64,
    /// 倾角 alpha [rad]
    pub inclination: f64,
    /// 正则化长度 l [m]
    pub regularization_length: f64,
    /// 重力加速度 g [m/s²]
    pub gravity: f64,
}

impl PhysicalParameters {
    /// 由液体物性构造（标准重力）
    pub fn from_fluid(
        flow_rate: f64,
        fluid: &FluidProperties,
        inclination: f64,
        regularization_length: f64,
    ) -> Self {
        Self {
            flow_rate,
            density: fluid.density,
            viscosity: fluid.viscosity,
            surface_tension: fluid.surface_tension,
            inclination,
            regularization_length,
            gravity: STANDARD_GRAVITY,
        }
    }

    /// 由算例配置与解析后的液体物性构造
    pub fn from_config(config: &CaseConfig, fluid: &FluidProperties) -> Self {
        Self {
            gravity: config.physics.gravity,
            ..Self::from_fluid(
                config.physics.flow_rate,
                fluid,
                config.physics.inclination_rad(),
                config.physics.regularization_length,
            )
        }
    }

    /// 重力沿平板方向的分量 g·sin(alpha)
    pub fn gravity_along_plate(&self) -> f64 {
        self.gravity * self.inclination.sin()
    }

    /// 检查不变量，收集全部错误
    pub fn report(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        check_positive(&mut report, "flow_rate", self.flow_rate);
        check_positive(&mut report, "density", self.density);
        check_positive(&mut report, "viscosity", self.viscosity);
        check_positive(&mut report, "surface_tension", self.surface_tension);
        check_open_range(&mut report, "inclination", self.inclination, 0.0, FRAC_PI_2);
        check_positive(&mut report, "regularization_length", self.regularization_length);
        check_positive(&mut report, "gravity", self.gravity);
        report
    }

    /// 检查不变量，返回第一个错误
    pub fn validate(&self) -> SolverResult<()> {
        first_error(self.report())
    }
}

/// 几何与网格参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryParameters {
    /// 平板长度 L [m]
    pub length: f64,
    /// 长度方向单元数
    pub cells_x: usize,
    /// 计算域高度 H [m]
    pub height: f64,
    /// 高度方向单元数
    pub cells_z: usize,
}

impl GeometryParameters {
    /// 创建几何参数
    pub fn new(length: f64, cells_x: usize, height: f64, cells_z: usize) -> Self {
        Self {
            length,
            cells_x,
            height,
            cells_z,
        }
    }

    /// 由算例配置构造
    pub fn from_config(config: &CaseConfig) -> Self {
        let plate = &config.plate;
        Self::new(plate.length, plate.cells_x, plate.height, plate.cells_z)
    }

    /// 流向单元宽度 deltaX = L / nCellsX
    pub fn cell_width(&self) -> f64 {
        self.length / self.cells_x as f64
    }

    /// 高度方向单元高度 deltaZ = H / nCellsZ
    pub fn cell_height(&self) -> f64 {
        self.height / self.cells_z as f64
    }

    /// 检查不变量
    pub fn validate(&self) -> SolverResult<()> {
        let mut report = ValidationReport::new();
        check_positive(&mut report, "length", self.length);
        check_positive(&mut report, "height", self.height);
        first_error(report)?;

        if self.cells_x == 0 {
            return Err(SolverError::invalid("cells_x", 0.0, "必须至少为 1"));
        }
        if self.cells_z == 0 {
            return Err(SolverError::invalid("cells_z", 0.0, "必须至少为 1"));
        }
        Ok(())
    }
}

fn first_error(report: ValidationReport) -> SolverResult<()> {
    match report.errors.into_iter().next() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid::lookup;
    use std::f64::consts::FRAC_PI_3;

    fn dc10() -> PhysicalParameters {
        PhysicalParameters::from_fluid(0.26e-6, &lookup("DC10").properties(), FRAC_PI_3, 3e-5)
    }

    #[test]
    fn test_valid_parameters() {
        assert!(dc10().validate().is_ok());
        assert!(dc10().report().is_valid());
    }

    #[test]
    fn test_inclination_bounds() {
        let mut p = dc10();
        p.inclination = FRAC_PI_2;
        assert!(matches!(
            p.validate(),
            Err(SolverError::InvalidParameter { name: "inclination", .. })
        ));
        p.inclination = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_report_collects_all_errors() {
        let mut p = dc10();
        p.flow_rate = 0.0;
        p.viscosity = -1.0;
        p.surface_tension = f64::NAN;
        assert_eq!(p.report().errors.len(), 3);
    }

    #[test]
    fn test_from_config_uses_config_gravity() {
        let mut config = CaseConfig::default();
        config.physics.gravity = 9.0;
        let p = PhysicalParameters::from_config(&config, &lookup("DC10").properties());
        assert_eq!(p.gravity, 9.0);
        assert!((p.inclination - FRAC_PI_3).abs() < 1e-12);
    }

    #[test]
    fn test_geometry_cell_sizes() {
        let g = GeometryParameters::new(0.06, 150, 3e-3, 15);
        assert!((g.cell_width() - 4e-4).abs() < 1e-15);
        assert!((g.cell_height() - 2e-4).abs() < 1e-15);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_geometry_rejects_zero_cells() {
        assert!(GeometryParameters::new(0.06, 0, 3e-3, 15).validate().is_err());
        assert!(GeometryParameters::new(0.06, 1, 3e-3, 0).validate().is_err());
        assert!(GeometryParameters::new(-0.06, 1, 3e-3, 1).validate().is_err());
    }
}
