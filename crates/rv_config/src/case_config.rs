// crates/rv_config/src/case_config.rs

//! CaseConfig - 初始条件算例配置
//!
//! 从 JSON 文件加载，所有字段都有默认值，缺省的 JSON 对象 `{}`
//! 即对应 DC10 硅油、0.26 mL/s、60° 倾角的参考算例。
//!
//! ```
//! use rv_config::CaseConfig;
//!
//! let config: CaseConfig = serde_json::from_str(r#"{ "plate": { "cells_x": 40 } }"#).unwrap();
//! assert_eq!(config.plate.cells_x, 40);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use rv_foundation::validation::{warn_if_unusual, ValidationReport, ValidationWarning};

/// 算例配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 物理参数
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// 液体选择
    #[serde(default)]
    pub fluid: FluidConfig,

    /// 平板几何与网格分辨率
    #[serde(default)]
    pub plate: PlateConfig,

    /// ODE 积分器设置
    #[serde(default)]
    pub integrator: IntegratorConfig,

    /// 输出设置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 物理参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// 入口体积流量 [m³/s]
    #[serde(default = "default_flow_rate")]
    pub flow_rate: f64,

    /// 平板倾角 [度]
    #[serde(default = "default_inclination_deg")]
    pub inclination_deg: f64,

    /// 对数项的正则化长度 l [m]
    #[serde(default = "default_regularization_length")]
    pub regularization_length: f64,

    /// 重力加速度 [m/s²]
    #[serde(default = "default_gravity")]
    pub gravity: f64,
}

fn default_flow_rate() -> f64 { 0.26e-6 }
fn default_inclination_deg() -> f64 { 60.0 }
fn default_regularization_length() -> f64 { 3.0e-5 }
fn default_gravity() -> f64 { 9.81 }

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            flow_rate: default_flow_rate(),
            inclination_deg: default_inclination_deg(),
            regularization_length: default_regularization_length(),
            gravity: default_gravity(),
        }
    }
}

impl PhysicsConfig {
    /// 倾角 [rad]
    pub fn inclination_rad(&self) -> f64 {
        self.inclination_deg.to_radians()
    }
}

/// 液体配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidConfig {
    /// 液体名称或自定义物性
    #[serde(default)]
    pub liquid: FluidSpec,

    /// 严格模式：未知液体名称时报错而不是回退
    #[serde(default)]
    pub strict: bool,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            liquid: FluidSpec::default(),
            strict: false,
        }
    }
}

/// 液体指定方式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FluidSpec {
    /// 物性表中的液体名称，例如 "DC10"
    Named(String),
    /// 自定义物性
    Custom(CustomFluid),
}

impl Default for FluidSpec {
    fn default() -> Self {
        FluidSpec::Named("DC10".to_string())
    }
}

/// 自定义液体物性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFluid {
    /// 表面张力 [N/m]
    pub surface_tension: f64,
    /// 密度 [kg/m³]
    pub density: f64,
    /// 动力黏度 [Pa·s]
    pub viscosity: f64,
    /// 平衡/前进/后退接触角 [度]
    #[serde(default)]
    pub contact_angles: [f64; 3],
}

/// 平板与网格配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateConfig {
    /// 平板长度 L [m]
    #[serde(default = "default_plate_length")]
    pub length: f64,

    /// 长度方向单元数
    #[serde(default = "default_cells_x")]
    pub cells_x: usize,

    /// 计算域高度 H [m]
    #[serde(default = "default_plate_height")]
    pub height: f64,

    /// 高度方向单元数
    #[serde(default = "default_cells_z")]
    pub cells_z: usize,
}

fn default_plate_length() -> f64 { 0.06 }
fn default_cells_x() -> usize { 150 }
fn default_plate_height() -> f64 { 3.0e-3 }
fn default_cells_z() -> usize { 15 }

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            length: default_plate_length(),
            cells_x: default_cells_x(),
            height: default_plate_height(),
            cells_z: default_cells_z(),
        }
    }
}

/// ODE 积分器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// 显式 Dormand-Prince 5(4)
    #[default]
    DormandPrince,
    /// 线性隐式 Rosenbrock 2(1)，适用于刚性区段
    Rosenbrock,
}

/// ODE 积分器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratorConfig {
    /// 积分器类型
    #[serde(default)]
    pub kind: IntegratorKind,

    /// 相对容差
    #[serde(default = "default_rtol")]
    pub rtol: f64,

    /// 绝对容差 [m]
    #[serde(default = "default_atol")]
    pub atol: f64,

    /// 最大步数
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// 最小步长 [m]，小于该值视为发散
    #[serde(default = "default_min_step")]
    pub min_step: f64,

    /// 初始步长 [m]，缺省时自动估计
    #[serde(default)]
    pub initial_step: Option<f64>,
}

fn default_rtol() -> f64 { 1e-8 }
fn default_atol() -> f64 { 1e-12 }
fn default_max_steps() -> usize { 200_000 }
fn default_min_step() -> f64 { 1e-16 }

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            kind: IntegratorKind::default(),
            rtol: default_rtol(),
            atol: default_atol(),
            max_steps: default_max_steps(),
            min_step: default_min_step(),
            initial_step: None,
        }
    }
}

/// setFieldsDict 拼接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpliceMode {
    /// 新条目插入 regions 列表开头，保留原有条目
    #[default]
    Prepend,
    /// 用新条目替换原有条目
    Replace,
}

/// 场名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    /// 体积分数场
    #[serde(default = "default_liquid_field")]
    pub liquid: String,
    /// 速度场
    #[serde(default = "default_velocity_field")]
    pub velocity: String,
    /// 压力场
    #[serde(default = "default_pressure_field")]
    pub pressure: String,
}

fn default_liquid_field() -> String { "alpha.liquid".to_string() }
fn default_velocity_field() -> String { "U".to_string() }
fn default_pressure_field() -> String { "p_rgh".to_string() }

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            liquid: default_liquid_field(),
            velocity: default_velocity_field(),
            pressure: default_pressure_field(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 目标 setFieldsDict 路径
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,

    /// 拼接方式
    #[serde(default)]
    pub splice: SpliceMode,

    /// 场名称
    #[serde(default)]
    pub fields: FieldNames,

    /// 是否用旋转盒填充入口区域
    #[serde(default = "default_fill_inlet")]
    pub fill_inlet: bool,

    /// 诊断输出目录（CSV / SVG）
    #[serde(default)]
    pub diagnostics_dir: Option<PathBuf>,

    /// 是否绘制诊断图
    #[serde(default)]
    pub plot: bool,
}

fn default_dictionary() -> PathBuf { PathBuf::from("system/setFieldsDict") }
fn default_fill_inlet() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            splice: SpliceMode::default(),
            fields: FieldNames::default(),
            fill_inlet: default_fill_inlet(),
            diagnostics_dir: None,
            plot: false,
        }
    }
}

impl CaseConfig {
    /// 从文件加载配置并验证
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置并验证
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: CaseConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        positive("physics.flow_rate", p.flow_rate)?;
        positive("physics.regularization_length", p.regularization_length)?;
        positive("physics.gravity", p.gravity)?;
        if !p.inclination_deg.is_finite() || p.inclination_deg <= 0.0 || p.inclination_deg >= 90.0 {
            return Err(ConfigError::invalid(
                "physics.inclination_deg",
                p.inclination_deg,
                "倾角必须在 (0, 90) 度范围内",
            ));
        }

        if let FluidSpec::Custom(custom) = &self.fluid.liquid {
            positive("fluid.liquid.surface_tension", custom.surface_tension)?;
            positive("fluid.liquid.density", custom.density)?;
            positive("fluid.liquid.viscosity", custom.viscosity)?;
        }

        positive("plate.length", self.plate.length)?;
        positive("plate.height", self.plate.height)?;
        if self.plate.cells_x == 0 {
            return Err(ConfigError::invalid("plate.cells_x", 0, "必须至少为 1"));
        }
        if self.plate.cells_z == 0 {
            return Err(ConfigError::invalid("plate.cells_z", 0, "必须至少为 1"));
        }

        let it = &self.integrator;
        positive("integrator.rtol", it.rtol)?;
        positive("integrator.atol", it.atol)?;
        positive("integrator.min_step", it.min_step)?;
        if it.max_steps == 0 {
            return Err(ConfigError::invalid("integrator.max_steps", 0, "必须至少为 1"));
        }
        if let Some(h0) = it.initial_step {
            positive("integrator.initial_step", h0)?;
        }

        let fields = &self.output.fields;
        for (key, name) in [
            ("output.fields.liquid", &fields.liquid),
            ("output.fields.velocity", &fields.velocity),
            ("output.fields.pressure", &fields.pressure),
        ] {
            if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
                return Err(ConfigError::invalid(key, name, "场名称不能为空或包含空白"));
            }
        }

        Ok(())
    }

    /// 收集不致命的配置警告
    pub fn warnings(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let p = &self.physics;
        warn_if_unusual(&mut report, "physics.gravity", p.gravity, 9.7, 9.9);
        // 代理模型只针对低流量推导
        warn_if_unusual(&mut report, "physics.flow_rate", p.flow_rate, 1e-8, 5e-6);
        warn_if_unusual(&mut report, "physics.inclination_deg", p.inclination_deg, 5.0, 85.0);

        let cell_x = self.plate.length / self.plate.cells_x as f64;
        if p.regularization_length > cell_x {
            report.add_warning(ValidationWarning::Custom {
                message: format!(
                    "正则化长度 {} m 大于网格间距 {} m",
                    p.regularization_length, cell_x
                ),
            });
        }
        report
    }
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "必须为有限正数"))
    }
}
