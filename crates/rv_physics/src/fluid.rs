// crates/rv_physics/src/fluid.rs

//! 液体物性表
//!
//! 固定的小型物性表（五种液体加空气），按名称查找。
//! 未知名称回退到 DC10 硅油，回退结果以 [`FluidLookup::Fallback`]
//! 显式返回并输出警告，调用方可据此决定是否接受。
//!
//! | 名称  | 说明                         |
//! |-------|------------------------------|
//! | DC05  | 硅油                         |
//! | DC10  | 硅油（默认回退）             |
//! | H2O   | 水（Freiberg 实验）          |
//! | H2OCk | 水（Cooke et al. 2012）      |
//! | SURF  | 含表面活性剂的水             |
//! | AIR   | 25 °C 空气                   |

use rv_config::{FluidConfig, FluidSpec};
use serde::Serialize;
use tracing::warn;

use crate::error::{SolverError, SolverResult};

/// 回退液体名称
pub const FALLBACK_FLUID: &str = "DC10";

/// 液体物性
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluidProperties {
    /// 表面张力 sigma [N/m]
    pub surface_tension: f64,
    /// 密度 rho [kg/m³]
    pub density: f64,
    /// 动力黏度 mu [Pa·s]
    pub viscosity: f64,
    /// 平衡接触角 [度]
    pub theta_equilibrium: f64,
    /// 前进接触角 [度]
    pub theta_advancing: f64,
    /// 后退接触角 [度]
    pub theta_receding: f64,
}

impl FluidProperties {
    const fn new(
        surface_tension: f64,
        density: f64,
        viscosity: f64,
        theta_equilibrium: f64,
        theta_advancing: f64,
        theta_receding: f64,
    ) -> Self {
        Self {
            surface_tension,
            density,
            viscosity,
            theta_equilibrium,
            theta_advancing,
            theta_receding,
        }
    }

    /// 运动黏度 nu = mu / rho [m²/s]
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity / self.density
    }
}

const FLUIDS: [(&str, FluidProperties); 6] = [
    ("DC05", FluidProperties::new(17.57e-3, 920.0, 5.073e-3, 5.0, 10.0, 0.0)),
    ("DC10", FluidProperties::new(17.89e-3, 940.0, 10.419e-3, 5.0, 10.0, 0.0)),
    ("H2O", FluidProperties::new(55.18e-3, 998.0, 1.178e-3, 60.0, 70.0, 50.0)),
    ("H2OCk", FluidProperties::new(72.80e-3, 997.0, 8.899e-4, 70.0, 75.0, 65.0)),
    ("SURF", FluidProperties::new(29.36e-3, 998.0, 1.114e-3, 0.0, 0.0, 0.0)),
    ("AIR", FluidProperties::new(0.0, 1.184, 18.408e-6, 0.0, 0.0, 0.0)),
];

/// 查找结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FluidLookup {
    /// 在物性表中找到
    Found {
        /// 表中的规范名称
        name: &'static str,
        /// 物性
        properties: FluidProperties,
    },
    /// 未找到，使用回退液体
    Fallback {
        /// 请求的名称
        requested: String,
        /// 回退液体的物性
        properties: FluidProperties,
    },
    /// 配置中直接给出的物性
    Custom(FluidProperties),
}

impl FluidLookup {
    /// 最终使用的物性
    pub fn properties(&self) -> FluidProperties {
        match self {
            Self::Found { properties, .. } | Self::Fallback { properties, .. } => *properties,
            Self::Custom(properties) => *properties,
        }
    }

    /// 是否使用了回退液体
    pub fn used_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// 描述用名称
    pub fn label(&self) -> String {
        match self {
            Self::Found { name, .. } => (*name).to_string(),
            Self::Fallback { requested, .. } => format!("{} -> {}", requested, FALLBACK_FLUID),
            Self::Custom(_) => "custom".to_string(),
        }
    }
}

/// 列出物性表中的液体名称
pub fn available_fluids() -> Vec<&'static str> {
    FLUIDS.iter().map(|(name, _)| *name).collect()
}

fn find(name: &str) -> Option<(&'static str, FluidProperties)> {
    FLUIDS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|(key, props)| (*key, *props))
}

/// 按名称查找液体物性
///
/// 名称不区分大小写；未知名称回退到 [`FALLBACK_FLUID`] 并输出警告。
pub fn lookup(name: &str) -> FluidLookup {
    match find(name) {
        Some((key, properties)) => FluidLookup::Found {
            name: key,
            properties,
        },
        None => {
            warn!("未知液体 '{}'，使用 {} 物性", name, FALLBACK_FLUID);
            let (_, properties) = FLUIDS[1];
            FluidLookup::Fallback {
                requested: name.to_string(),
                properties,
            }
        }
    }
}

/// 按名称严格查找，未知名称返回错误
pub fn lookup_strict(name: &str) -> SolverResult<FluidLookup> {
    match find(name) {
        Some((key, properties)) => Ok(FluidLookup::Found {
            name: key,
            properties,
        }),
        None => Err(SolverError::UnknownFluid {
            name: name.to_string(),
            available: available_fluids(),
        }),
    }
}

/// 根据配置解析液体物性
pub fn resolve(config: &FluidConfig) -> SolverResult<FluidLookup> {
    match &config.liquid {
        FluidSpec::Named(name) if config.strict => lookup_strict(name),
        FluidSpec::Named(name) => Ok(lookup(name)),
        FluidSpec::Custom(custom) => Ok(FluidLookup::Custom(FluidProperties {
            surface_tension: custom.surface_tension,
            density: custom.density,
            viscosity: custom.viscosity,
            theta_equilibrium: custom.contact_angles[0],
            theta_advancing: custom.contact_angles[1],
            theta_receding: custom.contact_angles[2],
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_config::CustomFluid;

    #[test]
    fn test_lookup_known_fluid() {
        let result = lookup("DC05");
        assert!(!result.used_fallback());
        let p = result.properties();
        assert_eq!(p.density, 920.0);
        assert_eq!(p.viscosity, 5.073e-3);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(matches!(lookup("h2ock"), FluidLookup::Found { name: "H2OCk", .. }));

        // 小写名称解析为水，而不是回退到 DC10
        let water = lookup("h2o");
        assert!(!water.used_fallback());
        assert!(matches!(water, FluidLookup::Found { name: "H2O", .. }));
        assert_eq!(water.properties(), lookup("H2O").properties());
        assert_ne!(water.properties(), lookup(FALLBACK_FLUID).properties());

        assert!(matches!(lookup("  dc10 "), FluidLookup::Found { name: "DC10", .. }));
    }

    #[test]
    fn test_unknown_fluid_falls_back_to_dc10() {
        let result = lookup("glycerol");
        assert!(result.used_fallback());
        assert_eq!(result.properties(), lookup("DC10").properties());
        assert_eq!(result.label(), "glycerol -> DC10");
    }

    #[test]
    fn test_strict_lookup_rejects_unknown() {
        let config = FluidConfig {
            liquid: FluidSpec::Named("glycerol".into()),
            strict: true,
        };
        assert!(matches!(resolve(&config), Err(SolverError::UnknownFluid { .. })));
    }

    #[test]
    fn test_resolve_custom() {
        let config = FluidConfig {
            liquid: FluidSpec::Custom(CustomFluid {
                surface_tension: 0.02,
                density: 1000.0,
                viscosity: 1e-3,
                contact_angles: [30.0, 40.0, 20.0],
            }),
            strict: true,
        };
        let result = resolve(&config).unwrap();
        assert_eq!(result.properties().theta_advancing, 40.0);
        assert!((result.properties().kinematic_viscosity() - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_available_fluids_lists_table() {
        let names = available_fluids();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"AIR"));
    }
}
