// crates/rv_physics/src/model.rs

//! 溪流铺展代理模型
//!
//! 惯性-毛细-重力平衡下溪流半宽 a(x) 的一阶常微分方程。
//! 重力只影响沿平板的推进速度，不影响截面形状。
//!
//! ## 模型
//!
//! 特征宽度与辅助尺度：
//!
//! ```text
//! psi   = (105 mu Q0 / (4 rho g sin(alpha)))^(1/3)
//! varpi = 2 mu / (rho g sin(alpha) l^2)
//! ```
//!
//! 表观接触角与中心线高度：
//!
//! ```text
//! beta(a)    = arctan(psi / a^(4/3))
//! h0(a,beta) = 2 a tan(beta) / 2
//! ```
//!
//! 半宽方程：
//!
//! ```text
//! da/dx = beta(a)^3 sigma varpi / (9 mu ln(a / (2 e^2 l)))
//! ```
//!
//! 当 a -> 2 e^2 l 时对数项为零，方程奇异。
//!
//! ## 入口
//!
//! 入口液面高度按经验关系 `h = 2 pi / (5 alpha) (6 Q0^2 / g)^(1/5)`，
//! 入口半宽按 V 形截面近似 `a0 = 2 h sqrt(3) / 3`。

use std::f64::consts::{E, PI};

use serde::Serialize;

use crate::numerics::ScalarOde;
use crate::params::PhysicalParameters;

/// 入口条件
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InletCondition {
    /// 入口液面高度 h，同时是入口区长度 [m]
    pub height: f64,
    /// 入口半宽 a0 [m]
    pub half_width: f64,
}

impl InletCondition {
    /// 由物理参数计算入口条件
    pub fn from_parameters(params: &PhysicalParameters) -> Self {
        let q0 = params.flow_rate;
        let height = 2.0 * PI / (5.0 * params.inclination)
            * (6.0 * q0 * q0 / params.gravity).powf(0.2);
        let half_width = 2.0 * height * 3.0_f64.sqrt() / 3.0;
        Self { height, half_width }
    }
}

/// 代理模型
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadingModel {
    params: PhysicalParameters,
    /// 特征半宽尺度 psi
    psi: f64,
    /// 辅助尺度 varpi
    varpi: f64,
}

impl SpreadingModel {
    /// 由物理参数构建模型
    pub fn new(params: PhysicalParameters) -> Self {
        let g_sin = params.gravity_along_plate();
        let psi = (105.0 * params.viscosity * params.flow_rate / (4.0 * params.density * g_sin))
            .cbrt();
        let l = params.regularization_length;
        let varpi = 2.0 * params.viscosity / (params.density * g_sin * l * l);
        Self { params, psi, varpi }
    }

    /// 特征半宽尺度 psi
    pub fn psi(&self) -> f64 {
        self.psi
    }

    /// 辅助尺度 varpi
    pub fn varpi(&self) -> f64 {
        self.varpi
    }

    /// 对数项奇异处的半宽 2 e^2 l
    pub fn singular_half_width(&self) -> f64 {
        2.0 * E * E * self.params.regularization_length
    }

    /// 表观接触角 beta(a) [rad]
    #[inline]
    pub fn contact_angle(&self, half_width: f64) -> f64 {
        (self.psi / half_width.powf(4.0 / 3.0)).atan()
    }

    /// 中心线高度 h0(a, beta)
    #[inline]
    pub fn centerline_height(&self, half_width: f64, contact_angle: f64) -> f64 {
        2.0 * half_width * contact_angle.tan() / 2.0
    }

    /// 半宽增长率 da/dx
    #[inline]
    pub fn spreading_rate(&self, half_width: f64) -> f64 {
        let p = &self.params;
        let beta = self.contact_angle(half_width);
        let log_term = (half_width / self.singular_half_width()).ln();
        beta.powi(3) * p.surface_tension * self.varpi / (9.0 * p.viscosity * log_term)
    }

    /// 入口条件
    pub fn inlet(&self) -> InletCondition {
        InletCondition::from_parameters(&self.params)
    }

    /// 截面液体内的平行流速度 u(z)，z 从平板量起
    #[inline]
    pub fn film_velocity(&self, centerline_height: f64, z: f64) -> f64 {
        let p = &self.params;
        p.density * p.gravity_along_plate() / (2.0 * p.viscosity)
            * (2.0 * centerline_height * z - z * z)
    }

    /// 毛细压力近似 tan(beta) / a * sigma（省略静水压项）
    #[inline]
    pub fn capillary_pressure(&self, half_width: f64, contact_angle: f64) -> f64 {
        contact_angle.tan() / half_width * self.params.surface_tension
    }
}

impl ScalarOde for SpreadingModel {
    fn rhs(&self, _x: f64, y: f64) -> f64 {
        self.spreading_rate(y)
    }
}
