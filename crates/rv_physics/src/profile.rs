// crates/rv_physics/src/profile.rs

//! 铺展剖面
//!
//! 沿流向的有序采样 `(x, a, beta, h0)`，在 `[-h, L]` 上等距分布。
//! 前 `inlet_samples` 个采样位于入口区，其余 `nCellsX + 1` 个采样从最接近
//! `x = 0` 的点开始覆盖平板，末端精确落在 `x = L`。采样间距为
//! `(L + h)/(n - 1)`，与 `deltaX` 略有不同，平板首个采样一般不在 `x = 0`。
//! 构造后不可变，只提供只读切片。

use rv_foundation::float::first_non_finite;
use serde::Serialize;

use crate::error::{SolverError, SolverResult};
use crate::model::SpreadingModel;

/// 单个剖面采样
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSample {
    /// 流向坐标 x [m]
    pub x: f64,
    /// 半宽 a [m]
    pub half_width: f64,
    /// 表观接触角 beta [rad]
    pub contact_angle: f64,
    /// 中心线高度 h0 [m]
    pub centerline_height: f64,
}

impl ProfileSample {
    /// 截面圆弧半径 R = h0/2 + a²/(2 h0)
    pub fn arc_radius(&self) -> f64 {
        self.centerline_height / 2.0
            + self.half_width * self.half_width / (2.0 * self.centerline_height)
    }

    /// 圆心位于平板下方的距离 d = R - h0
    pub fn arc_offset(&self) -> f64 {
        self.arc_radius() - self.centerline_height
    }
}

/// 铺展剖面
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadingProfile {
    samples: Vec<ProfileSample>,
    inlet_samples: usize,
}

impl SpreadingProfile {
    /// 由坐标与积分得到的半宽构建剖面
    ///
    /// 任何非有限或非正的派生量都报告为数值发散。
    pub fn from_half_widths(
        model: &SpreadingModel,
        xs: &[f64],
        half_widths: &[f64],
        inlet_samples: usize,
    ) -> SolverResult<Self> {
        if xs.len() != half_widths.len() {
            return Err(SolverError::invalid(
                "half_widths",
                half_widths.len() as f64,
                format!("采样数与坐标数 {} 不一致", xs.len()),
            ));
        }
        if inlet_samples >= xs.len() {
            return Err(SolverError::invalid(
                "inlet_samples",
                inlet_samples as f64,
                "入口采样数必须小于总采样数",
            ));
        }

        if let Some(i) = first_non_finite(half_widths) {
            return Err(SolverError::divergence(
                xs[i],
                format!("半宽 a={} 非有限", half_widths[i]),
            ));
        }

        let mut samples = Vec::with_capacity(xs.len());
        for (&x, &a) in xs.iter().zip(half_widths) {
            if a <= 0.0 {
                return Err(SolverError::divergence(x, format!("半宽 a={} 非正", a)));
            }
            let beta = model.contact_angle(a);
            let h0 = model.centerline_height(a, beta);
            if !h0.is_finite() || h0 <= 0.0 {
                return Err(SolverError::divergence(x, format!("中心线高度 h0={} 非有限或非正", h0)));
            }
            samples.push(ProfileSample {
                x,
                half_width: a,
                contact_angle: beta,
                centerline_height: h0,
            });
        }

        Ok(Self {
            samples,
            inlet_samples,
        })
    }

    /// 采样总数
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 全部采样
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// 入口区采样数
    pub fn inlet_samples(&self) -> usize {
        self.inlet_samples
    }

    /// 入口区采样
    pub fn inlet_region(&self) -> &[ProfileSample] {
        &self.samples[..self.inlet_samples]
    }

    /// 平板区采样（含 x = L 处的末端采样）
    pub fn plate_region(&self) -> &[ProfileSample] {
        &self.samples[self.inlet_samples..]
    }

    /// 入口处的采样
    pub fn first(&self) -> Option<&ProfileSample> {
        self.samples.first()
    }

    /// 平板末端的采样
    pub fn last(&self) -> Option<&ProfileSample> {
        self.samples.last()
    }
}
