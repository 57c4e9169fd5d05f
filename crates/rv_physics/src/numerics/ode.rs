// crates/rv_physics/src/numerics/ode.rs

//! 标量常微分方程的自适应积分器
//!
//! 求解 `dy/dx = f(x, y)`，并在给定的一组单调递增的输出点上返回解。
//! 积分步长按嵌入式误差估计自适应调整，步长会被截断以精确落在输出点上。
//!
//! ## 积分器
//!
//! - [`DormandPrince45`]: 显式 5(4) 阶嵌入式 Runge-Kutta，默认选择
//! - [`Rosenbrock21`]: 线性隐式 2(1) 阶 Rosenbrock (ROS2)，适用于刚性区段
//!
//! Rosenbrock 需要 Jacobian ∂f/∂y。系统可以通过 [`ScalarOde::jacobian`]
//! 提供解析值，否则用中心差分近似。对自治系统省略 ∂f/∂x 项是精确的。
//!
//! ## 误差控制
//!
//! ```text
//! sc  = atol + rtol * max(|y_n|, |y_{n+1}|)
//! err = |e| / sc
//! h_new = h * clamp(0.9 * err^(-1/(q+1)), 0.2, 5.0)
//! ```
//!
//! 其中 q 为嵌入低阶解的阶数。
//!
//! ## 失败
//!
//! 步长小于 `min_step`、步数超过 `max_steps` 或出现无法通过缩步消除的
//! 非有限值时，返回 [`SolverError::NumericalDivergence`]。
//!
//! ## 参考文献
//!
//! 1. Dormand, J. R., & Prince, P. J. (1980). A family of embedded Runge-Kutta
//!    formulae. Journal of Computational and Applied Mathematics, 6(1), 19-26.
//! 2. Verwer, J. G., Spee, E. J., Blom, J. G., & Hundsdorfer, W. (1999).
//!    A second-order Rosenbrock method applied to photochemical dispersion
//!    problems. SIAM Journal on Scientific Computing, 20(4), 1456-1480.

use rv_config::{IntegratorConfig, IntegratorKind};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{SolverError, SolverResult};

/// 标量常微分方程 dy/dx = f(x, y)
pub trait ScalarOde {
    /// 右端项 f(x, y)
    fn rhs(&self, x: f64, y: f64) -> f64;

    /// 解析 Jacobian ∂f/∂y，缺省时由积分器数值近似
    fn jacobian(&self, _x: f64, _y: f64) -> Option<f64> {
        None
    }
}

/// 中心差分近似 ∂f/∂y
pub fn numerical_jacobian(system: &dyn ScalarOde, x: f64, y: f64) -> f64 {
    let eps = f64::EPSILON.cbrt() * y.abs().max(1e-12);
    (system.rhs(x, y + eps) - system.rhs(x, y - eps)) / (2.0 * eps)
}

/// 积分器选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdeOptions {
    /// 相对容差
    pub rtol: f64,
    /// 绝对容差
    pub atol: f64,
    /// 最大步数（含被拒绝的步）
    pub max_steps: usize,
    /// 最小步长
    pub min_step: f64,
    /// 初始步长，缺省时自动估计
    pub initial_step: Option<f64>,
}

impl Default for OdeOptions {
    fn default() -> Self {
        Self::from(&IntegratorConfig::default())
    }
}

impl From<&IntegratorConfig> for OdeOptions {
    fn from(config: &IntegratorConfig) -> Self {
        Self {
            rtol: config.rtol,
            atol: config.atol,
            max_steps: config.max_steps,
            min_step: config.min_step,
            initial_step: config.initial_step,
        }
    }
}

/// 积分统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OdeStats {
    /// 接受的步数
    pub accepted: usize,
    /// 拒绝的步数
    pub rejected: usize,
    /// 右端项求值次数
    pub rhs_evaluations: usize,
}

/// 积分结果
#[derive(Debug, Clone, PartialEq)]
pub struct OdeSolution {
    /// 输出点上的解，与输入的输出点一一对应
    pub values: Vec<f64>,
    /// 积分统计
    pub stats: OdeStats,
}

/// 单步结果
struct StepOutcome {
    y_new: f64,
    /// 误差的绝对估计
    error: f64,
}

/// 自适应单步方法
pub trait OdeIntegrator {
    /// 积分器名称
    fn name(&self) -> &'static str;

    /// 主解的阶数
    fn order(&self) -> u8;

    /// 选项
    fn options(&self) -> &OdeOptions;

    /// 在输出点 `xs` 上求解，`xs[0]` 为初值位置
    fn integrate(&self, system: &dyn ScalarOde, y0: f64, xs: &[f64]) -> SolverResult<OdeSolution>;
}

/// 显式 Dormand-Prince 5(4)
#[derive(Debug, Clone, Default)]
pub struct DormandPrince45 {
    options: OdeOptions,
}

impl DormandPrince45 {
    /// 创建积分器
    pub fn new(options: OdeOptions) -> Self {
        Self { options }
    }

    const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
    const A: [[f64; 6]; 7] = [
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
        [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
        [
            19372.0 / 6561.0,
            -25360.0 / 2187.0,
            64448.0 / 6561.0,
            -212.0 / 729.0,
            0.0,
            0.0,
        ],
        [
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
            0.0,
        ],
        [
            35.0 / 384.0,
            0.0,
            500.0 / 1113.0,
            125.0 / 192.0,
            -2187.0 / 6784.0,
            11.0 / 84.0,
        ],
    ];
    /// 五阶解权重（即 A 的最后一行）
    const B: [f64; 7] = [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
        0.0,
    ];
    /// 五阶与四阶权重之差
    const E: [f64; 7] = [
        71.0 / 57600.0,
        0.0,
        -71.0 / 16695.0,
        71.0 / 1920.0,
        -17253.0 / 339200.0,
        22.0 / 525.0,
        -1.0 / 40.0,
    ];

    fn step(
        &self,
        system: &dyn ScalarOde,
        x: f64,
        y: f64,
        h: f64,
        stats: &mut OdeStats,
    ) -> StepOutcome {
        let mut k = [0.0; 7];
        for stage in 0..7 {
            let increment: f64 = (0..stage).map(|j| Self::A[stage][j] * k[j]).sum();
            k[stage] = system.rhs(x + Self::C[stage] * h, y + h * increment);
        }
        stats.rhs_evaluations += 7;

        let y_new = y + h * (0..7).map(|i| Self::B[i] * k[i]).sum::<f64>();
        let error = h * (0..7).map(|i| Self::E[i] * k[i]).sum::<f64>();
        StepOutcome { y_new, error }
    }
}

impl OdeIntegrator for DormandPrince45 {
    fn name(&self) -> &'static str {
        "Dormand-Prince 5(4)"
    }

    fn order(&self) -> u8 {
        5
    }

    fn options(&self) -> &OdeOptions {
        &self.options
    }

    fn integrate(&self, system: &dyn ScalarOde, y0: f64, xs: &[f64]) -> SolverResult<OdeSolution> {
        drive(system, y0, xs, &self.options, 4, |x, y, h, stats| {
            self.step(system, x, y, h, stats)
        })
    }
}

/// 线性隐式 Rosenbrock 2(1)
///
/// ```text
/// gamma = 1 + 1/sqrt(2)
/// (1 - gamma h J) k1 = f(y)
/// (1 - gamma h J) k2 = f(y + h k1) - 2 k1
/// y_{n+1} = y + 3/2 h k1 + 1/2 h k2
/// ```
///
/// 一阶嵌入解为 `y + h k1`。
#[derive(Debug, Clone, Default)]
pub struct Rosenbrock21 {
    options: OdeOptions,
}

impl Rosenbrock21 {
    /// 创建积分器
    pub fn new(options: OdeOptions) -> Self {
        Self { options }
    }

    const GAMMA: f64 = 1.0 + std::f64::consts::FRAC_1_SQRT_2;

    fn step(
        &self,
        system: &dyn ScalarOde,
        x: f64,
        y: f64,
        h: f64,
        stats: &mut OdeStats,
    ) -> StepOutcome {
        let jac = match system.jacobian(x, y) {
            Some(j) => j,
            None => {
                stats.rhs_evaluations += 2;
                numerical_jacobian(system, x, y)
            }
        };
        let w = 1.0 - Self::GAMMA * h * jac;

        let k1 = system.rhs(x, y) / w;
        let k2 = (system.rhs(x + h, y + h * k1) - 2.0 * k1) / w;
        stats.rhs_evaluations += 2;

        let y_new = y + 1.5 * h * k1 + 0.5 * h * k2;
        let error = 0.5 * h * (k1 + k2);
        StepOutcome { y_new, error }
    }
}

impl OdeIntegrator for Rosenbrock21 {
    fn name(&self) -> &'static str {
        "Rosenbrock 2(1)"
    }

    fn order(&self) -> u8 {
        2
    }

    fn options(&self) -> &OdeOptions {
        &self.options
    }

    fn integrate(&self, system: &dyn ScalarOde, y0: f64, xs: &[f64]) -> SolverResult<OdeSolution> {
        drive(system, y0, xs, &self.options, 1, |x, y, h, stats| {
            self.step(system, x, y, h, stats)
        })
    }
}

/// 根据配置创建积分器
pub fn create_integrator(config: &IntegratorConfig) -> Box<dyn OdeIntegrator> {
    let options = OdeOptions::from(config);
    match config.kind {
        IntegratorKind::DormandPrince => Box::new(DormandPrince45::new(options)),
        IntegratorKind::Rosenbrock => Box::new(Rosenbrock21::new(options)),
    }
}

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// 初始步长估计（Hairer, Nørsett & Wanner 的经验方法）
fn initial_step(
    system: &dyn ScalarOde,
    x0: f64,
    y0: f64,
    span: f64,
    options: &OdeOptions,
    error_order: u8,
    stats: &mut OdeStats,
) -> f64 {
    if let Some(h) = options.initial_step {
        return h.min(span);
    }
    let sc = options.atol + options.rtol * y0.abs();
    let f0 = system.rhs(x0, y0);
    let d0 = y0.abs() / sc;
    let d1 = f0.abs() / sc;
    let h0 = if d0 < 1e-5 || d1 < 1e-5 || !d1.is_finite() {
        1e-6 * span
    } else {
        0.01 * d0 / d1
    };

    let f1 = system.rhs(x0 + h0, y0 + h0 * f0);
    stats.rhs_evaluations += 2;
    let d2 = (f1 - f0).abs() / sc / h0;
    let dmax = d1.max(d2);
    let h1 = if !dmax.is_finite() || dmax <= 1e-15 {
        (h0 * 1e-3).max(1e-6 * span)
    } else {
        (0.01 / dmax).powf(1.0 / (error_order as f64 + 1.0))
    };

    (100.0 * h0).min(h1).min(span).max(options.min_step)
}

/// 通用的自适应推进循环
///
/// `error_order` 为嵌入低阶解的阶数，用于步长因子指数。
fn drive<F>(
    system: &dyn ScalarOde,
    y0: f64,
    xs: &[f64],
    options: &OdeOptions,
    error_order: u8,
    mut step: F,
) -> SolverResult<OdeSolution>
where
    F: FnMut(f64, f64, f64, &mut OdeStats) -> StepOutcome,
{
    let mut stats = OdeStats::default();
    let Some(&x_start) = xs.first() else {
        return Ok(OdeSolution {
            values: Vec::new(),
            stats,
        });
    };
    if !y0.is_finite() {
        return Err(SolverError::divergence(x_start, "初值非有限"));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(SolverError::invalid(
            "output_points",
            x_start,
            "输出点必须严格递增",
        ));
    }

    let x_end = xs[xs.len() - 1];
    let exponent = 1.0 / (error_order as f64 + 1.0);
    let mut values = Vec::with_capacity(xs.len());
    values.push(y0);

    let mut x = x_start;
    let mut y = y0;
    let span = (x_end - x_start).max(f64::MIN_POSITIVE);
    let mut h = initial_step(system, x, y, span, options, error_order, &mut stats);

    for &target in &xs[1..] {
        while x < target {
            if stats.accepted + stats.rejected >= options.max_steps {
                return Err(SolverError::divergence(
                    x,
                    format!("超过最大步数 {}", options.max_steps),
                ));
            }

            // 最后一步落在输出点上
            let remaining = target - x;
            let clipped = remaining <= h * (1.0 + 1e-12);
            let h_try = if clipped { remaining } else { h };

            let outcome = step(x, y, h_try, &mut stats);
            let scale = options.atol + options.rtol * y.abs().max(outcome.y_new.abs());
            let err = (outcome.error / scale).abs();

            if !outcome.y_new.is_finite() || !err.is_finite() {
                stats.rejected += 1;
                h = h_try * MIN_FACTOR;
                trace!("x={:.6e}: 非有限试探解，缩步至 {:.3e}", x, h);
                if h < options.min_step {
                    return Err(SolverError::divergence(x, "出现非有限值且步长已降至下限"));
                }
                continue;
            }

            let factor = if err <= f64::MIN_POSITIVE {
                MAX_FACTOR
            } else {
                (SAFETY * err.powf(-exponent)).clamp(MIN_FACTOR, MAX_FACTOR)
            };

            if err <= 1.0 {
                stats.accepted += 1;
                x = if clipped { target } else { x + h_try };
                y = outcome.y_new;
                // 截断步不应压缩后续步长
                h = if clipped { h.max(h_try * factor) } else { h_try * factor };
            } else {
                stats.rejected += 1;
                h = h_try * factor.min(1.0);
                if h < options.min_step {
                    return Err(SolverError::divergence(
                        x,
                        format!("步长 {:.3e} 小于下限 {:.3e}", h, options.min_step),
                    ));
                }
            }
        }
        values.push(y);
    }

    debug!(
        "ODE 积分完成: 接受 {} 步, 拒绝 {} 步, 右端项求值 {} 次",
        stats.accepted, stats.rejected, stats.rhs_evaluations
    );
    Ok(OdeSolution { values, stats })
}
