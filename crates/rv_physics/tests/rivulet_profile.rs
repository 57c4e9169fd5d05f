// crates/rv_physics/tests/rivulet_profile.rs

//! 溪流剖面集成测试
//! 以 DC10 硅油、0.26 mL/s、60° 倾角、6 cm 平板为参考算例

use rv_config::{CaseConfig, FluidSpec, IntegratorConfig, IntegratorKind};
use rv_physics::{
    lookup, solve, GeometricPrimitive, GeometryParameters, PhysicalParameters, RivuletSolver,
    SolverError, SpreadingModel,
};
use std::f64::consts::FRAC_PI_3;

fn reference_config() -> CaseConfig {
    CaseConfig::default()
}

fn reference_solver(cells_x: usize, height: f64, cells_z: usize) -> RivuletSolver {
    let physics =
        PhysicalParameters::from_fluid(0.26e-6, &lookup("DC10").properties(), FRAC_PI_3, 3e-5);
    RivuletSolver::new(physics, GeometryParameters::new(0.06, cells_x, height, cells_z))
}

/// 参考算例：采样数、单调性与端点
#[test]
fn test_reference_case_profile() {
    let ic = solve(&reference_config()).unwrap();
    let profile = &ic.profile;
    let n_inlet = (150.0 * ic.inlet.height / 0.06).round() as usize;

    assert_eq!(profile.inlet_samples(), n_inlet);
    assert_eq!(profile.len(), 151 + n_inlet);
    assert_eq!(profile.plate_region().len(), 151);

    let samples = profile.samples();
    assert!((samples[0].x + ic.inlet.height).abs() < 1e-15);
    assert_eq!(samples[samples.len() - 1].x, 0.06);
    assert_eq!(samples[0].half_width, ic.inlet.half_width);

    for pair in samples.windows(2) {
        assert!(pair[1].x > pair[0].x);
        assert!(pair[1].half_width > pair[0].half_width);
    }
    let first = profile.first().unwrap();
    let last = profile.last().unwrap();
    assert!(last.half_width > first.half_width);
    // 接触角随铺展减小
    assert!(last.contact_angle < first.contact_angle);
}

/// 平板区从最接近 x = 0 的采样开始，间距为 (L + h)/(n - 1)
#[test]
fn test_plate_region_starts_nearest_origin() {
    let ic = solve(&reference_config()).unwrap();
    let profile = &ic.profile;
    let spacing = (0.06 + ic.inlet.height) / (profile.len() - 1) as f64;

    let plate_start = profile.plate_region()[0].x;
    assert!(plate_start.abs() <= spacing / 2.0 + 1e-15);
    if let Some(last_inlet) = profile.inlet_region().last() {
        assert!(last_inlet.x < 0.0);
        assert!(last_inlet.x.abs() >= plate_start.abs());
    }
    let dx = profile.samples()[1].x - profile.samples()[0].x;
    assert!((dx - spacing).abs() < 1e-15);
}

/// 所有派生量为正，且与闭式关系逐位一致
#[test]
fn test_derived_quantities_consistent() {
    let config = reference_config();
    let ic = solve(&config).unwrap();
    let physics = PhysicalParameters::from_config(&config, &lookup("DC10").properties());
    let model = SpreadingModel::new(physics);

    for s in ic.profile.samples() {
        assert!(s.half_width > 0.0);
        assert!(s.centerline_height > 0.0);
        assert_eq!(s.contact_angle, model.contact_angle(s.half_width));
        assert_eq!(
            s.centerline_height,
            model.centerline_height(s.half_width, s.contact_angle)
        );
    }
}

/// 相同输入得到相同输出
#[test]
fn test_solve_is_idempotent() {
    let config = reference_config();
    let a = solve(&config).unwrap();
    let b = solve(&config).unwrap();
    assert_eq!(a.profile, b.profile);
    assert_eq!(a.primitives, b.primitives);
}

/// 单个流向单元
#[test]
fn test_single_cell_along_plate() {
    let ic = reference_solver(1, 3e-3, 15).solve().unwrap();
    let n_inlet = ic.profile.inlet_samples();
    assert_eq!(ic.profile.len(), 2 + n_inlet);
    assert_eq!(ic.counts().cylinders, 1);
    assert!(ic.counts().boxes >= 1);
}

/// 单元高度大于液面时每列仍有一个盒
#[test]
fn test_coarse_height_keeps_one_box_per_column() {
    let ic = reference_solver(12, 1.0, 1).solve().unwrap();
    let counts = ic.counts();
    assert_eq!(counts.cylinders, 12);
    assert_eq!(counts.boxes, 12);
    assert_eq!(counts.total(), 1 + 12 * 2);
}

/// 盒内速度非负，盒底从平板开始逐层上升
#[test]
fn test_box_columns_start_at_plate() {
    let ic = reference_solver(6, 3e-3, 15).solve().unwrap();
    let dz = 3e-3 / 15.0;
    let mut column_floor = Vec::new();
    for p in &ic.primitives {
        if let GeometricPrimitive::Box { min, max, values } = p {
            assert!((max[2] - min[2] - dz).abs() < 1e-15);
            column_floor.push(min[2]);
            match &values[0] {
                rv_physics::FieldValue::Vector { value, .. } => assert!(value[0] >= 0.0),
                other => panic!("unexpected field value: {:?}", other),
            }
        }
    }
    assert_eq!(column_floor[0], 0.0);
}

/// 未知液体回退到 DC10
#[test]
fn test_unknown_fluid_falls_back() {
    let mut config = reference_config();
    config.plate.cells_x = 20;
    let reference = solve(&config).unwrap();

    config.fluid.liquid = FluidSpec::Named("glycerol".into());
    let fallback = solve(&config).unwrap();
    assert!(fallback.fluid.as_ref().unwrap().used_fallback());
    assert_eq!(reference.profile, fallback.profile);
}

/// 严格模式下未知液体报错
#[test]
fn test_strict_fluid_rejects_unknown() {
    let mut config = reference_config();
    config.fluid.liquid = FluidSpec::Named("glycerol".into());
    config.fluid.strict = true;
    assert!(matches!(solve(&config), Err(SolverError::UnknownFluid { .. })));
}

/// 步数预算耗尽视为发散
#[test]
fn test_step_budget_exhaustion_is_divergence() {
    let integrator = IntegratorConfig {
        max_steps: 1,
        ..IntegratorConfig::default()
    };
    let result = reference_solver(150, 3e-3, 15).with_integrator(integrator).solve();
    assert!(result.unwrap_err().is_divergence());
}

/// 入口半宽不超过对数奇点时拒绝
#[test]
fn test_regularization_length_guard() {
    let physics =
        PhysicalParameters::from_fluid(0.26e-6, &lookup("DC10").properties(), FRAC_PI_3, 1e-3);
    let result = RivuletSolver::new(physics, GeometryParameters::new(0.06, 10, 3e-3, 15)).solve();
    assert!(matches!(
        result,
        Err(SolverError::InvalidParameter { name: "regularization_length", .. })
    ));
}

/// 入口半宽随流量单调增加
#[test]
fn test_inlet_half_width_monotone() {
    let mut config = reference_config();
    config.plate.cells_x = 4;
    let mut previous = 0.0;
    for q in [0.1e-6, 0.2e-6, 0.26e-6, 0.5e-6, 1.0e-6] {
        config.physics.flow_rate = q;
        let ic = solve(&config).unwrap();
        assert!(ic.inlet.half_width > previous);
        previous = ic.inlet.half_width;
    }
}

/// Rosenbrock 与 Dormand-Prince 结果一致
#[test]
fn test_rosenbrock_agrees_with_dopri() {
    let mut config = reference_config();
    config.plate.cells_x = 30;
    let explicit = solve(&config).unwrap();

    config.integrator.kind = IntegratorKind::Rosenbrock;
    config.integrator.rtol = 1e-4;
    config.integrator.atol = 1e-9;
    let implicit = solve(&config).unwrap();

    for (a, b) in explicit
        .profile
        .samples()
        .iter()
        .zip(implicit.profile.samples())
    {
        assert!((a.half_width - b.half_width).abs() / a.half_width < 1e-2);
    }
}
