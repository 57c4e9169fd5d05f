// apps/rv_cli/src/commands/validate.rs

//! validate 子命令：检查配置而不求解

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use rv_physics::{GeometryParameters, PhysicalParameters, SpreadingModel};

use super::load_config;

/// validate 参数
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// 算例配置文件 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式：警告视为错误，未知液体名称报错
    #[arg(long)]
    pub strict: bool,
}

/// 执行 validate
pub fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    if args.strict {
        config.fluid.strict = true;
    }

    let fluid = rv_physics::resolve(&config.fluid)?;
    let physics = PhysicalParameters::from_config(&config, &fluid.properties());
    GeometryParameters::from_config(&config).validate()?;

    let mut report = physics.report();
    report.merge(config.warnings());
    println!("液体: {}", fluid.label());
    println!("{}", report);

    if report.has_errors() {
        bail!("配置无效: {}", args.config.display());
    }
    if args.strict && report.has_warnings() {
        bail!("严格模式下存在 {} 条警告", report.warnings.len());
    }

    let model = SpreadingModel::new(physics);
    let inlet = model.inlet();
    println!(
        "入口: h = {:.4e} m, a0 = {:.4e} m (奇点 {:.4e} m)",
        inlet.height,
        inlet.half_width,
        model.singular_half_width()
    );
    if inlet.half_width <= model.singular_half_width() {
        bail!("入口半宽不大于对数奇点，请减小 regularization_length");
    }

    println!("配置有效: {}", args.config.display());
    Ok(())
}
