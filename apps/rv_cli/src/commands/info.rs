// apps/rv_cli/src/commands/info.rs

//! info 子命令

use clap::Args;
use rv_config::CaseConfig;

/// info 参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// 列出物性表
    #[arg(long)]
    pub fluids: bool,

    /// 打印默认配置 (JSON)
    #[arg(long)]
    pub defaults: bool,
}

/// 执行 info
pub fn execute(args: InfoArgs) -> anyhow::Result<()> {
    let show_all = !args.fluids && !args.defaults;

    if args.fluids || show_all {
        println!(
            "{:<8} {:>10} {:>9} {:>11} {:>5} {:>5} {:>5}",
            "name", "sigma", "rho", "mu", "θ0", "θA", "θR"
        );
        for name in rv_physics::available_fluids() {
            let p = rv_physics::lookup(name).properties();
            println!(
                "{:<8} {:>10.4e} {:>9.3} {:>11.4e} {:>5} {:>5} {:>5}",
                name,
                p.surface_tension,
                p.density,
                p.viscosity,
                p.theta_equilibrium,
                p.theta_advancing,
                p.theta_receding
            );
        }
        println!("未知名称回退到 {}", rv_physics::FALLBACK_FLUID);
    }

    if args.defaults || show_all {
        println!("{}", CaseConfig::default().to_json_pretty()?);
    }
    Ok(())
}
