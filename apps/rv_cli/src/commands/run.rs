// apps/rv_cli/src/commands/run.rs

//! run 子命令：求解并写入 setFieldsDict

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use super::load_config;

/// run 参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// 算例配置文件 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 目标 setFieldsDict，覆盖配置中的路径
    #[arg(short, long)]
    pub dict: Option<PathBuf>,

    /// 诊断输出目录，覆盖配置中的设置
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,

    /// 只求解并打印摘要，不写文件
    #[arg(long)]
    pub dry_run: bool,
}

/// 执行 run
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    for warning in &config.warnings().warnings {
        warn!("{}", warning);
    }

    let ic = rv_physics::solve(&config).context("溪流剖面求解失败")?;
    let counts = ic.counts();
    if let (Some(first), Some(last)) = (ic.profile.first(), ic.profile.last()) {
        info!(
            "半宽 {:.4e} m -> {:.4e} m, 中心线高度 {:.4e} m -> {:.4e} m",
            first.half_width, last.half_width, first.centerline_height, last.centerline_height
        );
    }

    if args.dry_run {
        let summary = serde_json::json!({
            "fluid": ic.fluid.as_ref().map(|f| f.label()),
            "inlet_height": ic.inlet.height,
            "inlet_half_width": ic.inlet.half_width,
            "samples": ic.profile.len(),
            "inlet_samples": ic.profile.inlet_samples(),
            "cylinders": counts.cylinders,
            "boxes": counts.boxes,
            "rotated_boxes": counts.rotated_boxes,
            "accepted_steps": ic.stats.accepted,
            "rejected_steps": ic.stats.rejected,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let diagnostics_dir = args.diagnostics.or_else(|| config.output.diagnostics_dir.clone());
    if let Some(dir) = diagnostics_dir {
        rv_io::write_diagnostics(&dir, &ic.profile, config.output.plot)
            .with_context(|| format!("无法写出诊断到 {}", dir.display()))?;
    }

    let dict = args.dict.unwrap_or_else(|| config.output.dictionary.clone());
    rv_io::patch_file(&dict, &ic.primitives, config.output.splice)
        .with_context(|| format!("无法修改 {}", dict.display()))?;

    println!("写入 {} 个区域到 {}", counts.total(), dict.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_config::CaseConfig;
    use rv_physics::SolverError;
    use std::path::Path;

    const TEMPLATE: &str = "FoamFile
{
    version     2.0;
    format      ascii;
    class       dictionary;
    object      setFieldsDict;
}

regions
(
    boxToCell
    {
        box (-1 -1 -1) (0 1 1);
        fieldValues ( volScalarFieldValue alpha.liquid 0 );
    }
);
";

    /// 在临时目录中写出配置与字典，返回 (配置路径, 字典路径)
    fn write_case(dir: &Path, configure: impl FnOnce(&mut CaseConfig)) -> (PathBuf, PathBuf) {
        let dict = dir.join("setFieldsDict");
        std::fs::write(&dict, TEMPLATE).unwrap();

        let mut config = CaseConfig::default();
        config.plate.cells_x = 5;
        config.plate.cells_z = 3;
        config.output.dictionary = dict.clone();
        configure(&mut config);

        let config_path = dir.join("case.json");
        std::fs::write(&config_path, config.to_json_pretty().unwrap()).unwrap();
        (config_path, dict)
    }

    fn args(config: PathBuf) -> RunArgs {
        RunArgs {
            config,
            dict: None,
            diagnostics: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_run_patches_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let (config, dict) = write_case(dir.path(), |_| {});

        execute(args(config)).unwrap();

        let text = std::fs::read_to_string(&dict).unwrap();
        assert_ne!(text, TEMPLATE);
        assert_eq!(text.matches("cylinderToCell").count(), 5);
        assert!(text.contains("box (-1 -1 -1) (0 1 1);"));
        assert!(!dir.path().join("setFieldsDict.tmp").exists());
    }

    #[test]
    fn test_failed_solve_leaves_dictionary_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let diagnostics = dir.path().join("diagnostics");
        let (config, dict) = write_case(dir.path(), |c| {
            // 入口半宽落在对数奇点 2e²l 以下
            c.physics.regularization_length = 1e-3;
            c.output.diagnostics_dir = Some(diagnostics.clone());
        });

        let err = execute(args(config)).unwrap_err();
        match err.downcast_ref::<SolverError>() {
            Some(SolverError::InvalidParameter { name, .. }) => {
                assert_eq!(*name, "regularization_length")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&dict).unwrap(), TEMPLATE);
        assert!(!diagnostics.exists());
    }

    #[test]
    fn test_step_budget_failure_leaves_dictionary_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let (config, dict) = write_case(dir.path(), |c| c.integrator.max_steps = 1);

        let err = execute(args(config)).unwrap_err();
        let solver_err = err.downcast_ref::<SolverError>().unwrap();
        assert!(solver_err.is_divergence());
        assert_eq!(std::fs::read_to_string(&dict).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let diagnostics = dir.path().join("diagnostics");
        let (config, dict) = write_case(dir.path(), |c| {
            c.output.diagnostics_dir = Some(diagnostics.clone());
        });

        execute(RunArgs {
            dry_run: true,
            ..args(config)
        })
        .unwrap();

        assert_eq!(std::fs::read_to_string(&dict).unwrap(), TEMPLATE);
        assert!(!diagnostics.exists());
    }

    #[test]
    fn test_dict_argument_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let (config, configured) = write_case(dir.path(), |_| {});
        let other = dir.path().join("otherDict");
        std::fs::write(&other, TEMPLATE).unwrap();

        execute(RunArgs {
            dict: Some(other.clone()),
            ..args(config)
        })
        .unwrap();

        assert_eq!(std::fs::read_to_string(&configured).unwrap(), TEMPLATE);
        assert!(std::fs::read_to_string(&other).unwrap().contains("cylinderToCell"));
    }
}
