// apps/rv_cli/src/main.rs

//! Rivulet 命令行界面
//!
//! 为倾斜平板上的溪流 VOF 算例生成初始条件。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**：
//! - 读取 `CaseConfig`，调用 `rv_physics` 求解
//! - 通过 `rv_io` 修改 setFieldsDict 与写出诊断

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Rivulet 初始条件生成工具
#[derive(Parser)]
#[command(name = "rv_cli")]
#[command(author = "Rivulet Lab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rivulet initial-shape generator for setFieldsDict", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 求解并写入 setFieldsDict
    Run(commands::run::RunArgs),
    /// 显示液体物性与默认配置
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "rv_cli", "-l", "debug", "run", "--config", "case.json", "--dry-run",
        ])
        .unwrap();
        assert_eq!(parse_level(&cli.log_level), Level::DEBUG);
        match cli.command {
            Commands::Run(args) => {
                assert!(args.dry_run);
                assert!(args.dict.is_none());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        assert_eq!(parse_level("loud"), Level::INFO);
    }
}
