// apps/rv_cli/src/commands/mod.rs

//! 子命令实现

pub mod info;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use rv_config::CaseConfig;

/// 加载并验证算例配置
pub fn load_config(path: &Path) -> anyhow::Result<CaseConfig> {
    CaseConfig::from_file(path).with_context(|| format!("无法加载配置 {}", path.display()))
}
