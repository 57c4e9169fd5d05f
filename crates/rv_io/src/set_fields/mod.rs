// crates/rv_io/src/set_fields/mod.rs

//! setFieldsDict 区域初始化文件
//!
//! - [`dict`]: 字典结构化解析与拼接
//! - [`writer`]: 基元渲染为 regions 条目
//!
//! [`patch_file`] 读取目标字典、拼接新条目并原子写回。
//! 调用方应在求解成功后再调用，失败时目标文件保持原内容。

pub mod dict;
pub mod writer;

pub use dict::{SetFieldsDict, SpliceSummary};
pub use writer::{format_scalar, render_entries, render_entry};

use std::path::Path;

use rv_config::SpliceMode;
use rv_foundation::RvError;
use rv_physics::GeometricPrimitive;
use tracing::info;

use crate::atomic::write_atomic;
use crate::error::IoResult;

/// 在字典文本中拼接基元，返回新文本
pub fn patch_text(
    text: &str,
    file: &str,
    primitives: &[GeometricPrimitive],
    mode: SpliceMode,
) -> IoResult<(String, SpliceSummary)> {
    let mut dict = SetFieldsDict::parse(text, file)?;
    let summary = dict.splice(render_entries(primitives), mode);
    Ok((dict.render(), summary))
}

/// 修改磁盘上的字典
pub fn patch_file(
    path: &Path,
    primitives: &[GeometricPrimitive],
    mode: SpliceMode,
) -> IoResult<SpliceSummary> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            RvError::file_not_found(path)
        } else {
            RvError::io_with_source(format!("读取 {} 失败", path.display()), err)
        }
    })?;

    let label = path.display().to_string();
    let (patched, summary) = patch_text(&text, &label, primitives, mode)?;
    write_atomic(path, &patched)?;

    info!(
        "已写入 {}: 新增 {} 个区域, 保留 {}, 删除 {}",
        label, summary.inserted, summary.kept, summary.removed
    );
    Ok(summary)
}
