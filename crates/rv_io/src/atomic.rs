// crates/rv_io/src/atomic.rs

//! 原子文件写入
//!
//! 先写入同目录下的临时文件，刷新后重命名覆盖目标，
//! 失败时目标文件保持原内容。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::IoResult;

/// 目标文件对应的临时文件路径
pub fn temp_path(path: &Path) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    };
    path.with_extension(extension)
}

/// 原子写入文本
pub fn write_atomic(path: &Path, contents: &str) -> IoResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let temp = temp_path(path);
    let written = (|| -> std::io::Result<()> {
        let file = File::create(&temp)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()
    })();

    if let Err(err) = written {
        let _ = std::fs::remove_file(&temp);
        return Err(err.into());
    }

    std::fs::rename(&temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(temp_path(Path::new("a/case.csv")), PathBuf::from("a/case.csv.tmp"));
        assert_eq!(
            temp_path(Path::new("system/setFieldsDict")),
            PathBuf::from("system/setFieldsDict.tmp")
        );
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }
}
