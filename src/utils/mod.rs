//! # 常用接口模块
//!
//! 本模块提供一些常用的操作接口

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::CompileError;

#[cfg(test)]
mod tests;


/// 把`contents`一次性写入`path`：先写同目录下的临时文件，再重命名覆盖。
/// 读者要么看到旧文件，要么看到完整的新文件；任何一步失败都会删掉临时文件
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<(), CompileError> {
    let path = path.as_ref();
    let tmp_path = temp_sibling(path);
    let result = fs::write(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        fs::remove_file(&tmp_path).ok();
        return Err(e.into());
    }
    Ok(())
}

/// `<name>.<pid>.<序号>.tmp`：同一进程内、不同进程间的并发写入各用各的临时文件
fn temp_sibling(path: &Path) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    path.with_file_name(file_name)
}
