use crate::utils::write_atomic;
use std::fs;
use std::path::Path;

/// `dir`中以`prefix`开头、以`.tmp`结尾的残留临时文件
fn leftover_temps(dir: &Path, prefix: &str) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(prefix) && name.ends_with(".tmp"))
        .collect()
}

#[test]
fn test_write_atomic_replaces_whole_file() {
    let dir = std::env::temp_dir().join(format!("only_css_atomic_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("model.css");
    fs::write(&path, "old contents that are longer than the new ones").unwrap();

    write_atomic(&path, ":root { --a: 1; }").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), ":root { --a: 1; }");
    assert!(leftover_temps(&dir, "model.css").is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_write_atomic_missing_dir() {
    let path = std::env::temp_dir()
        .join("only_css_no_such_dir")
        .join("model.css");
    assert!(write_atomic(&path, "x").is_err());
}

#[test]
fn test_write_atomic_rename_failure_cleans_up() {
    // 目标位置是一个非空目录：临时文件能写成，但重命名必然失败
    let dir = std::env::temp_dir().join(format!("only_css_atomic_fail_{}", std::process::id()));
    let target = dir.join("board.css");
    fs::create_dir_all(target.join("occupied")).unwrap();

    assert!(write_atomic(&target, "x").is_err());
    assert!(leftover_temps(&dir, "board.css").is_empty());
    assert!(target.is_dir());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_write_atomic_concurrent_writers() {
    let dir = std::env::temp_dir().join(format!("only_css_atomic_mt_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("model.css");
    let contents: Vec<String> = (0..8).map(|i| format!(":root {{ --w: {i}; }}")).collect();

    std::thread::scope(|scope| {
        for text in &contents {
            let path = &path;
            scope.spawn(move || write_atomic(path, text).unwrap());
        }
    });

    // 最终内容必然是某一个写入者的完整内容
    let written = fs::read_to_string(&path).unwrap();
    assert!(contents.contains(&written));
    assert!(leftover_temps(&dir, "model.css").is_empty());

    fs::remove_dir_all(&dir).ok();
}
