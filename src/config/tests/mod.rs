use crate::assert_err;
use crate::config::CompileConfig;
use crate::errors::CompileError;
use crate::lower::SoftmaxMode;
use crate::model::VariantKind;
use std::path::{Path, PathBuf};

#[test]
fn test_parse_kebab_case() {
    let config: CompileConfig = serde_json::from_str(
        r#"{
            "variant": "tiny-conv-net",
            "weights": "w.npz",
            "output": "model.css",
            "stable-softmax": true,
            "board-output": "board.css"
        }"#,
    )
    .unwrap();
    assert_eq!(config.variant, Some(VariantKind::TinyConvNet));
    assert_eq!(config.weights, Some(PathBuf::from("w.npz")));
    assert_eq!(config.board_output, Some(PathBuf::from("board.css")));
    assert_eq!(config.softmax_mode(), Some(SoftmaxMode::Stable));
}

#[test]
fn test_parse_partial_and_unknown() {
    let config: CompileConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CompileConfig::default());
    assert_eq!(config.softmax_mode(), None);

    assert!(serde_json::from_str::<CompileConfig>(r#"{"stable_softmax": true}"#).is_err());
}

#[test]
fn test_merge_other_wins() {
    let file = CompileConfig {
        variant: Some(VariantKind::LeakyConvNet),
        weights: Some("from_file.npz".into()),
        output: Some("file.css".into()),
        stable_softmax: Some(true),
        board_output: None,
    };
    let flags = CompileConfig {
        weights: Some("from_flag.json".into()),
        stable_softmax: Some(false),
        ..Default::default()
    };

    let merged = file.merge(flags);
    assert_eq!(merged.variant, Some(VariantKind::LeakyConvNet));
    assert_eq!(merged.require_weights().unwrap(), Path::new("from_flag.json"));
    assert_eq!(merged.require_output().unwrap(), Path::new("file.css"));
    assert_eq!(merged.softmax_mode(), Some(SoftmaxMode::Unstable));
    assert_eq!(merged.board_output, None);
}

#[test]
fn test_missing_required_keys() {
    let config = CompileConfig::default();
    assert_err!(config.require_variant(), CompileError::Format(msg) if msg.contains("variant"));
    assert_err!(config.require_weights(), CompileError::Format(_));
}

#[test]
fn test_from_json_file() {
    let path = std::env::temp_dir().join(format!("only_css_config_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"variant": "leaky-conv-net"}"#).unwrap();
    let config = CompileConfig::from_json_file(&path).unwrap();
    assert_eq!(config.require_variant().unwrap(), VariantKind::LeakyConvNet);

    std::fs::write(&path, "not json").unwrap();
    assert_err!(CompileConfig::from_json_file(&path), CompileError::Format(_));
    std::fs::remove_file(&path).unwrap();

    assert_err!(CompileConfig::from_json_file(&path), CompileError::Io(_));
}
