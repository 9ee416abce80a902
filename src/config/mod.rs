/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 编译配置：JSON 配置文件与命令行参数合并
 *
 * 配置文件格式（键名 kebab-case，所有键都可省略）：
 * {
 *   "variant": "leaky-conv-net",
 *   "weights": "model.npz",
 *   "output": "model.css",
 *   "stable-softmax": true,
 *   "board-output": "board.css"
 * }
 */

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::CompileError;
use crate::lower::SoftmaxMode;
use crate::model::VariantKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompileConfig {
    /// 使用哪个固定拓扑
    pub variant: Option<VariantKind>,
    /// 权重文件（.npz/.json/.bin）
    pub weights: Option<PathBuf>,
    /// 生成的样式表路径
    pub output: Option<PathBuf>,
    /// 显式指定 softmax 是否减去最大值；省略时用变体默认值
    pub stable_softmax: Option<bool>,
    /// 画板样式表路径；省略时不生成
    pub board_output: Option<PathBuf>,
}

impl CompileConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CompileError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader)
            .map_err(|e| CompileError::Format(format!("配置文件`{}`：{e}", path.display())))
    }

    /// 合并两份配置，`other`中给出的项覆盖`self`
    pub fn merge(self, other: Self) -> Self {
        Self {
            variant: other.variant.or(self.variant),
            weights: other.weights.or(self.weights),
            output: other.output.or(self.output),
            stable_softmax: other.stable_softmax.or(self.stable_softmax),
            board_output: other.board_output.or(self.board_output),
        }
    }

    /// `None`表示沿用变体默认值
    pub fn softmax_mode(&self) -> Option<SoftmaxMode> {
        self.stable_softmax.map(|stable| {
            if stable {
                SoftmaxMode::Stable
            } else {
                SoftmaxMode::Unstable
            }
        })
    }

    pub fn require_variant(&self) -> Result<VariantKind, CompileError> {
        self.variant.ok_or_else(|| missing("variant"))
    }

    pub fn require_weights(&self) -> Result<&Path, CompileError> {
        self.weights.as_deref().ok_or_else(|| missing("weights"))
    }

    pub fn require_output(&self) -> Result<&Path, CompileError> {
        self.output.as_deref().ok_or_else(|| missing("output"))
    }
}

fn missing(key: &str) -> CompileError {
    CompileError::Format(format!("缺少配置项`{key}`（配置文件或命令行均未给出）"))
}
