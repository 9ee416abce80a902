/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : 权重仓库：训练方交来的“键名 → 张量”映射
 *
 * 支持的来源：
 * - `.npz`：numpy 的 `savez`（`state_dict` 逐键导出即可）
 * - `.json`：`{ "<key>": { "shape": [...], "data": [...] } }`
 * - `.bin`：本库自身的 bincode 快照（`save`/`load`）
 *
 * 写入时即拒绝非有限值，读取时按变体的固定拓扑校验键名与形状；
 * 任何一项不满足都在生成任何输出之前报错。
 */

mod serialization;


use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CompileError;
use crate::tensor::Tensor;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStore {
    tensors: BTreeMap<String, Tensor>,
}

impl WeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按扩展名选择读取方式
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CompileError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("npz") => Self::from_npz(path),
            Some("json") => Self::from_json(path),
            Some("bin") => Self::load(path),
            _ => Err(CompileError::Format(format!(
                "无法识别的权重文件`{}`：仅支持 .npz/.json/.bin",
                path.display()
            ))),
        }
    }

    /// 放入一个权重；含 NaN/∞ 的张量直接拒绝
    pub fn insert(&mut self, key: impl Into<String>, tensor: Tensor) -> Result<(), CompileError> {
        let key = key.into();
        if !tensor.is_finite() {
            return Err(CompileError::NonFiniteWeight(key));
        }
        self.tensors.insert(key, tensor);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Tensor> {
        self.tensors.get(key)
    }

    /// 取出`key`对应的权重，并要求其形状严格等于`expected`
    pub fn require(&self, key: &str, expected: &[usize]) -> Result<&Tensor, CompileError> {
        let tensor = self
            .get(key)
            .ok_or_else(|| CompileError::MissingWeight(key.to_string()))?;
        if tensor.shape() != expected {
            return Err(CompileError::ShapeMismatch {
                key: key.to_string(),
                expected: expected.to_vec(),
                got: tensor.shape().to_vec(),
            });
        }
        Ok(tensor)
    }

    /// 按字典序排列的全部键名
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tensors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }
}
