/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : WeightStore 的读写（npz / json / bincode 快照）
 */

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{ArrayD, IxDyn, OwnedRepr};
use ndarray_npy::NpzReader;
use serde::{Deserialize, Serialize};

use super::WeightStore;
use crate::errors::CompileError;
use crate::tensor::Tensor;

/// JSON 中单个权重的记录
#[derive(Debug, Serialize, Deserialize)]
struct TensorRecord {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl WeightStore {
    /// 读取 numpy 的`.npz`归档。数组可以是 float32 或 float64（后者转为 f32）；
    /// 归档内条目名的`.npy`后缀会被去掉，如`l1.weight.npy` → `l1.weight`
    pub fn from_npz<P: AsRef<Path>>(path: P) -> Result<Self, CompileError> {
        let file = File::open(path.as_ref())?;
        let mut npz = NpzReader::new(BufReader::new(file))
            .map_err(|e| CompileError::Format(format!("无法打开 npz 文件: {e}")))?;
        let entries = npz
            .names()
            .map_err(|e| CompileError::Format(format!("读取 npz 条目失败: {e}")))?;

        let mut store = Self::new();
        for entry in entries {
            let key = entry.strip_suffix(".npy").unwrap_or(&entry).to_string();
            let array: ArrayD<f32> = match npz.by_name::<OwnedRepr<f32>, IxDyn>(&entry) {
                Ok(array) => array,
                Err(_) => npz
                    .by_name::<OwnedRepr<f64>, IxDyn>(&entry)
                    .map_err(|e| {
                        CompileError::Format(format!("读取 npz 条目`{entry}`失败: {e}"))
                    })?
                    .mapv(|x| x as f32),
            };
            store.insert(key, Tensor::from_array(array))?;
        }
        Ok(store)
    }

    /// 读取 JSON 格式的权重
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, CompileError> {
        let file = File::open(path.as_ref())?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, CompileError> {
        let records: BTreeMap<String, TensorRecord> = serde_json::from_reader(reader)
            .map_err(|e| CompileError::Format(format!("解析 JSON 权重失败: {e}")))?;

        let mut store = Self::new();
        for (key, record) in records {
            let tensor = Tensor::new(&record.data, &record.shape)?;
            store.insert(key, tensor)?;
        }
        Ok(store)
    }

    /// 导出为 JSON（与`from_json`互逆），便于人工查看或跨语言交换
    pub fn to_json(&self) -> Result<String, CompileError> {
        let records: BTreeMap<&str, TensorRecord> = self
            .tensors
            .iter()
            .map(|(key, tensor)| {
                let record = TensorRecord {
                    shape: tensor.shape().to_vec(),
                    data: tensor.iter().copied().collect(),
                };
                (key.as_str(), record)
            })
            .collect();
        serde_json::to_string_pretty(&records)
            .map_err(|e| CompileError::Format(format!("序列化 JSON 权重失败: {e}")))
    }

    /// 保存 bincode 快照
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CompileError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .map_err(|e| CompileError::Format(format!("写入权重快照失败: {e}")))?;
        writer.flush()?;
        Ok(())
    }

    /// 加载 bincode 快照。快照同样要通过非有限值检查
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CompileError> {
        let file = File::open(path.as_ref())?;
        let raw: Self = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| CompileError::Format(format!("读取权重快照失败: {e}")))?;

        let mut store = Self::new();
        for (key, tensor) in raw.tensors {
            store.insert(key, tensor)?;
        }
        Ok(store)
    }
}
