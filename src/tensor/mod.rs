/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 权重张量。编译器只读不写：训练方产出权重后，这里的张量在整个生成过程中保持不可变
 */

use ndarray::{Array, ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::errors::CompileError;

mod index;
mod property;
mod shape;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 对本库而言，张量就是某一层的权重：
/// - 卷积层：`[C_out, C_in, kH, kW]`
/// - 全连接层：`[out_features, in_features]`
/// - 1x1卷积：`[C_out, C_in, 1, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。`data`的长度必须和`shape`中所有元素的乘积相等，否则返回错误。
    pub fn new(data: &[f32], shape: &[usize]) -> Result<Tensor, CompileError> {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).map_err(|e| {
            CompileError::Format(format!(
                "数据长度{}与形状{shape:?}不符：{e}",
                data.len()
            ))
        })?;
        Ok(Tensor { data })
    }

    /// 直接由`ndarray`数组构造（如从npz文件读出的数组）
    pub fn from_array(data: ArrayD<f32>) -> Tensor {
        Tensor { data }
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::zeros(IxDyn(shape)),
        }
    }
}
