use ndarray::IxDyn;

use super::Tensor;
use crate::errors::CompileError;

impl Tensor {
    /// 在元素总数不变的前提下改变形状（按行优先顺序），
    /// 如把1x1卷积核`[C_out, C_in, 1, 1]`视作全连接权重`[C_out, C_in]`
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, CompileError> {
        let data = self
            .data
            .as_standard_layout()
            .to_owned()
            .into_shape(IxDyn(shape))
            .map_err(|e| {
                CompileError::Format(format!(
                    "无法将形状{:?}变为{shape:?}：{e}",
                    self.shape()
                ))
            })?;
        Ok(Tensor { data })
    }
}
