use super::FeatureMap;
use crate::css::Program;
use crate::errors::CompileError;

/// 原始输入（二值像素）的名称前缀
pub const INPUT_PREFIX: &str = "in";

/// 为`height x width`的单通道像素网格逐个声明输入属性（行优先：`in-0` … `in-{h*w-1}`）。
/// 输入只有声明没有规则，其值在求值时由外部绑定
pub fn bind_inputs(
    program: &mut Program,
    height: usize,
    width: usize,
) -> Result<FeatureMap, CompileError> {
    let map = FeatureMap::new(INPUT_PREFIX, 1, height, width);
    for name in map.names() {
        program.declare_input(&name)?;
    }
    Ok(map)
}
