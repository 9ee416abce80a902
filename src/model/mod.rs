/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 受支持的固定拓扑（变体）
 *
 * 每个变体都是同一条流水线：
 *   输入绑定 → 按前向顺序调用各层降级 → Softmax → 两段式序列化
 * 区别只在于层的种类、权重键名与形状。
 */

mod leaky_conv_net;
mod tiny_conv_net;

#[cfg(test)]
mod tests;

pub use leaky_conv_net::LeakyConvNet;
pub use tiny_conv_net::TinyConvNet;

use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::css::{Binding, Program};
use crate::errors::CompileError;
use crate::lower::SoftmaxMode;
use crate::weights::WeightStore;

/// 输入像素网格：28x28 二值像素
pub const INPUT_HEIGHT: usize = 28;
pub const INPUT_WIDTH: usize = 28;
/// 类别数（数字 0-9）
pub const NUM_CLASSES: usize = 10;

/// 某个权重键应有的形状
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightSpec {
    pub key: &'static str,
    pub shape: &'static [usize],
}

#[enum_dispatch]
pub trait CssModel {
    /// 变体名称（用于日志）
    fn name(&self) -> &'static str;

    /// 该变体需要的全部权重及其固定形状
    fn weight_specs(&self) -> &'static [WeightSpec];

    /// 该变体默认的 Softmax 形式
    fn default_softmax(&self) -> SoftmaxMode;

    /// 在已绑定输入的`program`上依次追加各层；`weights`已通过`weight_specs`校验
    fn lower(
        &self,
        weights: &WeightStore,
        softmax: SoftmaxMode,
        program: &mut Program,
    ) -> Result<(), CompileError>;
}

#[enum_dispatch(CssModel)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    LeakyConvNet(LeakyConvNet),
    TinyConvNet(TinyConvNet),
}

/// 变体的可序列化标识（配置文件/命令行用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    LeakyConvNet,
    TinyConvNet,
}

impl From<VariantKind> for ModelVariant {
    fn from(kind: VariantKind) -> Self {
        match kind {
            VariantKind::LeakyConvNet => LeakyConvNet.into(),
            VariantKind::TinyConvNet => TinyConvNet.into(),
        }
    }
}

impl ModelVariant {
    /// 校验全部权重（缺失/形状不符即失败，此时尚未生成任何内容）
    pub fn check_weights(&self, weights: &WeightStore) -> Result<(), CompileError> {
        for spec in self.weight_specs() {
            weights.require(spec.key, spec.shape)?;
        }
        Ok(())
    }

    /// 编译为完整的表达式图。`softmax`为`None`时使用变体默认值
    pub fn compile(
        &self,
        weights: &WeightStore,
        softmax: Option<SoftmaxMode>,
    ) -> Result<Program, CompileError> {
        self.check_weights(weights)?;

        let softmax = softmax.unwrap_or_else(|| self.default_softmax());
        if softmax == SoftmaxMode::Unstable {
            warn!(
                "{}: 生成的 softmax 未减去最大值，logit 幅值过大时目标引擎中的 exp 可能上溢",
                self.name()
            );
        }

        let mut program = Program::new();
        self.lower(weights, softmax, &mut program)?;
        info!(
            "{}: 共 {} 个声明、{} 条规则",
            self.name(),
            program.declarations().len(),
            program.rules().len()
        );
        Ok(program)
    }

    /// 编译并序列化为最终的 CSS 文本
    pub fn compile_to_css(
        &self,
        weights: &WeightStore,
        softmax: Option<SoftmaxMode>,
    ) -> Result<String, CompileError> {
        Ok(self.compile(weights, softmax)?.to_css())
    }
}

/// 把一层的降级结果登记进`program`，并记录日志
fn append_layer(
    program: &mut Program,
    layer: &str,
    batch: Vec<Binding>,
) -> Result<(), CompileError> {
    debug!("{layer}: {} 个具名标量", batch.len());
    program.extend(batch)
}
