/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : 各层的降级（lowering）：权重 + 上游名称 → 一批新的具名标量及其表达式
 *
 * 所有降级函数都是纯函数：不读取引擎状态、不做 I/O，只返回按确定顺序排列的
 * `Vec<Binding>`，由调用方交给`Program`登记。
 */

mod conv;
mod input;
mod linear;
mod pool;
mod softmax;

#[cfg(test)]
mod tests;

pub use conv::{Activation, Conv2d};
pub use input::{bind_inputs, INPUT_PREFIX};
pub use linear::{channel_mix, linear};
pub use pool::global_avg_pool;
pub use softmax::{softmax, SoftmaxMode, PROB_PREFIX};

/// 一个“空间层”的全部具名标量：`channels`个通道，每通道`height x width`个位置。
///
/// 命名规则（生产方与消费方共用同一个值，因而必然一致）：
/// - 单通道：`<prefix>-<pos>`，如输入层的`in-783`
/// - 多通道：`<prefix>-<c>-<pos>`，如`c-0-12`
///
/// 其中`pos = y * width + x`（行优先）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMap {
    pub prefix: String,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl FeatureMap {
    pub fn new(prefix: impl Into<String>, channels: usize, height: usize, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            channels,
            height,
            width,
        }
    }

    /// 每个通道的位置数
    pub fn positions(&self) -> usize {
        self.height * self.width
    }

    pub fn name(&self, channel: usize, y: usize, x: usize) -> String {
        self.name_at(channel, y * self.width + x)
    }

    pub fn name_at(&self, channel: usize, pos: usize) -> String {
        if self.channels == 1 {
            format!("{}-{pos}", self.prefix)
        } else {
            format!("{}-{channel}-{pos}", self.prefix)
        }
    }

    /// 按“通道优先、再行优先”展平后的全部名称，与`flatten`后的特征顺序一致
    pub fn names(&self) -> Vec<String> {
        (0..self.channels)
            .flat_map(|c| (0..self.positions()).map(move |pos| self.name_at(c, pos)))
            .collect()
    }
}
