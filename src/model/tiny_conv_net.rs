/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : TinyConvNet：两层“卷积+ReLU+池化” + 1x1 卷积 + 全局平均
 *
 * 拓扑：
 *   in (1x28x28)
 *   → conv 1→6,  3x3, 填充1, ReLU, 2x2 最大池化   → c1-<co>-<pos> (6x14x14)
 *   → conv 6→20, 3x3, 填充1, ReLU, 2x2 最大池化   → c2-<co>-<pos> (20x7x7)
 *   → 全局平均池化 7x7                             → avg-<c>       (20)
 *   → 1x1 卷积 20→10（无偏置）                     → logit-<i>
 *   → softmax                                      → prob-<i>
 *
 * 训练图中是“先 1x1 卷积、再求均值”；两者都是线性运算可以交换，
 * 先求均值只需 20 个平均值而不是 10x49 个中间量。
 * 训练时的 dropout 在推理图中不存在，不做降级。
 */

use super::{append_layer, CssModel, WeightSpec, INPUT_HEIGHT, INPUT_WIDTH};
use crate::css::Program;
use crate::errors::CompileError;
use crate::lower::{
    bind_inputs, channel_mix, global_avg_pool, softmax, Activation, Conv2d, SoftmaxMode,
};
use crate::weights::WeightStore;

const WEIGHT_SPECS: &[WeightSpec] = &[
    WeightSpec {
        key: "l1.weight",
        shape: &[6, 1, 3, 3],
    },
    WeightSpec {
        key: "l2.weight",
        shape: &[20, 6, 3, 3],
    },
    WeightSpec {
        key: "l3.weight",
        shape: &[10, 20, 1, 1],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TinyConvNet;

impl CssModel for TinyConvNet {
    fn name(&self) -> &'static str {
        "TinyConvNet"
    }

    fn weight_specs(&self) -> &'static [WeightSpec] {
        WEIGHT_SPECS
    }

    fn default_softmax(&self) -> SoftmaxMode {
        SoftmaxMode::Unstable
    }

    fn lower(
        &self,
        weights: &WeightStore,
        mode: SoftmaxMode,
        program: &mut Program,
    ) -> Result<(), CompileError> {
        let l1 = weights.require(WEIGHT_SPECS[0].key, WEIGHT_SPECS[0].shape)?;
        let l2 = weights.require(WEIGHT_SPECS[1].key, WEIGHT_SPECS[1].shape)?;
        let l3 = weights.require(WEIGHT_SPECS[2].key, WEIGHT_SPECS[2].shape)?;

        let input = bind_inputs(program, INPUT_HEIGHT, INPUT_WIDTH)?;

        let (batch, c1) = Conv2d::new(l1)
            .padding((1, 1))
            .activation(Activation::Relu)
            .max_pool(true)
            .lower(&input, "c1")?;
        append_layer(program, "l1 conv+relu+max_pool", batch)?;

        let (batch, c2) = Conv2d::new(l2)
            .padding((1, 1))
            .activation(Activation::Relu)
            .max_pool(true)
            .lower(&c1, "c2")?;
        append_layer(program, "l2 conv+relu+max_pool", batch)?;

        let averages = global_avg_pool(&c2, "avg")?;
        let average_names: Vec<String> = averages.iter().map(|b| b.name.clone()).collect();
        append_layer(program, "global_avg_pool", averages)?;

        let logits = channel_mix(l3, &average_names, "logit")?;
        let logit_names: Vec<String> = logits.iter().map(|b| b.name.clone()).collect();
        append_layer(program, "l3 channel_mix", logits)?;

        append_layer(program, "softmax", softmax(&logit_names, mode)?)
    }
}
