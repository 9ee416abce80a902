/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : LeakyConvNet：单层步长卷积 + 全连接
 *
 * 拓扑：
 *   in (1x28x28)
 *   → conv 1→4, 5x5, 步长4, 无填充, LeakyReLU(0.01)   → c-<co>-<pos>  (4x6x6)
 *   → flatten（通道优先）+ linear 144→10（无偏置）     → logit-<i>
 *   → softmax（减去最大值）                            → prob-<i>
 */

use super::{append_layer, CssModel, WeightSpec, INPUT_HEIGHT, INPUT_WIDTH};
use crate::css::Program;
use crate::errors::CompileError;
use crate::lower::{bind_inputs, linear, softmax, Activation, Conv2d, SoftmaxMode};
use crate::weights::WeightStore;

const NEGATIVE_SLOPE: f64 = 0.01;
const STRIDE: usize = 4;

const WEIGHT_SPECS: &[WeightSpec] = &[
    WeightSpec {
        key: "l1.weight",
        shape: &[4, 1, 5, 5],
    },
    WeightSpec {
        key: "l2.weight",
        shape: &[10, 4 * 6 * 6],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeakyConvNet;

impl CssModel for LeakyConvNet {
    fn name(&self) -> &'static str {
        "LeakyConvNet"
    }

    fn weight_specs(&self) -> &'static [WeightSpec] {
        WEIGHT_SPECS
    }

    fn default_softmax(&self) -> SoftmaxMode {
        SoftmaxMode::Stable
    }

    fn lower(
        &self,
        weights: &WeightStore,
        mode: SoftmaxMode,
        program: &mut Program,
    ) -> Result<(), CompileError> {
        let l1 = weights.require(WEIGHT_SPECS[0].key, WEIGHT_SPECS[0].shape)?;
        let l2 = weights.require(WEIGHT_SPECS[1].key, WEIGHT_SPECS[1].shape)?;

        let input = bind_inputs(program, INPUT_HEIGHT, INPUT_WIDTH)?;

        let (batch, conv) = Conv2d::new(l1)
            .stride((STRIDE, STRIDE))
            .activation(Activation::LeakyRelu {
                negative_slope: NEGATIVE_SLOPE,
            })
            .lower(&input, "c")?;
        append_layer(program, "l1 conv+leaky_relu", batch)?;

        let logits = linear(l2, &conv.names(), "logit")?;
        let logit_names: Vec<String> = logits.iter().map(|b| b.name.clone()).collect();
        append_layer(program, "l2 linear", logits)?;

        append_layer(program, "softmax", softmax(&logit_names, mode)?)
    }
}
