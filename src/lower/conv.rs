/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : 2D 卷积 + 激活（+ 可选的 2x2 最大池化）的融合降级
 *
 * 设计决策：
 * - 零填充不生成“乘以0”的项：越界的输入位置直接略去，语义不变
 * - 激活用`max`代数地表达：
 *     ReLU:      max(0, conv)
 *     LeakyReLU: max(calc(slope * conv), conv)   （0 < slope < 1 时与分段定义等价）
 * - 融合池化时，ReLU 与 2x2 最大池化合并为一个 n 元`max`：
 *     max(0, f0, f1, f2, f3)
 *   LeakyReLU 单调，故同样可与最大值交换，展平为 max(slope*f0, f0, ..., slope*f3, f3)
 * - 使用 Rayon 在输出通道维度并行，各通道写入私有缓冲，最后按通道顺序拼接
 */

use rayon::prelude::*;

use super::FeatureMap;
use crate::css::{Binding, Expr};
use crate::errors::{CompileError, LayerKind};
use crate::tensor::Tensor;

/// 卷积后的激活函数
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Relu,
    LeakyRelu { negative_slope: f64 },
}

impl Activation {
    /// 单个卷积和经激活后的候选项（最终都放进同一个`max`里）
    fn candidates(&self, conv: Expr) -> Vec<Expr> {
        match *self {
            Activation::Relu => vec![conv],
            Activation::LeakyRelu { negative_slope } => {
                vec![Expr::product(Expr::number(negative_slope), conv.clone()), conv]
            }
        }
    }

    /// ReLU 需要额外的`0`候选项
    fn floor(&self) -> Option<Expr> {
        match self {
            Activation::Relu => Some(Expr::number(0)),
            Activation::LeakyRelu { .. } => None,
        }
    }
}

/// 2D 卷积层的降级参数
#[derive(Debug, Clone)]
pub struct Conv2d<'a> {
    weight: &'a Tensor,
    stride: (usize, usize),  // (sH, sW)
    padding: (usize, usize), // (pH, pW)
    activation: Activation,
    max_pool: bool,
}

impl<'a> Conv2d<'a> {
    /// 卷积核形状约定：[`C_out`, `C_in`, kH, kW]。默认步长1、无填充、ReLU、不池化
    pub fn new(weight: &'a Tensor) -> Self {
        Self {
            weight,
            stride: (1, 1),
            padding: (0, 0),
            activation: Activation::Relu,
            max_pool: false,
        }
    }

    pub fn stride(mut self, stride: (usize, usize)) -> Self {
        self.stride = stride;
        self
    }

    pub fn padding(mut self, padding: (usize, usize)) -> Self {
        self.padding = padding;
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// 是否融合一个步长为2的 2x2 最大池化
    pub fn max_pool(mut self, max_pool: bool) -> Self {
        self.max_pool = max_pool;
        self
    }

    /// 校验参数并计算输出特征图（池化融合时为池化后的尺寸）
    pub fn output_map(&self, input: &FeatureMap, prefix: &str) -> Result<FeatureMap, CompileError> {
        let invalid = |message: String| CompileError::invalid_layer(LayerKind::Conv2d, message);

        let kernel_shape = self.weight.shape();
        if kernel_shape.len() != 4 {
            return Err(invalid(format!(
                "卷积核必须是 4D [C_out, C_in, kH, kW]，得到{kernel_shape:?}"
            )));
        }
        let (out_channels, in_channels, kernel_h, kernel_w) = (
            kernel_shape[0],
            kernel_shape[1],
            kernel_shape[2],
            kernel_shape[3],
        );
        if in_channels != input.channels {
            return Err(invalid(format!(
                "输入通道数{}与卷积核输入通道数{in_channels}不匹配",
                input.channels
            )));
        }

        let (stride_h, stride_w) = self.stride;
        if stride_h == 0 || stride_w == 0 {
            return Err(invalid(format!("步长须大于0，得到{:?}", self.stride)));
        }
        if let Activation::LeakyRelu { negative_slope } = self.activation {
            if !(negative_slope > 0. && negative_slope < 1.) {
                return Err(invalid(format!(
                    "LeakyReLU 的负半轴斜率须在(0, 1)内，得到{negative_slope}"
                )));
            }
        }

        let (pad_h, pad_w) = self.padding;
        let padded_h = input.height + 2 * pad_h;
        let padded_w = input.width + 2 * pad_w;
        if kernel_h == 0 || kernel_w == 0 || kernel_h > padded_h || kernel_w > padded_w {
            return Err(invalid(format!(
                "卷积输出尺寸无效：输入{}x{}，核{kernel_h}x{kernel_w}，填充{:?}",
                input.height, input.width, self.padding
            )));
        }
        let conv_h = (padded_h - kernel_h) / stride_h + 1;
        let conv_w = (padded_w - kernel_w) / stride_w + 1;

        let (output_h, output_w) = if self.max_pool {
            (conv_h / 2, conv_w / 2)
        } else {
            (conv_h, conv_w)
        };
        if output_h == 0 || output_w == 0 {
            return Err(invalid(format!(
                "池化输出尺寸无效：卷积输出{conv_h}x{conv_w}不足 2x2"
            )));
        }

        Ok(FeatureMap::new(prefix, out_channels, output_h, output_w))
    }

    /// 为每个（输出通道, 输出位置）生成一个具名标量
    pub fn lower(
        &self,
        input: &FeatureMap,
        prefix: &str,
    ) -> Result<(Vec<Binding>, FeatureMap), CompileError> {
        let output = self.output_map(input, prefix)?;

        let per_channel: Vec<Vec<Binding>> = (0..output.channels)
            .into_par_iter()
            .map(|co| {
                (0..output.positions())
                    .map(|pos| {
                        let (oy, ox) = (pos / output.width, pos % output.width);
                        Binding::new(output.name_at(co, pos), self.fused(input, co, oy, ox))
                    })
                    .collect()
            })
            .collect();

        Ok((per_channel.into_iter().flatten().collect(), output))
    }

    /// 单个输出位置的完整表达式：卷积和 → 激活 →（可选）池化
    fn fused(&self, input: &FeatureMap, co: usize, oy: usize, ox: usize) -> Expr {
        let fields: Vec<(usize, usize)> = if self.max_pool {
            vec![
                (2 * oy, 2 * ox),
                (2 * oy, 2 * ox + 1),
                (2 * oy + 1, 2 * ox),
                (2 * oy + 1, 2 * ox + 1),
            ]
        } else {
            vec![(oy, ox)]
        };

        let args = self.activation.floor().into_iter().chain(
            fields
                .into_iter()
                .flat_map(|(cy, cx)| self.activation.candidates(self.field(input, co, cy, cx))),
        );
        Expr::max(args)
    }

    /// 卷积输出坐标`(cy, cx)`处的卷积和；落在填充区的项直接省略
    fn field(&self, input: &FeatureMap, co: usize, cy: usize, cx: usize) -> Expr {
        let kernel_shape = self.weight.shape();
        let (in_channels, kernel_h, kernel_w) = (kernel_shape[1], kernel_shape[2], kernel_shape[3]);
        let (stride_h, stride_w) = self.stride;
        let (pad_h, pad_w) = self.padding;

        let mut terms = Vec::with_capacity(in_channels * kernel_h * kernel_w);
        for ci in 0..in_channels {
            for ky in 0..kernel_h {
                let Some(iy) = (cy * stride_h + ky).checked_sub(pad_h) else {
                    continue;
                };
                if iy >= input.height {
                    continue;
                }
                for kx in 0..kernel_w {
                    let Some(ix) = (cx * stride_w + kx).checked_sub(pad_w) else {
                        continue;
                    };
                    if ix >= input.width {
                        continue;
                    }
                    terms.push(Expr::weighted(
                        input.name(ci, iy, ix),
                        self.weight[[co, ci, ky, kx]],
                    ));
                }
            }
        }
        Expr::Sum(terms)
    }
}
