use crate::css::{Binding, Expr};
use crate::errors::{CompileError, LayerKind};
use crate::tensor::Tensor;

/// 全连接层（无偏置）：权重形状`[out, in]`，输出`<prefix>-<i>` = Σⱼ input[j] * w[i, j]
pub fn linear(
    weight: &Tensor,
    inputs: &[String],
    prefix: &str,
) -> Result<Vec<Binding>, CompileError> {
    let shape = weight.shape();
    if shape.len() != 2 {
        return Err(CompileError::invalid_layer(
            LayerKind::Linear,
            format!("权重必须是 2D [out, in]，得到{shape:?}"),
        ));
    }
    let (out_features, in_features) = (shape[0], shape[1]);
    if inputs.len() != in_features {
        return Err(CompileError::invalid_layer(
            LayerKind::Linear,
            format!("输入数{}与权重输入维度{in_features}不匹配", inputs.len()),
        ));
    }

    Ok((0..out_features)
        .map(|i| {
            let terms = inputs
                .iter()
                .enumerate()
                .map(|(j, name)| Expr::weighted(name.as_str(), weight[[i, j]]));
            Binding::new(format!("{prefix}-{i}"), Expr::sum(terms))
        })
        .collect())
}

/// 1x1 通道混合卷积：权重形状`[out, in, 1, 1]`，在通道上与全连接层代数等价
pub fn channel_mix(
    weight: &Tensor,
    inputs: &[String],
    prefix: &str,
) -> Result<Vec<Binding>, CompileError> {
    let shape = weight.shape();
    if shape.len() != 4 || shape[2] != 1 || shape[3] != 1 {
        return Err(CompileError::invalid_layer(
            LayerKind::ChannelMix,
            format!("权重必须是 [out, in, 1, 1]，得到{shape:?}"),
        ));
    }
    let matrix = weight.reshape(&[shape[0], shape[1]])?;
    linear(&matrix, inputs, prefix)
}
