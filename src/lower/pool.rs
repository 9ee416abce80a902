use super::FeatureMap;
use crate::css::{Binding, Expr};
use crate::errors::{CompileError, LayerKind};

/// 全局平均池化：每个通道一个`<prefix>-<c>`，其值为该通道全部位置之和除以位置数。
/// 除数是精确的整数字面量（如`49`），而不是取整后的倒数
pub fn global_avg_pool(input: &FeatureMap, prefix: &str) -> Result<Vec<Binding>, CompileError> {
    let positions = input.positions();
    if positions == 0 {
        return Err(CompileError::invalid_layer(
            LayerKind::GlobalAvgPool,
            format!("输入特征图`{}`没有任何位置", input.prefix),
        ));
    }

    Ok((0..input.channels)
        .map(|c| {
            let sum = Expr::sum((0..positions).map(|pos| Expr::var(input.name_at(c, pos))));
            Binding::new(format!("{prefix}-{c}"), Expr::div(sum, Expr::number(positions as f64)))
        })
        .collect())
}
