/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : Softmax 的降级
 *
 * 生成的名称（固定）：
 * - `logit-max`：所有 logit 的最大值（仅数值稳定版）
 * - `exp-<i>`：exp(logit_i [- logit-max])
 * - `exp-sum`：Σ exp-i
 * - `prob-<i>`：exp-i / exp-sum
 *
 * 不做任何防除零处理：有限实数 logit 的指数和必然为正。
 */

use crate::css::{Binding, Expr};
use crate::errors::{CompileError, LayerKind};

pub const PROB_PREFIX: &str = "prob";
const MAX_NAME: &str = "logit-max";
const SUM_NAME: &str = "exp-sum";

/// 是否先减去最大值再取指数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftmaxMode {
    /// exp(logit - max)：对大幅值 logit 不会上溢
    Stable,
    /// exp(logit)
    Unstable,
}

pub fn softmax(logits: &[String], mode: SoftmaxMode) -> Result<Vec<Binding>, CompileError> {
    if logits.is_empty() {
        return Err(CompileError::invalid_layer(
            LayerKind::Softmax,
            "至少需要一个 logit",
        ));
    }
    let n = logits.len();
    let mut bindings = Vec::with_capacity(2 * n + 2);

    if mode == SoftmaxMode::Stable {
        bindings.push(Binding::new(
            MAX_NAME,
            Expr::max(logits.iter().map(|name| Expr::var(name.as_str()))),
        ));
    }
    for (i, logit) in logits.iter().enumerate() {
        let exponent = match mode {
            SoftmaxMode::Stable => Expr::sub(Expr::var(logit.as_str()), Expr::var(MAX_NAME)),
            SoftmaxMode::Unstable => Expr::var(logit.as_str()),
        };
        bindings.push(Binding::new(format!("exp-{i}"), Expr::exp(exponent)));
    }
    bindings.push(Binding::new(
        SUM_NAME,
        Expr::sum((0..n).map(|i| Expr::var(format!("exp-{i}")))),
    ));
    for i in 0..n {
        bindings.push(Binding::new(
            format!("{PROB_PREFIX}-{i}"),
            Expr::div(Expr::var(format!("exp-{i}")), Expr::var(SUM_NAME)),
        ));
    }
    Ok(bindings)
}
