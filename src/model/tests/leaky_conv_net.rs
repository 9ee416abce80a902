/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : LeakyConvNet 的端到端测试：结构、文本形态、与直接前向计算的数值等价
 */

use super::reference::{self, Map};
use super::{bind_pixels, random_pixels, random_weights};
use crate::lower::SoftmaxMode;
use crate::model::{LeakyConvNet, ModelVariant};
use approx::{assert_abs_diff_eq, assert_relative_eq};

fn variant() -> ModelVariant {
    LeakyConvNet.into()
}

#[test]
fn test_leaky_conv_net_structure() {
    let weights = random_weights(&variant(), 1);
    let program = variant().compile(&weights, None).unwrap();

    // 784 输入 + 144 卷积 + 10 logit + 1 max + 10 exp + 1 sum + 10 prob
    assert_eq!(program.inputs().len(), 784);
    assert_eq!(program.rules().len(), 144 + 10 + 1 + 10 + 1 + 10);
    assert_eq!(program.declarations().len(), 784 + program.rules().len());

    assert_eq!(program.rules()[0].name, "c-0-0");
    assert_eq!(program.rules()[143].name, "c-3-35");
    assert_eq!(program.rules()[144].name, "logit-0");
    assert_eq!(program.rules()[154].name, "logit-max");
    assert_eq!(program.rules().last().unwrap().name, "prob-9");
}

#[test]
fn test_leaky_conv_net_text_shape() {
    let weights = random_weights(&variant(), 2);
    let css = variant().compile_to_css(&weights, None).unwrap();
    let lines: Vec<&str> = css.lines().collect();

    assert_eq!(
        lines[0],
        r#"@property --in-0 { syntax: "<number>"; inherits: true; initial-value: 0; }"#
    );
    let first_rule = lines
        .iter()
        .position(|line| line.starts_with(":root"))
        .unwrap();
    assert_eq!(first_rule, 784 + 176);
    assert!(lines[first_rule].starts_with(":root { --c-0-0: max(calc(0.01 * calc(var(--in-0) * "));
    // 步长4：第二个输出位置从第5列开始
    assert!(lines[first_rule + 1].starts_with(":root { --c-0-1: max(calc(0.01 * calc(var(--in-4) * "));
    assert_eq!(
        *lines.last().unwrap(),
        ":root { --prob-9: calc(var(--exp-9) / var(--exp-sum)); }"
    );
    assert!(css.contains(":root { --exp-3: exp(calc(var(--logit-3) - var(--logit-max))); }"));
}

#[test]
fn test_leaky_conv_net_matches_forward_pass() {
    let weights = random_weights(&variant(), 3);
    let program = variant().compile(&weights, None).unwrap();
    let l1 = weights.get("l1.weight").unwrap();
    let l2 = weights.get("l2.weight").unwrap();

    for seed in 0..3 {
        let pixels = random_pixels(100 + seed);
        let values = program.evaluate(&bind_pixels(&pixels)).unwrap();

        let input = Map {
            c: 1,
            h: 28,
            w: 28,
            data: pixels,
        };
        let hidden = reference::leaky_relu(reference::conv2d(&input, l1, 4, 0), 0.01);
        let logits = reference::linear(&hidden.data, l2);
        let probs = reference::softmax(&logits);

        for (i, (logit, prob)) in logits.iter().zip(&probs).enumerate() {
            assert_relative_eq!(
                values[&format!("logit-{i}")],
                *logit,
                epsilon = 1e-6,
                max_relative = 1e-6
            );
            assert_abs_diff_eq!(values[&format!("prob-{i}")], *prob, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_leaky_conv_net_unstable_override() {
    let weights = random_weights(&variant(), 4);
    let program = variant()
        .compile(&weights, Some(SoftmaxMode::Unstable))
        .unwrap();
    assert!(!program.contains("logit-max"));

    let values = program.evaluate(&bind_pixels(&random_pixels(5))).unwrap();
    let total: f64 = (0..10).map(|i| values[&format!("prob-{i}")]).sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
}
