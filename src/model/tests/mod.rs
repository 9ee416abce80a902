mod leaky_conv_net;

use crate::model::{ModelVariant, INPUT_HEIGHT, INPUT_WIDTH};
use crate::tensor::Tensor;
use crate::weights::WeightStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// 按变体声明的形状生成一组随机权重
fn random_weights(variant: &ModelVariant, seed: u64) -> WeightStore {
    use crate::model::CssModel;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = WeightStore::new();
    for spec in variant.weight_specs() {
        let size: usize = spec.shape.iter().product();
        let data: Vec<f32> = (0..size).map(|_| rng.gen_range(-0.5f32..0.5)).collect();
        store
            .insert(spec.key, Tensor::new(&data, spec.shape).unwrap())
            .unwrap();
    }
    store
}

/// 随机的 28x28 二值图像（行优先）
fn random_pixels(seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..INPUT_HEIGHT * INPUT_WIDTH)
        .map(|_| if rng.gen_bool(0.3) { 1. } else { 0. })
        .collect()
}

fn bind_pixels(pixels: &[f64]) -> HashMap<String, f64> {
    pixels
        .iter()
        .enumerate()
        .map(|(i, &v)| (format!("in-{i}"), v))
        .collect()
}
