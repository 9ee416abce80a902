/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 本模块把一张光栅图像转成模型的 784 个输入值。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像是指任意`DynamicImage`（RGB(A)、灰度等）；
 *                 2. “灰度”（图）等同于英文中luma、luminance、grey、gray的概念。
 *                 二值化规则与训练时一致：灰度 >= 127.5 记为 1，否则为 0。
 */

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::DynamicImage;

use crate::errors::CompileError;
use crate::lower::INPUT_PREFIX;
use crate::model::{INPUT_HEIGHT, INPUT_WIDTH};

/// 二值化阈值（灰度值）
pub const BINARIZE_THRESHOLD: f32 = 127.5;

/// 从本地载入图像
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage, CompileError> {
    Ok(image::open(path)?)
}

/// 灰度化 → 缩放到 28x28 → 按阈值二值化，返回行优先的 784 个值
pub fn binarize_image(image: &DynamicImage) -> Vec<f64> {
    let mut luma = image.to_luma8();
    let (width, height) = (INPUT_WIDTH as u32, INPUT_HEIGHT as u32);
    if luma.dimensions() != (width, height) {
        luma = imageops::resize(&luma, width, height, FilterType::Triangle);
    }
    luma.pixels()
        .map(|pixel| {
            if f32::from(pixel[0]) >= BINARIZE_THRESHOLD {
                1.
            } else {
                0.
            }
        })
        .collect()
}

/// 把行优先的像素值绑定到输入属性名（`in-<i>`），供`Program::evaluate`使用
pub fn input_values(pixels: &[f64]) -> HashMap<String, f64> {
    pixels
        .iter()
        .enumerate()
        .map(|(i, &value)| (format!("{INPUT_PREFIX}-{i}"), value))
        .collect()
}
