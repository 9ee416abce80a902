use crate::vision::{binarize_image, input_values, load_image};
use crate::assert_err;
use crate::errors::CompileError;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

#[test]
fn test_binarize_exact_size() {
    // 对角线为白，其余为黑；阈值附近的 127/128 分属两侧
    let mut gray = GrayImage::from_pixel(28, 28, Luma([127]));
    for i in 0..28 {
        gray.put_pixel(i, i, Luma([128]));
    }
    let pixels = binarize_image(&DynamicImage::ImageLuma8(gray));

    assert_eq!(pixels.len(), 784);
    for (i, value) in pixels.iter().enumerate() {
        let expected = if i / 28 == i % 28 { 1. } else { 0. };
        assert_eq!(*value, expected, "像素{i}");
    }
}

#[test]
fn test_binarize_resizes_uniform_image() {
    let white = DynamicImage::ImageLuma8(GrayImage::from_pixel(56, 40, Luma([255])));
    assert_eq!(binarize_image(&white), vec![1.; 784]);

    let black = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 100, Luma([0])));
    assert_eq!(binarize_image(&black), vec![0.; 784]);
}

#[test]
fn test_binarize_color_image() {
    // 纯红的亮度远低于阈值，纯白则高于阈值
    let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(28, 28, Rgb([255, 0, 0])));
    assert!(binarize_image(&red).iter().all(|&v| v == 0.));

    let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(28, 28, Rgb([255, 255, 255])));
    assert!(binarize_image(&white).iter().all(|&v| v == 1.));
}

#[test]
fn test_input_values() {
    let values = input_values(&[0., 1., 1.]);
    assert_eq!(values.len(), 3);
    assert_eq!(values["in-0"], 0.);
    assert_eq!(values["in-2"], 1.);
}

#[test]
fn test_load_missing_image() {
    assert_err!(
        load_image("./no_such_dir/digit.png"),
        CompileError::Image(_) | CompileError::Io(_)
    );
}
