//! # Only CSS
//!
//! `only_css`项目把训练好的小型卷积网络（28x28 二值手写数字 → 10 类概率）
//! 编译成纯[CSS](https://www.w3.org/TR/css-values-4/)表达式图：
//! 每个中间标量都是一个`@property`声明的自定义属性，
//! 其值是一条只引用更早属性的`calc()`/`max()`/`exp()`表达式，
//! 浏览器的样式引擎求值即完成一次前向推理。
//!

pub mod board;
pub mod config;
pub mod css;
pub mod errors;
pub mod lower;
pub mod model;
pub mod tensor;
pub mod utils;
pub mod vision;
pub mod weights;
