use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 编译（权重 → CSS 表达式图）过程中可能出现的所有错误。
/// 任何错误都会使本次生成整体作废，不会产出任何（部分）文本。
#[derive(Error, Debug)]
pub enum CompileError {
    // 权重输入
    #[error("缺少权重`{0}`")]
    MissingWeight(String),
    #[error("权重`{key}`形状不匹配：期望{expected:?}，实际为{got:?}")]
    ShapeMismatch {
        key: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("权重`{0}`中存在非有限值（NaN或∞）")]
    NonFiniteWeight(String),

    // 表达式图的内部不变量
    #[error("名称冲突：`--{0}`已被声明过")]
    NameCollision(String),
    #[error("表达式引用了尚未声明的`--{0}`")]
    UndeclaredReference(String),
    #[error("求值时缺少输入`--{0}`的值")]
    UnboundInput(String),

    // 层参数
    #[error("{layer}参数无效：{message}")]
    InvalidLayer { layer: LayerKind, message: String },

    // 外部资源
    #[error("格式错误: {0}")]
    Format(String),
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("图像错误: {0}")]
    Image(#[from] image::ImageError),
}

impl CompileError {
    pub(crate) fn invalid_layer(layer: LayerKind, message: impl Into<String>) -> Self {
        Self::InvalidLayer {
            layer,
            message: message.into(),
        }
    }
}
