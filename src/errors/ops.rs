use std::fmt::{self, Display};

/// 可被降级（lowering）为表达式的层类型，主要用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Conv2d,
    GlobalAvgPool,
    Linear,
    ChannelMix,
    Softmax,
}
impl Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layer_name = match self {
            LayerKind::Conv2d => "卷积层",
            LayerKind::GlobalAvgPool => "全局平均池化层",
            LayerKind::Linear => "全连接层",
            LayerKind::ChannelMix => "1x1通道混合卷积层",
            LayerKind::Softmax => "Softmax层",
        };
        write!(f, "{}", layer_name)
    }
}
