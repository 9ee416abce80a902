use std::ops::Index;

use super::Tensor;

// 引用式索引：`weight[[co, ci, ky, kx]]`
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &f32 {
        &self.data[&index[..]]
    }
}
