/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 本类仅包含一些属性方法，不包含任何运算方法，所以不会需要用到mut
 */

use super::Tensor;

impl Tensor {
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]。
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 所有元素是否都是有限值（非NaN、非∞）
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// 按行优先（C顺序）遍历所有元素
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.data.iter()
    }
}
