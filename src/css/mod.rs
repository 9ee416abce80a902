/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : CSS 表达式图的基本构件：数字字面量、属性声明、属性引用
 *
 * 目标引擎只认“已注册的数值型自定义属性”，所以每个标量都要先有一条
 * `@property` 声明，再由 `:root { --name: <表达式>; }` 规则给出它的值。
 */

mod expr;
mod program;


pub use expr::Expr;
pub use program::Program;

use std::fmt::{self, Display};

/// 将浮点数渲染为十位小数精度下的最短字面量：
/// `0.1250000000` → `0.125`，`1.0000000000` → `1`，`-0.0000000000` → `0`。
/// 只输出数字、小数点和前导负号，与区域设置无关。
pub fn format_number(x: impl Into<f64>) -> String {
    let fixed = format!("{:.10}", x.into());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        _ => trimmed.to_string(),
    }
}

/// 引用一个已声明的属性，如`var(--c-0-12)`
pub fn reference(name: &str) -> String {
    format!("var(--{name})")
}

/// 声明一个数值型自定义属性（初始值为0，可继承）
pub fn declare_property(name: &str) -> Declaration {
    Declaration {
        name: name.to_string(),
    }
}

/// 属性声明：只登记类型与初始值，不带任何表达式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
}

impl Declaration {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@property --{} {{ syntax: \"<number>\"; inherits: true; initial-value: 0; }}",
            self.name
        )
    }
}

/// 一个具名标量及其定义表达式，渲染为`:root { --name: <expr>; }`
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub expr: Expr,
}

impl Binding {
    pub fn new(name: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":root {{ --{}: {}; }}", self.name, self.expr)
    }
}
