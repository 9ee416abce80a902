/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 闭式算术表达式（无循环、无分支、无可变状态）
 *
 * 渲染规则：
 * - 求和、差、商、积都以`calc(...)`包裹，嵌套时也不例外，
 *   所以运算优先级永远不依赖引擎的解析细节；
 * - 唯一的例外是“求和中的乘积项”，直接写作`a * b`（乘法本就比加法优先）。
 */

use std::fmt::{self, Display};

use super::{format_number, reference};
use crate::errors::CompileError;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// 数字字面量（构造时即按输出精度取整，保证“所见即所算”）
    Number(f64),
    /// 对某个已声明属性的引用
    Var(String),
    /// Σ项，空和渲染为`0`
    Sum(Vec<Expr>),
    Product(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// n元最大值
    Max(Vec<Expr>),
    Exp(Box<Expr>),
}

impl Expr {
    pub fn number(x: impl Into<f64>) -> Self {
        let x = x.into();
        Expr::Number(format_number(x).parse().unwrap_or(x))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// `var(--name) * weight`，卷积与全连接求和中的基本项
    pub fn weighted(name: impl Into<String>, weight: impl Into<f64>) -> Self {
        Expr::product(Expr::var(name), Expr::number(weight))
    }

    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Sum(terms.into_iter().collect())
    }

    pub fn product(a: Expr, b: Expr) -> Self {
        Expr::Product(Box::new(a), Box::new(b))
    }

    pub fn sub(a: Expr, b: Expr) -> Self {
        Expr::Sub(Box::new(a), Box::new(b))
    }

    pub fn div(a: Expr, b: Expr) -> Self {
        Expr::Div(Box::new(a), Box::new(b))
    }

    pub fn max(args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Max(args.into_iter().collect())
    }

    pub fn exp(a: Expr) -> Self {
        Expr::Exp(Box::new(a))
    }

    /// 按出现顺序列出表达式引用的所有属性名（可能重复）
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Var(name) => names.push(name),
            Expr::Sum(args) | Expr::Max(args) => {
                args.iter().for_each(|arg| arg.collect_references(names))
            }
            Expr::Product(a, b) | Expr::Sub(a, b) | Expr::Div(a, b) => {
                a.collect_references(names);
                b.collect_references(names);
            }
            Expr::Exp(a) => a.collect_references(names),
        }
    }

    /// 以`lookup`提供的属性值对表达式数值求值；查不到的属性视为未绑定的输入
    pub fn eval<F>(&self, lookup: &F) -> Result<f64, CompileError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        Ok(match self {
            Expr::Number(x) => *x,
            Expr::Var(name) => {
                lookup(name).ok_or_else(|| CompileError::UnboundInput(name.clone()))?
            }
            Expr::Sum(terms) => {
                let mut total = 0.;
                for term in terms {
                    total += term.eval(lookup)?;
                }
                total
            }
            Expr::Product(a, b) => a.eval(lookup)? * b.eval(lookup)?,
            Expr::Sub(a, b) => a.eval(lookup)? - b.eval(lookup)?,
            Expr::Div(a, b) => a.eval(lookup)? / b.eval(lookup)?,
            Expr::Max(args) => {
                let mut max = f64::NEG_INFINITY;
                for arg in args {
                    max = max.max(arg.eval(lookup)?);
                }
                max
            }
            Expr::Exp(a) => a.eval(lookup)?.exp(),
        })
    }

    // 求和中的一项：乘积不必再包一层`calc`
    fn fmt_term(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Product(a, b) => write!(f, "{a} * {b}"),
            _ => write!(f, "{self}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(x) => write!(f, "{}", format_number(*x)),
            Expr::Var(name) => write!(f, "{}", reference(name)),
            Expr::Sum(terms) if terms.is_empty() => write!(f, "0"),
            Expr::Sum(terms) => {
                write!(f, "calc(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    term.fmt_term(f)?;
                }
                write!(f, ")")
            }
            Expr::Product(a, b) => write!(f, "calc({a} * {b})"),
            Expr::Sub(a, b) => write!(f, "calc({a} - {b})"),
            Expr::Div(a, b) => write!(f, "calc({a} / {b})"),
            Expr::Max(args) => {
                write!(f, "max(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Exp(a) => write!(f, "exp({a})"),
        }
    }
}
