/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 整个表达式图（Program）
 *
 * 声明与规则分两个序列收集，只在最终序列化时合并：先输出全部`@property`
 * 声明，再输出全部`:root`规则。目标引擎在“声明出现在首次使用之后”时会把
 * 属性当成非数值处理，两段式输出从结构上杜绝了这种情况。
 */

use std::collections::{HashMap, HashSet};

use super::{declare_property, Binding, Declaration};
use crate::errors::CompileError;

#[derive(Debug, Clone, Default)]
pub struct Program {
    declarations: Vec<Declaration>,
    rules: Vec<Binding>,
    inputs: Vec<String>,
    names: HashSet<String>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明一个原始输入：只有声明，没有规则，其值在求值时由外部提供
    pub fn declare_input(&mut self, name: &str) -> Result<(), CompileError> {
        self.register(name)?;
        self.inputs.push(name.to_string());
        Ok(())
    }

    /// 定义一个具名标量。表达式只能引用已声明的名称，
    /// 因此依赖关系天然是一个有向无环图
    pub fn define(&mut self, binding: Binding) -> Result<(), CompileError> {
        if let Some(undeclared) = binding
            .expr
            .references()
            .into_iter()
            .find(|name| !self.names.contains(*name))
        {
            return Err(CompileError::UndeclaredReference(undeclared.to_string()));
        }
        self.register(&binding.name)?;
        self.rules.push(binding);
        Ok(())
    }

    /// 按顺序定义一批由某个层降级得到的标量
    pub fn extend(&mut self, batch: Vec<Binding>) -> Result<(), CompileError> {
        batch.into_iter().try_for_each(|binding| self.define(binding))
    }

    fn register(&mut self, name: &str) -> Result<(), CompileError> {
        if !self.names.insert(name.to_string()) {
            return Err(CompileError::NameCollision(name.to_string()));
        }
        self.declarations.push(declare_property(name));
        Ok(())
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn rules(&self) -> &[Binding] {
        &self.rules
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// 两段式序列化：全部声明在前，全部规则在后，各自保持降级顺序
    pub fn to_css(&self) -> String {
        let declarations = self.declarations.iter().map(ToString::to_string);
        let rules = self.rules.iter().map(ToString::to_string);
        declarations.chain(rules).collect::<Vec<_>>().join("\n")
    }

    /// 给定全部输入的取值，按规则顺序逐个求值，返回每个具名标量的值（含输入本身）。
    /// 仅用于校验生成结果，不是目标引擎的替代品
    pub fn evaluate(
        &self,
        inputs: &HashMap<String, f64>,
    ) -> Result<HashMap<String, f64>, CompileError> {
        let mut values = HashMap::with_capacity(self.names.len());
        for name in &self.inputs {
            let value = inputs
                .get(name)
                .ok_or_else(|| CompileError::UnboundInput(name.clone()))?;
            values.insert(name.clone(), *value);
        }
        for rule in &self.rules {
            let value = rule.expr.eval(&|name: &str| values.get(name).copied())?;
            values.insert(rule.name.clone(), value);
        }
        Ok(values)
    }
}
