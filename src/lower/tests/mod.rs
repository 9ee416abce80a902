
use crate::css::Binding;
use std::collections::HashMap;

/// 依次对一批表达式求值，`values`中需预先放好所有输入
fn eval_batch(batch: &[Binding], values: &mut HashMap<String, f64>) {
    for binding in batch {
        let value = binding
            .expr
            .eval(&|name: &str| values.get(name).copied())
            .unwrap();
        values.insert(binding.name.clone(), value);
    }
}
