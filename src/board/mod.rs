/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 画板样式表：把指针输入写进`--in-*`
 *
 * 画板由`cells`个格子（`.board>.cell-<i>`）组成，每格对应一个输入属性`--in-<i>`：
 * - 平时所有`--in-*`都挂着一个极长延迟的过渡，值因此“冻结”在最后一次写入
 * - 按下指针并悬停在某格上时，该格的`--in-<i>`置为 1，且只有这一格改用即时过渡
 * - 每格的背景亮度直接取自`--in-<i>`
 *
 * `generate_page_html`给出挂载这些格子与概率条的页面。
 */

mod page;

#[cfg(test)]
mod tests;

pub use page::{generate_page_html, BOARD_STYLESHEET, MODEL_STYLESHEET};

use crate::lower::INPUT_PREFIX;

/// 平时的过渡：延迟足够长，松开后的值不会回落
fn idle_transition(i: usize) -> String {
    format!("--{INPUT_PREFIX}-{i} 1s 999999s")
}

/// 正在绘制的格子：立即生效
fn drawing_transition(i: usize) -> String {
    format!("--{INPUT_PREFIX}-{i} 0s 0s")
}

/// 生成`cells`个格子的画板样式表（三段，以`\n`连接）
pub fn generate_board_css(cells: usize) -> String {
    let idle: Vec<String> = (0..cells).map(idle_transition).collect();

    let backgrounds: Vec<String> = (0..cells)
        .map(|i| {
            format!(
                ".board>.cell-{i}{{background-color:hsl(0 0% calc(var(--{INPUT_PREFIX}-{i})*100%));}}"
            )
        })
        .collect();

    let drawing: Vec<String> = (0..cells)
        .map(|i| {
            let mut transitions = idle.clone();
            transitions[i] = drawing_transition(i);
            format!(
                ":root:has(.board>.cell:active):has(.board>.cell-{i}:hover){{--{INPUT_PREFIX}-{i}:1;transition:{};}}",
                transitions.join(",")
            )
        })
        .collect();

    [
        format!(":root{{transition:{};}}", idle.join(",")),
        backgrounds.join("\n"),
        drawing.join("\n"),
    ]
    .join("\n")
}
