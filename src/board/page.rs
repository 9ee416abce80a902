/*
 * @Author       : 老董
 * @Date         : 2026-03-08
 * @Description  : 页面外壳：画板格子、清除按钮与概率条
 *
 * 页面本身不含任何脚本，只负责把三份样式表接到一起：
 * - `model.css`声明并计算`--in-*` → … → `--prob-*`
 * - `board.css`把指针输入写进`--in-*`
 * - 页内`<style>`排版格子，并把每个概率条的`--p`绑定到对应的`--prob-<i>`
 */

use crate::lower::PROB_PREFIX;

/// 页面引用的样式表（与`compile`/`board`子命令的默认输出文件名一致）
pub const MODEL_STYLESHEET: &str = "model.css";
pub const BOARD_STYLESHEET: &str = "board.css";

/// 生成`height x width`画板、`classes`个概率条的完整 HTML 页面
pub fn generate_page_html(height: usize, width: usize, classes: usize) -> String {
    let cells = height * width;

    let board: String = (0..cells)
        .map(|i| format!(r#"<div class="cell cell-{i}"></div>"#))
        .collect();
    let bars: String = (0..classes)
        .map(|i| {
            format!(
                r#"<div class="bar-row"><span>{i}</span><div class="track"><div class="fill" style="--p: var(--{PROB_PREFIX}-{i})"></div></div></div>"#
            )
        })
        .collect();

    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="en"><head>"#,
            r#"<meta charset="UTF-8"/>"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0, viewport-fit=cover"/>"#,
            r#"<meta name="color-scheme" content="dark"/>"#,
            r#"<meta name="description" content="Handwritten digit recognition implemented entirely in CSS."/>"#,
            "<title>Pure CSS MNIST</title>",
            r#"<link rel="stylesheet" href="./{model}"/>"#,
            r#"<link rel="stylesheet" href="./{board_css}"/>"#,
            "<style>{style}</style>",
            "</head><body>",
            "<noscript>JavaScript is disabled. Everything still works!</noscript>",
            "<header><h1>Pure CSS MNIST</h1></header>",
            "<div>Draw a digit below.</div>",
            r#"<div class="board" style="width: calc(var(--cell-size) * {width})" role="img" aria-label="drawing board">{cells}</div>"#,
            r#"<button type="button" class="clear" aria-label="Clear the drawing board">clear</button>"#,
            r#"<div class="prediction-results">{bars}</div>"#,
            "</body></html>",
        ),
        model = MODEL_STYLESHEET,
        board_css = BOARD_STYLESHEET,
        style = page_style(width),
        width = width,
        cells = board,
        bars = bars,
    )
}

/// 页内样式：格子排版与概率条宽度。
/// 按住清除按钮时`transition`不再列出任何`--in-*`，挂起中的长延迟过渡随之取消，输入回到初始值 0
fn page_style(width: usize) -> String {
    format!(
        concat!(
            ":root{{--cell-size:12px;}}",
            ".board{{display:grid;grid-template-columns:repeat({width},var(--cell-size));touch-action:none;}}",
            ".board>.cell{{width:var(--cell-size);height:var(--cell-size);}}",
            ".bar-row{{display:flex;gap:8px;align-items:center;}}",
            ".track{{flex:1;height:10px;background:#333;}}",
            ".fill{{height:100%;width:calc(var(--p)*100%);background:#ccc;}}",
            ":root:has(.clear:active){{transition:none;}}",
        ),
        width = width,
    )
}
