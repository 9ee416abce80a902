use crate::board::{generate_board_css, generate_page_html};
use crate::model::{INPUT_HEIGHT, INPUT_WIDTH};

#[test]
fn test_board_two_cells() {
    let expected = [
        ":root{transition:--in-0 1s 999999s,--in-1 1s 999999s;}",
        ".board>.cell-0{background-color:hsl(0 0% calc(var(--in-0)*100%));}",
        ".board>.cell-1{background-color:hsl(0 0% calc(var(--in-1)*100%));}",
        ":root:has(.board>.cell:active):has(.board>.cell-0:hover){--in-0:1;transition:--in-0 0s 0s,--in-1 1s 999999s;}",
        ":root:has(.board>.cell:active):has(.board>.cell-1:hover){--in-1:1;transition:--in-0 1s 999999s,--in-1 0s 0s;}",
    ]
    .join("\n");
    assert_eq!(generate_board_css(2), expected);
}

#[test]
fn test_board_full_grid() {
    let cells = INPUT_HEIGHT * INPUT_WIDTH;
    let css = generate_board_css(cells);
    let lines: Vec<&str> = css.lines().collect();
    assert_eq!(lines.len(), 1 + 2 * cells);

    // 每条绘制规则里恰好只有一个即时过渡，且属于它自己的格子
    for (i, line) in lines[1 + cells..].iter().enumerate() {
        assert_eq!(line.matches(" 0s 0s").count(), 1);
        assert!(line.contains(&format!("--in-{i}:1;")));
        assert!(line.contains(&format!("--in-{i} 0s 0s")));
    }
    assert_eq!(lines[0].matches("999999s").count(), cells);
}

#[test]
fn test_board_empty() {
    assert_eq!(generate_board_css(0), ":root{transition:;}\n\n");
}

#[test]
fn test_page_binds_cells_and_probabilities() {
    let html = generate_page_html(INPUT_HEIGHT, INPUT_WIDTH, 10);
    assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
    assert!(html.ends_with("</body></html>"));

    for i in 0..INPUT_HEIGHT * INPUT_WIDTH {
        assert!(html.contains(&format!(r#"<div class="cell cell-{i}"></div>"#)));
    }
    assert!(!html.contains("cell-784\""));
    assert_eq!(html.matches(r#"class="bar-row""#).count(), 10);
    for i in 0..10 {
        assert!(html.contains(&format!("--p: var(--prob-{i})")));
    }
    assert!(!html.contains("var(--prob-10)"));

    assert!(html.contains(r#"<link rel="stylesheet" href="./model.css"/>"#));
    assert!(html.contains(r#"<link rel="stylesheet" href="./board.css"/>"#));
    assert!(html.contains(r#"class="clear""#));
    assert!(html.contains(":root:has(.clear:active){transition:none;}"));
    assert!(html.contains("grid-template-columns:repeat(28,var(--cell-size))"));
    assert!(html.contains("width:calc(var(--p)*100%)"));
}

#[test]
fn test_page_small_board() {
    let html = generate_page_html(2, 3, 4);
    assert_eq!(html.matches(r#"<div class="cell cell-"#).count(), 6);
    assert_eq!(html.matches(r#"class="bar-row""#).count(), 4);
    assert!(html.contains("calc(var(--cell-size) * 3)"));
}
