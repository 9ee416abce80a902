/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 命令行入口
 *
 *   only_css compile --variant leaky-conv-net --weights model.npz --output model.css
 *   only_css board   --output board.css
 *   only_css page    --output index.html
 *   only_css predict --variant leaky-conv-net --weights model.npz --image digit.png
 */

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;

use only_css::board::{generate_board_css, generate_page_html};
use only_css::config::CompileConfig;
use only_css::lower::PROB_PREFIX;
use only_css::model::{ModelVariant, VariantKind, INPUT_HEIGHT, INPUT_WIDTH, NUM_CLASSES};
use only_css::utils::write_atomic;
use only_css::vision;
use only_css::weights::WeightStore;

#[derive(Parser)]
#[command(version, about = "把训练好的卷积网络权重编译成纯 CSS 表达式图")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 生成模型样式表（可选同时生成画板样式表）
    Compile(CompileArgs),
    /// 只生成画板样式表
    Board {
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
        /// 格子数，默认 28x28
        #[arg(long, value_name = "INT", default_value_t = INPUT_HEIGHT * INPUT_WIDTH)]
        cells: usize,
    },
    /// 生成挂载画板与概率条的 HTML 页面（引用 model.css 与 board.css）
    Page {
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },
    /// 编译后在本地对一张图片求值，输出各类概率
    Predict {
        #[command(flatten)]
        model: ModelArgs,
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// JSON 配置文件；命令行参数优先于文件中的值
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    variant: Option<VariantKind>,
    /// 权重文件（.npz/.json/.bin）
    #[arg(short, long, value_name = "PATH")]
    weights: Option<PathBuf>,
    /// 显式指定 softmax 是否减去最大值（true/false）
    #[arg(long, value_name = "BOOL")]
    stable_softmax: Option<bool>,
}

#[derive(Args)]
struct CompileArgs {
    #[command(flatten)]
    model: ModelArgs,
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    board_output: Option<PathBuf>,
}

impl ModelArgs {
    /// 读入配置文件（若有）并以命令行参数覆盖
    fn resolve(
        self,
        output: Option<PathBuf>,
        board_output: Option<PathBuf>,
    ) -> Result<CompileConfig, Box<dyn Error>> {
        let file = match &self.config {
            Some(path) => CompileConfig::from_json_file(path)?,
            None => CompileConfig::default(),
        };
        Ok(file.merge(CompileConfig {
            variant: self.variant,
            weights: self.weights,
            output,
            stable_softmax: self.stable_softmax,
            board_output,
        }))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    match args.command {
        Command::Compile(CompileArgs {
            model,
            output,
            board_output,
        }) => {
            let config = model.resolve(output, board_output)?;
            let variant = ModelVariant::from(config.require_variant()?);
            let weights = WeightStore::open(config.require_weights()?)?;

            let css = variant.compile_to_css(&weights, config.softmax_mode())?;
            let output = config.require_output()?;
            write_atomic(output, &css)?;
            info!("模型样式表已写入{}", output.display());

            if let Some(board_output) = &config.board_output {
                write_atomic(board_output, &generate_board_css(INPUT_HEIGHT * INPUT_WIDTH))?;
                info!("画板样式表已写入{}", board_output.display());
            }
        }
        Command::Board { output, cells } => {
            write_atomic(&output, &generate_board_css(cells))?;
            info!("画板样式表（{cells}格）已写入{}", output.display());
        }
        Command::Page { output } => {
            write_atomic(&output, &generate_page_html(INPUT_HEIGHT, INPUT_WIDTH, NUM_CLASSES))?;
            info!("页面已写入{}", output.display());
        }
        Command::Predict { model, image } => {
            let config = model.resolve(None, None)?;
            let variant = ModelVariant::from(config.require_variant()?);
            let weights = WeightStore::open(config.require_weights()?)?;
            let program = variant.compile(&weights, config.softmax_mode())?;

            let pixels = vision::binarize_image(&vision::load_image(&image)?);
            let values = program.evaluate(&vision::input_values(&pixels))?;

            let probs: Vec<f64> = (0..NUM_CLASSES)
                .map(|i| values[&format!("{PROB_PREFIX}-{i}")])
                .collect();
            for (digit, prob) in probs.iter().enumerate() {
                println!("{digit}: {prob:.6}");
            }
            let best = probs
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(digit, _)| digit)
                .ok_or("没有任何类别概率")?;
            println!("预测结果：{best}");
        }
    }
    Ok(())
}
