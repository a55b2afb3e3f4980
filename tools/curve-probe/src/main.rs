//! # Curve Probe
//!
//! 缓动曲线与过渡序列的命令行探针，不需要启动渲染即可检查效果。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p curve-probe -- list
//! cargo run -p curve-probe -- sample back_out --steps 20
//! cargo run -p curve-probe -- sample elastic_in_out --unclamped --from -0.2 --to 1.2 --json
//! cargo run -p curve-probe -- run intro.json --dt 0.05
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use scene_tween::{
    Color, CurveKind, PlaybackState, SceneNode, SequenceDesc, Transform, evaluate,
    evaluate_unclamped,
};

#[derive(Parser)]
#[command(name = "curve-probe")]
#[command(about = "缓动曲线与过渡序列探针")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 列出所有缓动曲线
    List,

    /// 对一条曲线等距采样
    Sample {
        /// 曲线名称（如 back_out）
        curve: String,

        /// 采样段数
        #[arg(short, long, default_value = "10")]
        steps: u32,

        /// 采样起点
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        from: f32,

        /// 采样终点
        #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
        to: f32,

        /// 不限制输入范围
        #[arg(long)]
        unclamped: bool,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 在无渲染的场景节点上试播一个序列描述文件
    Run {
        /// 序列描述（JSON）
        file: PathBuf,

        /// 每帧时长（秒）
        #[arg(long, default_value = "0.05")]
        dt: f32,

        /// 最多推进的帧数
        #[arg(long, default_value = "10000")]
        max_steps: usize,
    },
}

/// 一个采样点
#[derive(Debug, Serialize)]
struct Sample {
    t: f32,
    value: f32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    if let Err(e) = real_main(cli) {
        eprintln!("curve-probe error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List => {
            list_curves();
            Ok(())
        }
        Commands::Sample {
            curve,
            steps,
            from,
            to,
            unclamped,
            json,
        } => sample_curve(&curve, steps, from, to, unclamped, json),
        Commands::Run { file, dt, max_steps } => run_sequence(&file, dt, max_steps),
    }
}

fn list_curves() {
    for kind in CurveKind::ALL {
        if kind.overshoots() {
            println!("{kind}  (越界)");
        } else {
            println!("{kind}");
        }
    }
}

fn sample_curve(
    name: &str,
    steps: u32,
    from: f32,
    to: f32,
    unclamped: bool,
    json: bool,
) -> anyhow::Result<()> {
    let Some(kind) = CurveKind::lookup(name) else {
        bail!("未知的缓动曲线 '{name}'，可用 `curve-probe list` 查看");
    };
    if steps == 0 {
        bail!("采样段数必须大于 0");
    }

    let samples: Vec<Sample> = (0..=steps)
        .map(|i| {
            let t = from + (to - from) * i as f32 / steps as f32;
            let value = if unclamped {
                evaluate_unclamped(kind, t)
            } else {
                evaluate(kind, t)
            };
            Sample { t, value }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        println!("{kind}");
        for sample in &samples {
            println!("  t={:>7.3}  {:>9.5}", sample.t, sample.value);
        }
    }
    Ok(())
}

fn run_sequence(path: &Path, dt: f32, max_steps: usize) -> anyhow::Result<()> {
    if dt <= 0.0 || !dt.is_finite() {
        bail!("帧时长必须为正数: {dt}");
    }

    let desc = SequenceDesc::load(path)
        .with_context(|| format!("无法加载序列描述 {}", path.display()))?;

    let node = SceneNode::shared("probe", Transform::default().with_tint(Color::white()));
    let mut sequence = desc.build(node.clone());

    println!("▶ {}（{} 个过渡）", desc.name, sequence.len());
    println!("{:>6} {:>8} {:>10} {:>10} {:>10} {:>8}", "tick", "time", "x", "y", "rot", "alpha");

    sequence.play(None)?;
    for tick in 1..=max_steps {
        let state = sequence.step(dt)?;
        let transform = node.transform();
        println!(
            "{:>6} {:>8.3} {:>10.3} {:>10.3} {:>10.3} {:>8.3}",
            tick,
            tick as f32 * dt,
            transform.position.x,
            transform.position.y,
            transform.rotation_z,
            transform.tint.map(|c| c.a).unwrap_or(1.0),
        );
        if state == PlaybackState::Finished {
            println!("✅ 播放完成，共 {tick} 帧");
            return Ok(());
        }
    }

    bail!("序列未在 {max_steps} 帧内结束");
}
