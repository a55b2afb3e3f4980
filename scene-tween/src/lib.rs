//! # Scene Tween
//!
//! 场景对象的缓动与过渡序列库。
//!
//! ## 架构概述
//!
//! `scene-tween` 不持有时钟，也不管理对象生命周期。
//! 宿主每帧把 `dt` 交给序列，序列把属性值写回场景对象：
//!
//! ```text
//! Host                          TransitionSequence
//!   │                              │
//!   │──── play(on_finish) ───────►│
//!   │──── step(dt) ──────────────►│ Transition::step(dt)
//!   │                              │   └─ easing::interpolate → Animatable::set_property
//!   │◄─── PlaybackState ──────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`CurveKind`]：缓动曲线，配合 [`evaluate`] / [`interpolate`] 使用
//! - [`Transition`]：单个过渡（移动、淡入淡出、旋转、等待）
//! - [`TransitionSequence`]：按顺序（或分组同时）播放过渡
//! - [`Animatable`]：场景对象需要实现的属性读写接口
//! - [`DiagnosticSink`]：序列控制误用的报告通道
//!
//! ## 使用示例
//!
//! ```ignore
//! use scene_tween::{CurveKind, SceneNode, Transform, Transition, TransitionSequence};
//!
//! let hero = SceneNode::shared("hero", Transform::at(0.0, 0.0));
//! let mut sequence = TransitionSequence::new(hero.clone());
//! sequence.add(Transition::move_x(120.0, 0.5).with_curve(CurveKind::BackOut))?;
//! sequence.add(Transition::rotate_z(90.0, 0.5).with_previous(true))?;
//!
//! sequence.play(Some(Box::new(|| println!("done"))))?;
//! loop {
//!     if sequence.step(frame_dt)? == PlaybackState::Finished {
//!         break;
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`easing`]：缓动曲线
//! - [`target`]：可动画对象接口
//! - [`transform`]：变换状态与场景节点
//! - [`transition`]：单个过渡
//! - [`sequence`]：过渡序列
//! - [`diagnostic`]：诊断接收端
//! - [`config`]：序列配置与声明式描述
//! - [`error`]：错误类型定义

pub mod config;
pub mod diagnostic;
pub mod easing;
pub mod error;
pub mod sequence;
pub mod target;
pub mod transform;
pub mod transition;

// 重导出核心类型
pub use config::{OverlapMode, SequenceConfig, SequenceDesc, TransitionDesc};
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticSink, MemorySink, TracingSink};
pub use easing::{CurveKind, evaluate, evaluate_unclamped, interpolate, interpolate_unclamped};
pub use error::{AddRejected, ConfigError, TweenError, TweenResult};
pub use sequence::{PlaybackState, TransitionSequence};
pub use target::{Animatable, Property, TargetRef};
pub use transform::{Color, SceneNode, Transform, Vec2};
pub use transition::{ActionKind, FinishCallback, StepState, Transition, TransitionId};
