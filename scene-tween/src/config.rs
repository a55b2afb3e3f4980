//! # Config 模块
//!
//! 序列的配置，以及可以从 JSON 加载的声明式序列描述。
//!
//! ```json
//! {
//!   "name": "intro",
//!   "overlap": "honor",
//!   "transitions": [
//!     { "action": "move_x", "duration": 0.5, "amount": 120.0, "curve": "back_out" },
//!     { "action": "fade", "duration": 0.5, "amount": -1.0, "with_previous": true },
//!     { "action": "wait", "duration": 1.0 }
//!   ]
//! }
//! ```
//!
//! 未填写的字段使用默认值；未知的曲线名称按线性处理。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::diagnostic::DiagnosticSink;
use crate::easing::CurveKind;
use crate::error::ConfigError;
use crate::sequence::TransitionSequence;
use crate::target::TargetRef;
use crate::transition::{ActionKind, Transition};

/// `with_previous` 标记的处理方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// 带标记的过渡与前一个过渡同时播放
    #[default]
    Honor,
    /// 忽略标记，严格按顺序播放
    Ignore,
}

/// 序列配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequenceConfig {
    /// 序列名称（用于日志和诊断）
    #[serde(default = "default_sequence_name")]
    pub name: String,

    /// `with_previous` 标记的处理方式
    #[serde(default)]
    pub overlap: OverlapMode,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            name: default_sequence_name(),
            overlap: OverlapMode::default(),
        }
    }
}

impl SequenceConfig {
    /// 创建指定名称的配置
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 设置重叠处理方式
    pub fn with_overlap(mut self, overlap: OverlapMode) -> Self {
        self.overlap = overlap;
        self
    }
}

/// 单个过渡的描述
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitionDesc {
    /// 动作类型
    pub action: ActionKind,

    /// 时长（秒）
    #[serde(default = "default_duration")]
    pub duration: f32,

    /// 变化量
    #[serde(default)]
    pub amount: f32,

    /// 缓动曲线
    #[serde(default)]
    pub curve: CurveKind,

    /// 与前一个过渡同时播放
    #[serde(default)]
    pub with_previous: bool,
}

impl TransitionDesc {
    /// 按描述创建过渡（目标留空，由序列提供）
    pub fn build(&self) -> Transition {
        Transition::new(self.action, self.duration, self.amount)
            .with_curve(self.curve)
            .with_previous(self.with_previous)
    }
}

/// 序列描述
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequenceDesc {
    /// 序列名称
    #[serde(default = "default_sequence_name")]
    pub name: String,

    /// `with_previous` 标记的处理方式
    #[serde(default)]
    pub overlap: OverlapMode,

    /// 过渡列表（按播放顺序）
    #[serde(default)]
    pub transitions: Vec<TransitionDesc>,
}

impl SequenceDesc {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let desc: Self = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 保存到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证描述有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, desc) in self.transitions.iter().enumerate() {
            if !desc.duration.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "第 {} 个过渡的时长不是有限数: {}",
                    index, desc.duration
                )));
            }
            if !desc.amount.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "第 {} 个过渡的变化量不是有限数: {}",
                    index, desc.amount
                )));
            }
        }
        Ok(())
    }

    /// 序列配置部分
    pub fn config(&self) -> SequenceConfig {
        SequenceConfig {
            name: self.name.clone(),
            overlap: self.overlap,
        }
    }

    /// 为 `owner` 创建序列
    pub fn build(&self, owner: TargetRef) -> TransitionSequence {
        let mut sequence = TransitionSequence::with_config(owner, self.config());
        self.fill(&mut sequence);
        sequence
    }

    /// 为 `owner` 创建序列，并指定诊断接收端
    pub fn build_with_sink(
        &self,
        owner: TargetRef,
        sink: impl DiagnosticSink + 'static,
    ) -> TransitionSequence {
        let mut sequence = TransitionSequence::with_config(owner, self.config()).with_sink(sink);
        self.fill(&mut sequence);
        sequence
    }

    fn fill(&self, sequence: &mut TransitionSequence) {
        for desc in &self.transitions {
            // 新建的过渡不在动画中，不会被拒绝
            let added = sequence.add(desc.build());
            debug_assert!(added.is_ok(), "新建的过渡被序列拒绝");
            if let Err(rejected) = added {
                warn!(
                    sequence = %self.name,
                    transition = %rejected.transition.id(),
                    "序列描述中的过渡未能加入序列"
                );
            }
        }
    }
}

// 默认值函数
fn default_sequence_name() -> String {
    "sequence".to_string()
}

fn default_duration() -> f32 {
    1.0
}
