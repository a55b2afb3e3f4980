//! # Error 模块
//!
//! 定义 scene-tween 中使用的错误类型。

use thiserror::Error;

use crate::target::Property;
use crate::transition::{ActionKind, Transition, TransitionId};

/// 过渡与序列的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// 序列已在播放，重复调用 play 被拒绝
    #[error("序列正在播放，拒绝重复播放")]
    AlreadyPlaying,

    /// 过渡正在动画中，不能加入序列
    #[error("过渡 {id} 正在动画中，不能加入序列")]
    StillAnimating { id: TransitionId },

    /// 序列中不存在该过渡
    #[error("序列中不存在过渡 {id}")]
    NotFound { id: TransitionId },

    /// 非 Wait 过渡没有可用目标
    #[error("过渡 {id}（{action}）没有目标对象")]
    MissingTarget { id: TransitionId, action: ActionKind },

    /// 目标对象不具备动作所需的属性
    #[error("过渡 {id}（{action}）的目标 '{target}' 不具备属性 {property}")]
    MissingCapability {
        id: TransitionId,
        action: ActionKind,
        target: String,
        property: Property,
    },
}

/// 加入序列被拒绝，过渡原样交还调用方
#[derive(Error, Debug)]
#[error("过渡 {} 正在动画中，不能加入序列", .transition.id())]
pub struct AddRejected {
    pub transition: Transition,
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读写失败
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析失败
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 配置内容无效
    #[error("配置无效: {0}")]
    Invalid(String),
}

/// Result 类型别名
pub type TweenResult<T> = Result<T, TweenError>;
