//! # Sequence 模块
//!
//! 过渡序列：按插入顺序依次播放一组过渡。
//!
//! ## 状态机
//!
//! ```text
//! Idle ──play()──► Playing ──step(dt)...──► Idle (current_index == len)
//! ```
//!
//! 序列本身不持有时钟，宿主每帧调用一次 [`TransitionSequence::step`]。
//! 每一帧序列推进当前组；当前组全部结束后立即开始下一组，
//! 新开始的组在本帧只做准备（过渡的空转帧），从下一帧开始写入。
//!
//! ## 分组
//!
//! 在 [`OverlapMode::Honor`] 下，标记了 `with_previous` 的过渡与前一个过渡归为一组同时播放，
//! 组内全部结束后才前进到下一组。[`OverlapMode::Ignore`] 下每个过渡单独成组。
//!
//! ## 目标绑定
//!
//! 没有配置目标的过渡在运行期间使用序列的 `owner` 作为目标，
//! 这个绑定只存在于该次运行中，结束后自动释放。

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::config::{OverlapMode, SequenceConfig};
use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{AddRejected, TweenError, TweenResult};
use crate::target::TargetRef;
use crate::transition::{FinishCallback, StepState, Transition, TransitionId};


/// 序列单步推进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// 未在播放
    Idle,
    /// 仍在播放
    Playing,
    /// 本帧播放结束
    Finished,
}

/// 过渡序列
pub struct TransitionSequence {
    /// 默认目标
    owner: TargetRef,
    /// 过渡列表（插入顺序即播放顺序）
    items: Vec<Transition>,
    /// 当前组的起始位置，从未播放过时为 `None`
    current_index: Option<usize>,
    /// 当前组的结束位置（不含），没有活跃组时为 `None`
    group_end: Option<usize>,
    playing: bool,
    on_finish: Option<FinishCallback>,
    config: SequenceConfig,
    sink: Rc<dyn DiagnosticSink>,
}

impl TransitionSequence {
    /// 创建序列，诊断输出到 `tracing`
    pub fn new(owner: TargetRef) -> Self {
        Self::with_config(owner, SequenceConfig::default())
    }

    /// 使用指定配置创建序列
    pub fn with_config(owner: TargetRef, config: SequenceConfig) -> Self {
        Self {
            owner,
            items: Vec::new(),
            current_index: None,
            group_end: None,
            playing: false,
            on_finish: None,
            config,
            sink: Rc::new(TracingSink),
        }
    }

    /// 设置诊断接收端
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Rc::new(sink);
        self
    }

    // ========== 播放控制 ==========

    /// 开始播放
    ///
    /// 实际的推进发生在之后的 [`step`](Self::step) 中。
    /// 已在播放时拒绝，报告错误诊断，`on_finish` 不会被调用。
    pub fn play(&mut self, on_finish: Option<FinishCallback>) -> TweenResult<()> {
        if self.playing {
            return Err(self.reject(TweenError::AlreadyPlaying));
        }

        debug!(sequence = %self.config.name, items = self.items.len(), "序列开始播放");
        self.playing = true;
        self.current_index = Some(0);
        self.group_end = None;
        self.on_finish = on_finish;
        Ok(())
    }

    /// 推进一帧
    ///
    /// 过渡推进中的错误（如目标缺少属性）原样向上传递。
    pub fn step(&mut self, dt: f32) -> TweenResult<PlaybackState> {
        if !self.playing {
            return Ok(PlaybackState::Idle);
        }

        loop {
            let start = self.current_index.unwrap_or(0);

            if let Some(end) = self.group_end {
                let mut running = false;
                for item in &mut self.items[start..end] {
                    if item.step(dt)? == StepState::Running {
                        running = true;
                    }
                }
                if running {
                    return Ok(PlaybackState::Playing);
                }

                // 当前组全部结束，本帧继续开始下一组
                self.current_index = Some(end);
                self.group_end = None;
                continue;
            }

            if start < self.items.len() {
                let end = self.group_end_from(start);
                debug!(
                    sequence = %self.config.name,
                    index = start,
                    size = end - start,
                    "开始播放过渡组"
                );

                self.group_end = Some(end);
                let owner = &self.owner;
                for item in &mut self.items[start..end] {
                    item.begin(Some(owner), None)?;
                    // 开始的这一帧即是过渡的空转帧
                    item.step(dt)?;
                }
                return Ok(PlaybackState::Playing);
            }

            return Ok(self.finish());
        }
    }

    /// 停止播放
    ///
    /// 取消正在运行的过渡，`on_finish` 被丢弃而不调用。
    ///
    /// # 返回
    /// 调用前是否正在播放
    pub fn stop(&mut self) -> bool {
        if !self.playing {
            return false;
        }

        for item in &mut self.items {
            item.cancel();
        }
        debug!(sequence = %self.config.name, index = ?self.current_index, "序列被停止");
        self.playing = false;
        self.group_end = None;
        self.on_finish = None;
        true
    }

    // ========== 列表管理 ==========

    /// 追加过渡
    ///
    /// 过渡正在动画中时拒绝，报告错误诊断，并把过渡交还调用方。
    pub fn add(&mut self, transition: Transition) -> Result<TransitionId, AddRejected> {
        if transition.is_animating() {
            self.reject(TweenError::StillAnimating {
                id: transition.id(),
            });
            return Err(AddRejected { transition });
        }

        let id = transition.id();
        self.items.push(transition);
        Ok(id)
    }

    /// 移除过渡
    ///
    /// 播放中移除位于当前位置或之前的过渡是允许的，但会报告警告：
    /// 列表在迭代过程中被修改，之后的播放顺序由调用方负责。
    pub fn remove(&mut self, id: TransitionId) -> TweenResult<Transition> {
        let Some(index) = self.position(id) else {
            return Err(self.reject(TweenError::NotFound { id }));
        };

        if self.playing {
            let current = self.current_index.unwrap_or(0);
            if index <= current {
                self.sink.report(Diagnostic::warn(
                    &self.config.name,
                    format!(
                        "播放中移除了位于当前位置（{}）或之前的过渡 {}，后续播放顺序可能不符合预期",
                        current, id
                    ),
                ));
            }
            self.shift_cursor_for_removal(index, current);
        }

        let mut removed = self.items.remove(index);
        removed.cancel();
        Ok(removed)
    }

    /// 清空列表
    ///
    /// 播放中清空时，当前组被丢弃，序列在下一帧结束。
    pub fn clear(&mut self) {
        debug!(sequence = %self.config.name, playing = self.playing, "清空序列");
        self.items.clear();
        if self.playing {
            self.current_index = Some(0);
            self.group_end = None;
        }
    }

    // ========== 查询方法 ==========

    /// 是否正在播放
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// 当前组的起始位置
    ///
    /// 播放结束后等于列表长度；从未播放过时为 `None`。
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// 过渡数量
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 是否没有任何过渡
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 默认目标
    pub fn owner(&self) -> &TargetRef {
        &self.owner
    }

    /// 序列配置
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// 过渡在列表中的位置
    pub fn position(&self, id: TransitionId) -> Option<usize> {
        self.items.iter().position(|t| t.id() == id)
    }

    /// 按 ID 查找过渡
    pub fn get(&self, id: TransitionId) -> Option<&Transition> {
        self.items.iter().find(|t| t.id() == id)
    }

    /// 按 ID 查找过渡（可变），用于在播放前调整曲线或目标
    pub fn get_mut(&mut self, id: TransitionId) -> Option<&mut Transition> {
        self.items.iter_mut().find(|t| t.id() == id)
    }

    /// 按播放顺序遍历过渡
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.items.iter()
    }

    // ========== 内部方法 ==========

    /// 从 `start` 开始的一组的结束位置（不含）
    fn group_end_from(&self, start: usize) -> usize {
        let mut end = start + 1;
        if self.config.overlap == OverlapMode::Honor {
            while end < self.items.len() && self.items[end].plays_with_previous() {
                end += 1;
            }
        }
        end
    }

    /// 移除 `index` 处的过渡前调整播放位置，保证之后不会越界
    fn shift_cursor_for_removal(&mut self, index: usize, current: usize) {
        match self.group_end {
            Some(end) if index < current => {
                self.current_index = Some(current - 1);
                self.group_end = Some(end - 1);
            }
            Some(end) if index < end => {
                self.group_end = Some(end - 1);
            }
            Some(_) => {}
            None if index < current => {
                self.current_index = Some(current - 1);
            }
            None => {}
        }
    }

    fn finish(&mut self) -> PlaybackState {
        self.playing = false;
        self.group_end = None;
        self.current_index = Some(self.items.len());
        debug!(sequence = %self.config.name, "序列播放完成");

        if let Some(on_finish) = self.on_finish.take() {
            on_finish();
        }
        PlaybackState::Finished
    }

    /// 报告被拒绝的操作，返回对应错误
    fn reject(&self, error: TweenError) -> TweenError {
        self.sink
            .report(Diagnostic::error(&self.config.name, error.to_string()));
        error
    }
}

impl fmt::Debug for TransitionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionSequence")
            .field("name", &self.config.name)
            .field("owner", &self.owner.name())
            .field("items", &self.items)
            .field("current_index", &self.current_index)
            .field("playing", &self.playing)
            .finish()
    }
}
