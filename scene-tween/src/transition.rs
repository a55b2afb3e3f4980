//! # Transition 模块
//!
//! 单个过渡：在 `duration` 秒内把目标对象的一个属性改变 `amount`。
//!
//! 过渡是一个显式状态机，由宿主每帧调用一次 [`Transition::step`] 推进：
//!
//! ```text
//! begin()  ──► [空转一帧] ──► step(dt) 写入 ──► ... ──► elapsed >= duration ──► Finished
//! ```
//!
//! - `begin` 解析目标、记录起始值，并预留一帧空转，让调用方能观察到动画前的状态
//! - 之后每次 `step` 累加 `dt`，按缓动曲线计算当前值并写入目标
//! - 结束时 `elapsed` 归零、释放借来的目标引用，再同步调用完成回调

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::easing::{CurveKind, interpolate};
use crate::error::{TweenError, TweenResult};
use crate::target::{Property, TargetRef};

static NEXT_TRANSITION_ID: AtomicU64 = AtomicU64::new(1);

/// 过渡 ID
///
/// 创建时从进程内计数器分配，不会重复。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl TransitionId {
    fn next() -> Self {
        Self(NEXT_TRANSITION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 过渡动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// 沿 X 轴移动
    MoveX,
    /// 沿 Y 轴移动
    MoveY,
    /// 改变透明度
    Fade,
    /// 绕 Z 轴旋转
    RotateZ,
    /// 等待，不修改任何属性
    Wait,
}

impl ActionKind {
    /// 动作驱动的属性，`Wait` 没有属性
    pub fn property(&self) -> Option<Property> {
        match self {
            ActionKind::MoveX => Some(Property::PositionX),
            ActionKind::MoveY => Some(Property::PositionY),
            ActionKind::Fade => Some(Property::Alpha),
            ActionKind::RotateZ => Some(Property::RotationZ),
            ActionKind::Wait => None,
        }
    }

    /// 动作名称
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::MoveX => "move_x",
            ActionKind::MoveY => "move_y",
            ActionKind::Fade => "fade",
            ActionKind::RotateZ => "rotate_z",
            ActionKind::Wait => "wait",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单步推进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// 未在运行
    Idle,
    /// 仍在运行，下一帧继续
    Running,
    /// 本帧结束
    Finished,
}

/// 完成回调
pub type FinishCallback = Box<dyn FnOnce()>;

/// 一次运行期间的状态
///
/// 目标引用只在这里持有，运行结束即释放。
struct ActiveRun {
    target: Option<TargetRef>,
    start: f32,
    end: f32,
    /// 还没消耗掉开始时的空转帧
    primed: bool,
    on_finish: Option<FinishCallback>,
}

/// 单个过渡
pub struct Transition {
    id: TransitionId,
    action: ActionKind,
    /// 时长（秒）
    duration: f32,
    /// 变化量（有符号）
    amount: f32,
    /// 目标对象，为空时由序列提供默认目标
    target: Option<TargetRef>,
    curve: CurveKind,
    /// 与前一个过渡同时播放
    with_previous: bool,
    /// 本次运行已经过的时间，空闲时为 0
    elapsed: f32,
    run: Option<ActiveRun>,
}

impl Transition {
    /// 创建过渡
    pub fn new(action: ActionKind, duration: f32, amount: f32) -> Self {
        Self {
            id: TransitionId::next(),
            action,
            duration,
            amount,
            target: None,
            curve: CurveKind::default(),
            with_previous: false,
            elapsed: 0.0,
            run: None,
        }
    }

    /// 沿 X 轴移动 `amount`
    pub fn move_x(amount: f32, duration: f32) -> Self {
        Self::new(ActionKind::MoveX, duration, amount)
    }

    /// 沿 Y 轴移动 `amount`
    pub fn move_y(amount: f32, duration: f32) -> Self {
        Self::new(ActionKind::MoveY, duration, amount)
    }

    /// 透明度改变 `amount`
    pub fn fade(amount: f32, duration: f32) -> Self {
        Self::new(ActionKind::Fade, duration, amount)
    }

    /// 绕 Z 轴旋转 `amount`
    pub fn rotate_z(amount: f32, duration: f32) -> Self {
        Self::new(ActionKind::RotateZ, duration, amount)
    }

    /// 等待 `duration` 秒
    pub fn wait(duration: f32) -> Self {
        Self::new(ActionKind::Wait, duration, 0.0)
    }

    /// 设置缓动曲线
    pub fn with_curve(mut self, curve: CurveKind) -> Self {
        self.curve = curve;
        self
    }

    /// 设置目标对象
    pub fn with_target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }

    /// 设置是否与前一个过渡同时播放
    pub fn with_previous(mut self, with_previous: bool) -> Self {
        self.with_previous = with_previous;
        self
    }

    /// 过渡 ID
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// 动作类型
    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// 时长（秒）
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// 变化量
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// 缓动曲线
    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    /// 更换缓动曲线，下一次写入起生效
    pub fn set_curve(&mut self, curve: CurveKind) {
        self.curve = curve;
    }

    /// 配置的目标对象（不含序列临时提供的默认目标）
    pub fn target(&self) -> Option<&TargetRef> {
        self.target.as_ref()
    }

    /// 更换目标对象，下一次运行起生效
    pub fn set_target(&mut self, target: Option<TargetRef>) {
        self.target = target;
    }

    /// 是否与前一个过渡同时播放
    pub fn plays_with_previous(&self) -> bool {
        self.with_previous
    }

    /// 本次运行已经过的时间
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 是否处于动画中（已开始计时且尚未结束）
    pub fn is_animating(&self) -> bool {
        self.elapsed > 0.0
    }

    /// 是否有一次运行尚未结束（包括开始时的空转帧）
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// 原始进度 `elapsed / duration`，时长不为正时视为 1
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// 开始一次运行
    ///
    /// 目标优先使用自身配置，其次使用 `default_target`。
    /// 已在运行时会重新开始，旧的完成回调被丢弃而不调用。
    ///
    /// # 错误
    /// - `MissingTarget`: 非 Wait 动作没有任何目标
    /// - `MissingCapability`: 目标不具备动作所需的属性
    pub fn begin(
        &mut self,
        default_target: Option<&TargetRef>,
        on_finish: Option<FinishCallback>,
    ) -> TweenResult<()> {
        self.elapsed = 0.0;
        self.run = None;

        let (target, start, end) = match self.action.property() {
            None => (None, 0.0, 0.0),
            Some(property) => {
                let target = self
                    .target
                    .clone()
                    .or_else(|| default_target.cloned())
                    .ok_or(TweenError::MissingTarget {
                        id: self.id,
                        action: self.action,
                    })?;
                let start = target
                    .get_property(property)
                    .ok_or_else(|| self.missing_capability(&target, property))?;
                (Some(target), start, start + self.amount)
            }
        };

        debug!(
            transition = %self.id,
            action = %self.action,
            duration = self.duration,
            start,
            end,
            "过渡开始"
        );

        self.run = Some(ActiveRun {
            target,
            start,
            end,
            primed: true,
            on_finish,
        });
        Ok(())
    }

    /// 开始一次运行，等同于 [`Transition::begin`]
    pub fn animate(
        &mut self,
        default_target: Option<&TargetRef>,
        on_finish: Option<FinishCallback>,
    ) -> TweenResult<()> {
        self.begin(default_target, on_finish)
    }

    /// 推进一帧
    ///
    /// 目标在运行中失去属性时返回 `MissingCapability`，运行状态保持不变。
    pub fn step(&mut self, dt: f32) -> TweenResult<StepState> {
        let Some(run) = self.run.as_mut() else {
            return Ok(StepState::Idle);
        };

        if run.primed {
            run.primed = false;
            return Ok(StepState::Running);
        }

        let (start, end) = (run.start, run.end);

        if self.elapsed < self.duration {
            let elapsed = self.elapsed + dt.max(0.0);
            let value = interpolate(self.curve, start, end, elapsed / self.duration);
            self.write(value)?;
            self.elapsed = elapsed;
            return Ok(StepState::Running);
        }

        // 时长不为正时一次写到终点
        if self.duration <= 0.0 {
            self.write(end)?;
        }

        Ok(self.finish())
    }

    /// 取消当前运行，不调用完成回调
    ///
    /// # 返回
    /// 是否确实取消了一次运行
    pub fn cancel(&mut self) -> bool {
        self.elapsed = 0.0;
        match self.run.take() {
            Some(_) => {
                debug!(transition = %self.id, "过渡被取消");
                true
            }
            None => false,
        }
    }

    fn write(&self, value: f32) -> TweenResult<()> {
        let (Some(property), Some(run)) = (self.action.property(), self.run.as_ref()) else {
            return Ok(());
        };
        let Some(target) = run.target.as_ref() else {
            return Ok(());
        };

        trace!(transition = %self.id, property = %property, value, "写入属性");
        if target.set_property(property, value) {
            Ok(())
        } else {
            Err(self.missing_capability(target, property))
        }
    }

    fn finish(&mut self) -> StepState {
        self.elapsed = 0.0;
        if let Some(run) = self.run.take() {
            debug!(transition = %self.id, "过渡完成");
            drop(run.target);
            if let Some(on_finish) = run.on_finish {
                on_finish();
            }
        }
        StepState::Finished
    }

    fn missing_capability(&self, target: &TargetRef, property: Property) -> TweenError {
        TweenError::MissingCapability {
            id: self.id,
            action: self.action,
            target: target.name().to_string(),
            property,
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("action", &self.action)
            .field("duration", &self.duration)
            .field("amount", &self.amount)
            .field("target", &self.target.as_ref().map(|t| t.name().to_string()))
            .field("curve", &self.curve)
            .field("with_previous", &self.with_previous)
            .field("elapsed", &self.elapsed)
            .field("running", &self.run.is_some())
            .finish()
    }
}
