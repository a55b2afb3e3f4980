//! # Easing 模块
//!
//! 缓动曲线库，把归一化进度 `t` 映射为缩放后的进度值。
//!
//! 所有曲线都是无状态的闭式函数：
//! - [`evaluate`]：先把 `t` 限制到 `[0, 1]` 再求值
//! - [`evaluate_unclamped`]：直接使用 `t`，超出范围时为外推结果
//!
//! 注意：Elastic / Back 系列曲线本身就会越过 `[0, 1]`，
//! 即使输入被限制，输出也不保证在该范围内。

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// Back 系列的回弹常量
const BACK_OVERSHOOT: f32 = 1.7;

/// Elastic 缓入/缓出的振荡周期
const ELASTIC_PERIOD: f32 = (2.0 * PI) / 3.0;

/// Elastic 缓入缓出的振荡周期
const ELASTIC_IN_OUT_PERIOD: f32 = (2.0 * PI) / 4.5;

/// 缓动曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveKind {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 正弦缓入
    SinIn,
    /// 正弦缓出
    SinOut,
    /// 正弦缓入缓出
    SinInOut,
    /// 正弦缓入（作用于 t²，起步更猛）
    SinSquaredIn,
    /// 正弦缓出（作用于 t²）
    SinSquaredOut,
    /// 正弦缓入缓出（作用于 t²）
    SinSquaredInOut,
    /// 二次缓入
    SquaredIn,
    /// 二次缓出
    SquaredOut,
    /// 二次缓入缓出
    SquaredInOut,
    /// 三次缓入
    CubedIn,
    /// 三次缓出
    CubedOut,
    /// 三次缓入缓出
    CubedInOut,
    /// 四次缓入
    QuadIn,
    /// 四次缓出
    QuadOut,
    /// 四次缓入缓出
    QuadInOut,
    /// 弹性缓入
    ElasticIn,
    /// 弹性缓出
    ElasticOut,
    /// 弹性缓入缓出
    ElasticInOut,
    /// 回弹缓入
    BackIn,
    /// 回弹缓出
    BackOut,
    /// 回弹缓入缓出
    BackInOut,
}

impl CurveKind {
    /// 所有曲线类型
    pub const ALL: [CurveKind; 22] = [
        CurveKind::Linear,
        CurveKind::SinIn,
        CurveKind::SinOut,
        CurveKind::SinInOut,
        CurveKind::SinSquaredIn,
        CurveKind::SinSquaredOut,
        CurveKind::SinSquaredInOut,
        CurveKind::SquaredIn,
        CurveKind::SquaredOut,
        CurveKind::SquaredInOut,
        CurveKind::CubedIn,
        CurveKind::CubedOut,
        CurveKind::CubedInOut,
        CurveKind::QuadIn,
        CurveKind::QuadOut,
        CurveKind::QuadInOut,
        CurveKind::ElasticIn,
        CurveKind::ElasticOut,
        CurveKind::ElasticInOut,
        CurveKind::BackIn,
        CurveKind::BackOut,
        CurveKind::BackInOut,
    ];

    /// 计算缓动值（输入先被限制到 `[0, 1]`）
    pub fn apply(&self, t: f32) -> f32 {
        evaluate(*self, t)
    }

    /// 曲线名称（snake_case，与配置文件中的写法一致）
    pub fn name(&self) -> &'static str {
        match self {
            CurveKind::Linear => "linear",
            CurveKind::SinIn => "sin_in",
            CurveKind::SinOut => "sin_out",
            CurveKind::SinInOut => "sin_in_out",
            CurveKind::SinSquaredIn => "sin_squared_in",
            CurveKind::SinSquaredOut => "sin_squared_out",
            CurveKind::SinSquaredInOut => "sin_squared_in_out",
            CurveKind::SquaredIn => "squared_in",
            CurveKind::SquaredOut => "squared_out",
            CurveKind::SquaredInOut => "squared_in_out",
            CurveKind::CubedIn => "cubed_in",
            CurveKind::CubedOut => "cubed_out",
            CurveKind::CubedInOut => "cubed_in_out",
            CurveKind::QuadIn => "quad_in",
            CurveKind::QuadOut => "quad_out",
            CurveKind::QuadInOut => "quad_in_out",
            CurveKind::ElasticIn => "elastic_in",
            CurveKind::ElasticOut => "elastic_out",
            CurveKind::ElasticInOut => "elastic_in_out",
            CurveKind::BackIn => "back_in",
            CurveKind::BackOut => "back_out",
            CurveKind::BackInOut => "back_in_out",
        }
    }

    /// 按名称查找曲线
    ///
    /// 名称不区分大小写，`-` 与 `_` 等价。
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
    }

    /// 按名称解析曲线，未知名称退化为 [`CurveKind::Linear`]
    ///
    /// 线性即恒等映射，所以未知曲线的效果是“原样返回 t”。
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            warn!(curve = %name, "未知的缓动曲线，按线性处理");
            CurveKind::Linear
        })
    }

    /// 是否会越过 `[0, 1]`
    pub fn overshoots(&self) -> bool {
        matches!(
            self,
            CurveKind::ElasticIn
                | CurveKind::ElasticOut
                | CurveKind::ElasticInOut
                | CurveKind::BackIn
                | CurveKind::BackOut
                | CurveKind::BackInOut
        )
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CurveKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CurveKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(CurveKind::from_name(&name))
    }
}

/// 计算缓动值，`t` 先被限制到 `[0, 1]`
pub fn evaluate(kind: CurveKind, t: f32) -> f32 {
    evaluate_unclamped(kind, t.clamp(0.0, 1.0))
}

/// 计算缓动值，`t` 原样使用
///
/// 超出 `[0, 1]` 时的结果是公式的外推，调用方自行负责。
pub fn evaluate_unclamped(kind: CurveKind, t: f32) -> f32 {
    match kind {
        CurveKind::Linear => t,
        CurveKind::SinIn => sin_in(t),
        CurveKind::SinOut => sin_out(t),
        CurveKind::SinInOut => sin_in_out(t),
        CurveKind::SinSquaredIn => sin_in(t * t),
        CurveKind::SinSquaredOut => sin_out(t * t),
        CurveKind::SinSquaredInOut => sin_in_out(t * t),
        CurveKind::SquaredIn => power_in(t, 2),
        CurveKind::SquaredOut => power_out(t, 2),
        CurveKind::SquaredInOut => power_in_out(t, 2),
        CurveKind::CubedIn => power_in(t, 3),
        CurveKind::CubedOut => power_out(t, 3),
        CurveKind::CubedInOut => power_in_out(t, 3),
        CurveKind::QuadIn => power_in(t, 4),
        CurveKind::QuadOut => power_out(t, 4),
        CurveKind::QuadInOut => power_in_out(t, 4),
        CurveKind::ElasticIn => elastic_in(t),
        CurveKind::ElasticOut => elastic_out(t),
        CurveKind::ElasticInOut => elastic_in_out(t),
        CurveKind::BackIn => back_in(t),
        CurveKind::BackOut => back_out(t),
        CurveKind::BackInOut => back_in_out(t),
    }
}

/// 在 `start` 与 `end` 之间插值，混合因子来自 [`evaluate`]
///
/// 结果不会被限制到 `[start, end]`，回弹类曲线会越界。
pub fn interpolate(kind: CurveKind, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * evaluate(kind, t)
}

/// 在 `start` 与 `end` 之间插值，混合因子来自 [`evaluate_unclamped`]
pub fn interpolate_unclamped(kind: CurveKind, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * evaluate_unclamped(kind, t)
}

fn sin_in(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

fn sin_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

fn sin_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

fn power_in(t: f32, n: i32) -> f32 {
    t.powi(n)
}

/// 翻转、取幂、再翻转
fn power_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

/// 在 0.5 处分段，两半各自缩放后拼接
fn power_in_out(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2.0_f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn elastic_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_PERIOD).sin()
    }
}

fn elastic_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_PERIOD).sin() + 1.0
    }
}

fn elastic_in_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_IN_OUT_PERIOD).sin())
            / 2.0
    } else {
        (2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_IN_OUT_PERIOD).sin())
            / 2.0
            + 1.0
    }
}

fn back_in(t: f32) -> f32 {
    let c3 = BACK_OVERSHOOT + 1.0;
    c3 * t * t * t - BACK_OVERSHOOT * t * t
}

fn back_out(t: f32) -> f32 {
    let c3 = BACK_OVERSHOOT + 1.0;
    let u = t - 1.0;
    1.0 + c3 * u.powi(3) + BACK_OVERSHOOT * u.powi(2)
}

fn back_in_out(t: f32) -> f32 {
    let c2 = BACK_OVERSHOOT * 1.525;
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_endpoints_anchored() {
        for kind in CurveKind::ALL {
            assert!(
                evaluate(kind, 0.0).abs() < EPS,
                "{kind} 在 t=0 处应为 0，实际 {}",
                evaluate(kind, 0.0)
            );
            assert!(
                (evaluate(kind, 1.0) - 1.0).abs() < EPS,
                "{kind} 在 t=1 处应为 1，实际 {}",
                evaluate(kind, 1.0)
            );
        }
    }

    #[test]
    fn test_clamped_matches_endpoints() {
        for kind in CurveKind::ALL {
            assert_eq!(evaluate(kind, -0.5), evaluate(kind, 0.0));
            assert_eq!(evaluate(kind, -100.0), evaluate(kind, 0.0));
            assert_eq!(evaluate(kind, 1.5), evaluate(kind, 1.0));
            assert_eq!(evaluate(kind, 42.0), evaluate(kind, 1.0));
        }
    }

    #[test]
    fn test_in_out_continuous_at_midpoint() {
        let kinds = [
            CurveKind::SquaredInOut,
            CurveKind::CubedInOut,
            CurveKind::QuadInOut,
            CurveKind::SinInOut,
            CurveKind::SinSquaredInOut,
            CurveKind::ElasticInOut,
            CurveKind::BackInOut,
        ];
        for kind in kinds {
            let left = evaluate(kind, 0.5 - 1e-4);
            let mid = evaluate(kind, 0.5);
            let right = evaluate(kind, 0.5 + 1e-4);
            assert!((left - mid).abs() < 1e-2, "{kind} 左极限不连续");
            assert!((right - mid).abs() < 1e-2, "{kind} 右极限不连续");
        }
    }

    #[test]
    fn test_power_in_out_midpoint_is_half() {
        for kind in [
            CurveKind::SquaredInOut,
            CurveKind::CubedInOut,
            CurveKind::QuadInOut,
        ] {
            assert!((evaluate(kind, 0.5) - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn test_power_curves() {
        assert!((evaluate(CurveKind::SquaredIn, 0.5) - 0.25).abs() < EPS);
        assert!((evaluate(CurveKind::CubedIn, 0.5) - 0.125).abs() < EPS);
        assert!((evaluate(CurveKind::QuadIn, 0.5) - 0.0625).abs() < EPS);
        assert!((evaluate(CurveKind::SquaredOut, 0.5) - 0.75).abs() < EPS);
        assert!((evaluate(CurveKind::CubedOut, 0.5) - 0.875).abs() < EPS);
        assert!((evaluate(CurveKind::QuadOut, 0.5) - 0.9375).abs() < EPS);
    }

    #[test]
    fn test_sin_squared_has_slower_onset() {
        // t² < t，所以起步阶段 SinSquaredIn 比 SinIn 更小
        let t = 0.3;
        assert!(evaluate(CurveKind::SinSquaredIn, t) < evaluate(CurveKind::SinIn, t));
        assert!((evaluate(CurveKind::SinInOut, 0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_overshoot_curves_leave_unit_range() {
        // Back 缓入先向负方向拉
        assert!(evaluate(CurveKind::BackIn, 0.2) < 0.0);
        // Back 缓出在到达终点前越过 1
        assert!(evaluate(CurveKind::BackOut, 0.8) > 1.0);
        // Elastic 缓出在前段越过 1
        let peak = (1..100)
            .map(|i| evaluate(CurveKind::ElasticOut, i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);

        assert!(CurveKind::ElasticOut.overshoots());
        assert!(!CurveKind::QuadInOut.overshoots());
    }

    #[test]
    fn test_interpolate_linear_midpoint() {
        assert!((interpolate(CurveKind::Linear, 2.0, 6.0, 0.5) - 4.0).abs() < EPS);
        assert!((interpolate(CurveKind::Linear, -3.0, 3.0, 0.5)).abs() < EPS);
    }

    #[test]
    fn test_interpolate_not_clamped_to_range() {
        let value = interpolate(CurveKind::BackOut, 0.0, 10.0, 0.8);
        assert!(value > 10.0);
    }

    #[test]
    fn test_unclamped_extrapolates() {
        assert_eq!(evaluate_unclamped(CurveKind::Linear, 1.5), 1.5);
        assert_eq!(evaluate_unclamped(CurveKind::Linear, -0.5), -0.5);
        assert!((evaluate_unclamped(CurveKind::SquaredIn, 2.0) - 4.0).abs() < EPS);
        assert!((interpolate_unclamped(CurveKind::Linear, 0.0, 10.0, 1.5) - 15.0).abs() < EPS);
    }

    #[test]
    fn test_evaluate_is_pure() {
        for kind in CurveKind::ALL {
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                assert_eq!(evaluate(kind, t).to_bits(), evaluate(kind, t).to_bits());
            }
        }
    }

    #[test]
    fn test_apply_matches_evaluate() {
        assert_eq!(
            CurveKind::CubedInOut.apply(0.3),
            evaluate(CurveKind::CubedInOut, 0.3)
        );
    }

    #[test]
    fn test_name_lookup() {
        for kind in CurveKind::ALL {
            assert_eq!(CurveKind::lookup(kind.name()), Some(kind));
        }
        assert_eq!(CurveKind::lookup("Elastic-Out"), Some(CurveKind::ElasticOut));
        assert_eq!(CurveKind::lookup("bounce"), None);
    }

    #[test]
    fn test_unknown_name_falls_back_to_identity() {
        let kind = CurveKind::from_name("bounce_out");
        assert_eq!(kind, CurveKind::Linear);
        assert_eq!(kind.apply(0.37), 0.37);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&CurveKind::SinSquaredInOut).unwrap();
        assert_eq!(json, "\"sin_squared_in_out\"");

        let kind: CurveKind = serde_json::from_str("\"back_in\"").unwrap();
        assert_eq!(kind, CurveKind::BackIn);

        let unknown: CurveKind = serde_json::from_str("\"wobble\"").unwrap();
        assert_eq!(unknown, CurveKind::Linear);
    }
}
