//! # Target 模块
//!
//! 动画目标的能力接口。
//!
//! ## 核心概念
//!
//! - `Property`: 可动画的单个标量属性（位置 X/Y、透明度、Z 轴旋转）
//! - `Animatable`: 场景对象对外暴露的 getter/setter
//!
//! 对象不一定具备所有属性，例如没有可着色表面的对象就没有 `Alpha`。
//! 缺失的能力通过 `None` / `false` 报告，由调用方决定如何处理。

use std::fmt;
use std::rc::Rc;

/// 可动画属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// 本地位置 X 分量
    PositionX,
    /// 本地位置 Y 分量
    PositionY,
    /// 着色表面的透明度
    Alpha,
    /// 绕 Z 轴的本地旋转
    RotationZ,
}

impl Property {
    /// 属性名称（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            Property::PositionX => "position.x",
            Property::PositionY => "position.y",
            Property::Alpha => "alpha",
            Property::RotationZ => "rotation.z",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 可动画对象接口
///
/// 使用 `&self` 读写，实现方通过 `RefCell` 等方式提供内部可变性，
/// 这样同一个对象可以被多个过渡同时引用。
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Marker {
///     x: Cell<f32>,
/// }
///
/// impl Animatable for Marker {
///     fn get_property(&self, property: Property) -> Option<f32> {
///         match property {
///             Property::PositionX => Some(self.x.get()),
///             _ => None,
///         }
///     }
///
///     fn set_property(&self, property: Property, value: f32) -> bool {
///         match property {
///             Property::PositionX => {
///                 self.x.set(value);
///                 true
///             }
///             _ => false,
///         }
///     }
/// }
/// ```
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 对象具备该属性
    /// - `None`: 对象不具备该属性
    fn get_property(&self, property: Property) -> Option<f32>;

    /// 设置属性的新值
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 对象不具备该属性
    fn set_property(&self, property: Property, value: f32) -> bool;

    /// 对象名称（用于日志和诊断）
    fn name(&self) -> &str {
        "<anonymous>"
    }

    /// 对象是否具备某个属性
    fn supports(&self, property: Property) -> bool {
        self.get_property(property).is_some()
    }
}

/// 共享的动画目标引用
pub type TargetRef = Rc<dyn Animatable>;
