//! # Transform 模块
//!
//! 场景对象的变换状态，以及一个可直接使用的 [`SceneNode`]。
//!
//! `SceneNode` 通过 `Rc<RefCell<_>>` 共享变换，宿主可以一边渲染一边让过渡写入。

use std::cell::RefCell;
use std::rc::Rc;

use crate::target::{Animatable, Property};

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建颜色
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 不透明白色
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

/// 变换状态
///
/// `tint` 为 `None` 表示对象没有可着色表面，不能做淡入淡出。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// 本地位置
    pub position: Vec2,
    /// 绕 Z 轴的本地旋转（角度）
    pub rotation_z: f32,
    /// 着色表面的颜色
    pub tint: Option<Color>,
}

impl Transform {
    /// 创建只有位置的变换（无着色表面）
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    /// 附加着色表面
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = Some(tint);
        self
    }

    /// 设置旋转
    pub fn with_rotation(mut self, rotation_z: f32) -> Self {
        self.rotation_z = rotation_z;
        self
    }

    /// 读取属性
    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::PositionX => Some(self.position.x),
            Property::PositionY => Some(self.position.y),
            Property::RotationZ => Some(self.rotation_z),
            Property::Alpha => self.tint.map(|c| c.a),
        }
    }

    /// 写入属性，对象不具备该属性时返回 `false`
    ///
    /// 透明度不做限制，回弹曲线可以短暂写出 `[0, 1]` 之外的值。
    pub fn set(&mut self, property: Property, value: f32) -> bool {
        match property {
            Property::PositionX => self.position.x = value,
            Property::PositionY => self.position.y = value,
            Property::RotationZ => self.rotation_z = value,
            Property::Alpha => match self.tint.as_mut() {
                Some(tint) => tint.a = value,
                None => return false,
            },
        }
        true
    }
}

/// 场景节点
///
/// 克隆出的句柄共享同一份变换。
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    transform: Rc<RefCell<Transform>>,
}

impl SceneNode {
    /// 创建场景节点
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform: Rc::new(RefCell::new(transform)),
        }
    }

    /// 创建共享的场景节点
    pub fn shared(name: impl Into<String>, transform: Transform) -> Rc<Self> {
        Rc::new(Self::new(name, transform))
    }

    /// 当前变换的快照
    pub fn transform(&self) -> Transform {
        *self.transform.borrow()
    }

    /// 直接替换变换（不经过动画）
    pub fn set_transform(&self, transform: Transform) {
        *self.transform.borrow_mut() = transform;
    }

    /// 当前位置
    pub fn position(&self) -> Vec2 {
        self.transform.borrow().position
    }

    /// 当前透明度，无着色表面时为 `None`
    pub fn alpha(&self) -> Option<f32> {
        self.transform.borrow().tint.map(|c| c.a)
    }

    /// 当前旋转
    pub fn rotation_z(&self) -> f32 {
        self.transform.borrow().rotation_z
    }
}

impl Animatable for SceneNode {
    fn get_property(&self, property: Property) -> Option<f32> {
        self.transform.borrow().get(property)
    }

    fn set_property(&self, property: Property, value: f32) -> bool {
        self.transform.borrow_mut().set(property, value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
