//! # 诊断模块
//!
//! 序列控制误用（重复播放、重复加入、移除不存在的过渡等）不会中断调用方，
//! 而是通过调用方提供的 [`DiagnosticSink`] 报告。
//!
//! - [`TracingSink`]：默认实现，转发到 `tracing`
//! - [`MemorySink`]：收集到内存，便于测试和工具读取

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{error, info, warn};

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（操作已执行，但结果可能不符合预期）
    Warn,
    /// 错误（操作被拒绝）
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 来源（序列或过渡的名称）
    pub source: String,
    /// 诊断消息
    pub message: String,
}

impl Diagnostic {
    /// 创建错误诊断
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            source: source.into(),
            message: message.into(),
        }
    }

    /// 创建警告诊断
    pub fn warn(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            source: source.into(),
            message: message.into(),
        }
    }

    /// 创建信息诊断
    pub fn info(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            source: source.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.source, self.message)
    }
}

/// 诊断接收端
pub trait DiagnosticSink {
    /// 报告一条诊断
    fn report(&self, diagnostic: Diagnostic);
}

/// 转发到 `tracing` 的诊断接收端
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Error => {
                error!(source = %diagnostic.source, "{}", diagnostic.message)
            }
            DiagnosticLevel::Warn => {
                warn!(source = %diagnostic.source, "{}", diagnostic.message)
            }
            DiagnosticLevel::Info => {
                info!(source = %diagnostic.source, "{}", diagnostic.message)
            }
        }
    }
}

/// 收集到内存的诊断接收端
///
/// 克隆出的句柄共享同一份记录。
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl MemorySink {
    /// 创建空的接收端
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集的诊断
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    /// 指定级别的诊断数量
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .count()
    }

    /// 取出并清空已收集的诊断
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    /// 是否没有任何诊断
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

/// 任意闭包都可以作为接收端
impl<F> DiagnosticSink for F
where
    F: Fn(Diagnostic),
{
    fn report(&self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.report(Diagnostic::error("seq", "拒绝"));
        sink.report(Diagnostic::warn("seq", "注意"));

        assert_eq!(handle.count(DiagnosticLevel::Error), 1);
        assert_eq!(handle.count(DiagnosticLevel::Warn), 1);
        assert_eq!(handle.drain().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let sink = move |d: Diagnostic| seen_clone.borrow_mut().push(d.level);

        sink.report(Diagnostic::info("seq", "hello"));
        assert_eq!(*seen.borrow(), vec![DiagnosticLevel::Info]);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::warn("intro", "移除了正在播放的过渡");
        insta::assert_snapshot!(d.to_string(), @"[WARN] intro: 移除了正在播放的过渡");
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingSink.report(Diagnostic::error("seq", "boom"));
    }
}
