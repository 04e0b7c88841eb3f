use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static PERF_LOG_ENABLED: AtomicBool = AtomicBool::new(true);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 根据环境变量开关性能日志
///
/// 开关：
/// - 默认开启
/// - `STATUS_DASHBOARD_PERF=0` 关闭
pub fn configure_from_env() {
    let enabled = match std::env::var("STATUS_DASHBOARD_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => true,
    };
    PERF_LOG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// 性能统计 Guard：记录 elapsed_ms + 处理行数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = status_dashboard::perf::PerfGuard::new("single_dimension").rows(table.row_count());
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: usize,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            rows: 0,
            depth,
        }
    }

    /// 记录本次操作处理的行数
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if PERF_LOG_ENABLED.load(Ordering::Relaxed) {
            let elapsed_ms = self.start.elapsed().as_millis() as u64;
            tracing::debug!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                rows = self.rows,
                depth = self.depth,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
