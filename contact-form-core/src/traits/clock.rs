//! 时钟抽象 Trait

/// 时钟 Trait
///
/// 提交历史使用毫秒时间戳；注入时钟让测试可以控制时间。
pub trait Clock: Send + Sync {
    /// 当前 Unix 毫秒时间戳
    fn now_millis(&self) -> i64;
}

/// 系统时钟
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
        // 2020-01-01 之后
        assert!(a > 1_577_836_800_000);
    }
}
