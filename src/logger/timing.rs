//! Scope timing.

use std::time::Instant;

use crate::caller::CallerInfo;
use crate::logger::Logger;

/// Reports elapsed time through [`Logger::track_func_time`] when dropped.
///
/// ```ignore
/// fn reconcile(log: &impl Logger) {
///     let _timer = log.time_func();
///     // ...
/// }
/// ```
#[must_use = "the timer reports when dropped; bind it to a variable"]
pub struct FuncTimer<L: Logger> {
    logger: L,
    start: Instant,
    caller: CallerInfo,
}

impl<L: Logger> FuncTimer<L> {
    #[track_caller]
    pub fn start(logger: L) -> Self {
        Self {
            logger,
            start: Instant::now(),
            caller: CallerInfo::capture(),
        }
    }
}

impl<L: Logger> Drop for FuncTimer<L> {
    fn drop(&mut self) {
        self.logger
            .with_caller(self.caller)
            .track_func_time(self.start);
    }
}
