//! Stage instrumentation for the matching pipeline.
//!
//! `stage!` opens a span for one pipeline stage and returns a [`StageGuard`];
//! dropping the guard reports the stage's wall time, including on early `?`
//! returns. `stage_event!` attaches measurements (sizes, coordinates) to the
//! current stage. Everything is emitted under the `slidematch::stage` target.
//!
//! Without the `tracing` feature both macros compile to nothing; event field
//! expressions are still evaluated once so call sites stay warning-free.

#[cfg(feature = "tracing")]
macro_rules! stage {
    ($stage:literal $(, $($field:tt)*)?) => {
        $crate::trace::StageGuard::enter(
            $stage,
            tracing::info_span!(target: "slidematch::stage", $stage $(, $($field)*)?),
        )
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stage {
    ($stage:literal $(, $($field:tt)*)?) => {
        $crate::trace::StageGuard::enter($stage)
    };
}

#[cfg(feature = "tracing")]
macro_rules! stage_event {
    ($stage:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(target: "slidematch::stage", stage = $stage, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stage_event {
    ($stage:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($stage, $($value,)+);
    };
}

pub(crate) use stage;
pub(crate) use stage_event;

/// Keeps a stage span entered and times it.
#[cfg(feature = "tracing")]
#[must_use = "the stage ends when the guard is dropped"]
pub(crate) struct StageGuard {
    stage: &'static str,
    started: std::time::Instant,
    // Dropped after `Drop::drop`, so the timing event lands inside the span.
    _entered: tracing::span::EnteredSpan,
}

#[cfg(feature = "tracing")]
impl StageGuard {
    pub(crate) fn enter(stage: &'static str, span: tracing::Span) -> Self {
        Self {
            stage,
            started: std::time::Instant::now(),
            _entered: span.entered(),
        }
    }
}

#[cfg(feature = "tracing")]
impl Drop for StageGuard {
    fn drop(&mut self) {
        tracing::debug!(
            target: "slidematch::stage",
            stage = self.stage,
            elapsed_us = elapsed_micros(self.started.elapsed()),
            "stage finished"
        );
    }
}

#[cfg(feature = "tracing")]
fn elapsed_micros(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(not(feature = "tracing"))]
#[must_use = "the stage ends when the guard is dropped"]
pub(crate) struct StageGuard;

#[cfg(not(feature = "tracing"))]
impl StageGuard {
    #[inline]
    pub(crate) fn enter(_stage: &'static str) -> Self {
        StageGuard
    }
}

#[cfg(test)]
mod tests {
    use super::{stage, stage_event};

    #[test]
    fn guard_spans_a_scope_with_fields() {
        let width = 4usize;
        {
            let _stage = stage!("unit", width, height = 2);
            stage_event!("unit", area = width * 2);
        }
        let early: Result<(), ()> = (|| {
            let _stage = stage!("unit_early");
            Err(())
        })();
        assert!(early.is_err());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn elapsed_micros_saturates() {
        use std::time::Duration;
        assert_eq!(super::elapsed_micros(Duration::from_millis(3)), 3_000);
        assert_eq!(super::elapsed_micros(Duration::MAX), u64::MAX);
    }
}
