use crate::score::ScoreEvent;

/// Receiver for score notifications, called once per processed dart with
/// the running total after it.
pub trait ScoreSink {
    fn on_score(&mut self, event: &ScoreEvent, running_total: i32);
}

impl<F> ScoreSink for F
where
    F: FnMut(&ScoreEvent, i32),
{
    fn on_score(&mut self, event: &ScoreEvent, running_total: i32) {
        self(event, running_total)
    }
}

/// Sink that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn on_score(&mut self, _event: &ScoreEvent, _running_total: i32) {}
}
