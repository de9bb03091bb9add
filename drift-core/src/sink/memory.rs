use super::{stamp, LogSink};
use parking_lot::Mutex;

/// In-memory sink that keeps every formatted line
///
/// Lets a producer/consumer pair run without a live file target.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all lines recorded so far, including timestamps
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Recorded messages with the timestamp prefix stripped
    pub fn messages(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .map(|line| match line.split_once(": ") {
                Some((_, msg)) => msg.to_string(),
                None => line.clone(),
            })
            .collect()
    }

    /// Messages starting with `prefix`
    pub fn messages_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|msg| msg.starts_with(prefix))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str) {
        let line = stamp(message);
        self.lines.lock().push(line);
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    #[inline(always)]
    fn log(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_messages() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.log("Momentum for BTCUSD: 0.0123");
        sink.log("BUY BTCUSD at 101.25");

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.messages(),
            vec!["Momentum for BTCUSD: 0.0123", "BUY BTCUSD at 101.25"]
        );
        assert_eq!(sink.messages_with_prefix("BUY").len(), 1);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_null_sink_is_zero_sized() {
        assert_eq!(std::mem::size_of::<NullSink>(), 0);
        NullSink.log("ignored");
    }
}
