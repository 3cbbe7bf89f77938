use cascade_core::ResultsSequence;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every call it sees. Clones share the same log.
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> Recorder<T> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, call: T) {
        self.calls.lock().push(call);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl<T: Clone> Recorder<T> {
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.calls.lock().last().cloned()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Recorder<ResultsSequence<V>>
where
    V: Clone + Send + Sync + 'static,
{
    /// Wrap `render` into an aggregator that records each results sequence
    /// it is called with.
    pub fn aggregator<N, F>(&self, render: F) -> impl Fn(ResultsSequence<V>) -> N + Send + Sync + 'static
    where
        F: Fn(&ResultsSequence<V>) -> N + Send + Sync + 'static,
    {
        let recorder = self.clone();
        move |results| {
            let output = render(&results);
            recorder.record(results);
            output
        }
    }
}
