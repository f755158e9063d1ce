#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;

use std::convert::Infallible;
use std::future::Future;

use prometheus::{Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, TextEncoder};

lazy_static! {
    static ref SUCCESS: IntCounterVec = register_int_counter_vec!(
        "success_counter",
        "Operations that completed or failed because of caller input",
        &["app_layer", "class_function"]
    )
    .unwrap();
    static ref FAILURE: IntCounterVec = register_int_counter_vec!(
        "failure_counter",
        "Operations that failed because of an internal fault",
        &["app_layer", "class_function"]
    )
    .unwrap();
    static ref TIMER: HistogramVec = register_histogram_vec!(
        "timer",
        "Operation latency in seconds",
        &["app_layer", "class_function"]
    )
    .unwrap();
}

// Lets errors caused by bad input count as successes of the service
pub trait IsErr {
    fn is_err(&self) -> bool {
        true
    }
}

impl IsErr for Infallible {
    fn is_err(&self) -> bool {
        false
    }
}

impl IsErr for () {
    fn is_err(&self) -> bool {
        false
    }
}

impl IsErr for Box<dyn std::error::Error> {}

/// Success, failure and latency metrics for one function of one layer
#[derive(Clone)]
pub struct Measure {
    success: IntCounter,
    failure: IntCounter,
    timer: Histogram,
}

impl Measure {
    pub fn new(layer: &str, function: &str) -> Measure {
        Measure {
            success: SUCCESS.with_label_values(&[layer, function]),
            failure: FAILURE.with_label_values(&[layer, function]),
            timer: TIMER.with_label_values(&[layer, function]),
        }
    }

    /// Records the outcome and duration of an async operation
    pub async fn stats<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: IsErr,
    {
        let timer = self.timer.start_timer();
        let r = inner.await;
        timer.observe_duration();
        self.count(&r);
        r
    }

    /// Records the outcome and duration of a blocking operation
    pub fn time<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: IsErr,
    {
        let r = self.timer.observe_closure_duration(inner);
        self.count(&r);
        r
    }

    fn count<T, E: IsErr>(&self, r: &Result<T, E>) {
        match r {
            Ok(_) => self.success.inc(),
            Err(e) if !e.is_err() => self.success.inc(),
            Err(_) => self.failure.inc(),
        }
    }
}

pub fn encode() -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use tokio::time::Duration;

    use super::*;

    enum TestError {
        Fatal,
        Recoverable,
    }

    impl IsErr for TestError {
        fn is_err(&self) -> bool {
            match self {
                Self::Fatal => true,
                Self::Recoverable => false,
            }
        }
    }

    fn counts(layer: &str, function: &str) -> (u64, u64, u64) {
        (
            SUCCESS.with_label_values(&[layer, function]).get(),
            FAILURE.with_label_values(&[layer, function]).get(),
            TIMER
                .with_label_values(&[layer, function])
                .get_sample_count(),
        )
    }

    #[tokio::test]
    async fn test_success() {
        let layer = "layer";
        let function = "test_success";

        let m = Measure::new(layer, function);

        let f = async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, Infallible>("")
        };

        let _ = m.stats(f).await;

        assert_eq!(counts(layer, function), (1, 0, 1));
        assert!(
            TIMER
                .with_label_values(&[layer, function])
                .get_sample_sum()
                >= 0.1
        );
    }

    #[tokio::test]
    async fn test_failure() {
        let layer = "layer";
        let function = "test_failure";

        let m = Measure::new(layer, function);

        let f = async move { Err::<(), _>(TestError::Fatal) };

        let _ = m.stats(f).await;

        assert_eq!(counts(layer, function), (0, 1, 1));
    }

    #[tokio::test]
    async fn test_recoverable() {
        let layer = "layer";
        let function = "test_recoverable";

        let m = Measure::new(layer, function);

        let f = async move { Err::<(), _>(TestError::Recoverable) };

        let _ = m.stats(f).await;

        assert_eq!(counts(layer, function), (1, 0, 1));
    }

    #[test]
    fn test_time_blocking() {
        let layer = "layer";
        let function = "test_time_blocking";

        let m = Measure::new(layer, function);

        let ok = m.time(|| Ok::<_, TestError>(3));
        let _ = m.time(|| Err::<(), _>(TestError::Fatal));
        let _ = m.time(|| Err::<(), _>(TestError::Recoverable));

        assert!(matches!(ok, Ok(3)));
        assert_eq!(counts(layer, function), (2, 1, 3));
    }

    #[test]
    fn test_encode() -> Result<(), Box<dyn std::error::Error>> {
        let m = Measure::new("layer", "test_encode");
        let _ = m.time(|| Ok::<_, Infallible>(()));

        let text = encode()?;
        assert!(text.contains("class_function=\"test_encode\""));
        Ok(())
    }
}
