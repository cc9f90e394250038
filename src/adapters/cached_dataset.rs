//! Memoizing decorator for any [`DatasetPort`].

use std::sync::{Arc, OnceLock};

use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::ports::data_port::DatasetPort;

/// Loads through `inner` once and hands out the same `Arc<Dataset>` afterwards.
///
/// Failed loads are not remembered; the next call tries again.
pub struct CachedDatasetPort<P> {
    inner: P,
    cell: OnceLock<Arc<Dataset>>,
}

impl<P: DatasetPort> CachedDatasetPort<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cell: OnceLock::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<P: DatasetPort> DatasetPort for CachedDatasetPort<P> {
    fn load(&self) -> Result<Arc<Dataset>, DashboardError> {
        if let Some(dataset) = self.cell.get() {
            tracing::trace!("dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let dataset = self.inner.load().inspect_err(|e| {
            tracing::error!(source = %self.inner.describe(), error = %e, "dataset load failed");
        })?;
        // A concurrent caller may have won the race; either value is identical.
        Ok(Arc::clone(self.cell.get_or_init(|| dataset)))
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{Observation, Quote};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingPort {
        calls: AtomicUsize,
        fail_first: bool,
    }

    impl DatasetPort for CountingPort {
        fn load(&self) -> Result<Arc<Dataset>, DashboardError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(DashboardError::data_unavailable("not yet"));
            }
            let row = Observation {
                date: NaiveDate::from_ymd_opt(2001, 1, 2).unwrap(),
                gold: Quote::new(266.0, None),
                sp500: Quote::new(1283.27, None),
                ten_year: Quote::new(5.21, None),
            };
            Ok(Arc::new(Dataset::new(vec![row]).unwrap()))
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    #[test]
    fn loads_once() {
        let cache = CachedDatasetPort::new(CountingPort {
            calls: AtomicUsize::new(0),
            fail_first: false,
        });
        assert!(!cache.is_loaded());
        let a = cache.load().unwrap();
        let b = cache.load().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn failures_are_retried() {
        let cache = CachedDatasetPort::new(CountingPort {
            calls: AtomicUsize::new(0),
            fail_first: true,
        });
        assert!(cache.load().is_err());
        assert!(!cache.is_loaded());
        assert!(cache.load().is_ok());
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }
}
