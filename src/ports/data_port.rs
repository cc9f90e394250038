//! Dataset access port trait.

use std::sync::Arc;

use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;

pub trait DatasetPort {
    /// Loads the full dataset. Implementations must return the same data on
    /// every successful call.
    fn load(&self) -> Result<Arc<Dataset>, DashboardError>;

    /// Where the data comes from, for logs and the sources page.
    fn describe(&self) -> String;
}
