// Explanation cache module
// Author: kelexine (https://github.com/kelexine)

pub mod clock;
pub mod manager;
pub mod models;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::ExplanationCache;
pub use models::{CacheConfig, CacheStats, ExplanationKey};
