// =====================================================================================
// SHARED CACHE - TTL READ-THROUGH CACHE WITH INJECTED CLOCK
// =====================================================================================

pub mod cache;
pub mod clock;

pub use cache::{CacheEntry, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
