pub mod snap;
pub mod takeoff;

pub use snap::{find_best_snap, FindBestSnap, SnapMatch, SnapResult};
pub use takeoff::{compute_takeoff, Takeoff, TakeoffResult};
