pub mod deal;

pub use deal::{Deal, DealStatus};
