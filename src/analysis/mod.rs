pub mod cloud;
pub mod daily;
pub mod derivative;
pub mod matching;
pub mod series;
pub mod snapshot;

pub use cloud::{classify, CloudReport};
pub use daily::daily_sums;
pub use derivative::{gradient, DerivativeSeries};
pub use series::Series;
pub use snapshot::{Snapshot, Summary};
