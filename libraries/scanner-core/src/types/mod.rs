//! Call and identifier types

mod call;
mod ids;

pub use call::Call;
pub use ids::{CallId, TalkgroupId};
