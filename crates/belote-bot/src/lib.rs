pub mod policy;
pub mod table;

pub use policy::{FirstLegalPolicy, Policy, PolicyContext, PolicyKind, RandomPolicy, choose_move};
pub use table::{SeatControl, Table, TickOutcome};
