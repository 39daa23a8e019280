pub mod fingerprint;
pub mod policy;
pub mod table;

pub use fingerprint::fingerprint;
pub use policy::{resolve_target, RoutingPolicy};
pub use table::RoutingTable;
