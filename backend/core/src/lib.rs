pub mod context;
pub mod error;
pub mod traits;
pub mod types;

pub use context::{PortInfo, Position, QueryContext, RouteInfo, VesselInfo, WeatherInfo};
pub use error::TritonError;
pub use traits::BackendClient;
pub use types::{
    Backend, BackendAvailability, PreferredBackend, QueryResult, QuerySource, Target,
    TaskCategory,
};
