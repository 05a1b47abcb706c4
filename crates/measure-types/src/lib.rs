pub mod category;
pub mod entry;
pub mod helper;
pub mod selection;
pub mod units;

pub use category::*;
pub use entry::*;
pub use helper::*;
pub use selection::*;
pub use units::*;

/// A position or direction in 3D space, in millimetres.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Identifies a scene object a pick was made on.
/// Owned by the host scene; the measurement core never allocates these.
pub type ObjectId = uuid::Uuid;
