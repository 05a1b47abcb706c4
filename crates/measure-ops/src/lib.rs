pub mod derive;
pub mod format;
pub mod units;

pub use derive::{
    angle_between_consecutive_segments, angle_between_edge_directions, angle_between_edges,
    distance, ArcSettings, Segment, SegmentAngle,
};
pub use format::{format_fixed, DisplaySettings, Formatter, MAX_DECIMAL_PLACES};
pub use units::UnitConverter;
