pub mod advance_tracking;
pub mod get_tracking;
pub mod start_tracking;

pub use advance_tracking::{AdvanceTrackingCommand, AdvanceTrackingUseCase};
pub use get_tracking::{GetTrackingCommand, GetTrackingUseCase, TrackingDto, TrackingStageDto};
pub use start_tracking::{StartTrackingCommand, StartTrackingUseCase};
