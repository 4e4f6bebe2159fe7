pub mod entities;
pub mod errors;
pub mod ports;
pub mod progression;
pub mod services;
pub mod value_objects;

pub use entities::{PackageTracking, TrackingStage};
pub use errors::TrackingError;
pub use ports::TrackingRepository;
pub use progression::{
  advance_to, current_index_of, last_completed_index, next_target_index, sequence_state,
};
pub use services::TrackingService;
pub use value_objects::{SequenceState, StageName, StageStatus, ValueObjectError};
