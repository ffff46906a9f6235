// Main library file for the hotel availability engine

// Export modules for each part of the system
pub mod client;
pub mod dates;
pub mod engine;
pub mod model;
pub mod snapshot;

// Re-export key types for convenience
pub use client::{ClientConfig, FetchError, HttpSnapshotClient, SnapshotProvider};
pub use dates::{booking_nights, expand_range, parse_day, InvalidDateError};
pub use engine::{compute_overlap, stay_conflicts, AvailabilityEngine};
pub use model::{
    AvailabilityResult, BookingRecord, CategoryAvailabilitySummary, Hotel, RoomCategory,
    RoomDayStatus, RoomNumber, StayRequest,
};
pub use snapshot::{decode_hotels, DecodeError};
