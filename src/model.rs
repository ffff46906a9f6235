// Typed entities for the hotel availability snapshot
// These are read-only views of data owned by the external booking API;
// the engine never mutates or persists them.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

// A hotel with its nested room inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotel {
    pub hotel_id: String,
    pub hotel_name: String,
    pub room_categories: Vec<RoomCategory>,
}

// A room/flat type grouping within a hotel (e.g. "Deluxe", "Studio")
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomCategory {
    pub name: String,
    pub room_numbers: Vec<RoomNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomNumber {
    pub name: String,
    // Calendar days on which this room is occupied. A set: duplicates in the
    // source payload carry no meaning and are collapsed at decode time.
    pub booked_dates: BTreeSet<NaiveDate>,
    pub bookings: Vec<BookingRecord>,
}

impl RoomNumber {
    // Membership test for a single calendar day
    pub fn is_booked_on(&self, date: NaiveDate) -> bool {
        self.booked_dates.contains(&date)
    }
}

// Informational only for the availability computation; shown when the admin
// clicks a booked room/date in the calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub booked_by: String,
    pub payment_details: String,
}

// Query input: one availability lookup against the snapshot. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StayRequest {
    pub hotel_name: String,
    pub category_name: String,
    // When set, restricts the lookup to this single room
    pub room_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

// Query output: one entry per candidate room that is free for the whole stay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityResult {
    pub room_name: String,
    pub available_dates: Vec<NaiveDate>,
    pub booked_dates: Vec<NaiveDate>,
    pub category: String,
}

// Per-category counts for a single calendar day, used by the calendar view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAvailabilitySummary {
    pub category: String,
    pub available_count: usize,
    pub booked_count: usize,
    pub rooms: Vec<RoomDayStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomDayStatus {
    pub room_name: String,
    pub booked: bool,
}
