// Availability engine: pure, stateless computations over a hotel snapshot.
// The snapshot and every query input arrive as explicit arguments; nothing is
// read from ambient state and nothing is mutated.

use crate::dates::expand_range;
use crate::model::{
    AvailabilityResult, BookingRecord, CategoryAvailabilitySummary, Hotel, RoomDayStatus,
    StayRequest,
};
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

// True iff any booked day d satisfies check_in <= d <= check_out (inclusive
// on both ends). An inverted interval contains no days, so it overlaps
// nothing. No adjacency adjustment happens here; see stay_conflicts.
pub fn compute_overlap(
    check_in: NaiveDate,
    check_out: NaiveDate,
    booked_dates: &BTreeSet<NaiveDate>,
) -> bool {
    if check_in > check_out {
        return false;
    }
    booked_dates.range(check_in..=check_out).next().is_some()
}

// Booking-placement conflict check with the adjacency rule: the candidate
// checkout day is dropped before the overlap test, so a stay ending the day
// another begins is adjacent, not overlapping. A same-day candidate
// (check_in == check_out) gets no adjustment and collides with its own day.
pub fn stay_conflicts(
    check_in: NaiveDate,
    check_out: NaiveDate,
    booked_dates: &BTreeSet<NaiveDate>,
) -> bool {
    let effective_out = if check_in == check_out {
        check_out
    } else {
        match check_out.checked_sub_days(Days::new(1)) {
            Some(day) => day,
            None => check_out,
        }
    };
    compute_overlap(check_in, effective_out, booked_dates)
}

// The engine itself carries no state; it exists so callers hold one value
// with the full query surface on it.
#[derive(Debug, Default)]
pub struct AvailabilityEngine;

impl AvailabilityEngine {
    pub fn new() -> Self {
        Self
    }

    // Compute which rooms of the requested hotel/category are free for every
    // day of [check_in, check_out]. Unresolvable hotel or category and
    // inverted date ranges all yield an empty list, never an error: absence
    // is a normal condition for the admin screens driving this.
    pub fn find_available_rooms(
        &self,
        snapshot: &[Hotel],
        request: &StayRequest,
    ) -> Vec<AvailabilityResult> {
        let hotel = match snapshot
            .iter()
            .find(|h| h.hotel_name == request.hotel_name)
        {
            Some(hotel) => hotel,
            None => return Vec::new(),
        };

        let category = match hotel
            .room_categories
            .iter()
            .find(|c| c.name == request.category_name)
        {
            Some(category) => category,
            None => return Vec::new(),
        };

        let stay_days = expand_range(request.check_in, request.check_out);

        let mut results = Vec::new();
        for room in &category.room_numbers {
            if let Some(wanted) = &request.room_name {
                if &room.name != wanted {
                    continue;
                }
            }

            // A room qualifies only when no booked day falls inside the
            // inclusive candidate interval
            if compute_overlap(request.check_in, request.check_out, &room.booked_dates) {
                continue;
            }

            let available_dates: Vec<NaiveDate> = stay_days
                .iter()
                .copied()
                .filter(|day| !room.booked_dates.contains(day))
                .collect();
            if available_dates.is_empty() {
                // Inverted or empty range: nothing to offer
                continue;
            }

            results.push(AvailabilityResult {
                room_name: room.name.clone(),
                available_dates,
                booked_dates: room.booked_dates.iter().copied().collect(),
                category: category.name.clone(),
            });
        }

        results
    }

    // Single-date variant for the calendar view: per-category booked vs
    // available counts for one day, with the raw per-room flags attached.
    pub fn day_availability(
        &self,
        snapshot: &[Hotel],
        hotel_name: &str,
        date: NaiveDate,
    ) -> Vec<CategoryAvailabilitySummary> {
        let hotel = match snapshot.iter().find(|h| h.hotel_name == hotel_name) {
            Some(hotel) => hotel,
            None => return Vec::new(),
        };

        hotel
            .room_categories
            .iter()
            .map(|category| {
                let rooms: Vec<RoomDayStatus> = category
                    .room_numbers
                    .iter()
                    .map(|room| RoomDayStatus {
                        room_name: room.name.clone(),
                        booked: room.is_booked_on(date),
                    })
                    .collect();
                let booked_count = rooms.iter().filter(|r| r.booked).count();

                CategoryAvailabilitySummary {
                    category: category.name.clone(),
                    available_count: rooms.len() - booked_count,
                    booked_count,
                    rooms,
                }
            })
            .collect()
    }

    // Booking records covering a clicked room/date, for the details panel.
    // A record covers the date when its half-open [check_in, check_out) span
    // contains it, or when it is a same-day booking on exactly that date.
    pub fn bookings_for_day<'a>(
        &self,
        snapshot: &'a [Hotel],
        hotel_name: &str,
        category_name: &str,
        room_name: &str,
        date: NaiveDate,
    ) -> Vec<&'a BookingRecord> {
        snapshot
            .iter()
            .filter(|h| h.hotel_name == hotel_name)
            .flat_map(|h| &h.room_categories)
            .filter(|c| c.name == category_name)
            .flat_map(|c| &c.room_numbers)
            .filter(|r| r.name == room_name)
            .flat_map(|r| &r.bookings)
            .filter(|b| {
                (b.check_in <= date && date < b.check_out)
                    || (b.check_in == b.check_out && b.check_in == date)
            })
            .collect()
    }
}
