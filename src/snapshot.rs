// Snapshot decoding: the schema-validation step at the booking-API boundary.
// The admin API payload is loosely shaped (arrays may be missing, dates are
// strings), so we decode into permissive Raw* structs first and validate them
// into the typed model in one pass. Downstream of this module the engine
// never needs a defensive null-check.

use crate::dates::{booking_nights, parse_day, InvalidDateError};
use crate::model::{BookingRecord, Hotel, RoomCategory, RoomNumber};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

// Error types for snapshot decoding
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid date in snapshot: {0}")]
    InvalidDate(#[from] InvalidDateError),

    #[error("booking for room {room:?} checks out {check_out} before check-in {check_in}")]
    InvertedBookingInterval {
        room: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

// Raw wire shapes: every field defaulted so a sparse payload still decodes
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawHotel {
    #[serde(rename = "hotelID")]
    hotel_id: String,
    hotel_name: String,
    room_categories: Vec<RawCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawCategory {
    name: String,
    room_numbers: Vec<RawRoom>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRoom {
    name: String,
    booked_dates: Vec<String>,
    bookings: Vec<RawBooking>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawBooking {
    guest_name: String,
    check_in: String,
    check_out: String,
    booked_by: String,
    payment_details: String,
}

// Decode the "list hotels" endpoint body into the typed snapshot.
// Malformed dates are a hard error; missing arrays are empty collections.
pub fn decode_hotels(body: &str) -> Result<Vec<Hotel>, DecodeError> {
    let raw: Vec<RawHotel> = serde_json::from_str(body)?;
    raw.into_iter().map(validate_hotel).collect()
}

fn validate_hotel(raw: RawHotel) -> Result<Hotel, DecodeError> {
    let room_categories = raw
        .room_categories
        .into_iter()
        .map(validate_category)
        .collect::<Result<Vec<RoomCategory>, DecodeError>>()?;

    Ok(Hotel {
        hotel_id: raw.hotel_id,
        hotel_name: raw.hotel_name,
        room_categories,
    })
}

fn validate_category(raw: RawCategory) -> Result<RoomCategory, DecodeError> {
    let room_numbers = raw
        .room_numbers
        .into_iter()
        .map(validate_room)
        .collect::<Result<Vec<RoomNumber>, DecodeError>>()?;

    Ok(RoomCategory {
        name: raw.name,
        room_numbers,
    })
}

fn validate_room(raw: RawRoom) -> Result<RoomNumber, DecodeError> {
    // Duplicates in the wire payload collapse into the set here
    let mut booked_dates = BTreeSet::new();
    for date in &raw.booked_dates {
        booked_dates.insert(parse_day(date)?);
    }

    let mut bookings = Vec::with_capacity(raw.bookings.len());
    for booking in raw.bookings {
        let check_in = parse_day(&booking.check_in)?;
        let check_out = parse_day(&booking.check_out)?;
        if check_out < check_in {
            return Err(DecodeError::InvertedBookingInterval {
                room: raw.name,
                check_in,
                check_out,
            });
        }
        bookings.push(BookingRecord {
            guest_name: booking.guest_name,
            check_in,
            check_out,
            booked_by: booking.booked_by,
            payment_details: booking.payment_details,
        });
    }

    // Tolerated, but worth surfacing: booked days no record accounts for
    for orphan in orphaned_dates(&booked_dates, &bookings) {
        tracing::debug!(room = %raw.name, date = %orphan, "booked date has no covering booking record");
    }

    Ok(RoomNumber {
        name: raw.name,
        booked_dates,
        bookings,
    })
}

fn orphaned_dates(
    booked_dates: &BTreeSet<NaiveDate>,
    bookings: &[BookingRecord],
) -> Vec<NaiveDate> {
    let covered: BTreeSet<NaiveDate> = bookings
        .iter()
        .flat_map(|b| booking_nights(b.check_in, b.check_out))
        .collect();
    booked_dates.difference(&covered).copied().collect()
}

// A small sample for inline testing
pub const SMALL_SAMPLE_JSON: &str = r#"
[
  {
    "hotelID": "H-SEA-1",
    "hotelName": "Seaview",
    "roomCategories": [
      {
        "name": "Deluxe",
        "roomNumbers": [
          {
            "name": "101",
            "bookedDates": ["2024-06-10", "2024-06-11", "2024-06-10"],
            "bookings": [
              {
                "guestName": "Ada Lovelace",
                "checkIn": "2024-06-10",
                "checkOut": "2024-06-12",
                "bookedBy": "reception",
                "paymentDetails": "card-ending-4242"
              }
            ]
          },
          {
            "name": "102",
            "bookedDates": [],
            "bookings": []
          }
        ]
      },
      {
        "name": "Studio",
        "roomNumbers": [
          {
            "name": "201"
          }
        ]
      }
    ]
  }
]
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_day;

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn test_decode_sample_snapshot() {
        let hotels = decode_hotels(SMALL_SAMPLE_JSON).unwrap();
        assert_eq!(hotels.len(), 1);

        let hotel = &hotels[0];
        assert_eq!(hotel.hotel_id, "H-SEA-1");
        assert_eq!(hotel.hotel_name, "Seaview");
        assert_eq!(hotel.room_categories.len(), 2);

        let deluxe = &hotel.room_categories[0];
        assert_eq!(deluxe.name, "Deluxe");
        assert_eq!(deluxe.room_numbers.len(), 2);

        // The duplicated 2024-06-10 collapses into the set
        let room101 = &deluxe.room_numbers[0];
        assert_eq!(room101.booked_dates.len(), 2);
        assert!(room101.is_booked_on(d("2024-06-10")));
        assert!(room101.is_booked_on(d("2024-06-11")));
        assert_eq!(room101.bookings.len(), 1);
        assert_eq!(room101.bookings[0].guest_name, "Ada Lovelace");
    }

    #[test]
    fn test_missing_arrays_decode_as_empty() {
        // Room "201" carries neither bookedDates nor bookings
        let hotels = decode_hotels(SMALL_SAMPLE_JSON).unwrap();
        let studio = &hotels[0].room_categories[1];
        assert_eq!(studio.room_numbers.len(), 1);
        assert!(studio.room_numbers[0].booked_dates.is_empty());
        assert!(studio.room_numbers[0].bookings.is_empty());

        // A hotel with no categories at all still decodes
        let hotels = decode_hotels(r#"[{"hotelID": "H2", "hotelName": "Bare"}]"#).unwrap();
        assert!(hotels[0].room_categories.is_empty());
    }

    #[test]
    fn test_malformed_booked_date_is_an_error() {
        let body = r#"[{
            "hotelID": "H1",
            "hotelName": "Seaview",
            "roomCategories": [{
                "name": "Deluxe",
                "roomNumbers": [{"name": "101", "bookedDates": ["10/06/2024"]}]
            }]
        }]"#;
        let err = decode_hotels(body).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDate(_)));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            decode_hotels("{not json").unwrap_err(),
            DecodeError::JsonParseError(_)
        ));
    }

    #[test]
    fn test_inverted_booking_interval_is_an_error() {
        let body = r#"[{
            "hotelID": "H1",
            "hotelName": "Seaview",
            "roomCategories": [{
                "name": "Deluxe",
                "roomNumbers": [{
                    "name": "101",
                    "bookings": [{
                        "guestName": "G",
                        "checkIn": "2024-06-12",
                        "checkOut": "2024-06-10",
                        "bookedBy": "reception",
                        "paymentDetails": "cash"
                    }]
                }]
            }]
        }]"#;
        let err = decode_hotels(body).unwrap_err();
        assert!(matches!(err, DecodeError::InvertedBookingInterval { .. }));
    }

    #[test]
    fn test_orphaned_dates_are_tolerated() {
        // Booked day with no covering record decodes fine (logged, not fatal)
        let body = r#"[{
            "hotelID": "H1",
            "hotelName": "Seaview",
            "roomCategories": [{
                "name": "Deluxe",
                "roomNumbers": [{"name": "101", "bookedDates": ["2024-06-20"]}]
            }]
        }]"#;
        let hotels = decode_hotels(body).unwrap();
        assert!(hotels[0].room_categories[0].room_numbers[0].is_booked_on(d("2024-06-20")));
    }

    #[test]
    fn test_orphan_detection() {
        let booked: BTreeSet<NaiveDate> =
            [d("2024-06-08"), d("2024-06-09"), d("2024-06-20")].into();
        let bookings = vec![BookingRecord {
            guest_name: "Ada Lovelace".to_string(),
            check_in: d("2024-06-08"),
            check_out: d("2024-06-10"),
            booked_by: "reception".to_string(),
            payment_details: "card".to_string(),
        }];
        // The 8th and 9th are covered nights; the 20th is orphaned
        assert_eq!(orphaned_dates(&booked, &bookings), vec![d("2024-06-20")]);
    }
}
