//! Parsing of single transport records.
//!
//! A record is one line of ten comma-separated fields:
//!
//! ```text
//! TYPE,ID,FROM,TO,YYYY-MM-DD,HH:MM,HH:MM,STANDARD_PRICE,PREMIUM_PRICE,EXTRA_INFO
//! TRAIN,ICE-501,Berlin,Munich,2025-12-21,08:00,12:30,49.99,89.99,ICE
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{InvalidPrice, InvalidVariant, Price, Transport, TransportDetails, Variant};

/// Number of fields in a record.
pub const FIELD_COUNT: usize = 10;

/// Why a record line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("expected {FIELD_COUNT} fields, got {0}")]
    FieldCount(usize),

    #[error(transparent)]
    Variant(#[from] InvalidVariant),

    #[error("{0} is empty")]
    EmptyField(&'static str),

    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    Date(String),

    #[error("invalid {field} {value:?} (expected HH:MM)")]
    Time { field: &'static str, value: String },

    #[error("{field}: {source}")]
    Price {
        field: &'static str,
        #[source]
        source: InvalidPrice,
    },
}

/// Parse one record into a transport with every seat free.
///
/// # Examples
///
/// ```
/// use booking_server::loader::parse_record;
/// use booking_server::domain::Variant;
///
/// let t = parse_record("BUS,FLX-7,Hamburg,Berlin,2025-12-21,09:00,12:15,19.99,29.99,FlixBus").unwrap();
/// assert_eq!(t.variant(), Variant::Bus);
/// assert_eq!(t.capacity(), 50);
///
/// assert!(parse_record("BOAT,X,A,B,2025-12-21,09:00,10:00,1,2,x").is_err());
/// ```
pub fn parse_record(line: &str) -> Result<Transport, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount(fields.len()));
    }

    let variant = Variant::parse(fields[0])?;
    let id = non_empty(fields[1], "id")?;
    let departure = non_empty(fields[2], "departure city")?;
    let arrival = non_empty(fields[3], "arrival city")?;

    let date = NaiveDate::parse_from_str(fields[4], "%Y-%m-%d")
        .map_err(|_| RecordError::Date(fields[4].to_string()))?;
    let departure_time = parse_time(fields[5], "departure time")?;
    let arrival_time = parse_time(fields[6], "arrival time")?;

    let standard_price = parse_price(fields[7], "standard price")?;
    let premium_price = parse_price(fields[8], "premium price")?;

    Ok(Transport::new(
        variant,
        TransportDetails {
            id,
            departure,
            arrival,
            date,
            departure_time,
            arrival_time,
            standard_price,
            premium_price,
            extra_info: fields[9].to_string(),
        },
    ))
}

fn non_empty(value: &str, field: &'static str) -> Result<String, RecordError> {
    if value.is_empty() {
        Err(RecordError::EmptyField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`.
fn parse_time(value: &str, field: &'static str) -> Result<NaiveTime, RecordError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| RecordError::Time {
            field,
            value: value.to_string(),
        })
}

fn parse_price(value: &str, field: &'static str) -> Result<Price, RecordError> {
    Price::parse(value).map_err(|source| RecordError::Price { field, source })
}
