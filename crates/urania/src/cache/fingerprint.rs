//! Birth-detail fingerprints for cache lookup.
//!
//! Two sets of birth details hit the same cache entry when their dates agree
//! to the day, their times to the second, their locations ignoring case and
//! surrounding whitespace, their timezone ids exactly, and their coordinates
//! within [`COORDINATE_TOLERANCE`]. The coordinate cannot go into a hash, so
//! the exact components form a bucket key and the coordinate is compared
//! inside the bucket.

use crate::birth::{BirthDetails, GeoCoordinate};
use chrono::{Datelike, Timelike};
use sha2::{Digest, Sha256};

/// Degrees either coordinate component may drift and still match
pub const COORDINATE_TOLERANCE: f64 = 0.0001;

#[derive(Debug, Clone)]
pub struct BirthFingerprint {
    date: (i32, u32, u32),
    time: (u32, u32, u32),
    location: String,
    timezone: String,
    coordinate: Option<GeoCoordinate>,
}

impl BirthFingerprint {
    pub fn of(details: &BirthDetails) -> Self {
        let date = details.birth_date;
        let time = details.birth_time;
        Self {
            date: (date.year(), date.month(), date.day()),
            time: (time.hour(), time.minute(), time.second()),
            location: details.location.trim().to_lowercase(),
            timezone: details.timezone.trim().to_string(),
            coordinate: details.coordinate,
        }
    }

    /// Storage key shared by every fingerprint that could match this one
    pub fn bucket_key(&self) -> String {
        let (y, mo, d) = self.date;
        let (h, mi, s) = self.time;
        let mut hasher = Sha256::new();
        hasher.update(format!("{:04}-{:02}-{:02}", y, mo, d).as_bytes());
        hasher.update(b"|");
        hasher.update(format!("{:02}:{:02}:{:02}", h, mi, s).as_bytes());
        hasher.update(b"|");
        hasher.update(self.location.as_bytes());
        hasher.update(b"|");
        hasher.update(self.timezone.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn matches(&self, other: &BirthFingerprint) -> bool {
        self.date == other.date
            && self.time == other.time
            && self.location == other.location
            && self.timezone == other.timezone
            && match (&self.coordinate, &other.coordinate) {
                (Some(a), Some(b)) => a.within(b, COORDINATE_TOLERANCE),
                (None, None) => true,
                _ => false,
            }
    }
}
