// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A non negative amount of seconds.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Ord, PartialOrd, Hash, Default)]
pub struct PositiveDuration {
    pub(crate) seconds: u32,
}

/// A point in time, in seconds since the start of the service day.
///
/// Negative values and values above 24h are allowed, since trips
/// starting on the evening may run after midnight, and reverse searches
/// may need to go before the day start.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct SecondsSinceDayStart {
    seconds: i32,
}

// a time is never allowed to be further than 7 days from the day start
const MAX_SECONDS_SINCE_DAY_START: i32 = 7 * 24 * 60 * 60;

// sentinels used by a search for stops that are not reached (yet).
// They must be far enough from any valid time so that adding
// a valid duration to a valid time never reaches them.
const UNREACHED_LATE: i32 = i32::MAX / 2;
const UNREACHED_EARLY: i32 = -(i32::MAX / 2);

static_assertions::const_assert!(MAX_SECONDS_SINCE_DAY_START < UNREACHED_LATE / 4);
static_assertions::const_assert!(-MAX_SECONDS_SINCE_DAY_START > UNREACHED_EARLY / 4);

impl PositiveDuration {
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> PositiveDuration {
        let total_seconds = seconds + 60 * minutes + 60 * 60 * hours;
        PositiveDuration {
            seconds: total_seconds,
        }
    }

    pub const fn from_seconds(seconds: u32) -> PositiveDuration {
        PositiveDuration { seconds }
    }

    pub fn total_seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    pub fn checked_sub(self, rhs: PositiveDuration) -> Option<PositiveDuration> {
        self.seconds
            .checked_sub(rhs.seconds)
            .map(|seconds| PositiveDuration { seconds })
    }

    /// Smallest multiple of `step` that is greater or equal to `self`.
    ///
    /// Returns `self` when `step` is zero.
    pub fn round_up_to(self, step: PositiveDuration) -> PositiveDuration {
        if step.seconds == 0 {
            return self;
        }
        let nb_of_steps = (self.seconds + step.seconds - 1) / step.seconds;
        PositiveDuration {
            seconds: nb_of_steps * step.seconds,
        }
    }
}

impl Display for PositiveDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hours = self.seconds / (60 * 60);
        let minutes_in_secs = self.seconds % (60 * 60);
        let minutes = minutes_in_secs / 60;
        let seconds = minutes_in_secs % 60;
        if hours != 0 {
            write!(f, "{}h{:02}m{:02}s", hours, minutes, seconds)
        } else if minutes != 0 {
            write!(f, "{}m{:02}s", minutes, seconds)
        } else {
            write!(f, "{}s", seconds)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    input: String,
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unable to parse `{}`. Expected format is HH:MM:SS or HH:MM",
            self.input
        )
    }
}

impl std::error::Error for TimeParseError {}

// parse "HH:MM:SS" or "HH:MM" into a number of seconds
fn parse_hms(input: &str) -> Result<u32, TimeParseError> {
    let error = || TimeParseError {
        input: input.to_string(),
    };
    let mut parts = input.trim().split(':');
    let hours: u32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(error)?;
    let minutes: u32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(error)?;
    let seconds: u32 = match parts.next() {
        Some(s) => s.parse().map_err(|_| error())?,
        None => 0,
    };
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return Err(error());
    }
    Ok(seconds + 60 * minutes + 60 * 60 * hours)
}

impl FromStr for PositiveDuration {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds = parse_hms(s)?;
        Ok(PositiveDuration { seconds })
    }
}

impl Serialize for PositiveDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        serializer.serialize_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
    }
}

impl<'de> Deserialize<'de> for PositiveDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        PositiveDuration::from_str(&string).map_err(serde::de::Error::custom)
    }
}

impl std::ops::Add for PositiveDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds + rhs.seconds,
        }
    }
}

impl std::ops::Mul<u32> for PositiveDuration {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        PositiveDuration {
            seconds: self.seconds * rhs,
        }
    }
}

impl SecondsSinceDayStart {
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    pub const fn from_hms(hours: i32, minutes: i32, seconds: i32) -> Self {
        Self {
            seconds: seconds + 60 * minutes + 60 * 60 * hours,
        }
    }

    pub fn from_seconds(seconds: i32) -> Option<Self> {
        if !(-MAX_SECONDS_SINCE_DAY_START..=MAX_SECONDS_SINCE_DAY_START).contains(&seconds) {
            None
        } else {
            Some(Self { seconds })
        }
    }

    pub fn total_seconds(&self) -> i32 {
        self.seconds
    }

    /// Time used by a forward search for stops not reached.
    pub(crate) const fn unreached_late() -> Self {
        Self {
            seconds: UNREACHED_LATE,
        }
    }

    /// Time used by a reverse search for stops not reached.
    pub(crate) const fn unreached_early() -> Self {
        Self {
            seconds: UNREACHED_EARLY,
        }
    }

    pub fn is_unreached(&self) -> bool {
        self.seconds == UNREACHED_LATE || self.seconds == UNREACHED_EARLY
    }

    /// Returns `None` when `earlier` is after `self`.
    pub fn duration_since(&self, earlier: &SecondsSinceDayStart) -> Option<PositiveDuration> {
        let diff = i64::from(self.seconds) - i64::from(earlier.seconds);
        if diff < 0 || diff > i64::from(u32::MAX) {
            None
        } else {
            Some(PositiveDuration {
                seconds: diff as u32,
            })
        }
    }

    /// Absolute value of the difference between two times.
    pub fn distance(&self, other: &SecondsSinceDayStart) -> PositiveDuration {
        let diff = (i64::from(self.seconds) - i64::from(other.seconds)).abs();
        PositiveDuration {
            seconds: diff.min(i64::from(u32::MAX)) as u32,
        }
    }
}

impl Display for SecondsSinceDayStart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_unreached() {
            return write!(f, "-");
        }
        let sign = if self.seconds < 0 { "-" } else { "" };
        let seconds = self.seconds.abs();
        write!(
            f,
            "{}{}:{:02}:{:02}",
            sign,
            seconds / 60 / 60,
            seconds / 60 % 60,
            seconds % 60
        )
    }
}

impl FromStr for SecondsSinceDayStart {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds = parse_hms(s)?;
        if seconds > MAX_SECONDS_SINCE_DAY_START as u32 {
            return Err(TimeParseError {
                input: s.to_string(),
            });
        }
        Ok(Self {
            seconds: seconds as i32,
        })
    }
}

impl Serialize for SecondsSinceDayStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SecondsSinceDayStart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        SecondsSinceDayStart::from_str(&string).map_err(serde::de::Error::custom)
    }
}

impl std::ops::Add<PositiveDuration> for SecondsSinceDayStart {
    type Output = Self;

    fn add(self, rhs: PositiveDuration) -> Self::Output {
        let seconds = i64::from(self.seconds) + i64::from(rhs.seconds);
        Self {
            seconds: seconds.min(i64::from(UNREACHED_LATE)) as i32,
        }
    }
}

impl std::ops::Sub<PositiveDuration> for SecondsSinceDayStart {
    type Output = Self;

    fn sub(self, rhs: PositiveDuration) -> Self::Output {
        let seconds = i64::from(self.seconds) - i64::from(rhs.seconds);
        Self {
            seconds: seconds.max(i64::from(UNREACHED_EARLY)) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_positive_duration() {
        assert_eq!(PositiveDuration::from_hms(0, 4, 50).to_string(), "4m50s");
        assert_eq!(PositiveDuration::from_hms(1, 59, 45).to_string(), "1h59m45s");
        assert_eq!(PositiveDuration::from_seconds(30).to_string(), "30s");
    }

    #[test]
    fn parse_times() {
        assert_eq!(
            PositiveDuration::from_str("00:02:00"),
            Ok(PositiveDuration::from_hms(0, 2, 0))
        );
        assert_eq!(
            SecondsSinceDayStart::from_str("0:05:20"),
            Ok(SecondsSinceDayStart::from_hms(0, 5, 20))
        );
        assert_eq!(
            SecondsSinceDayStart::from_str("10:04"),
            Ok(SecondsSinceDayStart::from_hms(10, 4, 0))
        );
        assert!(SecondsSinceDayStart::from_str("10:61:00").is_err());
        assert!(PositiveDuration::from_str("toto").is_err());
    }

    #[test]
    fn display_time_of_day() {
        assert_eq!(SecondsSinceDayStart::from_hms(0, 0, 30).to_string(), "0:00:30");
        assert_eq!(SecondsSinceDayStart::from_hms(12, 0, 0).to_string(), "12:00:00");
        assert_eq!(SecondsSinceDayStart::from_hms(0, -1, 0).to_string(), "-0:01:00");
    }

    #[test]
    fn round_up_to_step() {
        let step = PositiveDuration::from_seconds(60);
        assert_eq!(
            PositiveDuration::from_seconds(61).round_up_to(step),
            PositiveDuration::from_seconds(120)
        );
        assert_eq!(
            PositiveDuration::from_seconds(120).round_up_to(step),
            PositiveDuration::from_seconds(120)
        );
    }

    #[test]
    fn arithmetic_saturates_on_sentinels() {
        let late = SecondsSinceDayStart::unreached_late() + PositiveDuration::from_hms(1, 0, 0);
        assert!(late.is_unreached());
        let early = SecondsSinceDayStart::unreached_early() - PositiveDuration::from_hms(1, 0, 0);
        assert!(early.is_unreached());
    }
}
