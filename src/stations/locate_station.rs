use crate::dates::parse_timestamp_lossy;
use crate::types::responses::observations::{LocationEntry, ObservationSeries};
use chrono::DateTime;
use chrono_tz::Tz;
use log::debug;
use std::collections::HashMap;

/// Where a station stood during one period of its history.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLocationInterval {
    pub from_time: DateTime<Tz>,
    /// `None` while the station is still at this position.
    pub to_time: Option<DateTime<Tz>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres above sea level.
    pub elevation: Option<f64>,
}

impl StationLocationInterval {
    /// Builds an interval from a location entry of a series header.
    ///
    /// Bounds that cannot be parsed fall back to the far-future timestamp, so
    /// an entry with a broken `from` never matches and a broken `to` never ends.
    /// Coordinates that are not numbers become `None`.
    pub fn from_entry(entry: &LocationEntry) -> Self {
        let to_time = entry
            .valid_to
            .as_deref()
            .map(str::trim)
            .filter(|to| !to.is_empty())
            .map(parse_timestamp_lossy);
        Self {
            from_time: parse_timestamp_lossy(&entry.valid_from),
            to_time,
            latitude: parse_coordinate(entry.value.latitude.as_deref()),
            longitude: parse_coordinate(entry.value.longitude.as_deref()),
            elevation: parse_coordinate(entry.value.elevation.as_deref()),
        }
    }

    /// True if `time` lies within the interval, both bounds included.
    pub fn contains(&self, time: &DateTime<Tz>) -> bool {
        self.from_time <= *time && self.to_time.map_or(true, |to| *time <= to)
    }
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Looks up the position of a station at a given time.
///
/// Built from the headers of a filter-observations response. Each station
/// keeps the interval list of the first series that mentions it; on overlap
/// the earliest interval in that list wins.
#[derive(Debug, Clone, Default)]
pub struct StationLocator {
    intervals: HashMap<i64, Vec<StationLocationInterval>>,
}

impl StationLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series(series: &[ObservationSeries]) -> Self {
        let mut locator = Self::new();
        for s in series {
            let station = s.header.id.stationid;
            if locator.intervals.contains_key(&station) {
                continue;
            }
            let intervals = s
                .header
                .extra
                .station
                .location
                .iter()
                .map(StationLocationInterval::from_entry)
                .collect();
            locator.insert(station, intervals);
        }
        debug!("Located {} station(s) from series headers", locator.len());
        locator
    }

    /// Replaces the interval list of `station`.
    pub fn insert(&mut self, station: i64, intervals: Vec<StationLocationInterval>) {
        self.intervals.insert(station, intervals);
    }

    pub fn intervals(&self, station: i64) -> &[StationLocationInterval] {
        self.intervals
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first interval of `station` containing `time`, if any.
    pub fn locate(&self, station: i64, time: &DateTime<Tz>) -> Option<&StationLocationInterval> {
        self.intervals(station).iter().find(|i| i.contains(time))
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
