//! Turns raw worksheet rows into typed records.
//!
//! Rows are handled one at a time: a row with an unreadable timestamp,
//! coordinate or radius is set aside as a [`RowParseError`] and the rest of
//! the batch carries on. Blank coordinates are not an error, the record just
//! ends up without a position.

use chrono::NaiveDateTime;
use geo_types::Point;
use rand::Rng;
use thiserror::Error;
use volunteer_atlas_lib::{
    columns::*,
    location::{Location, Schedule},
    request::Request,
    text::title_case,
    volunteer::Volunteer,
};

use crate::{sheets::Worksheet, DataManagerError};

mod parse;

pub use parse::{jitter, parse_coordinate, parse_radius_km, parse_timestamp};

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{worksheet} row {row}: cannot read {column} from {value:?}")]
pub struct RowParseError {
    pub worksheet: String,
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

/// Records that made it through, plus the rows that were set aside.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RowParseError>,
}

impl<T> Default for Normalized<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

struct CommonColumns {
    timestamp: usize,
    country: usize,
    city: usize,
    latitude: usize,
    longitude: usize,
    /// Whichever longitude header the sheet actually carries.
    longitude_name: &'static str,
    services: usize,
    day_of_week: usize,
    time_of_day: usize,
    languages: usize,
    reimbursement: usize,
}

impl CommonColumns {
    fn resolve(sheet: &Worksheet) -> Result<Self, DataManagerError> {
        let longitude = sheet.column_any(&[LONGITUDE, LONGITUDE_FALLBACK])?;
        let longitude_name = if sheet.header[longitude] == LONGITUDE { LONGITUDE } else { LONGITUDE_FALLBACK };

        Ok(Self {
            timestamp: sheet.column(TIMESTAMP)?,
            country: sheet.column(COUNTRY)?,
            city: sheet.column(CITY)?,
            latitude: sheet.column(LATITUDE)?,
            longitude,
            longitude_name,
            services: sheet.column(SERVICES)?,
            day_of_week: sheet.column(DAY_OF_WEEK)?,
            time_of_day: sheet.column(TIME_OF_DAY)?,
            languages: sheet.column(LANGUAGES)?,
            reimbursement: sheet.column(REIMBURSEMENT)?,
        })
    }
}

struct Common {
    timestamp: NaiveDateTime,
    location: Location,
    services: String,
    schedule: Schedule,
    languages: String,
    reimbursement: String,
}

struct RowReader<'a> {
    sheet: &'a Worksheet,
    row: usize,
}

impl<'a> RowReader<'a> {
    fn text(&self, column: usize) -> String {
        self.sheet.cell(self.row, column).trim().to_string()
    }

    fn error(&self, column: &'static str, index: usize) -> RowParseError {
        RowParseError {
            worksheet: self.sheet.title.clone(),
            row: Worksheet::sheet_row_number(self.row),
            column,
            value: self.sheet.cell(self.row, index).to_string(),
        }
    }

    fn coordinate(&self, column: &'static str, index: usize) -> Result<Option<f64>, RowParseError> {
        parse_coordinate(self.sheet.cell(self.row, index)).map_err(|_| self.error(column, index))
    }

    fn common<R: Rng + ?Sized>(&self, cols: &CommonColumns, max_offset: f64, rng: &mut R) -> Result<Common, RowParseError> {
        let timestamp = parse_timestamp(self.sheet.cell(self.row, cols.timestamp))
            .ok_or_else(|| self.error(TIMESTAMP, cols.timestamp))?;

        let latitude = self.coordinate(LATITUDE, cols.latitude)?;
        let longitude = self.coordinate(cols.longitude_name, cols.longitude)?;

        // Both axes draw independently.
        let position = match (latitude, longitude) {
            (Some(lat), Some(lon)) => {
                let lat = jitter(lat, max_offset, rng);
                let lon = jitter(lon, max_offset, rng);
                Some(Point::new(lon, lat))
            }
            _ => None,
        };

        Ok(Common {
            timestamp,
            location: Location::new(self.text(cols.country), title_case(&self.text(cols.city)), position),
            services: self.text(cols.services),
            schedule: Schedule {
                day_of_week: self.text(cols.day_of_week),
                time_of_day: self.text(cols.time_of_day),
            },
            languages: self.text(cols.languages),
            reimbursement: self.text(cols.reimbursement),
        })
    }
}

fn normalize_rows<T, R, F>(sheet: &Worksheet, rng: &mut R, mut read: F) -> Normalized<T>
where
    R: Rng + ?Sized,
    F: FnMut(&RowReader, &mut R) -> Result<T, RowParseError>,
{
    let mut normalized = Normalized::default();

    for row in 0..sheet.len() {
        let reader = RowReader { sheet, row };

        // Completely blank rows are left over from deleted submissions.
        if sheet.rows[row].iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        match read(&reader, rng) {
            Ok(record) => normalized.records.push(record),
            Err(err) => {
                tracing::warn!("Skipping row: {err}");
                normalized.rejected.push(err);
            }
        }
    }

    normalized
}

pub fn normalize_volunteers<R: Rng + ?Sized>(sheet: &Worksheet, max_offset: f64, rng: &mut R) -> Result<Normalized<Volunteer>, DataManagerError> {
    let cols = CommonColumns::resolve(sheet)?;
    let given_name = sheet.column(GIVEN_NAME)?;
    let email = sheet.column(EMAIL_ADDRESS)?;
    let transportation = sheet.column(TRANSPORTATION)?;
    let radius = sheet.column(RADIUS)?;
    let about_me = sheet.column(ABOUT_ME)?;
    let health = sheet.column(HEALTH)?;
    let availability = sheet.column(AVAILABILITY)?;

    Ok(normalize_rows(sheet, rng, |reader, rng| {
        let common = reader.common(&cols, max_offset, rng)?;
        let radius_km = parse_radius_km(sheet.cell(reader.row, radius)).ok_or_else(|| reader.error(RADIUS, radius))?;

        Ok(Volunteer {
            timestamp: common.timestamp,
            given_name: reader.text(given_name),
            email: reader.text(email),
            location: common.location,
            services: common.services,
            transportation: reader.text(transportation),
            radius_km,
            schedule: common.schedule,
            languages: common.languages,
            reimbursement: common.reimbursement,
            about_me: reader.text(about_me),
            health: reader.text(health),
            availability: reader.text(availability),
        })
    }))
}

pub fn normalize_requests<R: Rng + ?Sized>(sheet: &Worksheet, max_offset: f64, rng: &mut R) -> Result<Normalized<Request>, DataManagerError> {
    let cols = CommonColumns::resolve(sheet)?;
    let request_type = sheet.column(REQUEST_TYPE)?;

    Ok(normalize_rows(sheet, rng, |reader, rng| {
        let common = reader.common(&cols, max_offset, rng)?;

        Ok(Request {
            timestamp: common.timestamp,
            location: common.location,
            services: common.services,
            request_type: reader.text(request_type),
            schedule: common.schedule,
            languages: common.languages,
            reimbursement: common.reimbursement,
        })
    }))
}
