//! Payload validation for video create, replace, and patch requests.
//!
//! Validators never short-circuit: every violated constraint is collected
//! into a [`ValidationReport`] so callers can report all problems at once.
//! The `into_*` conversions on [`VideoRequest`] run the matching validator
//! and only then build typed values, which is what makes the later merge and
//! store steps infallible with respect to field types.

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::models::{Location, NewVideo, Video, VideoPatch, VideoPayload, VideoRequest};

const FIELD_VIDEO: &str = "Video";
const FIELD_ID: &str = "Video.Id";
const FIELD_NAME: &str = "Video.Name";
const FIELD_LOCATION: &str = "Video.Location";
const FIELD_LAT: &str = "Video.Location.Lat";
const FIELD_LONG: &str = "Video.Location.Long";

/// How strictly coordinates are checked.
///
/// `Permissive` accepts any numeric value. `Strict` additionally requires
/// latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinateBounds {
    #[default]
    Permissive,
    Strict,
}

impl CoordinateBounds {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            CoordinateBounds::Strict
        } else {
            CoordinateBounds::Permissive
        }
    }

    fn allows(self, value: f64, limit: f64) -> bool {
        match self {
            CoordinateBounds::Permissive => true,
            CoordinateBounds::Strict => (-limit..=limit).contains(&value),
        }
    }
}

/// Which constraint a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    NotString,
    Empty,
    NotNumeric,
    OutOfRange,
    IdMismatch,
}

/// One violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: &str, kind: ViolationKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ViolationKind::Missing => "is required",
            ViolationKind::NotString => "must be a string",
            ViolationKind::Empty => "must not be empty",
            ViolationKind::NotNumeric => "must be numeric",
            ViolationKind::OutOfRange => "is out of range",
            ViolationKind::IdMismatch => "must match the id in the path",
        };
        write!(f, "{} {}", self.field, what)
    }
}

/// Outcome of a validation pass: valid when no violations were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }

    fn push(&mut self, field: &str, kind: ViolationKind) {
        self.violations.push(Violation::new(field, kind));
    }

    fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<Violation>> for ValidationReport {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "ok");
        }
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Interpret a JSON value as a float.
///
/// Numbers are taken as-is; strings are trimmed and parsed. Everything else
/// (null, booleans, arrays, objects) is not numeric, and neither is a string
/// that parses to NaN or an infinity, since JSON cannot carry those back out.
pub fn parse_number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

// =============================================================================
// FIELD CHECKS
// =============================================================================

fn check_name(report: &mut ValidationReport, name: Option<&JsonValue>, required: bool) {
    match name {
        None if required => report.push(FIELD_NAME, ViolationKind::Missing),
        None => {}
        Some(JsonValue::String(s)) if s.trim().is_empty() => {
            report.push(FIELD_NAME, ViolationKind::Empty)
        }
        Some(JsonValue::String(_)) => {}
        Some(_) => report.push(FIELD_NAME, ViolationKind::NotString),
    }
}

fn check_coordinate(
    report: &mut ValidationReport,
    field: &str,
    value: Option<&JsonValue>,
    required: bool,
    limit: f64,
    bounds: CoordinateBounds,
) {
    match value {
        None if required => report.push(field, ViolationKind::Missing),
        None => {}
        Some(raw) => match parse_number(raw) {
            None => report.push(field, ViolationKind::NotNumeric),
            Some(n) if !bounds.allows(n, limit) => report.push(field, ViolationKind::OutOfRange),
            Some(_) => {}
        },
    }
}

fn check_location(
    report: &mut ValidationReport,
    payload: &VideoPayload,
    required: bool,
    bounds: CoordinateBounds,
) {
    if required && payload.location.is_none() {
        report.push(FIELD_LOCATION, ViolationKind::Missing);
        return;
    }
    check_coordinate(report, FIELD_LAT, payload.lat(), required, 90.0, bounds);
    check_coordinate(report, FIELD_LONG, payload.long(), required, 180.0, bounds);
}

fn check_id(report: &mut ValidationReport, id: Option<&JsonValue>) {
    match id {
        None => report.push(FIELD_ID, ViolationKind::Missing),
        Some(JsonValue::String(s)) if s.is_empty() => report.push(FIELD_ID, ViolationKind::Empty),
        Some(JsonValue::String(_)) => {}
        Some(_) => report.push(FIELD_ID, ViolationKind::NotString),
    }
}

// =============================================================================
// VALIDATORS
// =============================================================================

/// Full-record check for creation: `Name` and both coordinates are required.
pub fn validate_for_create(request: &VideoRequest, bounds: CoordinateBounds) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(payload) = request.video.as_ref() else {
        report.push(FIELD_VIDEO, ViolationKind::Missing);
        return report;
    };
    check_name(&mut report, payload.name.as_ref(), true);
    check_location(&mut report, payload, true, bounds);
    report
}

/// Full-record check that also requires a string `Id`.
pub fn validate_for_replace(request: &VideoRequest, bounds: CoordinateBounds) -> ValidationReport {
    let mut report = validate_for_create(request, bounds);
    if let Some(payload) = request.video.as_ref() {
        check_id(&mut report, payload.id.as_ref());
    }
    report
}

/// Partial check: nothing is required, but anything supplied must have the
/// right type. An absent `Location` means no location change.
pub fn validate_for_patch(request: &VideoRequest, bounds: CoordinateBounds) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(payload) = request.video.as_ref() else {
        report.push(FIELD_VIDEO, ViolationKind::Missing);
        return report;
    };
    check_name(&mut report, payload.name.as_ref(), false);
    check_location(&mut report, payload, false, bounds);
    report
}

// =============================================================================
// TYPED CONVERSIONS
// =============================================================================

fn name_of(payload: &VideoPayload) -> Option<String> {
    payload
        .name
        .as_ref()
        .and_then(|n| n.as_str())
        .map(str::to_string)
}

fn required_location(payload: &VideoPayload) -> Option<Location> {
    let lat = payload.lat().and_then(parse_number)?;
    let long = payload.long().and_then(parse_number)?;
    Some(Location::new(lat, long))
}

impl VideoRequest {
    /// Validate for creation and extract the typed fields.
    pub fn into_new_video(self, bounds: CoordinateBounds) -> Result<NewVideo, ValidationReport> {
        let report = validate_for_create(&self, bounds);
        let payload = self.video.as_ref();
        match (
            payload.and_then(name_of),
            payload.and_then(required_location),
        ) {
            (Some(name), Some(location)) if report.is_valid() => Ok(NewVideo { name, location }),
            _ => Err(report),
        }
    }

    /// Validate a full replacement for `path_id` and build the record to store.
    ///
    /// A body `Id`, when supplied, must equal `path_id`; the path id is then
    /// pinned into the payload before the replace check runs.
    pub fn into_replacement(
        self,
        path_id: &str,
        bounds: CoordinateBounds,
    ) -> Result<Video, ValidationReport> {
        let mut pre = ValidationReport::default();
        if let Some(body_id) = self.video.as_ref().and_then(|p| p.id.as_ref()) {
            match body_id {
                JsonValue::String(s) if s == path_id => {}
                JsonValue::String(_) => pre.push(FIELD_ID, ViolationKind::IdMismatch),
                _ => pre.push(FIELD_ID, ViolationKind::NotString),
            }
        }

        let pinned = VideoRequest {
            video: self.video.map(|p| p.with_id(path_id)),
        };
        let mut report = validate_for_replace(&pinned, bounds);
        pre.violations.append(&mut report.violations);
        pre.into_result()?;

        let new_video = pinned.into_new_video(bounds)?;
        Ok(new_video.into_video(path_id.to_string()))
    }

    /// Validate a partial update and extract the supplied fields.
    pub fn into_patch(self, bounds: CoordinateBounds) -> Result<VideoPatch, ValidationReport> {
        validate_for_patch(&self, bounds).into_result()?;
        let payload = self.video.unwrap_or_default();
        Ok(VideoPatch {
            name: name_of(&payload),
            lat: payload.lat().and_then(parse_number),
            long: payload.long().and_then(parse_number),
        })
    }
}
