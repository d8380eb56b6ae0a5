use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

/// A planned/actual-hours assignment of a set of resources to a
/// project+role for one week of a month.
///
/// Membership is an embedded id list rather than a join table; a resource
/// is "in" the allocation when its id appears in `resource_ids`. One row
/// exists per (project, role, year, month, week) slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Row id. Left empty by clients, the tracker derives one from the slot.
    #[serde(default)]
    pub id: String,
    pub project_id: String,
    pub role_id: String,
    #[serde(default)]
    pub resource_ids: Vec<String>,
    pub year: i32,
    pub month: u32,
    pub week: u32,
    #[serde(default, deserialize_with = "hours_from_number_or_string")]
    pub planned_hours: f64,
    #[serde(default, deserialize_with = "hours_from_number_or_string")]
    pub actual_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Upstream stores hour columns as fixed-point decimal strings ("12.5");
/// JSON produced by this crate carries plain numbers. Accept both and
/// coerce once here so everything downstream works on f64.
fn hours_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHours {
        Number(f64),
        Text(String),
    }

    match RawHours::deserialize(deserializer)? {
        RawHours::Number(value) => Ok(value),
        RawHours::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| serde::de::Error::custom(format!("invalid hours '{text}': {err}"))),
    }
}

impl Allocation {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        role_id: impl Into<String>,
        year: i32,
        month: u32,
        week: u32,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            role_id: role_id.into(),
            resource_ids: Vec::new(),
            year,
            month,
            week,
            planned_hours: 0.0,
            actual_hours: 0.0,
            notes: None,
        }
    }

    pub fn with_resources<I, S>(mut self, resource_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_ids = resource_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hours(mut self, planned: f64, actual: f64) -> Self {
        self.planned_hours = planned;
        self.actual_hours = actual;
        self
    }

    /// Set-membership check for the embedded id list.
    pub fn includes_resource(&self, resource_id: &str) -> bool {
        self.resource_ids.iter().any(|id| id == resource_id)
    }

    /// Whether the row belongs to the given calendar period.
    pub fn is_for_period(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }

    pub fn to_dataframe_row(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(10);

        let id_data: [&str; 1] = [self.id.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("id"), id_data).into_column());

        let project_data: [&str; 1] = [self.project_id.as_str()];
        columns
            .push(Series::new(PlSmallStr::from_static("project_id"), project_data).into_column());

        let role_data: [&str; 1] = [self.role_id.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("role_id"), role_data).into_column());

        columns
            .push(Self::series_from_string_list("resource_ids", &self.resource_ids).into_column());

        let year_data: [i32; 1] = [self.year];
        columns.push(Series::new(PlSmallStr::from_static("year"), year_data).into_column());

        let month_data: [i32; 1] = [self.month as i32];
        columns.push(Series::new(PlSmallStr::from_static("month"), month_data).into_column());

        let week_data: [i32; 1] = [self.week as i32];
        columns.push(Series::new(PlSmallStr::from_static("week"), week_data).into_column());

        let planned_data: [f64; 1] = [self.planned_hours];
        columns
            .push(Series::new(PlSmallStr::from_static("planned_hours"), planned_data).into_column());

        let actual_data: [f64; 1] = [self.actual_hours];
        columns
            .push(Series::new(PlSmallStr::from_static("actual_hours"), actual_data).into_column());

        let notes_data: [Option<&str>; 1] = [self.notes.as_deref()];
        columns.push(Series::new(PlSmallStr::from_static("notes"), notes_data).into_column());

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let id = df
            .column("id")?
            .str()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("allocation row missing id".into()))?
            .to_string();

        let project_id = df
            .column("project_id")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let role_id = df
            .column("role_id")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let resource_ids =
            Self::vec_from_string_list(df.column("resource_ids")?.list()?, row_idx)?;

        Ok(Self {
            id,
            project_id,
            role_id,
            resource_ids,
            year: df.column("year")?.i32()?.get(row_idx).unwrap_or(0),
            month: df.column("month")?.i32()?.get(row_idx).unwrap_or(0).max(0) as u32,
            week: df.column("week")?.i32()?.get(row_idx).unwrap_or(0).max(0) as u32,
            planned_hours: df.column("planned_hours")?.f64()?.get(row_idx).unwrap_or(0.0),
            actual_hours: df.column("actual_hours")?.f64()?.get(row_idx).unwrap_or(0.0),
            notes: df
                .column("notes")?
                .str()?
                .get(row_idx)
                .map(ToOwned::to_owned),
        })
    }

    fn series_from_string_list(name: &str, values: &[String]) -> Series {
        let inner_values: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        let inner = Series::new(PlSmallStr::from_static(""), inner_values);
        Series::new(name.into(), &[inner])
    }

    fn vec_from_string_list(list: &ListChunked, row_idx: usize) -> PolarsResult<Vec<String>> {
        if let Some(series) = list.get_as_series(row_idx) {
            Ok(series
                .str()?
                .into_iter()
                .flatten()
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>())
        } else {
            Ok(Vec::new())
        }
    }
}
