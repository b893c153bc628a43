// ABOUTME: Request and response types for the Fitness dataset:aggregate endpoint
// ABOUTME: Sparse responses collapse to zero steps rather than errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::day_window::TimeWindow;
use crate::constants::google_fit::{ESTIMATED_STEPS_SOURCE, STEP_COUNT_DATA_TYPE};
use serde::{Deserialize, Deserializer, Serialize};

/// One data type/source pair to aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBy {
    /// Data type identifier (e.g. `com.google.step_count.delta`)
    pub data_type_name: String,
    /// Data source identifier
    pub data_source_id: String,
}

/// Fixed-width time bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketByTime {
    /// Bucket width in milliseconds
    pub duration_millis: i64,
}

/// Body of `POST users/me/dataset:aggregate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    /// Data types to aggregate
    pub aggregate_by: Vec<AggregateBy>,
    /// Bucketing strategy
    pub bucket_by_time: BucketByTime,
    /// Window start (epoch millis, inclusive)
    pub start_time_millis: i64,
    /// Window end (epoch millis, exclusive)
    pub end_time_millis: i64,
}

impl AggregateRequest {
    /// Estimated step-count deltas over `window`, bucketed every `bucket_millis`
    #[must_use]
    pub fn step_count(window: TimeWindow, bucket_millis: i64) -> Self {
        Self {
            aggregate_by: vec![AggregateBy {
                data_type_name: STEP_COUNT_DATA_TYPE.to_owned(),
                data_source_id: ESTIMATED_STEPS_SOURCE.to_owned(),
            }],
            bucket_by_time: BucketByTime {
                duration_millis: bucket_millis,
            },
            start_time_millis: window.start_millis,
            end_time_millis: window.end_millis,
        }
    }
}

/// Aggregate response: one bucket per time slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// Buckets in the order the provider returned them
    #[serde(default)]
    pub bucket: Vec<AggregateBucket>,
}

/// One time slice of an aggregate response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBucket {
    /// Slice start (epoch millis); the API encodes int64 values as strings
    #[serde(default, deserialize_with = "int64_value")]
    pub start_time_millis: Option<i64>,
    /// Slice end (epoch millis)
    #[serde(default, deserialize_with = "int64_value")]
    pub end_time_millis: Option<i64>,
    /// One dataset per aggregated data type
    #[serde(default)]
    pub dataset: Vec<AggregateDataset>,
}

/// Points for one data type inside a bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateDataset {
    /// Source the points were derived from
    #[serde(default)]
    pub data_source_id: Option<String>,
    /// Aggregated points
    #[serde(default)]
    pub point: Vec<DataPoint>,
}

/// A single aggregated measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// Data type of the values
    #[serde(default)]
    pub data_type_name: Option<String>,
    /// Typed values; step counts use `intVal`
    #[serde(default)]
    pub value: Vec<PointValue>,
}

/// A typed value within a point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointValue {
    /// Integer value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_val: Option<i64>,
    /// Floating point value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fp_val: Option<f64>,
}

impl AggregateBucket {
    /// First dataset → first point → first value, as a step count
    ///
    /// Missing levels and negative values count as zero steps.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.dataset
            .first()
            .and_then(|dataset| dataset.point.first())
            .and_then(|point| point.value.first())
            .and_then(|value| value.int_val)
            .and_then(|steps| u64::try_from(steps).ok())
            .unwrap_or(0)
    }
}

impl AggregateResponse {
    /// Step count of the first bucket, or zero when there is none
    #[must_use]
    pub fn first_bucket_steps(&self) -> u64 {
        self.bucket.first().map_or(0, AggregateBucket::steps)
    }
}

fn int64_value<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(i64),
        Text(String),
    }

    match Option::<Int64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Int64::Number(value)) => Ok(Some(value)),
        Some(Int64::Text(text)) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_provider_field_names() {
        let request = AggregateRequest::step_count(
            TimeWindow {
                start_millis: 1_000,
                end_millis: 2_000,
            },
            86_400_000,
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["aggregateBy"][0]["dataTypeName"],
            "com.google.step_count.delta"
        );
        assert_eq!(
            json["aggregateBy"][0]["dataSourceId"],
            "derived:com.google.step_count.delta:com.google.android.gms:estimated_steps"
        );
        assert_eq!(json["bucketByTime"]["durationMillis"], 86_400_000);
        assert_eq!(json["startTimeMillis"], 1_000);
        assert_eq!(json["endTimeMillis"], 2_000);
    }

    #[test]
    fn test_first_point_value_is_extracted() {
        let body = r#"{
            "bucket": [{
                "startTimeMillis": "1700000000000",
                "endTimeMillis": "1700086400000",
                "dataset": [{
                    "dataSourceId": "derived:com.google.step_count.delta:com.google.android.gms:aggregated",
                    "point": [{"dataTypeName": "com.google.step_count.delta", "value": [{"intVal": 4231, "mapVal": []}]}]
                }]
            }]
        }"#;
        let response: AggregateResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.first_bucket_steps(), 4231);
        assert_eq!(response.bucket[0].start_time_millis, Some(1_700_000_000_000));
    }

    #[test]
    fn test_sparse_levels_default_to_zero() {
        for body in [
            r"{}",
            r#"{"bucket": []}"#,
            r#"{"bucket": [{"dataset": []}]}"#,
            r#"{"bucket": [{"dataset": [{"point": []}]}]}"#,
            r#"{"bucket": [{"dataset": [{"point": [{"value": []}]}]}]}"#,
            r#"{"bucket": [{"dataset": [{"point": [{"value": [{"fpVal": 1.5}]}]}]}]}"#,
        ] {
            let response: AggregateResponse = serde_json::from_str(body).unwrap();
            assert_eq!(response.first_bucket_steps(), 0, "body: {body}");
        }
    }
}
