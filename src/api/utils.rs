use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FeedError;

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &str,
) -> Result<Value, FeedError> {
    let url = format!("{}/{}?{}", base_url, endpoint, params);
    let res = client.get(&url).send().await?;

    if !res.status().is_success() {
        return Err(FeedError::Status(res.status()));
    }

    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}

pub fn parse_response_object<T>(data: Value, error_msg: &str) -> Result<T, FeedError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Object(obj) => serde_json::from_value(Value::Object(obj))
            .map_err(|e| FeedError::Parse(format!("{}: {}", error_msg, e))),
        _ => Err(FeedError::Parse(
            "Unexpected API response format: not an object".to_string(),
        )),
    }
}

/// Unix timestamp of midnight UTC on `date`.
pub fn unix_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
