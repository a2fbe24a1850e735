use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::domain::models::slot::AvailabilityRecord;
use crate::domain::ports::AvailabilitySource;
use crate::error::AppError;

pub struct HttpAvailabilitySource {
    client: Client,
    base_url: String,
}

impl HttpAvailabilitySource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[derive(Deserialize)]
struct AvailabilityResponse {
    intervals: Vec<AvailabilityRecord>,
}

#[derive(Deserialize)]
struct OccupiedSlotsResponse {
    slots: Vec<NaiveDateTime>,
}

#[async_trait]
impl AvailabilitySource for HttpAvailabilitySource {
    async fn fetch_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_booking: Option<&str>,
    ) -> Result<Vec<AvailabilityRecord>, AppError> {
        let mut query: Vec<(&str, String)> = vec![
            ("start", start.format("%Y-%m-%dT%H:%M:%S").to_string()),
            ("end", end.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ];
        if let Some(id) = exclude_booking {
            query.push(("exclude_booking", id.to_string()));
        }

        let res = self
            .client
            .get(format!("{}/availability", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Availability service connection error: {}", e);
                error!("{}", msg);
                AppError::Fetch(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Availability service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Fetch(msg));
        }

        let body: AvailabilityResponse = res
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("Invalid availability payload: {}", e)))?;

        Ok(body.intervals)
    }

    async fn occupied_slots(&self, booking_id: &str) -> Result<Vec<NaiveDateTime>, AppError> {
        let res = self
            .client
            .get(format!("{}/bookings/{}/slots", self.base_url, booking_id))
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Availability service connection error: {}", e);
                error!("{}", msg);
                AppError::Fetch(msg)
            })?;

        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Booking {}", booking_id)));
        }
        if !res.status().is_success() {
            let msg = format!("Occupied slots lookup failed. Status: {}", res.status());
            error!("{}", msg);
            return Err(AppError::Fetch(msg));
        }

        let body: OccupiedSlotsResponse = res
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("Invalid occupied-slots payload: {}", e)))?;

        Ok(body.slots)
    }
}
