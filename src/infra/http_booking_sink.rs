use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use crate::domain::models::booking::BookingSubmission;
use crate::domain::ports::BookingSink;
use crate::error::AppError;

pub struct HttpBookingSink {
    client: Client,
    api_url: String,
    api_token: String,
}

impl HttpBookingSink {
    pub fn new(api_url: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_token,
        }
    }
}

#[async_trait]
impl BookingSink for HttpBookingSink {
    async fn submit(&self, submission: &BookingSubmission) -> Result<(), AppError> {
        let res = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Booking service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Booking submission failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
