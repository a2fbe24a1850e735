use std::env;

#[derive(Clone)]
pub struct Config {
    pub availability_base_url: String,
    pub booking_api_url: String,
    pub booking_api_token: String,
    pub cache_ttl_secs: i64,
    pub past_buffer_mins: i64,
    pub warning_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            availability_base_url: env::var("AVAILABILITY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            booking_api_url: env::var("BOOKING_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1/bookings".to_string()),
            booking_api_token: env::var("BOOKING_API_TOKEN")
                .unwrap_or_else(|_| "test-token-1".to_string()),
            cache_ttl_secs: env::var("SLOT_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("SLOT_CACHE_TTL_SECS must be a number"),
            past_buffer_mins: env::var("PAST_SLOT_BUFFER_MINS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("PAST_SLOT_BUFFER_MINS must be a number"),
            warning_ttl_secs: env::var("WARNING_TTL_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("WARNING_TTL_SECS must be a number"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            availability_base_url: "http://localhost:8000/api/v1".to_string(),
            booking_api_url: "http://localhost:8000/api/v1/bookings".to_string(),
            booking_api_token: "test-token-1".to_string(),
            cache_ttl_secs: 300,
            past_buffer_mins: 5,
            warning_ttl_secs: 3,
        }
    }
}
