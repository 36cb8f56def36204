//! randomuser.me persona client
//!
//! Implements the PersonaPort trait. The service is seeded with
//! `<CODE>-<YYYY-MM-DD>`, so the same airport gets the same controller all day.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use aiatc_domain::{ControllerPersona, Gender, PersonaSeed};

use crate::infrastructure::ports::{PersonaError, PersonaPort};

/// Default persona service base URL.
pub const DEFAULT_RANDOMUSER_BASE_URL: &str = "https://randomuser.me";

/// Nationalities controllers are drawn from.
pub const DEFAULT_NATIONALITIES: &str = "au,br,ca,ch,de,us,dk,fr,gb,in,mx,nl,no,nz,rs,tr,ua";

/// Client for the randomuser.me API
#[derive(Clone)]
pub struct RandomUserClient {
    client: Client,
    base_url: String,
    nationalities: String,
}

impl RandomUserClient {
    pub fn new(base_url: &str, nationalities: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            nationalities: nationalities.to_string(),
        }
    }

    fn query(&self, seed: &PersonaSeed) -> Vec<(&'static str, String)> {
        vec![
            ("gender", "male".to_string()),
            ("nat", self.nationalities.clone()),
            ("seed", seed.to_string()),
        ]
    }
}

impl Default for RandomUserClient {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOMUSER_BASE_URL, DEFAULT_NATIONALITIES)
    }
}

#[async_trait]
impl PersonaPort for RandomUserClient {
    async fn generate(&self, seed: &PersonaSeed) -> Result<ControllerPersona, PersonaError> {
        let response = self
            .client
            .get(format!("{}/api/", self.base_url))
            .query(&self.query(seed))
            .send()
            .await
            .map_err(|e| PersonaError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PersonaError::RequestFailed(format!("{status}: {error_text}")));
        }

        let body: RandomUserResponse = response
            .json()
            .await
            .map_err(|e| PersonaError::InvalidResponse(e.to_string()))?;

        convert_response(body)
    }
}

fn convert_response(response: RandomUserResponse) -> Result<ControllerPersona, PersonaError> {
    let user = response
        .results
        .into_iter()
        .next()
        .ok_or(PersonaError::Empty)?;

    Ok(ControllerPersona {
        first_name: user.name.first,
        last_name: user.name.last,
        age: user.dob.age,
        gender: user.gender,
    })
}

// =============================================================================
// randomuser.me API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUser>,
}

#[derive(Debug, Deserialize)]
struct RandomUser {
    gender: Gender,
    name: RandomUserName,
    dob: RandomUserDob,
}

#[derive(Debug, Deserialize)]
struct RandomUserName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct RandomUserDob {
    age: u32,
}
