//! Pilot identity from configuration.

use aiatc_domain::PilotIdentity;
use chrono::NaiveDate;

use crate::infrastructure::config::PilotConfig;
use crate::infrastructure::ports::PilotIdentityPort;

/// Pilot identity fixed at startup. Without a callsign no pilot is signed in.
pub struct ConfiguredPilot {
    pilot: Option<PilotIdentity>,
}

impl ConfiguredPilot {
    /// `today` stands in for an unset licence date.
    pub fn new(config: &PilotConfig, today: NaiveDate) -> Self {
        let pilot = config.callsign.as_ref().map(|callsign| PilotIdentity {
            callsign: callsign.clone(),
            name: config
                .name
                .clone()
                .unwrap_or_else(|| PilotIdentity::UNKNOWN_NAME.to_string()),
            licensed_since: config.licensed_since.unwrap_or(today),
        });
        Self { pilot }
    }
}

impl PilotIdentityPort for ConfiguredPilot {
    fn current_pilot(&self) -> Option<PilotIdentity> {
        self.pilot.clone()
    }
}
