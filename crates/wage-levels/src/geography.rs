use crate::reference;
use serde::{Deserialize, Serialize};

/// A county resolved to the two keys the regional model needs: the state
/// code for the multiplier and the county FIPS as the sub-area id.
///
/// Wage-survey area codes live in a different namespace and are never
/// derived from FIPS.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountyLocation {
    pub fips: String,
    pub state_code: Option<String>,
}

impl CountyLocation {
    /// Resolves a five digit county FIPS. The first two digits select the
    /// state; unknown prefixes leave `state_code` empty so callers fall back
    /// to the neutral multiplier.
    pub fn from_fips(fips: &str) -> Self {
        let fips = fips.trim().to_string();
        let state_code = fips
            .get(..2)
            .and_then(reference::state_for_fips)
            .map(|state| state.code.to_string());
        Self { fips, state_code }
    }

    pub fn new(state_code: impl Into<String>, sub_area_id: impl Into<String>) -> Self {
        Self {
            fips: sub_area_id.into(),
            state_code: Some(state_code.into()),
        }
    }

    pub fn state_code(&self) -> &str {
        self.state_code.as_deref().unwrap_or_default()
    }

    pub fn sub_area_id(&self) -> &str {
        &self.fips
    }

    pub fn state_name(&self) -> Option<&'static str> {
        self.state_code
            .as_deref()
            .and_then(reference::state)
            .map(|state| state.name)
    }
}
