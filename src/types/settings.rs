use serde::{Deserialize, Serialize};
use std::fmt;

/// A switchable part of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Dashboard,
    Upload,
    Insights,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feature::Dashboard => "dashboard",
            Feature::Upload => "upload",
            Feature::Insights => "insights",
        })
    }
}

/// Feature flags stored under `adminSettings`.
/// Fields missing from a stored record fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminSettings {
    pub dashboard_enabled: bool,
    pub upload_enabled: bool,
    pub insights_enabled: bool,
    pub max_uploads: u32,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            dashboard_enabled: true,
            upload_enabled: true,
            insights_enabled: true,
            max_uploads: 5,
        }
    }
}

impl AdminSettings {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Dashboard => self.dashboard_enabled,
            Feature::Upload => self.upload_enabled,
            Feature::Insights => self.insights_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_camel_case_keys() {
        let json = serde_json::to_value(AdminSettings::default()).unwrap();
        assert_eq!(json["dashboardEnabled"], true);
        assert_eq!(json["maxUploads"], 5);
    }

    #[test]
    fn partial_record_fills_defaults() {
        let s: AdminSettings = serde_json::from_str(r#"{"uploadEnabled":false}"#).unwrap();
        assert!(!s.upload_enabled);
        assert!(s.dashboard_enabled);
        assert_eq!(s.max_uploads, 5);
    }
}
