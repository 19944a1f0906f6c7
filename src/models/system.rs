//! System info model for the Manage API.

use serde::Deserialize;

/// Response from the system info endpoint, used for connectivity checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// Manage server version.
    #[serde(default)]
    pub version: Option<String>,

    /// Whether this is a cloud-hosted instance.
    #[serde(default)]
    pub is_cloud: Option<bool>,

    /// Server time zone name.
    #[serde(default)]
    pub server_time_zone: Option<String>,
}

impl SystemInfo {
    /// Returns the version string or "unknown".
    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_info_decodes() {
        let info: SystemInfo = serde_json::from_str(
            r#"{"version": "v2024.1", "isCloud": true, "serverTimeZone": "Eastern Standard Time"}"#,
        )
        .unwrap();
        assert_eq!(info.display_version(), "v2024.1");
        assert_eq!(info.is_cloud, Some(true));
    }

    #[test]
    fn test_system_info_tolerates_missing_fields() {
        let info: SystemInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.display_version(), "unknown");
    }
}
