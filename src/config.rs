//! Runtime configuration for the page.
//!
//! Every default matches the behavior the page ships with; overriding is only
//! useful for embedding the page under a different name or asset layout.

use log::LevelFilter;

use crate::controller::Point;
use crate::error::ConfigError;

/// Tuning for the evasive "no" control.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct EvadeSettings {
    /// Attempts after which the decline control becomes clickable.
    pub unlock_threshold: u8,
    /// Minimum distance from the top/left edge of the surface.
    pub edge_margin: f64,
    /// Space reserved past the control on the bottom/right edge.
    pub far_margin: f64,
    /// How long the wiggle treatment lasts after a jump.
    pub reposition_ms: u32,
    /// Offset from the surface center for the starting position.
    pub recenter_offset: Point,
}

impl Default for EvadeSettings {
    fn default() -> Self {
        Self {
            unlock_threshold: 3,
            edge_margin: 20.0,
            far_margin: 40.0,
            reposition_ms: 400,
            recenter_offset: Point { x: 60.0, y: -30.0 },
        }
    }
}

impl EvadeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unlock_threshold == 0 {
            return Err(ConfigError::Invalid(
                "unlock_threshold must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("edge_margin", self.edge_margin),
            ("far_margin", self.far_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if !self.recenter_offset.x.is_finite() || !self.recenter_offset.y.is_finite() {
            return Err(ConfigError::Invalid("recenter_offset must be finite".into()));
        }
        Ok(())
    }
}

/// Whole-page configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct PageConfig {
    pub evade: EvadeSettings,
    /// Who the question is addressed to.
    pub friend_name: String,
    /// Who is asking.
    pub asker_name: String,
    pub celebration_src: String,
    pub escalation_src: String,
    /// Id of the element the page mounts into (created under `<body>` if absent).
    pub mount_id: String,
    pub log_level: LevelFilter,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            evade: EvadeSettings::default(),
            friend_name: "Luna".into(),
            asker_name: "Bashy".into(),
            celebration_src: "/celebration.mp3".into(),
            escalation_src: "/scary.mp3".into(),
            mount_id: "fr-root".into(),
            log_level: LevelFilter::Info,
        }
    }
}

impl PageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evade.validate()?;
        if self.mount_id.trim().is_empty() {
            return Err(ConfigError::Invalid("mount_id must not be empty".into()));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PageConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PageConfig::default().validate().is_ok());
        let evade = EvadeSettings::default();
        assert_eq!(evade.unlock_threshold, 3);
        assert_eq!(evade.reposition_ms, 400);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut config = PageConfig::default();
        config.evade.unlock_threshold = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn negative_or_nan_margins_are_rejected() {
        let mut evade = EvadeSettings::default();
        evade.edge_margin = -1.0;
        assert!(evade.validate().is_err());
        evade.edge_margin = 20.0;
        evade.far_margin = f64::NAN;
        assert!(evade.validate().is_err());
    }

    #[test]
    fn blank_mount_id_is_rejected() {
        let config = PageConfig {
            mount_id: "  ".into(),
            ..PageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            PageConfig::from_json(r#"{"friend_name":"Mira","evade":{"reposition_ms":250}}"#)
                .unwrap();
        assert_eq!(config.friend_name, "Mira");
        assert_eq!(config.asker_name, "Bashy");
        assert_eq!(config.evade.reposition_ms, 250);
        assert_eq!(config.evade.unlock_threshold, 3);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            PageConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
