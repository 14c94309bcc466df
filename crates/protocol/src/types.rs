//! Shared data types: file kinds and the observation metadata groups.

use serde::{Deserialize, Serialize};

/// Role of a file within one observation submission.
///
/// Serializes to the camelCase strings the server uses for the
/// `uploadType` field and for file-id prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    MainImage,
    AdditionalImage,
    Documentation,
    LightFrame,
    DarkFrame,
    FlatFrame,
    BiasFrame,
    DarkFlat,
}

impl FileKind {
    /// All kinds, in the order the submission form declares them.
    pub const ALL: [FileKind; 8] = [
        FileKind::MainImage,
        FileKind::AdditionalImage,
        FileKind::Documentation,
        FileKind::LightFrame,
        FileKind::DarkFrame,
        FileKind::FlatFrame,
        FileKind::BiasFrame,
        FileKind::DarkFlat,
    ];

    /// Singular identifier used in `uploadType` and file-id prefixes.
    pub fn id_prefix(self) -> &'static str {
        match self {
            FileKind::MainImage => "mainImage",
            FileKind::AdditionalImage => "additionalImage",
            FileKind::Documentation => "documentation",
            FileKind::LightFrame => "lightFrame",
            FileKind::DarkFrame => "darkFrame",
            FileKind::FlatFrame => "flatFrame",
            FileKind::BiasFrame => "biasFrame",
            FileKind::DarkFlat => "darkFlat",
        }
    }

    /// Multipart field name used for direct inclusion in the finalize request.
    pub fn form_key(self) -> &'static str {
        match self {
            FileKind::MainImage => "mainImage",
            FileKind::AdditionalImage => "additionalImages",
            FileKind::Documentation => "documentation",
            FileKind::LightFrame => "lightFrames",
            FileKind::DarkFrame => "darkFrames",
            FileKind::FlatFrame => "flatFrames",
            FileKind::BiasFrame => "biasFrames",
            FileKind::DarkFlat => "darkFlats",
        }
    }

    /// Whether the form accepts more than one file of this kind.
    pub fn is_multi(self) -> bool {
        !matches!(self, FileKind::MainImage)
    }
}

// ---------------------------------------------------------------------------
// Metadata groups
// ---------------------------------------------------------------------------

/// Exposure and framing details of the processed image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// ISO 8601, produced by the caller.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub capture_date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_score: Option<f64>,
}

/// Observation site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bortle_class: Option<u8>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// One piece of equipment used for the capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearItem {
    pub gear_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub brand: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
}

/// Conditions of the observation session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// ISO 8601 date, produced by the caller.
    pub session_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub weather_conditions: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seeing_conditions: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub moon_phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_pollution_index: Option<u8>,
}

/// The celestial object the observation targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialObjectLink {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_ascension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declination: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}
