//! Application settings

use std::path::Path;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Application settings. Every field falls back to its default when missing
/// from the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Application metadata
    pub app: AppMetadata,

    /// Feature switches
    pub features: FeatureFlags,

    /// Limits of the free plan
    #[serde(deserialize_with = "normal_plan")]
    pub normal_plan: PlanLimits,

    /// Limits of the paid plan
    #[serde(deserialize_with = "pro_plan")]
    pub pro_plan: PlanLimits,

    /// Timing of the simulated processing run
    pub processing: ProcessingSettings,

    /// Whether to use dark mode
    pub dark_mode: bool,

    /// Whether edits auto-save
    pub auto_save: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub community: bool,
    pub notifications: bool,
    pub data_processing: bool,
    pub ai_assistant: bool,
    pub collaboration: bool,
    pub export: bool,
}

/// Per-plan quotas. `None` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub max_workspaces: Option<usize>,
    pub max_dashboards: Option<usize>,
    pub max_reports: Option<usize>,
    pub max_data_sources: Option<usize>,
    pub max_collaborators: Option<usize>,
    pub can_publish_to_community: bool,
    pub can_export_pdf: bool,
    pub can_use_advanced_charts: bool,
}

/// Timing of the scripted progress animation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// Delay between progress ticks
    pub tick_ms: u64,

    /// Progress step per tick within one operation (percent)
    pub step_percent: u8,

    /// Pause after reaching 100% before results are shown
    pub settle_ms: u64,

    /// Row count shown by the preview screen
    pub preview_total_rows: usize,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "Vizly".to_string(),
            version: "1.0.0".to_string(),
            description: "Modern Analytics Dashboard Experience".to_string(),
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            community: true,
            notifications: true,
            data_processing: true,
            ai_assistant: false,
            collaboration: true,
            export: true,
        }
    }
}

impl PlanLimits {
    pub fn normal() -> Self {
        Self {
            max_workspaces: Some(5),
            max_dashboards: Some(10),
            max_reports: Some(20),
            max_data_sources: Some(5),
            max_collaborators: Some(3),
            can_publish_to_community: false,
            can_export_pdf: false,
            can_use_advanced_charts: false,
        }
    }

    pub fn pro() -> Self {
        Self {
            max_workspaces: None,
            max_dashboards: None,
            max_reports: None,
            max_data_sources: None,
            max_collaborators: None,
            can_publish_to_community: true,
            can_export_pdf: true,
            can_use_advanced_charts: true,
        }
    }
}

/// Plan limits as written in a settings file. Missing fields keep the value
/// of the plan being overridden; an explicit `null` limit means unlimited.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlanLimitsOverride {
    #[serde(deserialize_with = "present")]
    max_workspaces: Option<Option<usize>>,
    #[serde(deserialize_with = "present")]
    max_dashboards: Option<Option<usize>>,
    #[serde(deserialize_with = "present")]
    max_reports: Option<Option<usize>>,
    #[serde(deserialize_with = "present")]
    max_data_sources: Option<Option<usize>>,
    #[serde(deserialize_with = "present")]
    max_collaborators: Option<Option<usize>>,
    can_publish_to_community: Option<bool>,
    can_export_pdf: Option<bool>,
    can_use_advanced_charts: Option<bool>,
}

impl PlanLimitsOverride {
    fn apply(self, base: PlanLimits) -> PlanLimits {
        PlanLimits {
            max_workspaces: self.max_workspaces.unwrap_or(base.max_workspaces),
            max_dashboards: self.max_dashboards.unwrap_or(base.max_dashboards),
            max_reports: self.max_reports.unwrap_or(base.max_reports),
            max_data_sources: self.max_data_sources.unwrap_or(base.max_data_sources),
            max_collaborators: self.max_collaborators.unwrap_or(base.max_collaborators),
            can_publish_to_community: self
                .can_publish_to_community
                .unwrap_or(base.can_publish_to_community),
            can_export_pdf: self.can_export_pdf.unwrap_or(base.can_export_pdf),
            can_use_advanced_charts: self
                .can_use_advanced_charts
                .unwrap_or(base.can_use_advanced_charts),
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn normal_plan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PlanLimits, D::Error> {
    Ok(PlanLimitsOverride::deserialize(deserializer)?.apply(PlanLimits::normal()))
}

fn pro_plan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PlanLimits, D::Error> {
    Ok(PlanLimitsOverride::deserialize(deserializer)?.apply(PlanLimits::pro()))
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            step_percent: 20,
            settle_ms: 500,
            preview_total_rows: 15,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app: AppMetadata::default(),
            features: FeatureFlags::default(),
            normal_plan: PlanLimits::normal(),
            pro_plan: PlanLimits::pro(),
            processing: ProcessingSettings::default(),
            dark_mode: false,
            auto_save: true,
        }
    }
}

impl AppSettings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Limits that apply to `plan`
    pub fn limits(&self, plan: super::UserPlan) -> &PlanLimits {
        match plan {
            super::UserPlan::Normal => &self.normal_plan,
            super::UserPlan::Pro => &self.pro_plan,
        }
    }
}
