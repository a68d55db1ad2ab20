/// Tools for navigation and appearance preferences
///
/// This module implements the view_set and theme_toggle MCP tools. Both
/// only persist a preference; nothing else reads them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{ActiveView, Theme};
use crate::tools::ToolError;
use crate::tracker::Tracker;

/// Parameters for switching views
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetViewParams {
    /// View to open: weight, wellness, analytics or streak
    pub view: String,
}

/// Response from a preference change
#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    pub success: bool,
    pub active_view: ActiveView,
    pub theme: Theme,
    pub message: String,
}

pub fn set_view(tracker: &mut Tracker, params: SetViewParams) -> Result<PreferenceResponse, ToolError> {
    let view: ActiveView = params.view.parse()?;
    tracker.set_active_view(view)?;

    Ok(PreferenceResponse {
        success: true,
        active_view: view,
        theme: tracker.state().theme(),
        message: format!("Switched to the {} view", view.display_name()),
    })
}

pub fn toggle_theme(tracker: &mut Tracker) -> Result<PreferenceResponse, ToolError> {
    let theme = tracker.toggle_theme()?;
    let name = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };

    Ok(PreferenceResponse {
        success: true,
        active_view: tracker.state().active_view(),
        theme,
        message: format!("Switched to {} mode", name),
    })
}
