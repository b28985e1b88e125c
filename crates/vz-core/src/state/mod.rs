use std::fmt;
use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::events::{events::ScreenChanged, EventBus};
use crate::model::Dashboard;
use crate::workspace::WorkspaceItem;

mod settings;

pub use settings::{
    AppMetadata, AppSettings, FeatureFlags, PlanLimits, ProcessingSettings, SettingsError,
};

/// Top-level screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Home,
    Workspace,
    Builder,
    DataView,
    DashboardView,
    Community,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Workspace => "workspace",
            Screen::Builder => "builder",
            Screen::DataView => "dataview",
            Screen::DashboardView => "dashboardview",
            Screen::Community => "community",
        };
        f.write_str(name)
    }
}

/// Screens shown before authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScreen {
    Login,
    SignUp,
    Forgot,
}

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserPlan {
    Normal,
    Pro,
}

/// Per-user navigation state. All transitions are plain functions on this
/// value; [`AppState`] wraps them with locking and events.
#[derive(Debug, Clone)]
pub struct Session {
    pub authenticated: bool,
    pub auth_screen: AuthScreen,
    pub screen: Screen,
    pub dark_mode: bool,
    pub plan: UserPlan,
    pub selected_report: Option<WorkspaceItem>,
    pub selected_dashboard: Option<Dashboard>,
    /// Name of the dataset opened in the data view
    pub selected_data_source: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            authenticated: false,
            auth_screen: AuthScreen::Login,
            screen: Screen::Workspace,
            dark_mode: false,
            plan: UserPlan::Normal,
            selected_report: None,
            selected_dashboard: None,
            selected_data_source: None,
        }
    }
}

impl Session {
    pub fn login(&mut self) {
        self.authenticated = true;
        self.screen = Screen::Home;
    }

    pub fn sign_up(&mut self) {
        self.login();
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.auth_screen = AuthScreen::Login;
        self.screen = Screen::Home;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Toggles between the two plans
    pub fn upgrade_plan(&mut self) {
        self.plan = match self.plan {
            UserPlan::Normal => UserPlan::Pro,
            UserPlan::Pro => UserPlan::Normal,
        };
    }
}

/// The main application state
pub struct AppState {
    /// Navigation and selection state
    pub session: Arc<RwLock<Session>>,

    /// Application settings
    pub settings: Arc<RwLock<AppSettings>>,

    /// The event bus
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Create a new application state
    pub fn new(settings: AppSettings) -> Self {
        let session = Session {
            dark_mode: settings.dark_mode,
            ..Session::default()
        };

        Self {
            session: Arc::new(RwLock::new(session)),
            settings: Arc::new(RwLock::new(settings)),
            event_bus: Arc::new(EventBus::new()),
        }
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.session.read().screen
    }

    pub fn login(&self) {
        self.transition(Session::login);
    }

    pub fn logout(&self) {
        self.transition(Session::logout);
    }

    /// Move to another screen
    pub fn navigate(&self, screen: Screen) {
        self.transition(|session| session.screen = screen);
    }

    /// Open a report in the builder
    pub fn select_report(&self, report: WorkspaceItem) {
        self.transition(|session| {
            session.selected_report = Some(report);
            session.screen = Screen::Builder;
        });
    }

    /// Open a dashboard on the canvas screen
    pub fn select_dashboard(&self, dashboard: Dashboard) {
        self.transition(|session| {
            session.selected_dashboard = Some(dashboard);
            session.screen = Screen::DashboardView;
        });
    }

    /// Open a dataset in the data view
    pub fn select_data_source(&self, name: impl Into<String>) {
        let name = name.into();
        self.transition(|session| {
            session.selected_data_source = Some(name);
            session.screen = Screen::DataView;
        });
    }

    pub fn toggle_dark_mode(&self) {
        self.session.write().toggle_dark_mode();
    }

    pub fn upgrade_plan(&self) -> UserPlan {
        let mut session = self.session.write();
        session.upgrade_plan();
        info!("Plan is now {:?}", session.plan);
        session.plan
    }

    fn transition(&self, f: impl FnOnce(&mut Session)) {
        let mut session = self.session.write();
        let from = session.screen;
        f(&mut session);
        let to = session.screen;
        drop(session);

        if from != to {
            info!("Screen {} -> {}", from, to);
            self.event_bus.publish(ScreenChanged {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceItemKind;
    use parking_lot::Mutex;

    #[test]
    fn test_login_logout() {
        let mut session = Session::default();
        session.login();
        assert!(session.authenticated);
        assert_eq!(session.screen, Screen::Home);

        session.auth_screen = AuthScreen::Forgot;
        session.logout();
        assert!(!session.authenticated);
        assert_eq!(session.auth_screen, AuthScreen::Login);
    }

    #[test]
    fn test_plan_toggles() {
        let state = AppState::default();
        assert_eq!(state.upgrade_plan(), UserPlan::Pro);
        assert_eq!(state.upgrade_plan(), UserPlan::Normal);
    }

    #[test]
    fn test_select_report_navigates_and_publishes() {
        let state = AppState::default();
        let screens = Arc::new(Mutex::new(Vec::new()));
        let sink = screens.clone();
        state
            .event_bus
            .subscribe_fn(move |event: &ScreenChanged| sink.lock().push(event.to.clone()));

        let report = WorkspaceItem::new("r1", "Monthly Revenue Analysis", WorkspaceItemKind::Report);
        state.select_report(report);
        assert_eq!(state.screen(), Screen::Builder);

        // Same screen again: no event
        state.navigate(Screen::Builder);
        assert_eq!(*screens.lock(), vec!["builder".to_string()]);
    }
}
