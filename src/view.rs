/// Navigation state for the display layer.
///
/// The display surface has three views; which one is showing is an explicit
/// state value threaded through the render path, not ambient global state.
/// Transitions happen only through `View::apply`.

/// The view currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    WaterQuality,
    Feedback,
}

/// A user navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    OpenWaterQuality,
    OpenFeedback,
    GoHome,
}

impl View {
    /// Applies a navigation action, returning the next view.
    pub fn apply(self, action: NavAction) -> View {
        match action {
            NavAction::OpenWaterQuality => View::WaterQuality,
            NavAction::OpenFeedback => View::Feedback,
            NavAction::GoHome => View::Home,
        }
    }
}
