//! Widget chrome: minimize and dismiss, independent of the session.

use crate::view::ChatView;

#[derive(Debug, Default)]
pub struct WidgetChrome {
    minimized: bool,
    dismissed: bool,
}

impl WidgetChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Flip the minimized flag and mirror it into the view.
    pub fn toggle_minimized(&mut self, view: &mut impl ChatView) -> bool {
        self.minimized = !self.minimized;
        view.set_minimized(self.minimized);
        self.minimized
    }

    /// Hide the widget for the rest of the page lifetime.
    pub fn dismiss(&mut self, view: &mut impl ChatView) {
        self.dismissed = true;
        view.hide_widget();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;

    #[test]
    fn test_toggle_minimized() {
        let mut chrome = WidgetChrome::new();
        let mut view = RecordingView::default();

        assert!(chrome.toggle_minimized(&mut view));
        assert!(view.minimized);

        assert!(!chrome.toggle_minimized(&mut view));
        assert!(!view.minimized);
    }

    #[test]
    fn test_dismiss() {
        let mut chrome = WidgetChrome::new();
        let mut view = RecordingView::default();
        chrome.dismiss(&mut view);
        assert!(chrome.is_dismissed());
        assert!(view.hidden);

        chrome.reset();
        assert!(!chrome.is_dismissed());
        assert!(!chrome.is_minimized());
    }
}
