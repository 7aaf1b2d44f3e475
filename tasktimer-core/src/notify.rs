//! Notification requests and the capability that delivers them

/// What the user allowed. Mirrors the browser-style three-state permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Not asked yet
    #[default]
    Default,
    Granted,
    Denied,
}

/// A request to tell the user something. Delivery is best effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }
}

/// Desktop notification service as seen by the controller.
pub trait Notifier {
    fn permission(&self) -> Permission;

    /// Ask for permission. Fire-and-forget; the answer shows up in `permission()`.
    fn request_permission(&mut self);

    fn notify(&mut self, notification: &Notification);
}
