//! Desktop notifications through notify-rust

use crate::config::NotificationConfig;
use tasktimer_core::{Notification, Notifier, Permission};
use tracing::{info, warn};

/// There is no permission prompt on the desktop; asking simply resolves to
/// whatever the config allows.
pub struct DesktopNotifier {
    app_name: String,
    enabled: bool,
    permission: Permission,
}

impl DesktopNotifier {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            enabled: config.enabled,
            permission: Permission::Default,
        }
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) {
        self.permission = if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        };
        info!("Notification permission: {:?}", self.permission);
    }

    fn notify(&mut self, notification: &Notification) {
        let mut desktop = notify_rust::Notification::new();
        desktop
            .summary(&notification.title)
            .body(&notification.body)
            .appname(&self.app_name);
        if let Some(icon) = &notification.icon {
            desktop.icon(icon);
        }
        if let Err(e) = desktop.show() {
            warn!("Failed to send notification: {}", e);
        }
    }
}
