//! Desktop notification support
//!
//! Delivery uses `osascript` on macOS and `notify-send` on Linux; other
//! platforms report the capability as unsupported.

use crate::domain::Permission;
use crate::persistence::{load_metadata, save_metadata, AppMetadata};
use std::path::PathBuf;
#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    #[error("desktop notifications are not supported on this platform")]
    Unsupported,
    #[error("notification command could not be run: {0}")]
    Command(#[from] std::io::Error),
    #[error("notification command reported failure")]
    Delivery,
}

/// Platform notification capability
///
/// `permission` reports the remembered three-state permission,
/// `request_permission` resolves it once by probing the platform, and
/// `notify` delivers a notification body under the given title.
pub trait Notifier {
    fn permission(&self) -> Permission;
    fn request_permission(&mut self) -> Result<Permission, NotifyError>;
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Notifier backed by the host platform's notification command
///
/// The permission state is remembered in `meta.json`: `NotAsked` until the
/// user requests, then the platform is probed with a confirmation
/// notification and the outcome is recorded.
pub struct SystemNotifier {
    permission: Permission,
    meta_path: PathBuf,
}

impl SystemNotifier {
    /// Load the remembered permission from the metadata file
    pub fn from_meta(meta_path: PathBuf) -> Self {
        let permission = load_metadata(&meta_path)
            .map(|m| m.permission)
            .unwrap_or(Permission::NotAsked);
        Self {
            permission,
            meta_path,
        }
    }

    fn remember(&mut self, permission: Permission) {
        self.permission = permission;
        let metadata = AppMetadata { permission };
        if let Err(e) = save_metadata(&self.meta_path, &metadata) {
            eprintln!("Warning: failed to save notification state: {}", e);
        }
    }

    fn deliver(title: &str, body: &str) -> Result<(), NotifyError> {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );

            let output = Command::new("osascript").arg("-e").arg(&script).output()?;
            if !output.status.success() {
                return Err(NotifyError::Delivery);
            }
            Ok(())
        }

        #[cfg(target_os = "linux")]
        {
            let output = Command::new("notify-send").arg(title).arg(body).output()?;
            if !output.status.success() {
                return Err(NotifyError::Delivery);
            }
            Ok(())
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = (title, body);
            Err(NotifyError::Unsupported)
        }
    }
}

impl Notifier for SystemNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Result<Permission, NotifyError> {
        // The confirmation notification doubles as the capability probe
        match Self::deliver("Nudge", "Notifications enabled") {
            Ok(()) => {
                self.remember(Permission::Granted);
                Ok(Permission::Granted)
            }
            Err(NotifyError::Delivery) => {
                self.remember(Permission::Denied);
                Ok(Permission::Denied)
            }
            Err(e) => Err(e),
        }
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        Self::deliver(title, body)
    }
}
