use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    /// Prints console events; errors and config notices also go to tracing.
    /// Silent mode suppresses the console output only.
    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                self.print(format!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()));
                self.print(format!("  {}", "Upgate - File Upload Gateway".white().bold()));
                self.print(format!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan()));
                self.print(format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()));
            }
            AppEvent::Ready { addr } => {
                self.print(format!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green()));
                self.print(format!("  {} {}", "Server".white(), addr.cyan()));
                self.print(format!("  {} {}", "Upload".white(), format!("http://{}/api/upload", addr).blue()));
                self.print(format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green()));
            }
            AppEvent::Shutdown => {
                self.print(format!("\n{}", "Server shutting down".red()));
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                self.print(format!("  {} {}", "Loading config".dimmed(), path.cyan()));
            }
            AppEvent::ConfigLoaded { backend } => {
                self.print(format!("  {} Storage backend: {}", "✓".green(), backend.cyan()));
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    self.print(format!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    ));
                }
            }

            // Storage
            AppEvent::StorageReady { backend, public_url } => {
                self.print(format!("  {} {} storage at {}", "✓".green(), backend.cyan(), public_url.blue()));
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }

    fn print(&self, line: String) {
        if !self.silent_mode {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_in_silent_mode() {
        let bus = EventBus::new(true);
        bus.emit(AppEvent::Starting);
        bus.emit(AppEvent::ConfigMigrated { added_fields: vec!["upload".to_string()] });
        bus.emit(AppEvent::Ready { addr: "127.0.0.1:8080".to_string() });
        assert!(bus.silent_mode);
    }
}
