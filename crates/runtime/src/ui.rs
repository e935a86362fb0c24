//! User interface implementations

use std::sync::{Arc, Mutex};

use console::style;

use crate::deps::{MessageStyle, UserInterface};

/// Production UI implementation printing to stdout
pub struct RealUserInterface;

impl UserInterface for RealUserInterface {
    fn print(&self, message: &str) {
        println!("{message}");
    }

    fn print_styled(&self, message: &str, msg_style: MessageStyle) {
        let styled = match msg_style {
            MessageStyle::Cyan => style(message).cyan().to_string(),
            MessageStyle::Warning => style(message).yellow().bold().to_string(),
            MessageStyle::Success => style(message).green().bold().to_string(),
        };
        println!("{styled}");
    }
}

/// Test UI implementation that captures output
#[derive(Default)]
pub struct TestUserInterface {
    /// Every printed line, styled or not
    pub output: Arc<Mutex<Vec<String>>>,
    /// Styled lines together with their style
    pub styled_output: Arc<Mutex<Vec<(String, MessageStyle)>>>,
}

impl TestUserInterface {
    /// Create an empty capturing UI
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured lines
    pub fn get_output(&self) -> Vec<String> {
        self.output
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Snapshot of all captured styled lines
    pub fn get_styled_output(&self) -> Vec<(String, MessageStyle)> {
        self.styled_output
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl UserInterface for TestUserInterface {
    fn print(&self, message: &str) {
        if let Ok(mut lines) = self.output.lock() {
            lines.push(message.to_string());
        }
    }

    fn print_styled(&self, message: &str, style: MessageStyle) {
        // Add to both styled output and regular output for easier testing
        if let Ok(mut lines) = self.styled_output.lock() {
            lines.push((message.to_string(), style));
        }
        self.print(message);
    }
}
