//! Recording email sender for tests and local runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use ea_core::services::verification::EmailSender;

/// A message captured by [`MockEmailSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every message in memory instead of sending it
#[derive(Debug, Default)]
pub struct MockEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    should_fail: AtomicBool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery fails
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.set_failing(true);
        sender
    }

    pub fn set_failing(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.lock().len()
    }

    /// Body of the latest message to `to`
    pub fn last_body_for(&self, to: &str) -> Option<String> {
        self.lock()
            .iter()
            .rev()
            .find(|email| email.to == to)
            .map(|email| email.body.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SentEmail>> {
        match self.sent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("mock email delivery failure".to_string());
        }
        self.lock().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
