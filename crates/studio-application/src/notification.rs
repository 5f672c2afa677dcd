//! Chatbot notification service.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use studio_core::chatbot::{MessageSender, OutboundMessage, TemplateKey, compose_message};
use studio_core::entity::Student;
use studio_core::error::Result;
use studio_core::settings::Settings;

/// Sender that only logs; messages are simulated, never delivered.
#[derive(Debug, Clone, Default)]
pub struct LogMessageSender;

#[async_trait]
impl MessageSender for LogMessageSender {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        tracing::info!(
            student = %message.student_id,
            phone = %message.phone,
            template = %message.template_key,
            body = %message.body,
            "WhatsApp message (simulated)"
        );
        Ok(())
    }
}

/// Composes chatbot messages from studio settings and hands them to a sender.
pub struct ChatbotService {
    sender: Arc<dyn MessageSender>,
}

impl ChatbotService {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender }
    }

    /// Sends the `template_key` message to `student`.
    ///
    /// Returns `Ok(None)` without contacting the sender when the chatbot or
    /// the template is disabled, or the template is empty.
    pub async fn send_message(
        &self,
        student: &Student,
        template_key: TemplateKey,
        settings: &Settings,
        variables: &BTreeMap<String, String>,
    ) -> Result<Option<OutboundMessage>> {
        let Some(message) = compose_message(student, template_key, settings, variables) else {
            tracing::debug!(
                student = %student.id,
                template = %template_key,
                "Chatbot message skipped"
            );
            return Ok(None);
        };

        self.sender.send(&message).await?;
        Ok(Some(message))
    }
}
