//! Development SMS sender that records messages in the log instead of
//! contacting a gateway.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DispatchReceipt, NotificationSendError, NotificationSender, SmsMessage};

/// Status reported for messages the logging sender accepts.
pub const LOGGED_STATUS: &str = "logged";

/// Sender used when no gateway credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSmsSender;

#[async_trait]
impl NotificationSender for LoggingSmsSender {
    async fn send_sms(
        &self,
        message: &SmsMessage,
    ) -> Result<DispatchReceipt, NotificationSendError> {
        info!(
            to = %message.to,
            body_len = message.body.chars().count(),
            "sms gateway not configured; message logged instead of sent"
        );
        Ok(DispatchReceipt {
            message_id: None,
            status: Some(LOGGED_STATUS.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::domain::PhoneNumber;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log lock")).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn message(body: &str) -> SmsMessage {
        SmsMessage {
            to: PhoneNumber::parse("+919876543210").expect("phone"),
            body: body.to_owned(),
        }
    }

    #[tokio::test]
    async fn accepts_every_message() {
        let receipt = LoggingSmsSender
            .send_sms(&message("hello"))
            .await
            .expect("logging sender never fails");
        assert_eq!(receipt.status.as_deref(), Some(LOGGED_STATUS));
        assert!(receipt.message_id.is_none());
    }

    #[tokio::test]
    async fn log_line_omits_the_message_body() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        LoggingSmsSender
            .send_sms(&message("Emergency Alert: Patient Asha needs assistance."))
            .await
            .expect("logging sender never fails");

        let text = log.text();
        assert!(text.contains("body_len=47"), "log was: {text}");
        assert!(!text.contains("Asha"), "log was: {text}");
    }
}
