//! Patient directory held in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserDirectory, UserDirectoryError, UserRecord};
use crate::domain::{EmailAddress, PhoneNumber, User, UserId};

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<UserId, UserRecord>,
    ids_by_email: HashMap<EmailAddress, UserId>,
}

/// User directory keyed by identifier with a unique email index.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    records: RwLock<Records>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserDirectoryError> {
        Ok(self.records.read().await.by_id.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserDirectoryError> {
        let records = self.records.read().await;
        Ok(records
            .ids_by_email
            .get(email)
            .and_then(|id| records.by_id.get(id))
            .cloned())
    }

    async fn insert(&self, record: UserRecord) -> Result<(), UserDirectoryError> {
        let mut records = self.records.write().await;
        let email = record.user.email().clone();
        if records.ids_by_email.contains_key(&email) {
            return Err(UserDirectoryError::duplicate_email(email.as_ref()));
        }
        let id = *record.user.id();
        records.ids_by_email.insert(email, id);
        records.by_id.insert(id, record);
        Ok(())
    }

    async fn set_caregiver_phone(
        &self,
        id: &UserId,
        phone: PhoneNumber,
    ) -> Result<User, UserDirectoryError> {
        let mut records = self.records.write().await;
        let record = records
            .by_id
            .get_mut(id)
            .ok_or_else(|| UserDirectoryError::unknown_user(id.to_string()))?;
        record.user = record.user.clone().with_caregiver_phone(Some(phone));
        Ok(record.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, PasswordHash};
    use rstest::{fixture, rstest};

    fn record(email: &str) -> UserRecord {
        UserRecord {
            user: User::new(
                UserId::random(),
                DisplayName::new("Asha").expect("name"),
                EmailAddress::new(email).expect("email"),
                PhoneNumber::parse("+919876543210").expect("phone"),
                None,
            ),
            password_hash: PasswordHash::new("plain$pw"),
        }
    }

    #[fixture]
    fn directory() -> InMemoryUserDirectory {
        InMemoryUserDirectory::new()
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_records_are_found_by_id_and_email(directory: InMemoryUserDirectory) {
        let stored = record("asha@example.com");
        directory.insert(stored.clone()).await.expect("insert");

        let by_id = directory
            .find_by_id(stored.user.id())
            .await
            .expect("lookup");
        let by_email = directory
            .find_by_email(stored.user.email())
            .await
            .expect("lookup");
        assert_eq!(by_id.as_ref(), Some(&stored));
        assert_eq!(by_email, Some(stored));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected(directory: InMemoryUserDirectory) {
        directory
            .insert(record("asha@example.com"))
            .await
            .expect("first insert");
        let error = directory
            .insert(record("asha@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(error, UserDirectoryError::duplicate_email("asha@example.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn caregiver_phone_updates_the_stored_record(directory: InMemoryUserDirectory) {
        let stored = record("asha@example.com");
        let id = *stored.user.id();
        directory.insert(stored).await.expect("insert");

        let phone = PhoneNumber::parse("+15551234567").expect("phone");
        let updated = directory
            .set_caregiver_phone(&id, phone.clone())
            .await
            .expect("update");
        assert_eq!(updated.caregiver_phone(), Some(&phone));

        let reloaded = directory.find_by_id(&id).await.expect("lookup");
        assert_eq!(
            reloaded.and_then(|r| r.user.caregiver_phone().cloned()),
            Some(phone)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn caregiver_update_for_unknown_user_fails(directory: InMemoryUserDirectory) {
        let phone = PhoneNumber::parse("+15551234567").expect("phone");
        let error = directory
            .set_caregiver_phone(&UserId::random(), phone)
            .await
            .expect_err("unknown");
        assert!(matches!(error, UserDirectoryError::UnknownUser { .. }));
    }
}
