//! Doctor registry held in memory.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{DoctorRegistry, DoctorRegistryError};
use crate::domain::{Doctor, PasswordHash};

#[derive(Debug)]
struct StoredDoctor {
    doctor: Doctor,
    #[expect(dead_code, reason = "doctor login is not served by this backend")]
    password_hash: PasswordHash,
}

/// Registry preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryDoctorRegistry {
    doctors: RwLock<Vec<StoredDoctor>>,
}

impl InMemoryDoctorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DoctorRegistry for InMemoryDoctorRegistry {
    async fn insert(
        &self,
        doctor: Doctor,
        password_hash: PasswordHash,
    ) -> Result<(), DoctorRegistryError> {
        let mut doctors = self.doctors.write().await;
        if doctors
            .iter()
            .any(|stored| stored.doctor.email() == doctor.email())
        {
            return Err(DoctorRegistryError::duplicate_email(doctor.email().as_ref()));
        }
        doctors.push(StoredDoctor {
            doctor,
            password_hash,
        });
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Doctor>, DoctorRegistryError> {
        Ok(self
            .doctors
            .read()
            .await
            .iter()
            .map(|stored| stored.doctor.clone())
            .collect())
    }
}
