use acme_zonefile_application::ports::{SoaUpdate, ZoneEditor, ZoneReloader};
use acme_zonefile_domain::{DomainError, ValidatedDomainName};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

/// Records the order of editor and reloader calls in a shared journal.
#[derive(Default)]
pub struct MockZoneEditor {
    pub journal: std::sync::Arc<Mutex<Vec<String>>>,
    fail_soa: bool,
}

impl MockZoneEditor {
    pub fn new(journal: std::sync::Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            journal,
            fail_soa: false,
        }
    }

    pub fn failing_soa(mut self) -> Self {
        self.fail_soa = true;
        self
    }
}

impl ZoneEditor for MockZoneEditor {
    fn write_challenge(
        &self,
        fqdn: &ValidatedDomainName,
        challenge: &str,
        host_suffix: &str,
    ) -> Result<PathBuf, DomainError> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("challenge {} {} {}", fqdn, challenge, host_suffix));
        Ok(PathBuf::from(format!("/zones/example.com.acme.{}", host_suffix)))
    }

    fn increment_soa(&self) -> Result<SoaUpdate, DomainError> {
        if self.fail_soa {
            return Err(DomainError::MalformedZoneFragment {
                path: "/zones/example.com.soa".to_string(),
            });
        }
        self.journal.lock().unwrap().push("soa".to_string());
        Ok(SoaUpdate {
            path: PathBuf::from("/zones/example.com.soa"),
            previous_serial: 41,
            serial: 42,
            backup: None,
        })
    }
}

pub struct MockZoneReloader {
    pub journal: std::sync::Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockZoneReloader {
    pub fn new(journal: std::sync::Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            journal,
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl ZoneReloader for MockZoneReloader {
    async fn reload(&self, zone: &ValidatedDomainName) -> Result<(), DomainError> {
        self.journal.lock().unwrap().push(format!("reload {}", zone));
        if self.fail {
            return Err(DomainError::ReloadFailed(format!(
                "reload command for {} exited with code 1",
                zone
            )));
        }
        Ok(())
    }
}
