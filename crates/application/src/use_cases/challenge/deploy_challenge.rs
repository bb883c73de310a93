use acme_zonefile_domain::{DomainError, ValidatedDomainName};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::{ZoneEditor, ZoneReloader};
use crate::use_cases::propagation::{
    PropagationReport, PropagationSettings, WaitForPropagationUseCase,
};

/// Everything needed to publish one challenge value.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub fqdn: ValidatedDomainName,
    pub zone: ValidatedDomainName,
    pub host_suffix: String,
    /// TXT value as it must appear in DNS.
    pub challenge: String,
    /// Empty means discover the zone's nameservers.
    pub nameservers: Vec<String>,
    pub settings: PropagationSettings,
}

/// Write the challenge fragment, bump the SOA serial, reload the zone and
/// wait until every authoritative nameserver serves the new value.
pub struct DeployChallengeUseCase {
    editor: Arc<dyn ZoneEditor>,
    reloader: Option<Arc<dyn ZoneReloader>>,
    wait_for_propagation: Arc<WaitForPropagationUseCase>,
}

impl DeployChallengeUseCase {
    pub fn new(
        editor: Arc<dyn ZoneEditor>,
        reloader: Option<Arc<dyn ZoneReloader>>,
        wait_for_propagation: Arc<WaitForPropagationUseCase>,
    ) -> Self {
        Self {
            editor,
            reloader,
            wait_for_propagation,
        }
    }

    #[instrument(skip(self, request), fields(domain = %request.fqdn, zone = %request.zone))]
    pub async fn execute(&self, request: &DeployRequest) -> Result<PropagationReport, DomainError> {
        let challenge_file =
            self.editor
                .write_challenge(&request.fqdn, &request.challenge, &request.host_suffix)?;
        info!(path = %challenge_file.display(), "Challenge fragment written");

        let soa = self.editor.increment_soa()?;
        info!(
            path = %soa.path.display(),
            previous = soa.previous_serial,
            serial = soa.serial,
            "SOA serial incremented"
        );

        match &self.reloader {
            Some(reloader) => reloader.reload(&request.zone).await?,
            None => warn!("No reload command configured, relying on the nameserver to notice"),
        }

        self.wait_for_propagation
            .execute(
                request.fqdn.as_str(),
                &request.challenge,
                &request.nameservers,
                &request.settings,
            )
            .await?
            .into_result()
    }
}
