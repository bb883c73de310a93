use acme_zonefile_application::ports::{DnsQueryPort, ZoneReloader};
use acme_zonefile_application::use_cases::{
    DeployChallengeUseCase, DiscoverNameserversUseCase, PropagationSettings,
    ResolveAddressesUseCase, WaitForPropagationUseCase,
};
use acme_zonefile_domain::{Config, DomainConfig};
use acme_zonefile_infrastructure::dns::{system_resolvers, HickoryQueryClient};
use acme_zonefile_infrastructure::system::CommandReloader;
use acme_zonefile_infrastructure::zone::ZoneFileEditor;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct Services {
    pub discover_nameservers: Arc<DiscoverNameserversUseCase>,
    pub wait_for_propagation: Arc<WaitForPropagationUseCase>,
    config: Config,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        let resolvers = system_resolvers(&config.dns.resolvers);
        debug!(resolvers = ?resolvers, "System resolvers");

        let query_port: Arc<dyn DnsQueryPort> = Arc::new(HickoryQueryClient::new(
            resolvers,
            Duration::from_millis(config.dns.per_query_timeout_ms),
        ));
        let resolver_config = config.dns.resolver_config();

        let resolve_addresses = Arc::new(ResolveAddressesUseCase::new(
            query_port.clone(),
            resolver_config,
        ));
        let discover_nameservers = Arc::new(DiscoverNameserversUseCase::new(
            query_port.clone(),
            resolve_addresses.clone(),
            resolver_config,
        ));
        let wait_for_propagation = Arc::new(WaitForPropagationUseCase::new(
            query_port,
            resolve_addresses,
            discover_nameservers.clone(),
            resolver_config,
        ));

        Self {
            discover_nameservers,
            wait_for_propagation,
            config: config.clone(),
        }
    }

    pub fn deploy_challenge(&self, domain: &DomainConfig) -> anyhow::Result<DeployChallengeUseCase> {
        let editor = Arc::new(ZoneFileEditor::new(domain.fragment_set())?);
        let reloader = match &domain.reload_command {
            Some(command) => {
                Some(Arc::new(CommandReloader::from_command_line(command)?) as Arc<dyn ZoneReloader>)
            }
            None => None,
        };
        Ok(DeployChallengeUseCase::new(
            editor,
            reloader,
            self.wait_for_propagation.clone(),
        ))
    }

    /// Deadline for `domain`, falling back to `[dns] query_timeout`.
    pub fn propagation_settings(
        &self,
        domain: Option<&DomainConfig>,
        timeout_override: Option<u64>,
    ) -> PropagationSettings {
        let timeout = timeout_override
            .or_else(|| domain.and_then(|d| d.query_timeout))
            .unwrap_or(self.config.dns.query_timeout);
        PropagationSettings::new(timeout, self.config.dns.query_pause)
    }
}
