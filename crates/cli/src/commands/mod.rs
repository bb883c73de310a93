use acme_zonefile_application::use_cases::{DeployRequest, PropagationReport};
use acme_zonefile_domain::{
    challenge_record_name, encode_challenge, Config, DomainError, ValidatedDomainName,
};
use anyhow::{anyhow, Context};
use std::process::ExitCode;
use tracing::{error, info};

use crate::di::Services;

/// Exit status of a finished wait when the challenge never showed up everywhere.
pub const EXIT_PROPAGATION_TIMEOUT: u8 = 2;

fn domain_name(fqdn: &str) -> anyhow::Result<ValidatedDomainName> {
    ValidatedDomainName::new(fqdn).with_context(|| format!("rejected domain name '{}'", fqdn))
}

pub async fn deploy(
    config: &Config,
    services: &Services,
    fqdn: &str,
    value: &str,
) -> anyhow::Result<ExitCode> {
    let fqdn = domain_name(fqdn)?;
    let domain = config
        .domain(&fqdn)
        .ok_or_else(|| anyhow!("no [[domain]] entry for {}", fqdn))?;

    let request = DeployRequest {
        fqdn: fqdn.clone(),
        zone: domain_name(&domain.zone)?,
        host_suffix: domain.host_suffix.clone(),
        challenge: value.to_string(),
        nameservers: domain.nameservers.clone(),
        settings: services.propagation_settings(Some(domain), None),
    };

    let use_case = services.deploy_challenge(domain)?;
    finish(use_case.execute(&request).await)
}

pub async fn wait(
    config: &Config,
    services: &Services,
    fqdn: &str,
    value: &str,
    nameservers: Vec<String>,
    timeout: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let name = domain_name(fqdn)?;
    let domain = config.domain(&name);
    let nameservers = if nameservers.is_empty() {
        domain.map(|d| d.nameservers.clone()).unwrap_or_default()
    } else {
        nameservers
    };
    let settings = services.propagation_settings(domain, timeout);

    let result = services
        .wait_for_propagation
        .execute(name.as_str(), value, &nameservers, &settings)
        .await
        .and_then(PropagationReport::into_result);
    finish(result)
}

pub async fn nameservers(services: &Services, fqdn: &str) -> anyhow::Result<ExitCode> {
    let found = services.discover_nameservers.execute(fqdn).await?;
    if found.is_empty() {
        return Err(DomainError::NoNameserversFound(fqdn.to_string()).into());
    }
    for ip in found {
        println!("{}", ip);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn encode(fqdn: &str, token: &str) -> anyhow::Result<ExitCode> {
    let name = domain_name(fqdn)?;
    println!("{}", challenge_record_name(name.as_str())?);
    println!("{}", encode_challenge(token)?);
    Ok(ExitCode::SUCCESS)
}

fn finish(result: Result<PropagationReport, DomainError>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(report) => {
            info!(
                record = %report.record_name,
                rounds = report.rounds,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "Challenge propagated"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(DomainError::PropagationTimeout { pending }) => {
            error!(pending = %pending.join(", "), "Challenge did not propagate before the deadline");
            eprintln!(
                "challenge not visible on: {}",
                pending.join(", ")
            );
            Ok(ExitCode::from(EXIT_PROPAGATION_TIMEOUT))
        }
        Err(e) => Err(e.into()),
    }
}
