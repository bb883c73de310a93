//! Filesystem implementation of the zone fragment editor.

use acme_zonefile_application::ports::{SoaUpdate, ZoneEditor};
use acme_zonefile_domain::zone_fragment::{increment_soa_serial, render_challenge_fragment};
use acme_zonefile_domain::{DomainError, ValidatedDomainName, ZoneFragmentSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ZoneFileEditor {
    fragments: ZoneFragmentSet,
}

impl ZoneFileEditor {
    pub fn new(fragments: ZoneFragmentSet) -> Result<Self, DomainError> {
        fragments.validate()?;
        Ok(Self { fragments })
    }
}

impl ZoneEditor for ZoneFileEditor {
    fn write_challenge(
        &self,
        fqdn: &ValidatedDomainName,
        challenge: &str,
        host_suffix: &str,
    ) -> Result<PathBuf, DomainError> {
        let body = render_challenge_fragment(fqdn, challenge, self.fragments.ttl())?;
        let target = self.fragments.challenge_file(host_suffix)?;
        require_existing(&target)?;

        let temp = self.fragments.new_file_for(&target);
        write_file_atomic(&temp, &target, body.as_bytes())?;

        info!(path = %target.display(), domain = %fqdn, "Challenge fragment replaced");
        Ok(target)
    }

    fn increment_soa(&self) -> Result<SoaUpdate, DomainError> {
        let target = self.fragments.soa_file()?;
        require_existing(&target)?;

        let content = std::fs::read_to_string(&target).map_err(|e| DomainError::io(&target, e))?;
        let bump = increment_soa_serial(&content, &target)?;

        let temp = self.fragments.new_file_for(&target);
        write_temp(&temp, bump.content.as_bytes())?;

        let backup = match self.fragments.old_file_for(&target) {
            Some(backup) => {
                if let Err(e) = std::fs::copy(&target, &backup) {
                    discard(&temp);
                    return Err(DomainError::io(&backup, e));
                }
                debug!(path = %backup.display(), "Previous SOA fragment saved");
                Some(backup)
            }
            None => None,
        };

        rename_into_place(&temp, &target)?;

        info!(
            path = %target.display(),
            previous = bump.previous,
            serial = bump.current,
            "SOA fragment replaced"
        );
        Ok(SoaUpdate {
            path: target,
            previous_serial: bump.previous,
            serial: bump.current,
            backup,
        })
    }
}

fn require_existing(path: &Path) -> Result<(), DomainError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DomainError::PreconditionFailed {
            path: path.display().to_string(),
        })
    }
}

/// Writes `content` to `temp`, then renames it onto `target`.
///
/// `target` keeps its old content until the rename succeeds.
pub fn write_file_atomic(temp: &Path, target: &Path, content: &[u8]) -> Result<(), DomainError> {
    write_temp(temp, content)?;
    rename_into_place(temp, target)
}

fn write_temp(temp: &Path, content: &[u8]) -> Result<(), DomainError> {
    let mut file = File::create(temp).map_err(|e| DomainError::io(temp, e))?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        discard(temp);
        return Err(DomainError::io(temp, e));
    }
    Ok(())
}

fn rename_into_place(temp: &Path, target: &Path) -> Result<(), DomainError> {
    std::fs::rename(temp, target).map_err(|e| {
        discard(temp);
        DomainError::io(target, e)
    })
}

fn discard(temp: &Path) {
    if let Err(e) = std::fs::remove_file(temp) {
        debug!(path = %temp.display(), error = %e, "Could not remove temp file");
    }
}
