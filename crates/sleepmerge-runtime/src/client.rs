use std::sync::Arc;

use sleepmerge_core::{ExportDirectory, ProgressFn, SignalCodec};
use sleepmerge_profiles::{DeviceProfile, Error as ProfileError, create_profile, get_profile_names};
use sleepmerge_types::{Session, SignalFile, sort_sessions};

use crate::config::Config;
use crate::{Error, Result};

/// Sessions found on one export, with the profile that read them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    pub profile: &'static str,
    pub sessions: Vec<Session>,
}

/// Entry point for the presentation layer.
///
/// Holds the enabled device profiles in detection order and the codec used
/// for both container decoding and export encoding.
pub struct SleepMerge {
    codec: Arc<dyn SignalCodec>,
    config: Config,
    profiles: Vec<Box<dyn DeviceProfile>>,
}

impl SleepMerge {
    pub fn new(codec: Arc<dyn SignalCodec>, config: Config) -> Result<Self> {
        let mut profiles = Vec::new();
        for id in get_profile_names() {
            if !config.is_enabled(id) {
                tracing::debug!(profile = id, "Profile disabled by configuration");
                continue;
            }
            let options = config.profile(id).options();
            profiles.push(create_profile(id, codec.clone(), options)?);
        }

        Ok(Self {
            codec,
            config,
            profiles,
        })
    }

    /// Build with the configuration found at the default location.
    pub fn open(codec: Arc<dyn SignalCodec>) -> Result<Self> {
        Self::new(codec, Config::load()?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profiles(&self) -> impl Iterator<Item = &dyn DeviceProfile> {
        self.profiles.iter().map(|p| p.as_ref())
    }

    /// First enabled profile, in registry order, that accepts `dir`.
    pub fn detect(&self, dir: &dyn ExportDirectory) -> Result<&dyn DeviceProfile> {
        sleepmerge_profiles::detect_profile(dir, &self.profiles).ok_or(Error::NoCompatibleProfile)
    }

    fn profile_by_id(&self, id: &str) -> Result<&dyn DeviceProfile> {
        self.profiles()
            .find(|p| p.id() == id)
            .ok_or_else(|| Error::Profile(ProfileError::UnknownProfile(id.to_string())))
    }

    /// Detect the device and list its sessions, oldest first.
    pub async fn scan(
        &self,
        dir: &dyn ExportDirectory,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<Scan> {
        let profile = self.detect(dir)?;
        let mut sessions = profile.sessions(dir, on_progress).await?;
        if sessions.is_empty() {
            return Err(Error::NoSessions {
                profile: profile.id().to_string(),
            });
        }
        sort_sessions(&mut sessions);

        tracing::info!(profile = profile.id(), sessions = sessions.len(), "Scanned export");
        Ok(Scan {
            profile: profile.id(),
            sessions,
        })
    }

    /// Reconcile one session with the profile that discovered it.
    pub async fn load_session(
        &self,
        dir: &dyn ExportDirectory,
        session: &Session,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<SignalFile> {
        let profile = self.profile_by_id(&session.profile)?;
        Ok(profile.load_session(dir, session, on_progress).await?)
    }

    /// Reconcile one session and encode it with the container codec.
    pub async fn export_session(
        &self,
        dir: &dyn ExportDirectory,
        session: &Session,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<u8>> {
        let merged = self.load_session(dir, session, on_progress).await?;
        let bytes = self.codec.encode(&merged).map_err(Error::Codec)?;
        tracing::debug!(session = %session.id, bytes = bytes.len(), "Encoded merged session");
        Ok(bytes)
    }
}
