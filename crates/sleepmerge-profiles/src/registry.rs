use std::sync::Arc;

use sleepmerge_core::{ExportDirectory, SignalCodec};

use crate::oximetry::OximetryProfile;
use crate::resmed::ResMedProfile;
use crate::traits::{DeviceProfile, ProfileDescriptor, ProfileOptions};
use crate::{Error, Result};

/// Every known profile, in detection order.
static PROFILES: &[&ProfileDescriptor] = &[&crate::resmed::DESCRIPTOR, &crate::oximetry::DESCRIPTOR];

pub fn get_all_profiles() -> &'static [&'static ProfileDescriptor] {
    PROFILES
}

pub fn get_profile_names() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.id).collect()
}

pub fn get_profile_descriptor(name: &str) -> Option<&'static ProfileDescriptor> {
    PROFILES.iter().copied().find(|p| p.id == name)
}

/// Create a profile by id.
pub fn create_profile(
    name: &str,
    codec: Arc<dyn SignalCodec>,
    options: ProfileOptions,
) -> Result<Box<dyn DeviceProfile>> {
    match name {
        "resmed" => Ok(Box::new(ResMedProfile::with_options(codec, options))),
        "oximetry" => Ok(Box::new(OximetryProfile::with_options(options))),
        _ => Err(Error::UnknownProfile(name.to_string())),
    }
}

/// Create every profile with default options, in detection order.
pub fn create_all_profiles(codec: Arc<dyn SignalCodec>) -> Vec<Box<dyn DeviceProfile>> {
    vec![
        Box::new(ResMedProfile::new(codec)),
        Box::new(OximetryProfile::new()),
    ]
}

/// First profile in `profiles` that accepts `dir`.
pub fn detect_profile<'a>(
    dir: &dyn ExportDirectory,
    profiles: &'a [Box<dyn DeviceProfile>],
) -> Option<&'a dyn DeviceProfile> {
    profiles
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.validate_directory(dir))
}
