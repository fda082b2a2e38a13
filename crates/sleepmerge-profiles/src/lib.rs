// Error types
pub mod error;

// Profile and decoder traits
pub mod traits;

// Generic discovery and loading, driven by a profile descriptor
pub mod discovery;
pub mod loader;

// Container decoder shared by codec-backed profiles
pub mod container;

// Device profiles
pub mod oximetry;
pub mod resmed;

// Profile registry
pub mod registry;

pub use container::ContainerDecoder;
pub use error::{Error, Result};
pub use oximetry::{FlatOximetryDecoder, OximetryProfile};
pub use registry::{
    create_all_profiles, create_profile, detect_profile, get_all_profiles, get_profile_descriptor,
    get_profile_names,
};
pub use resmed::ResMedProfile;
pub use traits::{DeviceProfile, ProfileDescriptor, ProfileOptions, RecordDecoder};
