//! The identity block of a profile document.

use std::path::Path;

use rand::Rng;

use crate::{
    payload,
    profile_config::{DEFAULT_DESCRIPTION, ProfileConfig},
};

/// Longest short id the host tool accepts.
pub const SHORT_ID_LEN: usize = 12;

/// Name, version, links and branding of the generated technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdentity {
    name: String,
    short_id: String,
    guid: String,
    version: String,
    notes: String,
    info_url: String,
    support_url: String,
    logo: Option<String>,
    icon: Option<String>,
}

impl ProfileIdentity {
    /// Derive the identity of the profile built from `package_name`.
    ///
    /// A configured technology name replaces the package name. Logo and icon
    /// paths are resolved against `base_dir`; unreadable files are skipped.
    pub fn new<R: Rng>(
        package_name: &str,
        config: &ProfileConfig,
        base_dir: Option<&Path>,
        rng: &mut R,
    ) -> Self {
        let name = config.technology_name().unwrap_or(package_name).to_string();
        let embed = |rel: Option<&str>| {
            rel.and_then(|rel| payload::resolve_asset_path(base_dir, rel))
                .and_then(|path| payload::read_base64(&path))
        };

        Self {
            short_id: short_id(&name),
            guid: random_guid_prefix(rng),
            version: config.version_text(),
            notes: config.description().unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            info_url: config.url().unwrap_or_default().to_string(),
            support_url: config.support().unwrap_or_default().to_string(),
            logo: embed(config.logo_rel_path()),
            icon: embed(config.icon_rel_path()),
            name,
        }
    }

    /// The technology name; also the namespace of every stereotype.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    pub fn support_url(&self) -> &str {
        &self.support_url
    }

    /// Base64 logo bitmap.
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Base64 icon bitmap.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// `name` without whitespace, cut to [`SHORT_ID_LEN`] characters.
pub fn short_id(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .take(SHORT_ID_LEN)
        .collect()
}

/// The first twelve characters of a random GUID, `xxxxxxxx-xxx`.
pub fn random_guid_prefix<R: Rng>(rng: &mut R) -> String {
    let high: u32 = rng.random();
    let low: u16 = rng.random_range(0..0x1000);
    format!("{high:08x}-{low:03x}")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("Shop"), "Shop");
        assert_eq!(short_id("My Big Shop Profile"), "MyBigShopPro");
        assert_eq!(short_id(" a\tb\nc "), "abc");
    }

    #[test]
    fn test_guid_prefix_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let guid = random_guid_prefix(&mut rng);
        assert_eq!(guid.len(), 12);
        assert_eq!(&guid[8..9], "-");
        assert!(guid.chars().filter(|c| *c != '-').all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        let identity = ProfileIdentity::new("Shop", &ProfileConfig::default(), None, &mut rng);
        assert_eq!(identity.name(), "Shop");
        assert_eq!(identity.short_id(), "Shop");
        assert_eq!(identity.version(), "1");
        assert_eq!(identity.notes(), DEFAULT_DESCRIPTION);
        assert_eq!(identity.info_url(), "");
        assert!(identity.logo().is_none());
        assert!(identity.icon().is_none());
    }

    #[test]
    fn test_configured_identity() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.bmp"), b"BM").unwrap();
        let config = ProfileConfig::parse(
            "technologyName=Retail Modeling Language\n\
             version=2.5\n\
             url=https://example.org\n\
             profileDescription=Retail DSL\n\
             profileLogoRelPath=logo.bmp\n\
             profileIconRelPath=missing.bmp\n",
        );
        let mut rng = StdRng::seed_from_u64(1);
        let identity = ProfileIdentity::new("Shop", &config, Some(dir.path()), &mut rng);
        assert_eq!(identity.name(), "Retail Modeling Language");
        assert_eq!(identity.short_id(), "RetailModeli");
        assert_eq!(identity.version(), "2.5");
        assert_eq!(identity.notes(), "Retail DSL");
        assert_eq!(identity.info_url(), "https://example.org");
        assert_eq!(identity.logo(), Some("Qk0="));
        assert!(identity.icon().is_none());
    }
}
