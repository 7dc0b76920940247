use std::borrow::Cow;

use gpui::{Result, SharedString};
use rust_embed::RustEmbed;

use crate::assets::AssetProvider;

/// Icons bundled with the crate.
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "icons/**/*.svg"]
#[exclude = "*.DS_Store"]
pub struct MosaicAssets;

impl AssetProvider for MosaicAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        <Self as RustEmbed>::get(path).map(|file| file.data)
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(MosaicAssets::iter()
            .filter(|p| p.starts_with(path))
            .map(|p| p.into())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MosaicIconKind;

    #[test]
    fn test_every_icon_kind_is_embedded() {
        for kind in MosaicIconKind::ALL {
            let path = kind.path();
            assert!(
                MosaicAssets.get(&path).is_some(),
                "missing embedded icon {path}"
            );
        }
    }
}
