use std::borrow::Cow;

use anyhow::anyhow;
use gpui::{AssetSource, Result, SharedString};
use smallvec::SmallVec;

/// An [`AssetSource`] that asks each provider in order and returns the
/// first hit. Build one with [`assets!`](crate::assets!).
pub struct Assets<const N: usize> {
    providers: SmallVec<[Box<dyn AssetProvider>; N]>,
}

impl<const N: usize> Assets<N> {
    pub fn new(providers: [Box<dyn AssetProvider>; N]) -> Assets<N> {
        Self {
            providers: SmallVec::from(providers),
        }
    }
}

/// ```ignore
/// Application::new().with_assets(assets![MosaicAssets, MyAppAssets]);
/// ```
#[macro_export]
macro_rules! assets {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::Assets::new([
            $( Box::new($item) ),*
        ])
    };
}

impl<const N: usize> AssetSource for Assets<N> {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }

        self.providers
            .iter()
            .find_map(|provider| provider.get(path))
            .map(Some)
            .ok_or_else(|| {
                tracing::warn!(path, "asset not found in any provider");
                anyhow!("could not find asset at path \"{path}\"")
            })
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let mut listed = Vec::new();

        for provider in &self.providers {
            listed.extend(provider.list(path)?);
        }

        Ok(listed)
    }
}

pub trait AssetProvider: Send + Sync {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
    fn list(&self, path: &str) -> Result<Vec<SharedString>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider(&'static str, &'static [u8]);

    impl AssetProvider for StaticProvider {
        fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
            (path == self.0).then(|| Cow::Borrowed(self.1))
        }

        fn list(&self, path: &str) -> Result<Vec<SharedString>> {
            Ok(self
                .0
                .starts_with(path)
                .then(|| SharedString::from(self.0))
                .into_iter()
                .collect())
        }
    }

    #[test]
    fn test_first_provider_wins() {
        let assets = assets![
            StaticProvider("icons/a.svg", b"first"),
            StaticProvider("icons/a.svg", b"second"),
        ];

        let loaded = assets.load("icons/a.svg").unwrap().unwrap();
        assert_eq!(loaded.as_ref(), b"first");
    }

    #[test]
    fn test_missing_and_empty_paths() {
        let assets = assets![StaticProvider("icons/a.svg", b"a")];

        assert!(assets.load("").unwrap().is_none());
        assert!(assets.load("icons/missing.svg").is_err());
    }

    #[test]
    fn test_list_merges_providers() {
        let assets = assets![
            StaticProvider("icons/a.svg", b"a"),
            StaticProvider("icons/b.svg", b"b"),
            StaticProvider("fonts/c.ttf", b"c"),
        ];

        assert_eq!(assets.list("icons/").unwrap().len(), 2);
    }
}
