//! Display strings of the scanner overlay, resolved through Fluent.

use std::{collections::HashMap, fmt, rc::Rc};

use fluent_bundle::{FluentBundle, FluentResource};
use tracing::warn;
pub use unic_langid::LanguageIdentifier;

use crate::error::{Error, Result};

pub const TITLE: &str = "qr-scanner-title";
pub const INSTRUCTIONS: &str = "qr-scanner-instructions";
pub const CANCEL: &str = "common-cancel";

pub const FALLBACK_LOCALE: &str = "en-US";

const EN_US: &str = "\
qr-scanner-title = Scan QR code
qr-scanner-instructions = Point your camera at the QR code
common-cancel = Cancel
";

const ES: &str = "\
qr-scanner-title = Escanear código QR
qr-scanner-instructions = Apunta la cámara al código QR
common-cancel = Cancelar
";

type Bundle = Rc<FluentBundle<FluentResource>>;

/// Fluent bundles keyed by locale.
#[derive(Clone, Default)]
pub struct LocaleMap(HashMap<LanguageIdentifier, Bundle>);

impl LocaleMap {
    /// The translations shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_resources([(FALLBACK_LOCALE, EN_US), ("es", ES)])
    }

    pub fn from_resources<'a, I>(resources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = Self::default();
        for (locale, source) in resources {
            map.add_resource(locale, source)?;
        }
        Ok(map)
    }

    /// Adds or replaces the bundle for `locale`.
    pub fn add_resource(&mut self, locale: &str, source: &str) -> Result<()> {
        let lang_id = parse_locale(locale)?;
        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errs)| fluent_error(locale, &errs))?;

        let mut bundle = FluentBundle::new(vec![lang_id.clone()]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errs| fluent_error(locale, &errs))?;

        self.0.insert(lang_id, Rc::new(bundle));
        Ok(())
    }

    pub fn contains(&self, locale: &LanguageIdentifier) -> bool {
        self.0.contains_key(locale)
    }

    /// Exact match first, then a bundle with the same language. Among those,
    /// en-US wins, then the lowest locale tag.
    fn find_bundle(&self, locale: &LanguageIdentifier) -> Option<&Bundle> {
        if let Some(bundle) = self.0.get(locale) {
            return Some(bundle);
        }
        let fallback = fallback_locale();
        if fallback.language == locale.language {
            if let Some(bundle) = self.0.get(&fallback) {
                return Some(bundle);
            }
        }
        self.0
            .iter()
            .filter(|(key, _)| key.language == locale.language)
            .min_by_key(|(key, _)| key.to_string())
            .map(|(_, bundle)| bundle)
    }

    /// Formats `key` for `locale`, falling back to en-US and finally to the
    /// key itself.
    pub fn text(&self, locale: &LanguageIdentifier, key: &str) -> String {
        let fallback = fallback_locale();
        let bundles = [self.find_bundle(locale), self.find_bundle(&fallback)];
        for bundle in bundles.into_iter().flatten() {
            if let Some(text) = format_message(bundle, key) {
                return text;
            }
        }
        warn!(key, %locale, "missing translation");
        key.to_string()
    }
}

fn fallback_locale() -> LanguageIdentifier {
    FALLBACK_LOCALE.parse().unwrap_or_default()
}

fn fluent_error(locale: &str, errs: &impl fmt::Debug) -> Error {
    Error::Fluent {
        locale: locale.to_string(),
        reason: format!("{errs:?}"),
    }
}

fn format_message(bundle: &FluentBundle<FluentResource>, key: &str) -> Option<String> {
    let pattern = bundle.get_message(key)?.value()?;
    let mut errors = vec![];
    let text = bundle.format_pattern(pattern, None, &mut errors);
    if !errors.is_empty() {
        warn!(key, ?errors, "fluent formatting errors");
    }
    Some(text.into_owned())
}

impl fmt::Debug for LocaleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|lang_id| (lang_id, "<FluentBundle>")))
            .finish()
    }
}

pub fn parse_locale(locale: &str) -> Result<LanguageIdentifier> {
    locale
        .parse::<LanguageIdentifier>()
        .map_err(|source| Error::InvalidLocale {
            locale: locale.to_string(),
            source,
        })
}

/// The OS locale, or en-US when it is unknown or unparsable.
pub fn system_locale() -> LanguageIdentifier {
    sys_locale::get_locale()
        .and_then(|l| l.parse().ok())
        .unwrap_or_else(fallback_locale)
}

/// The three strings shown by the scanner overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerText {
    pub title: String,
    pub instructions: String,
    pub cancel: String,
}

impl ScannerText {
    pub fn resolve(locales: &LocaleMap, locale: &LanguageIdentifier) -> Self {
        Self {
            title: locales.text(locale, TITLE),
            instructions: locales.text(locale, INSTRUCTIONS),
            cancel: locales.text(locale, CANCEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(s: &str) -> LanguageIdentifier {
        s.parse().unwrap()
    }

    #[test]
    fn english_strings() {
        let locales = LocaleMap::builtin().unwrap();
        let text = ScannerText::resolve(&locales, &lang("en-US"));
        assert_eq!(text.title, "Scan QR code");
        assert_eq!(text.instructions, "Point your camera at the QR code");
        assert_eq!(text.cancel, "Cancel");
    }

    #[test]
    fn region_falls_back_to_language() {
        let locales = LocaleMap::builtin().unwrap();
        assert_eq!(locales.text(&lang("es-MX"), CANCEL), "Cancelar");
        assert_eq!(locales.text(&lang("en-GB"), CANCEL), "Cancel");
    }

    #[test]
    fn same_language_prefers_the_fallback_locale() {
        let mut locales = LocaleMap::builtin().unwrap();
        locales
            .add_resource("en-GB", "common-cancel = Cancel it\n")
            .unwrap();
        for _ in 0..8 {
            assert_eq!(locales.text(&lang("en-AU"), CANCEL), "Cancel");
        }
        assert_eq!(locales.text(&lang("en-GB"), CANCEL), "Cancel it");
    }

    #[test]
    fn same_language_picks_the_lowest_tag() {
        let mut locales = LocaleMap::builtin().unwrap();
        locales
            .add_resource("es-MX", "common-cancel = Cancelar ya\n")
            .unwrap();
        locales
            .add_resource("es-ES", "common-cancel = Anular\n")
            .unwrap();
        assert_eq!(locales.text(&lang("es-AR"), CANCEL), "Cancelar");
    }

    #[test]
    fn unknown_language_uses_english() {
        let locales = LocaleMap::builtin().unwrap();
        assert_eq!(locales.text(&lang("ja"), TITLE), "Scan QR code");
    }

    #[test]
    fn missing_message_in_locale_uses_english() {
        let mut locales = LocaleMap::builtin().unwrap();
        locales
            .add_resource("de", "common-cancel = Abbrechen\n")
            .unwrap();
        assert_eq!(locales.text(&lang("de"), CANCEL), "Abbrechen");
        assert_eq!(locales.text(&lang("de"), TITLE), "Scan QR code");
    }

    #[test]
    fn missing_everywhere_returns_key() {
        let locales = LocaleMap::builtin().unwrap();
        assert_eq!(locales.text(&lang("en-US"), "no-such-key"), "no-such-key");
    }

    #[test]
    fn invalid_resource() {
        let resources = [("en-US", "this is not fluent")];
        let err = LocaleMap::from_resources(resources).unwrap_err();
        assert!(matches!(err, Error::Fluent { .. }));
    }

    #[test]
    fn invalid_locale() {
        assert!(matches!(
            parse_locale("not a locale!"),
            Err(Error::InvalidLocale { .. })
        ));
    }
}
