//! Dual-locale content model.
//!
//! Authored content trees mix ordinary structure with *localized leaves*,
//! nodes that carry the same value once per locale. Leaves are recognized a
//! single time, when raw JSON is converted into [`DualLocaleValue`], so the
//! picker never has to guess.

use serde_json::{
    Map,
    Value,
};

use crate::types::{
    Locale,
    LocaleSet,
};

/// Policy that decides which JSON objects are localized leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafDetection {
    /// `{ "<tag>": { "de": .., "en": .. } }` is a leaf; nothing else is.
    Tagged {
        /// Wrapper key, `$l10n` by default.
        tag: String,
    },
    /// A non-empty object whose keys are all supported locale codes is a leaf.
    ///
    /// Known limitation: ordinary structure that happens to be keyed only by
    /// locale codes (`{ "de": .., "en": .. }` meant as data) is indistinguishable
    /// from a leaf and will be collapsed.
    Structural {
        /// Codes that may key a leaf.
        locales: LocaleSet,
    },
}

impl LeafDetection {
    /// Wrapper key of tagged leaves unless configured otherwise.
    pub const DEFAULT_TAG: &'static str = "$l10n";

    /// Detects `{ "<tag>": { .. } }` wrappers.
    #[must_use]
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::Tagged { tag: tag.into() }
    }

    /// Detects objects keyed only by supported locale codes.
    #[must_use]
    pub const fn structural(locales: LocaleSet) -> Self {
        Self::Structural { locales }
    }

    /// Returns the per-locale variants if `map` is a localized leaf.
    fn variants<'a>(&self, map: &'a Map<String, Value>) -> Option<&'a Map<String, Value>> {
        match self {
            Self::Tagged { tag } => {
                if map.len() != 1 {
                    return None;
                }
                map.get(tag).and_then(Value::as_object)
            }
            Self::Structural { locales } => {
                (!map.is_empty() && map.keys().all(|key| locales.is_supported(key))).then_some(map)
            }
        }
    }
}

impl Default for LeafDetection {
    fn default() -> Self {
        Self::tagged(Self::DEFAULT_TAG)
    }
}

/// A content node that may carry per-locale variants.
#[derive(Debug, Clone, PartialEq)]
pub enum DualLocaleValue {
    /// String, number, boolean or null.
    Value(Value),
    /// Array.
    Seq(Vec<DualLocaleValue>),
    /// Keys keep their authored order; order carries no meaning.
    Map(Vec<(String, DualLocaleValue)>),
    /// Per-locale variants of one value.
    Localized(LocalizedLeaf),
}

impl DualLocaleValue {
    /// Converts raw JSON, recognizing leaves with `detection`.
    #[must_use]
    pub fn from_json(value: &Value, detection: &LeafDetection) -> Self {
        match value {
            Value::Array(items) => {
                Self::Seq(items.iter().map(|item| Self::from_json(item, detection)).collect())
            }
            Value::Object(map) => {
                if let Some(variants) = detection.variants(map) {
                    let tag = match detection {
                        LeafDetection::Tagged { tag } => Some(tag.clone()),
                        LeafDetection::Structural { .. } => None,
                    };
                    let variants = variants
                        .iter()
                        .map(|(code, v)| (Locale::new(code.as_str()), Self::from_json(v, detection)))
                        .collect();
                    return Self::Localized(LocalizedLeaf { variants, tag });
                }
                Self::Map(
                    map.iter()
                        .map(|(key, v)| (key.clone(), Self::from_json(v, detection)))
                        .collect(),
                )
            }
            primitive => Self::Value(primitive.clone()),
        }
    }

    /// Converts back to JSON, rendering leaves in the shape they were read in.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Seq(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => Value::Object(
                entries.iter().map(|(key, node)| (key.clone(), node.to_json())).collect(),
            ),
            Self::Localized(leaf) => leaf.to_json(),
        }
    }

    /// Whether any localized leaf occurs in this subtree.
    #[must_use]
    pub fn contains_localized(&self) -> bool {
        match self {
            Self::Value(_) => false,
            Self::Seq(items) => items.iter().any(Self::contains_localized),
            Self::Map(entries) => entries.iter().any(|(_, node)| node.contains_localized()),
            Self::Localized(_) => true,
        }
    }
}

/// Per-locale variants of one value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalizedLeaf {
    /// Variants in authored order.
    variants: Vec<(Locale, DualLocaleValue)>,
    /// Wrapper key when the leaf was authored in tagged form.
    tag: Option<String>,
}

impl LocalizedLeaf {
    /// An empty leaf rendered in tagged form.
    #[must_use]
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self { variants: Vec::new(), tag: Some(tag.into()) }
    }

    /// An empty leaf rendered as a bare locale-keyed object.
    #[must_use]
    pub fn structural() -> Self {
        Self::default()
    }

    /// Adds or replaces the variant for `locale`.
    #[must_use]
    pub fn with(mut self, locale: impl Into<Locale>, value: DualLocaleValue) -> Self {
        let locale = locale.into();
        if let Some(slot) = self.variants.iter_mut().find(|(l, _)| *l == locale) {
            slot.1 = value;
        } else {
            self.variants.push((locale, value));
        }
        self
    }

    /// The variant authored for exactly `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&DualLocaleValue> {
        self.variants.iter().find(|(l, _)| l.as_str() == code).map(|(_, v)| v)
    }

    /// All variants, in authored order.
    #[must_use]
    pub fn variants(&self) -> &[(Locale, DualLocaleValue)] {
        &self.variants
    }

    /// Whether no variant was authored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Selects the variant for `requested`.
    ///
    /// Falls back through `locales` (default first), then to the first
    /// authored variant. `None` only for a leaf without variants.
    #[must_use]
    pub fn resolve(&self, requested: &str, locales: &LocaleSet) -> Option<&DualLocaleValue> {
        self.get(requested)
            .or_else(|| locales.fallback_order().find_map(|locale| self.get(locale.as_str())))
            .or_else(|| self.variants.first().map(|(_, v)| v))
    }

    /// Renders the leaf in its authored shape.
    fn to_json(&self) -> Value {
        let variants: Map<String, Value> = self
            .variants
            .iter()
            .map(|(locale, node)| (locale.as_str().to_string(), node.to_json()))
            .collect();
        match &self.tag {
            Some(tag) => {
                let mut wrapper = Map::new();
                wrapper.insert(tag.clone(), Value::Object(variants));
                Value::Object(wrapper)
            }
            None => Value::Object(variants),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn structural() -> LeafDetection {
        LeafDetection::structural(LocaleSet::default())
    }

    #[gtest]
    #[rstest]
    fn tagged_wrapper_is_a_leaf() {
        let node = DualLocaleValue::from_json(
            &json!({ "$l10n": { "de": "Markt", "en": "Market" } }),
            &LeafDetection::default(),
        );

        let DualLocaleValue::Localized(leaf) = node else {
            panic!("expected a localized leaf");
        };
        expect_that!(leaf.variants().len(), eq(2));
        expect_that!(leaf.get("en"), some(eq(&DualLocaleValue::Value(json!("Market")))));
    }

    #[rstest]
    fn tagged_detection_ignores_locale_keyed_structure() {
        let node = DualLocaleValue::from_json(
            &json!({ "de": "Markt", "en": "Market" }),
            &LeafDetection::default(),
        );

        assert_that!(node.contains_localized(), eq(false));
    }

    #[rstest]
    #[case::wrapper_with_sibling(json!({ "$l10n": { "de": "a" }, "extra": 1 }))]
    #[case::wrapper_not_object(json!({ "$l10n": "plain" }))]
    fn tagged_detection_requires_exact_wrapper(#[case] raw: Value) {
        let node = DualLocaleValue::from_json(&raw, &LeafDetection::default());

        assert_that!(node.contains_localized(), eq(false));
        assert_that!(node.to_json(), eq(&raw));
    }

    #[rstest]
    #[case::both(json!({ "de": "a", "en": "b" }), true)]
    #[case::only_de(json!({ "de": "a" }), true)]
    #[case::only_en(json!({ "en": "b" }), true)]
    #[case::foreign_key(json!({ "de": "a", "title": "b" }), false)]
    #[case::unsupported_locale(json!({ "fr": "a" }), false)]
    #[case::empty(json!({}), false)]
    fn structural_detection(#[case] raw: Value, #[case] is_leaf: bool) {
        let node = DualLocaleValue::from_json(&raw, &structural());

        assert_that!(matches!(node, DualLocaleValue::Localized(_)), eq(is_leaf));
    }

    #[rstest]
    fn to_json_restores_authored_shape() {
        let raw = json!({
            "title": { "$l10n": { "de": "Titel", "en": "Title" } },
            "items": [1, { "$l10n": { "en": "two" } }, null]
        });

        let node = DualLocaleValue::from_json(&raw, &LeafDetection::default());

        assert_that!(node.to_json(), eq(&raw));
        assert_that!(node.contains_localized(), eq(true));
    }

    #[gtest]
    #[rstest]
    fn resolve_prefers_requested_then_default_then_first() {
        let locales = LocaleSet::new(
            [Locale::from("de"), Locale::from("en"), Locale::from("fr")],
            Locale::from("de"),
        );
        let text = |s: &str| DualLocaleValue::Value(json!(s));
        let leaf = LocalizedLeaf::structural().with("en", text("en")).with("de", text("de"));
        let foreign = LocalizedLeaf::tagged("$l10n").with("it", text("it"));

        expect_that!(leaf.resolve("en", &locales), some(eq(&text("en"))));
        expect_that!(leaf.resolve("fr", &locales), some(eq(&text("de"))));
        expect_that!(foreign.resolve("de", &locales), some(eq(&text("it"))));
        expect_that!(LocalizedLeaf::structural().resolve("de", &locales), none());
    }

    #[rstest]
    fn with_replaces_existing_variant() {
        let leaf = LocalizedLeaf::structural()
            .with("de", DualLocaleValue::Value(json!("alt")))
            .with("de", DualLocaleValue::Value(json!("neu")));

        assert_that!(leaf.variants().len(), eq(1));
        assert_that!(leaf.get("de"), some(eq(&DualLocaleValue::Value(json!("neu")))));
    }
}
