//! Projects dual-locale trees onto a single locale.
//!
//! The output never contains localized leaves, so picking is idempotent, and
//! every non-leaf map and sequence keeps its keys and length.

use serde_json::Value;

use super::value::{
    DualLocaleValue,
    LeafDetection,
};
use crate::types::LocaleSet;

/// Resolves every localized leaf in `node` to `locale`.
///
/// Missing variants fall back as described in
/// [`LocalizedLeaf::resolve`](super::LocalizedLeaf::resolve). A leaf without
/// any variant is returned in its authored shape.
#[must_use]
pub fn pick(locale: &str, node: &DualLocaleValue, locales: &LocaleSet) -> Value {
    match node {
        DualLocaleValue::Value(value) => value.clone(),
        DualLocaleValue::Seq(items) => Value::Array(pick_array(locale, items, locales)),
        DualLocaleValue::Map(entries) => Value::Object(
            entries.iter().map(|(key, child)| (key.clone(), pick(locale, child, locales))).collect(),
        ),
        DualLocaleValue::Localized(leaf) => leaf
            .resolve(locale, locales)
            .map_or_else(|| node.to_json(), |variant| pick(locale, variant, locales)),
    }
}

/// [`pick`] over a top-level list of items.
#[must_use]
pub fn pick_array(locale: &str, nodes: &[DualLocaleValue], locales: &LocaleSet) -> Vec<Value> {
    nodes.iter().map(|node| pick(locale, node, locales)).collect()
}

/// Parses raw JSON with `detection` and picks `locale` from it.
#[must_use]
pub fn pick_json(
    locale: &str,
    value: &Value,
    detection: &LeafDetection,
    locales: &LocaleSet,
) -> Value {
    pick(locale, &DualLocaleValue::from_json(value, detection), locales)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::localize::LocalizedLeaf;

    fn tagged_tree() -> Value {
        json!({
            "title": { "$l10n": { "de": "Geschäftsplan", "en": "Business plan" } },
            "year": 2025,
            "draft": false,
            "owner": null,
            "chapters": [
                { "id": "market", "label": { "$l10n": { "de": "Markt", "en": "Market" } } },
                { "id": "team", "label": { "$l10n": { "de": "Team" } } }
            ],
            "meta": { "slug": "plan" }
        })
    }

    #[rstest]
    #[case::german("de", "Geschäftsplan", "Markt", "Team")]
    #[case::english("en", "Business plan", "Market", "Team")]
    fn pick_resolves_every_leaf(
        #[case] locale: &str,
        #[case] title: &str,
        #[case] first: &str,
        #[case] second: &str,
    ) {
        let picked =
            pick_json(locale, &tagged_tree(), &LeafDetection::default(), &LocaleSet::default());

        assert_that!(
            picked,
            eq(&json!({
                "title": title,
                "year": 2025,
                "draft": false,
                "owner": null,
                "chapters": [
                    { "id": "market", "label": first },
                    { "id": "team", "label": second }
                ],
                "meta": { "slug": "plan" }
            }))
        );
    }

    #[rstest]
    fn primitives_pass_through() {
        let locales = LocaleSet::default();
        for raw in [json!("text"), json!(1.5), json!(true), Value::Null] {
            assert_that!(pick_json("en", &raw, &LeafDetection::default(), &locales), eq(&raw));
        }
    }

    #[rstest]
    fn structural_leaf_falls_back_to_other_locale() {
        let detection = LeafDetection::structural(LocaleSet::default());
        let raw = json!({ "a": { "de": "nur deutsch" }, "b": { "en": "english only" } });

        let en = pick_json("en", &raw, &detection, &LocaleSet::default());
        let de = pick_json("de", &raw, &detection, &LocaleSet::default());

        assert_that!(en, eq(&json!({ "a": "nur deutsch", "b": "english only" })));
        assert_that!(de, eq(&json!({ "a": "nur deutsch", "b": "english only" })));
    }

    #[rstest]
    fn nested_leaves_inside_variants_are_resolved() {
        let raw = json!({
            "$l10n": {
                "de": { "headline": "Kosten", "note": { "$l10n": { "de": "netto", "en": "net" } } },
                "en": { "headline": "Costs", "note": { "$l10n": { "en": "net" } } }
            }
        });

        let picked = pick_json("de", &raw, &LeafDetection::default(), &LocaleSet::default());

        assert_that!(picked, eq(&json!({ "headline": "Kosten", "note": "netto" })));
    }

    #[rstest]
    fn empty_leaf_is_returned_unchanged() {
        let raw = json!({ "$l10n": {} });

        let picked = pick_json("en", &raw, &LeafDetection::default(), &LocaleSet::default());

        assert_that!(picked, eq(&raw));
    }

    #[rstest]
    fn pick_array_keeps_order_and_length() {
        let locales = LocaleSet::default();
        let items: Vec<DualLocaleValue> = ["eins", "zwei", "drei"]
            .iter()
            .map(|de| {
                DualLocaleValue::Localized(
                    LocalizedLeaf::structural()
                        .with("de", DualLocaleValue::Value(json!(de)))
                        .with("en", DualLocaleValue::Value(json!(format!("en:{de}")))),
                )
            })
            .collect();

        let picked = pick_array("en", &items, &locales);

        assert_eq!(picked, vec![json!("en:eins"), json!("en:zwei"), json!("en:drei")]);
    }

    #[rstest]
    fn input_is_not_mutated() {
        let raw = tagged_tree();
        let node = DualLocaleValue::from_json(&raw, &LeafDetection::default());

        let _ = pick("en", &node, &LocaleSet::default());

        assert_that!(node.to_json(), eq(&raw));
    }

    #[rstest]
    fn picking_twice_is_idempotent() {
        let locales = LocaleSet::default();
        let detection = LeafDetection::default();
        let once = pick_json("en", &tagged_tree(), &detection, &locales);

        let twice = pick_json("en", &once, &detection, &locales);

        assert_that!(twice, eq(&once));
    }
}
