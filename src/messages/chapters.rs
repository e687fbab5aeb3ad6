//! Chapter fields exposed under `content.*` and the bundle built from them.

use serde_json::{
    Map,
    Value,
};

/// Declares [`ChapterField`] from `Variant => "key"` pairs.
macro_rules! chapter_fields {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        /// A document chapter whose root-level subtree is mirrored under
        /// `content.<key>`.
        ///
        /// Adding a chapter is one line in this list.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ChapterField {
            $(
                #[doc = concat!("`", $key, "`")]
                $variant
            ),+
        }

        impl ChapterField {
            /// Every field, in document order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Key of the field in the root tree and under `content`.
            #[must_use]
            pub const fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }
        }
    };
}

chapter_fields! {
    ExecutiveSummary => "executiveSummary",
    Problem => "problem",
    Solution => "solution",
    BusinessModel => "businessModel",
    Market => "market",
    MarketCompetitive => "marketCompetitive",
    Competition => "competition",
    Impact => "impact",
    Products => "products",
    Technology => "technology",
    Mlops => "mlops",
    ResponsibleAi => "responsibleAI",
    Gtm => "gtm",
    Operations => "operations",
    TeamOrg => "teamOrg",
    Company => "company",
    Partners => "partners",
    Roadmap => "roadmap",
    Milestones => "milestones",
    WorkPackagesDetailed => "workPackagesDetailed",
    Finance => "finance",
    FinancePlanDetailed => "financePlanDetailed",
    CostPlan => "costPlan",
    CapTable => "capTable",
    Funding => "funding",
    Risks => "risks",
    Legal => "legal",
    Sustainability => "sustainability",
    Dissemination => "dissemination",
    Exit => "exit",
    Cta => "cta",
    Appendix => "appendix",
}

impl ChapterField {
    /// The field stored under `key`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

/// One subtree per [`ChapterField`], taken from a locale's root tree.
///
/// Always fully populated: absent fields are empty objects.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterBundle {
    /// One entry per field, in [`ChapterField::ALL`] order.
    entries: Vec<(ChapterField, Value)>,
}

impl ChapterBundle {
    /// Reads every chapter field from `root`.
    ///
    /// A root that is not an object yields a bundle of empty objects.
    #[must_use]
    pub fn from_root(root: &Value) -> Self {
        let entries = ChapterField::ALL
            .iter()
            .map(|field| {
                let value = root
                    .get(field.key())
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()));
                (*field, value)
            })
            .collect();
        Self { entries }
    }

    /// Subtree of `field`.
    #[must_use]
    pub fn get(&self, field: ChapterField) -> Option<&Value> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    /// Fields with their subtrees, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ChapterField, &Value)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a bundle built by [`Self::from_root`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
