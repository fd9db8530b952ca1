/// Risk category axes in priority order. A keyword contributes to exactly
/// one category; when its text matches substrings in more than one, the
/// earliest category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Finance,
    Ethics,
    Logistics,
}

pub const CATEGORY_ORDER: [Category; 3] =
    [Category::Finance, Category::Ethics, Category::Logistics];

/// How a keyword matched within its winning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    Bad,
    Good,
    Neutral,
}

/// Substring lists for one category. Terms must be lowercase; keywords are
/// case-folded before matching.
#[derive(Debug, Clone, Default)]
pub struct CategoryLists {
    pub bad: Vec<String>,
    pub good: Vec<String>,
    /// Terms that place a keyword in the category without tipping it either
    /// way; scored with the neutral penalty. Empty unless configured.
    pub neutral: Vec<String>,
}

impl CategoryLists {
    fn from_terms(bad: &[&str], good: &[&str]) -> Self {
        Self {
            bad: bad.iter().map(|s| s.to_string()).collect(),
            good: good.iter().map(|s| s.to_string()).collect(),
            neutral: Vec::new(),
        }
    }
}

/// Keyword-to-category lexicon. Matching is substring containment against
/// the case-folded keyword, bad terms checked before good before neutral.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub finance: CategoryLists,
    pub ethics: CategoryLists,
    pub logistics: CategoryLists,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            finance: CategoryLists::from_terms(
                &[
                    "bankruptcy",
                    "currency",
                    "duty",
                    "tariffs",
                    "sanctions",
                    "export controls",
                    "ceo turnover",
                ],
                &["permits", "traceability", "esg", "chain-of-custody"],
            ),
            ethics: CategoryLists::from_terms(
                &[
                    "labor",
                    "poaching",
                    "conflict zones",
                    "mercury",
                    "environmental impact",
                    "ethics",
                ],
                &["esg", "traceability", "chain-of-custody"],
            ),
            logistics: CategoryLists::from_terms(
                &[
                    "port delays",
                    "lead times",
                    "customs",
                    "outsourcing",
                    "geopolitics",
                    "strike risk",
                ],
                // Slightly-good signal in context.
                &["logistics"],
            ),
        }
    }
}

impl Lexicon {
    pub fn lists(&self, category: Category) -> &CategoryLists {
        match category {
            Category::Finance => &self.finance,
            Category::Ethics => &self.ethics,
            Category::Logistics => &self.logistics,
        }
    }

    /// Classify an already case-folded keyword. Returns the first category
    /// in priority order containing a matching term, with bad terms winning
    /// over good within that category.
    pub fn classify(&self, keyword: &str) -> Option<(Category, KeywordMatch)> {
        for category in CATEGORY_ORDER {
            let lists = self.lists(category);
            if lists.bad.iter().any(|t| keyword.contains(t.as_str())) {
                return Some((category, KeywordMatch::Bad));
            }
            if lists.good.iter().any(|t| keyword.contains(t.as_str())) {
                return Some((category, KeywordMatch::Good));
            }
            if lists.neutral.iter().any(|t| keyword.contains(t.as_str())) {
                return Some((category, KeywordMatch::Neutral));
            }
        }
        None
    }

    /// Category alone, case-folding the keyword first. Used for display
    /// tinting of keyword chips.
    pub fn category_for(&self, keyword: &str) -> Option<Category> {
        self.classify(&keyword.to_lowercase()).map(|(c, _)| c)
    }
}
