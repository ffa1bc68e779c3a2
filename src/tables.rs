//! Static lookup tables: subtopic to category, tag marker to label, and the
//! grammar groups shown as the coarse grammatical filter.

/// Category assigned to entries whose dimension has no mapping.
pub const OTHER_CATEGORY: &str = "Other";

/// Subtopic (dimension) to topic category.
const DIMENSION_CATEGORIES: &[(&str, &str)] = &[
    ("Hello", "Introductions"),
    ("Learning Chinese 1", "Language Learning"),
    ("Learning Chinese 2", "Language Learning"),
    ("School", "Language Learning"),
    ("Food", "Food & Dining"),
    ("Taste", "Food & Dining"),
    ("Ordering Food", "Food & Dining"),
    ("Restaurants 1", "Food & Dining"),
    ("Restaurants 2", "Food & Dining"),
    ("Helping Out", "Social Interactions"),
    ("Suggestions", "Social Interactions"),
    ("Dating", "Social Interactions"),
    ("Feelings", "Social Interactions"),
    ("Greetings", "Social Interactions"),
    ("Apologizing", "Social Interactions"),
    ("Gossip", "Social Interactions"),
    ("Arguments", "Social Interactions"),
    ("Praise", "Social Interactions"),
    ("Appearance", "People & Descriptions"),
    ("Clothes", "People & Descriptions"),
    ("Colors", "People & Descriptions"),
    ("Personality", "People & Descriptions"),
    ("Money", "Daily Life"),
    ("Daily Schedule", "Daily Life"),
    ("Habits", "Daily Life"),
    ("Housework", "Daily Life"),
    ("Mistakes", "Daily Life"),
    ("Bad Luck", "Daily Life"),
    ("Family 1", "Family"),
    ("Family 2", "Family"),
    ("Career", "Work & Career"),
    ("Interviews", "Work & Career"),
    ("Office Work", "Work & Career"),
    ("Work", "Work & Career"),
    ("Shopping", "Shopping"),
    ("Online Shopping", "Shopping"),
    ("Bargaining", "Shopping"),
    ("Transport", "Travel"),
    ("Traveling 1", "Travel"),
    ("Traveling 2", "Travel"),
    ("Catching a Flight", "Travel"),
    ("Going Abroad", "Travel"),
    ("Renting", "Travel"),
    ("Hometown", "Locations"),
    ("Locations", "Locations"),
    ("Directions", "Locations"),
    ("Personal Information", "Personal & Communication"),
    ("Phone-Calls", "Personal & Communication"),
    ("Communications", "Personal & Communication"),
    ("Time", "Time & Dates"),
    ("Dates", "Time & Dates"),
    ("Rooms", "Home & Living"),
    ("Weather", "Home & Living"),
    ("Leisure", "Hobbies & Free Time"),
    ("Sports", "Hobbies & Free Time"),
    ("Spare Time", "Hobbies & Free Time"),
    ("Sports Competitions", "Hobbies & Free Time"),
    ("Movies", "Hobbies & Free Time"),
    ("Hiking", "Hobbies & Free Time"),
    ("Comparing", "Cognitive & Emotions"),
    ("Shocked", "Cognitive & Emotions"),
    ("Weight Loss", "Health"),
    ("Health", "Health"),
    ("Pets", "Nature & Animals"),
    ("Nature", "Nature & Animals"),
    ("Environment", "Nature & Animals"),
    ("China 1", "Culture"),
    ("China 2", "Culture"),
];

/// Tag marker to human-readable label. Order matters for the reverse lookup:
/// when two markers share a label, the later one wins.
const TAG_DESCRIPTIONS: &[(&str, &str)] = &[
    ("V.", "Verb"),
    ("V.O.", "Verb-Object"),
    ("S.V.", "Subject-Verb"),
    ("R.V.", "Reduplicated Verb"),
    ("AUX.", "Auxiliary Verb"),
    ("COV.", "Coverb"),
    ("B.F.", "Base Form"),
    ("N.", "Noun"),
    ("NOUN", "Noun"),
    ("PR.", "Pronoun"),
    ("SUF.", "Suffix"),
    ("A.M.", "Adjective Modifier"),
    ("ATTR.", "Attributive"),
    ("ADV.", "Adverb"),
    ("M.", "Measure Word"),
    ("M.P.", "Measure Word / Particle"),
    ("P.W.", "Particle Word"),
    ("CONS.", "Conjunction"),
    ("CONJ.", "Conjunction"),
    ("NUM.", "Number"),
];

/// A named set of tag markers used as a coarse grammatical filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarGroup {
    pub name: &'static str,
    pub tags: &'static [&'static str],
}

impl GrammarGroup {
    /// Whether any of `tags` belongs to this group.
    pub fn matches(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|g| tags.iter().any(|t| t == g))
    }
}

pub const GRAMMAR_GROUPS: &[GrammarGroup] = &[
    GrammarGroup {
        name: "Verbs",
        tags: &["V.", "V.O.", "S.V.", "R.V.", "AUX.", "COV.", "B.F."],
    },
    GrammarGroup {
        name: "Nouns & Pronouns",
        tags: &["N.", "NOUN", "PR.", "SUF."],
    },
    GrammarGroup {
        name: "Adjectives",
        tags: &["A.M.", "ATTR."],
    },
    GrammarGroup {
        name: "Adverbs",
        tags: &["ADV."],
    },
    GrammarGroup {
        name: "Measure/Classifiers",
        tags: &["M.", "M.P."],
    },
    GrammarGroup {
        name: "Particles",
        tags: &["P.W."],
    },
    GrammarGroup {
        name: "Conjunctions",
        tags: &["CONS.", "CONJ."],
    },
    GrammarGroup {
        name: "Numbers",
        tags: &["NUM."],
    },
];

/// Maps a dimension to its category. Total: unknown dimensions map to [`OTHER_CATEGORY`].
pub fn category_for(dimension: &str) -> &'static str {
    DIMENSION_CATEGORIES
        .iter()
        .find(|(dim, _)| *dim == dimension)
        .map(|(_, cat)| *cat)
        .unwrap_or(OTHER_CATEGORY)
}

/// Whether `category` is a value the dimension map can produce.
pub fn is_known_category(category: &str) -> bool {
    category == OTHER_CATEGORY || DIMENSION_CATEGORIES.iter().any(|(_, cat)| *cat == category)
}

/// Looks up a grammar group by name.
pub fn group(name: &str) -> Option<&'static GrammarGroup> {
    GRAMMAR_GROUPS.iter().find(|g| g.name == name)
}

/// Human-readable label for a tag marker.
pub fn tag_description(tag: &str) -> Option<&'static str> {
    TAG_DESCRIPTIONS
        .iter()
        .find(|(marker, _)| *marker == tag)
        .map(|(_, label)| *label)
}

/// Reverse lookup restricted to markers accepted by `present`.
/// Later markers in the description table override earlier ones sharing a label.
pub fn tag_for_label(label: &str, present: impl Fn(&str) -> bool) -> Option<&'static str> {
    TAG_DESCRIPTIONS
        .iter()
        .rev()
        .find(|(marker, l)| *l == label && present(*marker))
        .map(|(marker, _)| *marker)
}

/// All (marker, label) pairs in table order.
pub fn tag_descriptions() -> impl Iterator<Item = (&'static str, &'static str)> {
    TAG_DESCRIPTIONS.iter().copied()
}
