/// Role categories the classifier knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Goalkeeper,
    CentralDefender,
    FullBack,
}

/// Position tokens and role-identifier prefixes for one role category
///
/// A position string such as `"D (RLC), DM"` matches when it contains any of the
/// `positions` tokens. Role identifiers are matched case-sensitively by prefix.
#[derive(Debug, Clone)]
pub struct EligibilityRule {
    pub category: RoleCategory,
    pub positions: &'static [&'static str],
    pub prefixes: &'static [&'static str],
}

impl EligibilityRule {
    pub const fn new(
        category: RoleCategory,
        positions: &'static [&'static str],
        prefixes: &'static [&'static str],
    ) -> Self {
        Self {
            category,
            positions,
            prefixes,
        }
    }
}

const GOALKEEPER_POSITIONS: &[&str] = &["GK"];

const CENTRAL_POSITIONS: &[&str] = &[
    "D (C)", "D (LC)", "D (RC)", "D (RLC)", "D (L)", "D (R)", "D (RL)", "DM",
];

// Wide defender, wing-back and wide midfield slots. No DM.
const WIDE_POSITIONS: &[&str] = &[
    "D (L)", "D (R)", "D (RL)", "D (LC)", "D (RC)", "D (RLC)", "WB (L)", "WB (R)", "WB (RL)",
    "M (L)", "M (R)", "M (RL)",
];

const GOALKEEPER_PREFIXES: &[&str] = &["gkd", "skd", "sks", "ska"];

const CENTRAL_PREFIXES: &[&str] = &[
    "bpdd", "bpds", "bpdc", "cdd", "cds", "cdc", "wcbd", "wcbs", "wcba", "ls", "la", "ld", "ncbd",
    "ncbs", "ncbc",
];

const FULLBACK_PREFIXES: &[&str] = &[
    "fbd", "fbs", "fba", "fbau", "nfbd", "wbd", "wbs", "wba", "wbau", "cwbs", "cwba", "iwbd",
    "iwbs", "iwba", "iwbau",
];

const RULES: &[EligibilityRule] = &[
    EligibilityRule::new(RoleCategory::Goalkeeper, GOALKEEPER_POSITIONS, GOALKEEPER_PREFIXES),
    EligibilityRule::new(RoleCategory::CentralDefender, CENTRAL_POSITIONS, CENTRAL_PREFIXES),
    EligibilityRule::new(RoleCategory::FullBack, WIDE_POSITIONS, FULLBACK_PREFIXES),
];

/// The static eligibility decision table, in lookup order
pub fn eligibility_rules() -> &'static [EligibilityRule] {
    RULES
}
