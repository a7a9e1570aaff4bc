//! Category kind vocabulary and the raw-name translation table.
//!
//! The puzzle source labels its squares with upper-case names
//! (`POKEMON_TYPE`, `LEGENDARY_TRIO`, …). Matchers speak the canonical
//! lower-case identifiers. [`KindTable`] is the only place that knows how
//! to go from one to the other, and it is passed in explicitly wherever a
//! grid is built.

use std::collections::HashMap;
use std::fmt;

/// A category kind. Twenty kinds are recognized; anything else is kept
/// verbatim in [`CategoryKind::Other`] and left to the matcher to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryKind {
    Type,
    Generation,
    Move,
    Ability,
    Baby,
    Mythical,
    Legendary,
    LegendaryTrio,
    UltraBeast,
    Mega,
    DualType,
    Monotype,
    Gmax,
    EvolvedBy,
    EvolutionPosition,
    EvolutionBranched,
    Hisui,
    FirstPartner,
    Fossil,
    Paradox,
    Other(String),
}

impl CategoryKind {
    /// Every recognized kind, in vocabulary order.
    pub const RECOGNIZED: [CategoryKind; 20] = [
        Self::Type,
        Self::Generation,
        Self::Move,
        Self::Ability,
        Self::Baby,
        Self::Mythical,
        Self::Legendary,
        Self::LegendaryTrio,
        Self::UltraBeast,
        Self::Mega,
        Self::DualType,
        Self::Monotype,
        Self::Gmax,
        Self::EvolvedBy,
        Self::EvolutionPosition,
        Self::EvolutionBranched,
        Self::Hisui,
        Self::FirstPartner,
        Self::Fossil,
        Self::Paradox,
    ];

    /// Canonical identifier, as matchers expect it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Type => "type",
            Self::Generation => "generation",
            Self::Move => "move",
            Self::Ability => "ability",
            Self::Baby => "baby",
            Self::Mythical => "mythical",
            Self::Legendary => "legendary",
            Self::LegendaryTrio => "legendary-trio",
            Self::UltraBeast => "ultra-beast",
            Self::Mega => "mega",
            Self::DualType => "dual-type",
            Self::Monotype => "monotype",
            Self::Gmax => "gmax",
            Self::EvolvedBy => "evolved-by",
            Self::EvolutionPosition => "evolution-position",
            Self::EvolutionBranched => "evolution-branched",
            Self::Hisui => "hisui",
            Self::FirstPartner => "first-partner",
            Self::Fossil => "fossil",
            Self::Paradox => "paradox",
            Self::Other(name) => name,
        }
    }

    /// Parse a canonical identifier. Unknown names become [`CategoryKind::Other`].
    pub fn parse(name: &str) -> Self {
        Self::RECOGNIZED
            .iter()
            .find(|kind| kind.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Self::Other(name.to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw source names and the canonical kind each one maps to.
const SOURCE_NAMES: [(&str, CategoryKind); 20] = [
    ("POKEMON_TYPE", CategoryKind::Type),
    ("GENERATION", CategoryKind::Generation),
    ("POKEMON_MOVE", CategoryKind::Move),
    ("POKEMON_ABILITY", CategoryKind::Ability),
    ("BABY", CategoryKind::Baby),
    ("MYTHICAL", CategoryKind::Mythical),
    ("LEGENDARY", CategoryKind::Legendary),
    ("LEGENDARY_TRIO", CategoryKind::LegendaryTrio),
    ("ULTRA_BEAST", CategoryKind::UltraBeast),
    ("MEGA", CategoryKind::Mega),
    ("DUAL_TYPE", CategoryKind::DualType),
    ("MONOTYPE", CategoryKind::Monotype),
    ("GMAX", CategoryKind::Gmax),
    ("EVOLVED_BY", CategoryKind::EvolvedBy),
    ("EVOLUTION_POSITION", CategoryKind::EvolutionPosition),
    ("EVOLUTION_BRANCHED", CategoryKind::EvolutionBranched),
    ("HISUI", CategoryKind::Hisui),
    ("FIRST_PARTNER", CategoryKind::FirstPartner),
    ("FOSSIL", CategoryKind::Fossil),
    ("PARADOX", CategoryKind::Paradox),
];

/// Immutable raw-name → kind table.
#[derive(Debug, Clone)]
pub struct KindTable {
    names: HashMap<String, CategoryKind>,
}

impl Default for KindTable {
    fn default() -> Self {
        Self {
            names: SOURCE_NAMES
                .iter()
                .map(|(raw, kind)| ((*raw).to_string(), kind.clone()))
                .collect(),
        }
    }
}

impl KindTable {
    /// Empty table: every raw name falls through to canonical parsing.
    pub fn empty() -> Self {
        Self { names: HashMap::new() }
    }

    /// Return a copy of this table with `raw` mapped to `canonical`.
    pub fn with_alias(mut self, raw: &str, canonical: &str) -> Self {
        self.names.insert(raw.to_string(), CategoryKind::parse(canonical));
        self
    }

    /// Translate a source name. Names missing from the table are parsed as
    /// canonical identifiers, so `"type"` and `"POKEMON_TYPE"` agree.
    pub fn translate(&self, raw: &str) -> CategoryKind {
        match self.names.get(raw) {
            Some(kind) => kind.clone(),
            None => CategoryKind::parse(raw),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
