use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Fill for a seat whose outcome is absent (postponed or uncontested).
pub const PENDING_COLOR: &str = "#eeeeee";
/// Fill for a party the color scale does not know.
pub const FALLBACK_COLOR: &str = "#dddddd";

lazy_static! {
    static ref DEFAULT_COLORS: BTreeMap<&'static str, &'static str> = {
        let mut colors = BTreeMap::new();
        colors.insert("PTI", "#2e8540");
        colors.insert("IND", "#8d99ae");
        colors.insert("PML-N", "#f4a261");
        colors.insert("PPPP", "#1d3557");
        colors.insert("MQM-P", "#e76f51");
        colors.insert("JUI-F", "#6c757d");
        colors.insert("PML-Q", "#80b918");
        colors.insert("IPP", "#ffbe0b");
        colors.insert("BAP", "#3a86ff");
        colors.insert("BNP", "#6a4c93");
        colors.insert("MWM", "#5e548e");
        colors.insert("PkMAP", "#b5838d");
        colors.insert("NP", "#264653");
        colors.insert("PML-Z", "#52796f");
        colors
    };
}

/// Static party configuration: the color scale and the disputed flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyTable {
    colors: BTreeMap<String, String>,
    #[serde(default)]
    disputed: BTreeSet<String>,
}

impl Default for PartyTable {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|(party, color)| (party.to_string(), color.to_string()))
                .collect(),
            disputed: BTreeSet::new(),
        }
    }
}

impl PartyTable {
    pub fn new(colors: BTreeMap<String, String>, disputed: BTreeSet<String>) -> Self {
        Self { colors, disputed }
    }

    pub fn with_disputed<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disputed = parties.into_iter().map(Into::into).collect();
        self
    }

    /// Scale color for a party, or the neutral fallback.
    pub fn color(&self, party: &str) -> &str {
        self.colors
            .get(party)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn is_disputed(&self, party: &str) -> bool {
        self.disputed.contains(party)
    }
}
