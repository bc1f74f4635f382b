use serde::{Deserialize, Serialize};

/// One selectable resolution of a diplomatic negotiation.
///
/// The engine attaches these to event options as plain data; the host
/// dispatches on the kind and performs the actual mutation (ending the war,
/// scheduling installments, transferring population). No callbacks cross
/// the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DemandKind {
    /// Lump-sum payment; magnitude is the silver amount.
    Tribute,
    /// Spread payment; magnitude is the daily amount.
    Installment,
    /// Territory cession; magnitude is the population (and capacity) ceded.
    PopulationCession,
    /// Open-market term; magnitude is the duration in days.
    MarketAccess,
    Vassalize,
    Annex,
    /// End the war with no further terms.
    PeaceOnly,
    /// Decline the whole negotiation; records the rejection and nothing else.
    Reject,
}

string_enum!(DemandKind {
    Tribute => "tribute",
    Installment => "installment",
    PopulationCession => "population_cession",
    MarketAccess => "market_access",
    Vassalize => "vassalize",
    Annex => "annex",
    PeaceOnly => "peace_only",
    Reject => "reject",
});

/// Payload carried by a diplomatic event option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandDirective {
    pub kind: DemandKind,
    /// Meaning depends on the kind; 0.0 for kinds without a magnitude.
    #[serde(default)]
    pub magnitude: f64,
}

impl DemandDirective {
    pub fn new(kind: DemandKind, magnitude: f64) -> Self {
        Self { kind, magnitude }
    }

    pub fn flat(kind: DemandKind) -> Self {
        Self {
            kind,
            magnitude: 0.0,
        }
    }
}
