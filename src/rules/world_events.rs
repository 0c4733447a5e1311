//! World event trigger registry
//!
//! Each rule is a condition over the current stats and the policy log plus
//! static headline and detail pools. At most one event fires per resolution.

use crate::core::random::RandomSource;
use crate::core::types::{Decision, RoundResult, Urgency};
use crate::state::log::PolicyLog;
use crate::state::stats::Stats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CabinetCrisis,
    PublicUnrest,
    GlobalInfluence,
    InternalFriction,
    OppositionSurge,
    EconomicBoom,
    DiplomaticFallout,
    MilitaryTensions,
    InfrastructureCrisis,
    JusticePraise,
    BalancedLeadership,
}

pub struct EventRule {
    pub kind: EventKind,
    pub headlines: &'static [&'static str],
    pub details: &'static [&'static str],
    pub urgency: Urgency,
}

fn all_results(log: &PolicyLog, count: usize, result: RoundResult) -> bool {
    let recent = log.recent(count);
    recent.len() >= count && recent.iter().all(|e| e.result == result)
}

fn first_decision(log: &PolicyLog, id: &str) -> Option<Decision> {
    log.first_for(id).map(|e| e.decision)
}

impl EventKind {
    pub fn holds(&self, stats: &Stats, log: &PolicyLog) -> bool {
        match self {
            Self::CabinetCrisis => log.count_decisions(Decision::Reject) >= 3,
            Self::PublicUnrest => stats.approval < 40,
            Self::GlobalInfluence => stats.power > 80,
            Self::InternalFriction => stats.standing < 30,
            Self::OppositionSurge => log.count_decisions(Decision::Approve) >= 3,
            Self::EconomicBoom => all_results(log, 5, RoundResult::Win),
            Self::DiplomaticFallout => all_results(log, 3, RoundResult::Loss),
            Self::MilitaryTensions => {
                first_decision(log, "military") == Some(Decision::Reject) && stats.power < 50
            }
            Self::InfrastructureCrisis => {
                first_decision(log, "infrastructure") == Some(Decision::Reject) && stats.approval < 50
            }
            Self::JusticePraise => {
                first_decision(log, "justice") == Some(Decision::Approve) && stats.standing > 60
            }
            Self::BalancedLeadership => {
                let moderate = |v: i32| (45..=65).contains(&v);
                moderate(stats.approval) && moderate(stats.power) && moderate(stats.standing)
            }
        }
    }
}

pub const EVENT_RULES: &[EventRule] = &[
    EventRule {
        kind: EventKind::CabinetCrisis,
        headlines: &[
            "Emergency cabinet meeting after repeated reform failures",
            "Senior advisors express concern over policy gridlock",
            "Cabinet holds midnight briefing on stalled agenda",
        ],
        details: &[
            "Key ministers are questioning the administration's direction.",
            "Internal tensions rise as reform efforts stall.",
            "Advisors urge decisive action to break the impasse.",
        ],
        urgency: Urgency::Medium,
    },
    EventRule {
        kind: EventKind::PublicUnrest,
        headlines: &[
            "Protests erupt in capital demanding new leadership",
            "Public approval plummets as citizens take to streets",
            "Mass demonstrations challenge presidential authority",
        ],
        details: &[
            "Thousands gather outside government buildings.",
            "Opposition leaders call for immediate reforms.",
            "Social media campaigns gain momentum nationwide.",
        ],
        urgency: Urgency::High,
    },
    EventRule {
        kind: EventKind::GlobalInfluence,
        headlines: &[
            "Foreign envoys rush to secure new trade pacts",
            "International summit requests presidential keynote",
            "Global leaders seek alliance with administration",
        ],
        details: &[
            "Your strong position attracts international attention.",
            "Diplomatic channels open across multiple continents.",
            "Economic partnerships are being fast-tracked.",
        ],
        urgency: Urgency::Low,
    },
    EventRule {
        kind: EventKind::InternalFriction,
        headlines: &[
            "Rumors of impeachment circulate among senior party members",
            "Party leadership questions president's effectiveness",
            "Internal revolt threatens administration stability",
        ],
        details: &[
            "Key allies are distancing themselves publicly.",
            "Backroom negotiations intensify as factions form.",
            "Your political survival is now in question.",
        ],
        urgency: Urgency::High,
    },
    EventRule {
        kind: EventKind::OppositionSurge,
        headlines: &[
            "Opposition alliance forms united front against government",
            "Rival parties unite to challenge presidential agenda",
            "Opposition leaders coordinate resistance strategy",
        ],
        details: &[
            "Your aggressive policy push has unified your opponents.",
            "A coalition of critics is gaining public support.",
            "Political analysts predict a contentious period ahead.",
        ],
        urgency: Urgency::Medium,
    },
    EventRule {
        kind: EventKind::EconomicBoom,
        headlines: &[
            "Markets surge as president hailed for decisive leadership",
            "Economic indicators reach record highs under administration",
            "Business confidence soars following policy victories",
        ],
        details: &[
            "Stock markets hit all-time highs.",
            "Consumer confidence reaches decade-best levels.",
            "International investors flood into domestic markets.",
        ],
        urgency: Urgency::Low,
    },
    EventRule {
        kind: EventKind::DiplomaticFallout,
        headlines: &[
            "Neighbouring president criticizes unstable governance",
            "International allies express concern over leadership",
            "Diplomatic relations strain as failures mount",
        ],
        details: &[
            "Foreign leaders are reconsidering partnerships.",
            "Trade negotiations are being put on hold.",
            "Your international reputation is suffering.",
        ],
        urgency: Urgency::High,
    },
    EventRule {
        kind: EventKind::MilitaryTensions,
        headlines: &[
            "Neighbouring country begins border military exercises",
            "Regional tensions rise following defense budget cuts",
            "Military analysts warn of security vulnerabilities",
        ],
        details: &[
            "Defense cuts have emboldened potential adversaries.",
            "Military readiness is being questioned by experts.",
            "Border security concerns dominate national discourse.",
        ],
        urgency: Urgency::High,
    },
    EventRule {
        kind: EventKind::InfrastructureCrisis,
        headlines: &[
            "Major bridge collapse highlights infrastructure neglect",
            "Transportation crisis deepens as repairs are delayed",
            "Engineers warn of cascading infrastructure failures",
        ],
        details: &[
            "Public anger grows over deteriorating conditions.",
            "Economic costs of inaction are mounting rapidly.",
            "Opposition seizes on infrastructure failures.",
        ],
        urgency: Urgency::Medium,
    },
    EventRule {
        kind: EventKind::JusticePraise,
        headlines: &[
            "Criminal justice reform praised by civil rights groups",
            "Bipartisan support emerges for justice initiatives",
            "Reform advocates celebrate landmark policy victory",
        ],
        details: &[
            "Your bold stance on justice is winning praise.",
            "Community leaders express renewed hope.",
            "The reform is being studied by other nations.",
        ],
        urgency: Urgency::Low,
    },
    EventRule {
        kind: EventKind::BalancedLeadership,
        headlines: &[
            "Political analysts praise measured approach to governance",
            "Centrist coalition emerges in support of administration",
            "Moderate policies attract broad-based support",
        ],
        details: &[
            "Your balanced approach is resonating with voters.",
            "Cross-party dialogue is becoming more productive.",
            "Stability is valued in uncertain times.",
        ],
        urgency: Urgency::Low,
    },
];

/// An event chosen but not yet surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDraft {
    pub kind: EventKind,
    pub headline: &'static str,
    pub detail: &'static str,
    pub urgency: Urgency,
}

/// Rules whose condition currently holds, in registry order
pub fn matching_rules<'a>(stats: &'a Stats, log: &'a PolicyLog) -> impl Iterator<Item = &'static EventRule> + 'a {
    EVENT_RULES.iter().filter(move |r| r.kind.holds(stats, log))
}

/// Pick one matching rule, a fresh headline and a detail line
///
/// Headlines for which `is_used` returns true are skipped unless every
/// headline of the chosen rule has been used recently.
pub fn generate_world_event(
    stats: &Stats,
    log: &PolicyLog,
    is_used: impl Fn(&str) -> bool,
    rng: &mut dyn RandomSource,
) -> Option<EventDraft> {
    let matches: Vec<&EventRule> = matching_rules(stats, log).collect();
    if matches.is_empty() {
        return None;
    }
    let rule = matches[rng.index(matches.len())];

    let fresh: Vec<&'static str> = rule.headlines.iter().copied().filter(|h| !is_used(*h)).collect();
    let pool: &[&'static str] = if fresh.is_empty() { rule.headlines } else { &fresh };
    let headline = pool[rng.index(pool.len())];
    let detail = rule.details[rng.index(rule.details.len())];

    Some(EventDraft {
        kind: rule.kind,
        headline,
        detail,
        urgency: rule.urgency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SequenceRandom;
    use crate::core::types::StatDelta;
    use crate::state::log::PolicyLogEntry;

    fn push(log: &mut PolicyLog, id: &str, decision: Decision, result: RoundResult) {
        log.push(PolicyLogEntry {
            id: id.into(),
            title: id.into(),
            decision,
            result,
            delta: StatDelta::zero(),
            time: 0,
        });
    }

    fn kinds(stats: &Stats, log: &PolicyLog) -> Vec<EventKind> {
        matching_rules(stats, log).map(|r| r.kind).collect()
    }

    #[test]
    fn test_registry_has_eleven_rules() {
        assert_eq!(EVENT_RULES.len(), 11);
        for rule in EVENT_RULES {
            assert_eq!(rule.headlines.len(), 3);
            assert_eq!(rule.details.len(), 3);
        }
    }

    #[test]
    fn test_loss_streak_makes_fallout_eligible() {
        let mut log = PolicyLog::new();
        let stats = Stats::new(30, 90, 20);
        push(&mut log, "fuel_tax", Decision::Approve, RoundResult::Win);
        push(&mut log, "fuel_tax", Decision::Reject, RoundResult::Loss);
        push(&mut log, "fuel_tax", Decision::Reject, RoundResult::Loss);
        assert!(!EventKind::DiplomaticFallout.holds(&stats, &log));
        push(&mut log, "fuel_tax", Decision::Reject, RoundResult::Loss);
        assert!(EventKind::DiplomaticFallout.holds(&stats, &log));
        assert!(kinds(&stats, &log).contains(&EventKind::DiplomaticFallout));
    }

    #[test]
    fn test_win_streak_needs_five() {
        let mut log = PolicyLog::new();
        let stats = Stats::uniform(75);
        for _ in 0..4 {
            push(&mut log, "x", Decision::Approve, RoundResult::Win);
        }
        assert!(!EventKind::EconomicBoom.holds(&stats, &log));
        push(&mut log, "x", Decision::Approve, RoundResult::Win);
        assert!(EventKind::EconomicBoom.holds(&stats, &log));
    }

    #[test]
    fn test_policy_specific_rules_use_first_entry() {
        let mut log = PolicyLog::new();
        push(&mut log, "military", Decision::Reject, RoundResult::Loss);
        push(&mut log, "military", Decision::Approve, RoundResult::Win);
        assert!(EventKind::MilitaryTensions.holds(&Stats::new(70, 40, 70), &log));
        assert!(!EventKind::MilitaryTensions.holds(&Stats::new(70, 50, 70), &log));
    }

    #[test]
    fn test_balanced_bounds_inclusive() {
        let log = PolicyLog::new();
        assert!(EventKind::BalancedLeadership.holds(&Stats::new(45, 65, 50), &log));
        assert!(!EventKind::BalancedLeadership.holds(&Stats::new(44, 65, 50), &log));
        assert_eq!(kinds(&Stats::uniform(50), &log), vec![EventKind::BalancedLeadership]);
    }

    #[test]
    fn test_no_match_no_event() {
        let log = PolicyLog::new();
        let mut rng = SequenceRandom::constant(0.5);
        assert!(generate_world_event(&Stats::uniform(70), &log, |_| false, &mut rng).is_none());
    }

    #[test]
    fn test_prefers_unused_headlines() {
        let log = PolicyLog::new();
        let stats = Stats::uniform(50);
        let mut rng = SequenceRandom::constant(0.0);
        let used = "Political analysts praise measured approach to governance";
        let draft = generate_world_event(&stats, &log, |h| h == used, &mut rng).unwrap();
        assert_eq!(draft.kind, EventKind::BalancedLeadership);
        assert_eq!(draft.headline, "Centrist coalition emerges in support of administration");
        assert_eq!(draft.urgency, Urgency::Low);
    }

    #[test]
    fn test_all_used_falls_back_to_full_pool() {
        let log = PolicyLog::new();
        let stats = Stats::uniform(50);
        let mut rng = SequenceRandom::constant(0.0);
        let draft = generate_world_event(&stats, &log, |_| true, &mut rng).unwrap();
        assert_eq!(draft.headline, "Political analysts praise measured approach to governance");
    }
}
