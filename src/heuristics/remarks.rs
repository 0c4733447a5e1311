//! Secretary one-liners keyed by how the stats moved

use crate::core::random::RandomSource;
use crate::state::secretary::RemarkTone;

struct ToneGroup {
    tone: RemarkTone,
    lines: &'static [&'static str],
}

const POSITIVE: &[ToneGroup] = &[
    ToneGroup {
        tone: RemarkTone::Surprised,
        lines: &[
            "I… didn't expect that to work. Nicely played.",
            "Well, that's a pleasant surprise. Color me impressed.",
            "Against all odds, you pulled it off. Remarkable.",
            "I stand corrected. That was actually brilliant.",
            "Astonishing. Did you actually read the briefing this time?",
            "Well, well. Perhaps there's hope for this administration yet.",
        ],
    },
    ToneGroup {
        tone: RemarkTone::Proud,
        lines: &[
            "Approval up, power up. Schedule the victory lap?",
            "Now that's leadership. The people are listening.",
            "Textbook execution. I'll update your legacy file.",
            "Masterful. Your opponents are taking notes.",
            "Finally, a decision worthy of the office.",
            "Brilliant, sir. Almost makes up for last week.",
        ],
    },
];

const SMALL_POSITIVE: &[ToneGroup] = &[ToneGroup {
    tone: RemarkTone::Neutral,
    lines: &[
        "A step forward. Try not to trip on the next one.",
        "Progress, albeit modest. We'll take it.",
        "Small wins add up. Eventually.",
        "Not bad. Not great. But not bad.",
        "Baby steps, Mr. President. Baby steps.",
        "Well, it's not a disaster. That's something.",
    ],
}];

const NEGATIVE: &[ToneGroup] = &[
    ToneGroup {
        tone: RemarkTone::Roast,
        lines: &[
            "Brave strategy: disappoint everyone equally.",
            "Well, at least you're consistent… at failing.",
            "I've seen better decisions from a magic 8-ball.",
            "Bold move. Historically terrible, but bold.",
            "The history books will have questions.",
            "Mr. President, that's one way to tank the economy. In record time.",
            "Diplomacy is about balance… not bulldozing, sir.",
            "Your approval rating is dropping faster than our stock market.",
            "Congratulations. You've united the opposition against you.",
            "I'll prepare the apology tour itinerary.",
        ],
    },
    ToneGroup {
        tone: RemarkTone::Concerned,
        lines: &[
            "Sir, the markets are practicing fainting.",
            "We may need to update the crisis protocols.",
            "I'll prepare the damage control briefing.",
            "This is… concerning. Very concerning.",
            "The cabinet is requesting an emergency meeting.",
            "Perhaps we should reconsider our approach, sir.",
        ],
    },
];

const SMALL_NEGATIVE: &[ToneGroup] = &[ToneGroup {
    tone: RemarkTone::Neutral,
    lines: &[
        "Paper cuts still bleed, sir.",
        "A minor setback. Emphasis on minor.",
        "Could be worse. Could also be better.",
        "Not ideal, but we've survived worse.",
        "A stumble, not a fall. Yet.",
        "The opposition is taking notes. Unflattering ones.",
    ],
}];

/// Pick a remark for the summed stat delta
///
/// `>= 6` positive, `> 0` small positive, `<= -6` negative, anything else
/// (zero included) small negative.
pub fn pick_remark(delta_total: i32, rng: &mut dyn RandomSource) -> (&'static str, RemarkTone) {
    let groups = if delta_total >= 6 {
        POSITIVE
    } else if delta_total > 0 {
        SMALL_POSITIVE
    } else if delta_total <= -6 {
        NEGATIVE
    } else {
        SMALL_NEGATIVE
    };
    let group = &groups[rng.index(groups.len())];
    let line = group.lines[rng.index(group.lines.len())];
    (line, group.tone)
}
