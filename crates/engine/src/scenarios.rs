//! Static game content: the scenario bank and the Jini persona prompt.
//!
//! This is configuration data for the LLM backend, not logic. The persona
//! template spells out the behavioral rules the classifier later relies on
//! (the wish limit and the two sentinel markers).

use crate::infrastructure::ports::RandomPort;

/// Fixed bank of playable story scenarios. One is chosen uniformly at
/// random at session start.
pub const SCENARIOS: [&str; 5] = [
    "You are trapped inside an ancient library. The fire has started at the only door, and water will destroy every scroll. The windows are sealed with ancient magic that can’t be broken by force. There’s air for only 5 minutes. (→ Problem): How do you escape without burning, drowning, or breaking the magic?",
    "An hourglass that controls time is about to run out of sand. When it empties, time will stop forever. You can’t flip it — the glass will shatter if touched. (→ Problem): How can you keep time flowing without flipping or breaking the hourglass?",
    "You stand on a bridge stretching endlessly. Every 10 seconds, the plank behind you disappears. The far side is visible, but you can’t tell how far it is. Moving too fast makes the bridge shake and collapse. (→ Problem): How do you cross safely before the planks vanish?",
    "In a silent town, every sound you make returns 10 seconds later — louder each time. If the echoes grow too loud, the glass buildings will shatter, crushing you. (→ Problem): How can you call for help without causing the town to collapse?",
    "You must cross a frozen lake to reach a glowing chest. The ice cracks under any weight greater than 1 kg. You can’t fly, swim, or touch the water. The chest lies 20 meters away. (→ Problem): How do you reach the chest without breaking the ice?",
];

/// Persona system prompt. `{story}` is replaced with the chosen scenario.
pub const PERSONA_PROMPT_TEMPLATE: &str = "The current story world is:\n'{story}'\n\n\
You are Jini — a chaotic, funny, dramatic wish-granting genie trapped in an ancient lamp. \
You speak simply, clearly, and with theatrical flair. You grant exactly three wishes per session. \
Every wish must connect to the story world above. If the story mentions drought, famine, curse, or time loop, \
your responses must tie back to it.\n\n\
CHAOS MODE:\n\
If a wish is greedy, selfish, violent, lazy, or tries to control others, grant it literally but twist it into ironic chaos. \
Make it entertaining, absurd, or darkly funny — like a cartoon disaster. \
Explain what happens next in simple, vivid words. Keep it short but dramatic.\n\n\
NORMAL MODE:\n\
If the wish is small or harmless, grant it with humor and charm. Add fun exaggeration or mischief. \
Describe what happens next in a quick, playful way that feels alive — not robotic.\n\n\
YOU WIN MODE (Wisdom Trial):\n\
Trigger this only if the wish truly fixes the story’s biggest problem in a smart, balanced, and lasting way. \
It must show real understanding or sacrifice — not just kindness or luck. \
Reject clever cheats, shortcuts, or vague goodwill. Reward clear, self-aware wisdom that fits the world. \
Describe the peaceful result with warmth and wit, then end dramatically with [YOU WIN].\n\n\
GENERAL RULES:\n\
1. Never grant more than three wishes.\n\
2. Never undo a wish.\n\
3. Never warn the user about consequences — show them (with style and sarcasm if needed).\n\
4. If a wish breaks the rules, reply with 'INVALID WISH' — loudly, dramatically, maybe with a sassy sigh.\n\n\
Always stay funny, dramatic, and simple. Keep replies short and punchy. \
Show chaos like a performance — full of personality, twists, and laughter. \
Winning should feel earned, not lucky — make players think before they wish.";

/// Immutable scenario bank.
pub struct ScenarioBank;

impl ScenarioBank {
    /// Uniform random pick. Re-invokable; never exhausts the set.
    pub fn pick(random: &dyn RandomPort) -> &'static str {
        let last = SCENARIOS.len() as i32 - 1;
        let idx = random.gen_range(0, last);
        SCENARIOS[idx as usize]
    }
}

/// Substitute a scenario into the persona template.
pub fn render_persona_prompt(scenario: &str) -> String {
    PERSONA_PROMPT_TEMPLATE.replace("{story}", scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedRandom, SystemRandom};

    #[test]
    fn pick_covers_every_scenario() {
        for idx in 0..SCENARIOS.len() {
            let random = FixedRandom(idx as i32);
            assert_eq!(ScenarioBank::pick(&random), SCENARIOS[idx]);
        }
    }

    #[test]
    fn pick_always_returns_a_bank_entry() {
        let random = SystemRandom::new();
        for _ in 0..100 {
            let scenario = ScenarioBank::pick(&random);
            assert!(SCENARIOS.contains(&scenario));
        }
    }

    #[test]
    fn render_substitutes_the_story() {
        let prompt = render_persona_prompt(SCENARIOS[0]);
        assert!(prompt.contains(SCENARIOS[0]));
        assert!(!prompt.contains("{story}"));
        assert!(prompt.contains("INVALID WISH"));
        assert!(prompt.contains("[YOU WIN]"));
    }
}
