use crate::text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchScope {
	/// Section title or the leading slice of its content.
	TitleOrLead,
	TitleOnly,
}

pub struct KeywordAdjustment {
	pub name: &'static str,
	pub delta: f32,
	pub scope: MatchScope,
	pub terms: &'static [&'static str],
}
impl KeywordAdjustment {
	/// Both inputs must already be lower-cased.
	pub fn applies(&self, title_lower: &str, lead_lower: &str) -> bool {
		self.terms.iter().any(|term| match self.scope {
			MatchScope::TitleOrLead => title_lower.contains(term) || lead_lower.contains(term),
			MatchScope::TitleOnly => title_lower.contains(term),
		})
	}
}

pub const SECTION_ADJUSTMENTS: [KeywordAdjustment; 6] = [
	KeywordAdjustment {
		name: "affordability",
		delta: 0.15,
		scope: MatchScope::TitleOrLead,
		terms: &[
			"budget",
			"cheap",
			"affordable",
			"free",
			"low cost",
			"student discount",
			"hostel",
			"backpack",
			"group discount",
			"money saving",
		],
	},
	KeywordAdjustment {
		name: "group_activity",
		delta: 0.10,
		scope: MatchScope::TitleOrLead,
		terms: &[
			"group",
			"friends",
			"activities",
			"things to do",
			"itinerary",
			"transportation",
			"getting around",
			"public transport",
		],
	},
	KeywordAdjustment {
		name: "boilerplate",
		delta: -0.20,
		scope: MatchScope::TitleOnly,
		terms: &["conclusion", "introduction", "overview"],
	},
	KeywordAdjustment {
		name: "stay_and_dine",
		delta: 0.08,
		scope: MatchScope::TitleOnly,
		terms: &[
			"hotel",
			"accommodation",
			"restaurant",
			"dining",
			"food",
			"where to stay",
			"where to eat",
		],
	},
	KeywordAdjustment {
		name: "luxury",
		delta: -0.12,
		scope: MatchScope::TitleOrLead,
		terms: &[
			"luxury",
			"luxurious",
			"upscale",
			"high-end",
			"expensive",
			"michelin",
			"five star",
			"5 star",
			"premium",
			"exclusive",
		],
	},
	KeywordAdjustment {
		name: "practical",
		delta: 0.05,
		scope: MatchScope::TitleOrLead,
		terms: &[
			"tips",
			"tricks",
			"guide",
			"planning",
			"practical",
			"how to",
			"essential",
			"must know",
			"advice",
		],
	},
];

/// Case-sensitive markers that flag list-like or procedural text.
pub const ACTION_MARKERS: [&str; 8] =
	["•", "-", "*", "Instructions", "Steps", "How to", "Directions", "Method"];

/// Sum of every keyword adjustment that applies to a section.
pub fn section_adjustment(title: &str, content: &str, lead_chars: usize) -> f32 {
	let title_lower = title.to_lowercase();
	let lead_lower = text::take_chars(content, lead_chars).to_lowercase();

	SECTION_ADJUSTMENTS
		.iter()
		.filter(|adjustment| adjustment.applies(&title_lower, &lead_lower))
		.map(|adjustment| adjustment.delta)
		.sum()
}

pub fn has_action_marker(text: &str) -> bool {
	ACTION_MARKERS.iter().any(|marker| text.contains(marker))
}
