//! The fixed catalogue of traits scored per profile.

/// A scored dimension. `key` is the canonical column name in the node table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraitDef {
	pub key: &'static str,
	pub label: &'static str,
	pub definition: &'static str,
}

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 9.0;

pub const TRAITS: [TraitDef; 8] = [
	TraitDef {
		key: "visual",
		label: "Visual",
		definition: "Vividness of mental pictures: seeing shapes, colours and scenes in the mind's eye.",
	},
	TraitDef {
		key: "auditory",
		label: "Auditory",
		definition: "Hearing sounds, voices or music internally without an outside source.",
	},
	TraitDef {
		key: "inner_speech",
		label: "Inner Speech",
		definition: "Thinking in words: an ongoing internal monologue or dialogue.",
	},
	TraitDef {
		key: "tactile",
		label: "Tactile",
		definition: "Imagining touch, texture, pressure and temperature on the skin.",
	},
	TraitDef {
		key: "olfactory",
		label: "Smell",
		definition: "Recalling or imagining odours such as coffee, rain or smoke.",
	},
	TraitDef {
		key: "gustatory",
		label: "Taste",
		definition: "Recalling or imagining flavours such as lemon, salt or chocolate.",
	},
	TraitDef {
		key: "interoception",
		label: "Interoception",
		definition: "Awareness of internal bodily signals: heartbeat, breathing, hunger.",
	},
	TraitDef {
		key: "spatial",
		label: "Spatial",
		definition: "Mentally rotating objects and navigating maps, layouts and routes.",
	},
];

pub fn default_trait() -> &'static TraitDef {
	&TRAITS[0]
}

/// Looks a trait up by key, falling back to the first trait.
pub fn trait_by_key(key: &str) -> &'static TraitDef {
	TRAITS
		.iter()
		.find(|t| t.key == key)
		.unwrap_or_else(default_trait)
}
