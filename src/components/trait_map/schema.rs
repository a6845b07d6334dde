//! Declarative column mapping from the remote CSV tables to typed records.
//!
//! Each logical field lists the header spellings it accepts. Every matching
//! column is kept in alias order and, per row, the first non-empty cell wins.
//! A required field with no matching column at all is reported as
//! [`SchemaError::UnmappableColumn`] instead of silently producing nothing.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use thiserror::Error;

use super::traits::{TRAITS, TraitDef};
use super::types::{GraphData, GraphLink, GraphNode};

#[derive(Error, Debug)]
pub enum SchemaError {
	#[error("{table} table has no column for `{field}` (tried {})", .tried.join(", "))]
	UnmappableColumn {
		table: &'static str,
		field: &'static str,
		tried: Vec<String>,
	},

	#[error("malformed CSV: {0}")]
	Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
	pub name: &'static str,
	pub aliases: &'static [&'static str],
	pub required: bool,
}

pub const NODE_ID: FieldSpec = FieldSpec {
	name: "id",
	aliases: &["id", "ID", "Id", "user_id", "UserID", "userId", "user", "node"],
	required: true,
};
pub const NODE_X: FieldSpec = FieldSpec {
	name: "x",
	aliases: &["x", "X", "umap_x", "UMAP_1", "umap1", "pc1", "PC1", "dim1"],
	required: true,
};
pub const NODE_Y: FieldSpec = FieldSpec {
	name: "y",
	aliases: &["y", "Y", "umap_y", "UMAP_2", "umap2", "pc2", "PC2", "dim2"],
	required: true,
};
pub const NODE_CLUSTER: FieldSpec = FieldSpec {
	name: "cluster",
	aliases: &["cluster", "Cluster", "cluster_id", "ClusterID", "community", "label"],
	required: false,
};
pub const EDGE_SOURCE: FieldSpec = FieldSpec {
	name: "source",
	aliases: &["source", "Source", "src", "from", "user_a", "u"],
	required: true,
};
pub const EDGE_TARGET: FieldSpec = FieldSpec {
	name: "target",
	aliases: &["target", "Target", "dst", "to", "user_b", "v"],
	required: true,
};
pub const EDGE_WEIGHT: FieldSpec = FieldSpec {
	name: "weight",
	aliases: &["weight", "Weight", "w", "similarity", "value"],
	required: false,
};

/// A field resolved against a concrete header row.
#[derive(Clone, Debug)]
struct Column {
	indices: Vec<usize>,
}

impl Column {
	fn resolve(
		table: &'static str,
		headers: &StringRecord,
		name: &'static str,
		aliases: &[String],
		required: bool,
	) -> Result<Self> {
		let indices: Vec<usize> = aliases
			.iter()
			.filter_map(|alias| headers.iter().position(|h| h == alias))
			.collect();
		if indices.is_empty() && required {
			return Err(SchemaError::UnmappableColumn {
				table,
				field: name,
				tried: aliases.to_vec(),
			});
		}
		Ok(Self { indices })
	}

	fn from_spec(table: &'static str, headers: &StringRecord, spec: &FieldSpec) -> Result<Self> {
		let aliases: Vec<String> = spec.aliases.iter().map(|a| (*a).to_owned()).collect();
		Self::resolve(table, headers, spec.name, &aliases, spec.required)
	}

	fn value<'r>(&self, record: &'r StringRecord) -> Option<&'r str> {
		self.indices
			.iter()
			.filter_map(|&i| record.get(i))
			.find(|cell| !cell.is_empty())
	}
}

/// Header spellings accepted for a trait: key, label, and their case variants.
pub fn trait_aliases(def: &TraitDef) -> Vec<String> {
	let mut aliases = vec![
		def.key.to_owned(),
		def.label.to_owned(),
		def.key.to_uppercase(),
		def.label.to_lowercase(),
		def.label.replace(' ', "_"),
		def.label.to_lowercase().replace(' ', "_"),
	];
	let mut seen = Vec::with_capacity(aliases.len());
	aliases.retain(|a| {
		let fresh = !seen.contains(a);
		if fresh {
			seen.push(a.clone());
		}
		fresh
	});
	aliases
}

fn number(cell: Option<&str>) -> f64 {
	cell.and_then(|s| s.parse::<f64>().ok()).unwrap_or(f64::NAN)
}

fn weight(cell: Option<&str>) -> f64 {
	cell.and_then(|s| s.parse::<f64>().ok())
		.filter(|w| w.is_finite() && *w >= 0.0)
		.unwrap_or(GraphLink::DEFAULT_WEIGHT)
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
	ReaderBuilder::new()
		.flexible(true)
		.trim(Trim::All)
		.from_reader(text.trim_start_matches('\u{feff}').as_bytes())
}

pub fn parse_nodes(text: &str) -> Result<Vec<GraphNode>> {
	const TABLE: &str = "node";
	let mut rdr = reader(text);
	let headers = rdr.headers()?.clone();
	let id = Column::from_spec(TABLE, &headers, &NODE_ID)?;
	let x = Column::from_spec(TABLE, &headers, &NODE_X)?;
	let y = Column::from_spec(TABLE, &headers, &NODE_Y)?;
	let cluster = Column::from_spec(TABLE, &headers, &NODE_CLUSTER)?;
	let traits = TRAITS
		.iter()
		.map(|def| {
			Column::resolve(TABLE, &headers, def.key, &trait_aliases(def), false)
				.map(|col| (def.key, col))
		})
		.collect::<Result<Vec<_>>>()?;

	let mut nodes = Vec::new();
	let mut skipped = 0usize;
	for record in rdr.records() {
		let record = record?;
		let Some(node_id) = id.value(&record) else {
			skipped += 1;
			continue;
		};
		let scores: BTreeMap<String, f64> = traits
			.iter()
			.filter_map(|(key, col)| col.value(&record).map(|cell| ((*key).to_owned(), number(Some(cell)))))
			.collect();
		nodes.push(GraphNode {
			id: node_id.to_owned(),
			x: number(x.value(&record)),
			y: number(y.value(&record)),
			cluster: cluster.value(&record).map(str::to_owned),
			traits: scores,
		});
	}
	if skipped > 0 {
		debug!("Skipped {skipped} node rows without an id");
	}
	Ok(nodes)
}

pub fn parse_links(text: &str) -> Result<Vec<GraphLink>> {
	const TABLE: &str = "edge";
	let mut rdr = reader(text);
	let headers = rdr.headers()?.clone();
	let source = Column::from_spec(TABLE, &headers, &EDGE_SOURCE)?;
	let target = Column::from_spec(TABLE, &headers, &EDGE_TARGET)?;
	let weight_col = Column::from_spec(TABLE, &headers, &EDGE_WEIGHT)?;

	let mut links = Vec::new();
	let mut skipped = 0usize;
	for record in rdr.records() {
		let record = record?;
		match (source.value(&record), target.value(&record)) {
			(Some(s), Some(t)) => links.push(GraphLink::new(s, t, weight(weight_col.value(&record)))),
			_ => skipped += 1,
		}
	}
	if skipped > 0 {
		debug!("Skipped {skipped} edge rows without both endpoints");
	}
	Ok(links)
}

pub fn parse_graph(nodes_csv: &str, links_csv: &str) -> Result<GraphData> {
	Ok(GraphData {
		nodes: parse_nodes(nodes_csv)?,
		links: parse_links(links_csv)?,
	})
}
