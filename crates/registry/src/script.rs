//! Reader for generated producer scripts.
//!
//! rustdoc writes each producer unit as a `type.impl/**/*.js` file: a
//! self-invoking function holding an `Object.fromEntries([...])` literal whose
//! array is plain JSON, followed by a `//{"start":..,"fragment_lengths":[..]}`
//! footer locating each top-level entry in the file. Only the JSON payload and
//! the footer are read; the markup inside blocks is left untouched.

use std::path::Path;

use docimpl_primitives::{ImplEntry, ProducerMapping};
use serde::Deserialize;

use crate::producer::ProducerUnit;

const PAYLOAD_MARKER: &str = "Object.fromEntries(";
const FOOTER_MARKER: &str = "//";

/// One top-level payload element: key, then `[block, trait, types...]` arrays.
type RawFragment = (String, Vec<Vec<RawField>>);

/// A slot of an entry array. The trait slot holds `0` for inherent impls.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
	Text(String),
	Number(u64),
}

/// Errors raised while reading a generated producer script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("no `Object.fromEntries(` payload found")]
	MissingPayload,

	#[error("malformed payload JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("payload not closed by `)` at byte {offset}")]
	UnterminatedPayload { offset: usize },

	#[error("entry {index} under key {key:?} is an empty array")]
	EmptyEntry { key: String, index: usize },

	#[error("entry {index} under key {key:?} has a non-string {slot}")]
	UnexpectedField {
		key: String,
		index: usize,
		slot: &'static str,
	},

	#[error("invalid fragment footer: {0}")]
	Footer(String),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

/// Location of each top-level payload element, as written by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FragmentFooter {
	/// Byte offset of the first element.
	pub start: usize,
	/// Byte length of each element; consecutive elements are separated by `,`.
	pub fragment_lengths: Vec<usize>,
}

impl FragmentFooter {
	/// Slices `source` into the elements the footer describes.
	pub fn fragments<'a>(&self, source: &'a str) -> Result<Vec<&'a str>> {
		let mut fragments = Vec::with_capacity(self.fragment_lengths.len());
		let mut offset = self.start;

		for (index, &len) in self.fragment_lengths.iter().enumerate() {
			if index > 0 {
				if source.as_bytes().get(offset) != Some(&b',') {
					return Err(ScriptError::Footer(format!("expected `,` before fragment {index} at byte {offset}")));
				}
				offset += 1;
			}
			let fragment = offset
				.checked_add(len)
				.and_then(|end| source.get(offset..end))
				.ok_or_else(|| ScriptError::Footer(format!("fragment {index} ({offset}+{len}) is out of bounds")))?;
			fragments.push(fragment);
			offset += len;
		}

		if source.as_bytes().get(offset) != Some(&b']') {
			return Err(ScriptError::Footer(format!("expected `]` after last fragment at byte {offset}")));
		}
		Ok(fragments)
	}
}

/// A parsed producer script.
#[derive(Debug)]
pub struct ProducerScript {
	pub unit: ProducerUnit,
	pub footer: Option<FragmentFooter>,
}

/// Parses a generated producer script named `name`.
///
/// Entry arrays read as `[block, trait, types...]`; a trait of `0` (inherent
/// impl) or `""` means the block has none. When a key repeats, the later
/// element wins. A footer, if present, must agree with the payload.
pub fn parse_producer_script(name: impl Into<String>, source: &str) -> Result<ProducerScript> {
	let start = source.find(PAYLOAD_MARKER).ok_or(ScriptError::MissingPayload)? + PAYLOAD_MARKER.len();
	let rest = &source[start..];

	let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Vec<RawFragment>>();
	let raw = stream.next().ok_or(ScriptError::MissingPayload)??;
	let end = start + stream.byte_offset();
	if !source[end..].trim_start().starts_with(')') {
		return Err(ScriptError::UnterminatedPayload { offset: end });
	}

	let fragment_count = raw.len();
	let mut builder = ProducerMapping::builder();
	for (key, arrays) in raw {
		let entries = arrays
			.into_iter()
			.enumerate()
			.map(|(index, array)| entry_from_array(&key, index, array))
			.collect::<Result<Vec<_>>>()?;
		builder = builder.set(key, entries);
	}

	let footer = parse_footer(source)?;
	if let Some(footer) = &footer {
		let fragments = footer.fragments(source)?;
		if fragments.len() != fragment_count {
			return Err(ScriptError::Footer(format!(
				"footer lists {} fragments, payload has {fragment_count}",
				fragments.len()
			)));
		}
	}

	let unit = ProducerUnit::new(name, builder.build());
	tracing::debug!(
		producer = unit.name(),
		keys = unit.mapping().len(),
		entries = unit.mapping().entry_count(),
		footer = footer.is_some(),
		"parsed producer script"
	);
	Ok(ProducerScript { unit, footer })
}

/// Reads and parses a producer script; the unit is named after the file stem.
pub fn load_producer_script(path: &Path) -> Result<ProducerScript> {
	let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
		path: path.display().to_string(),
		source,
	})?;
	let name = path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default();
	parse_producer_script(name, &source)
}

fn entry_from_array(key: &str, index: usize, array: Vec<RawField>) -> Result<ImplEntry> {
	let unexpected = |slot| ScriptError::UnexpectedField {
		key: key.to_owned(),
		index,
		slot,
	};

	let mut fields = array.into_iter();
	let block = match fields.next() {
		Some(RawField::Text(block)) => block,
		Some(RawField::Number(_)) => return Err(unexpected("block")),
		None => {
			return Err(ScriptError::EmptyEntry {
				key: key.to_owned(),
				index,
			});
		}
	};
	let trait_name = match fields.next() {
		Some(RawField::Text(name)) => name,
		Some(RawField::Number(0)) | None => String::new(),
		Some(RawField::Number(_)) => return Err(unexpected("trait")),
	};
	let types = fields
		.map(|field| match field {
			RawField::Text(ty) => Ok(ty),
			RawField::Number(_) => Err(unexpected("type")),
		})
		.collect::<Result<Vec<_>>>()?;
	Ok(ImplEntry::new(block, types).with_trait_name(trait_name))
}

fn parse_footer(source: &str) -> Result<Option<FragmentFooter>> {
	let Some(line) = source.lines().rev().map(str::trim).find(|line| !line.is_empty()) else {
		return Ok(None);
	};
	let Some(json) = line.strip_prefix(FOOTER_MARKER) else {
		return Ok(None);
	};
	serde_json::from_str(json.trim())
		.map(Some)
		.map_err(|e| ScriptError::Footer(e.to_string()))
}
