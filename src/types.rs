use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// On-disk record layouts the readers understand.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    #[value(name = "fasta")]
    Fasta,
    #[value(name = "fastq")]
    Fastq,
    #[value(name = "sam")]
    Sam,
    #[value(name = "map")]
    Map,
}

impl RecordKind {
    /// Metadata fields stored per sequence, in order.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Fasta => &["header"],
            RecordKind::Fastq => &["header", "sequence", "plus", "quality"],
            RecordKind::Sam => &[
                "qname", "flag", "rname", "pos", "mapq", "cigar", "rnext", "pnext", "tlen", "qual",
            ],
            RecordKind::Map => &["read_name", "strand", "reference", "offset", "qualities"],
        }
    }

    /// Infers the record kind from a file name, looking through a trailing `.gz`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let ext = name.rsplit('.').next()?;
        match ext {
            "fa" | "fasta" | "fna" | "fas" => Some(RecordKind::Fasta),
            "fq" | "fastq" => Some(RecordKind::Fastq),
            "sam" => Some(RecordKind::Sam),
            "map" => Some(RecordKind::Map),
            _ => None,
        }
    }
}

/// Sequences mapped to their per-record metadata. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceSet {
    records: IndexMap<String, Vec<String>>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record. A repeated sequence keeps its original position but takes the new metadata.
    pub fn insert(&mut self, sequence: impl Into<String>, metadata: Vec<String>) {
        self.records.insert(sequence.into(), metadata);
    }

    pub fn get(&self, sequence: &str) -> Option<&Vec<String>> {
        self.records.get(sequence)
    }

    pub fn contains(&self, sequence: &str) -> bool {
        self.records.contains_key(sequence)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sequences(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vec<String>)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<(&String, &Vec<String>)> {
        self.records.get_index(index)
    }

    /// Records present here but absent from `other`, e.g. reads that did not map to an assembly.
    pub fn difference(&self, other: &SequenceSet) -> SequenceSet {
        self.records
            .iter()
            .filter(|(seq, _)| !other.contains(seq))
            .map(|(seq, meta)| (seq.clone(), meta.clone()))
            .collect()
    }
}

impl FromIterator<(String, Vec<String>)> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|s| (s.to_string(), Vec::new())).collect(),
        }
    }
}

/// K-mer occurrence counts for one read set, in first-seen order.
pub type KmerCounts = IndexMap<String, u64>;

/// Where a sequence set comes from. Resolved once, before any engine runs.
#[derive(Debug, Clone)]
pub enum InputSource {
    Path { path: PathBuf, kind: RecordKind },
    InMemory(SequenceSet),
}

impl InputSource {
    /// Builds a path source, inferring the record kind from the extension unless given.
    pub fn from_path(path: impl Into<PathBuf>, kind: Option<RecordKind>) -> Option<Self> {
        let path = path.into();
        let kind = kind.or_else(|| RecordKind::from_path(&path))?;
        Some(InputSource::Path { path, kind })
    }
}
