//! Save file format.
//!
//! ```text
//! magic "DSV\x01" | count: u32 LE | count × (len: u32 LE | JSON record) | SHA-256 of all prior bytes
//! ```
//!
//! Each record is an adjacently tagged object, `{"kind": "stack", "state": {...}}`.
//! Decoding is all-or-nothing: any framing, digest, duplicate-kind or
//! invariant problem rejects the whole file.

use crate::error::{DsvizError, Result};
use crate::kind::Kind;
use crate::sort::{BubbleSort, InsertionSort, SortState};
use crate::structures::{LinkedList, Queue, Stack};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

/// Magic bytes for the save format
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"DSV\x01";

/// Trailing SHA-256 size
pub const DIGEST_SIZE: usize = 32;

/// One persisted structure
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "lowercase")]
pub enum Record<T> {
    List(LinkedList<T>),
    Stack(Stack<T>),
    Queue(Queue<T>),
    Insertion(InsertionSort),
    Bubble(BubbleSort),
}

/// Borrowed form of [`Record`] used when saving
#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "state", rename_all = "lowercase")]
pub enum RecordRef<'a, T> {
    List(&'a LinkedList<T>),
    Stack(&'a Stack<T>),
    Queue(&'a Queue<T>),
    Insertion(&'a InsertionSort),
    Bubble(&'a BubbleSort),
}

impl<T> Record<T> {
    pub fn kind(&self) -> Kind {
        match self {
            Record::List(_) => Kind::List,
            Record::Stack(_) => Kind::Stack,
            Record::Queue(_) => Kind::Queue,
            Record::Insertion(_) => Kind::Insertion,
            Record::Bubble(_) => Kind::Bubble,
        }
    }

    /// Number of elements held
    pub fn len(&self) -> usize {
        match self {
            Record::List(list) => list.len(),
            Record::Stack(stack) => stack.len(),
            Record::Queue(queue) => queue.len(),
            Record::Insertion(sorter) => sorter.len(),
            Record::Bubble(sorter) => sorter.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort progress, for sorter records
    pub fn sort_state(&self) -> Option<SortState> {
        match self {
            Record::Insertion(sorter) => Some(sorter.state()),
            Record::Bubble(sorter) => Some(sorter.state()),
            _ => None,
        }
    }
}

/// Serialize records into the framed, digested format
pub fn encode_records<T: Serialize>(records: &[RecordRef<'_, T>]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(SNAPSHOT_MAGIC);
    buf.extend_from_slice(&(records.len() as u32).to_le_bytes());
    for record in records {
        let json = serde_json::to_vec(record)?;
        buf.extend_from_slice(&(json.len() as u32).to_le_bytes());
        buf.extend_from_slice(&json);
    }
    let digest = digest(&buf);
    buf.extend_from_slice(&digest);
    Ok(buf)
}

/// Parse and validate a complete save file image
pub fn decode_records<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<Record<T>>> {
    Ok(decode_framed(data)?
        .into_iter()
        .map(|(record, _)| record)
        .collect())
}

/// Write a save file, replacing any previous one only once fully written
pub fn write_snapshot<T: Serialize>(path: &Path, records: &[RecordRef<'_, T>]) -> Result<()> {
    let encoded = encode_records(records)?;

    let tmp_path = path.with_extension("tmp");
    {
        let file = fs::File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&encoded)?;
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Read and validate a save file
pub fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<Record<T>>> {
    let data = fs::read(path)?;
    decode_records(&data)
}

/// Per-record facts reported by [`summarize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub kind: Kind,
    pub encoded_bytes: usize,
    pub elements: usize,
    pub sort_state: Option<SortState>,
}

#[derive(Debug, Clone)]
pub struct SnapshotSummary {
    pub file_size: usize,
    pub records: Vec<RecordSummary>,
    pub digest: [u8; DIGEST_SIZE],
}

/// Describe a save file without knowing its element type
pub fn summarize(path: &Path) -> Result<SnapshotSummary> {
    let data = fs::read(path)?;
    let framed = decode_framed::<serde_json::Value>(&data)?;
    let records = framed
        .iter()
        .map(|(record, encoded_bytes)| RecordSummary {
            kind: record.kind(),
            encoded_bytes: *encoded_bytes,
            elements: record.len(),
            sort_state: record.sort_state(),
        })
        .collect();

    let mut digest = [0u8; DIGEST_SIZE];
    digest.copy_from_slice(&data[data.len() - DIGEST_SIZE..]);

    Ok(SnapshotSummary {
        file_size: data.len(),
        records,
        digest,
    })
}

fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(data).into()
}

fn decode_framed<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<(Record<T>, usize)>> {
    if data.len() < SNAPSHOT_MAGIC.len() + 4 + DIGEST_SIZE {
        return Err(DsvizError::InvalidSnapshot("file too short".into()));
    }
    let (body, stored_digest) = data.split_at(data.len() - DIGEST_SIZE);
    if digest(body).as_slice() != stored_digest {
        return Err(DsvizError::InvalidSnapshot("digest mismatch".into()));
    }

    let mut reader = Cursor::new(body);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != SNAPSHOT_MAGIC {
        return Err(DsvizError::InvalidSnapshot("bad magic bytes".into()));
    }

    let count = read_u32(&mut reader)? as usize;
    if count > Kind::ALL.len() {
        return Err(DsvizError::InvalidSnapshot(format!(
            "{} records exceeds the {} known kinds",
            count,
            Kind::ALL.len()
        )));
    }

    let mut seen = [false; Kind::ALL.len()];
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let len = read_u32(&mut reader)? as usize;
        let remaining = body.len() - reader.position() as usize;
        if len > remaining {
            return Err(DsvizError::InvalidSnapshot(format!(
                "record length {} exceeds remaining {} bytes",
                len, remaining
            )));
        }
        let mut json = vec![0u8; len];
        reader.read_exact(&mut json)?;

        let record: Record<T> = serde_json::from_slice(&json)?;
        let kind = record.kind();
        if std::mem::replace(&mut seen[kind.index()], true) {
            return Err(DsvizError::InvalidSnapshot(format!(
                "duplicate {} record",
                kind
            )));
        }
        records.push((record, len));
    }

    if reader.position() as usize != body.len() {
        return Err(DsvizError::InvalidSnapshot(
            "trailing bytes after last record".into(),
        ));
    }

    Ok(records)
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}
