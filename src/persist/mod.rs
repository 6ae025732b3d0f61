//! Persistence for automata and dictionaries.
//!
//! Building a universal automaton is exponential in the distance bound, so
//! the artifact is worth keeping: persist after the first construction and
//! reload on subsequent runs. The on-disk layout is an explicit versioned
//! schema — magic bytes, a format version, then the flat state graph (state
//! count, accept flags, bit-vector-labeled edge list) — so persisted
//! automata stay loadable independent of in-memory representation changes.
//!
//! Automaton artifacts are named `dist<NNN>.lev` with the zero-padded
//! distance bound. [`load_automaton`] probes a bundled data directory
//! (`LEVDICT_DATA_DIR`) first and the working directory second; finding
//! neither is the non-fatal [`PersistError::NotFound`], leaving the caller
//! free to rebuild. Malformed data, by contrast, is always a hard error —
//! never a silently wrong automaton.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::automaton::{Automaton, StateId};
use crate::dictionary::DictionaryAutomaton;
use crate::universal::bit_vector::{BitVector, MAX_BITS};
use crate::universal::{ChiMode, UniversalAutomaton};

const AUTOMATON_MAGIC: [u8; 4] = *b"ULEV";
const DICTIONARY_MAGIC: [u8; 4] = *b"UDIC";
const FORMAT_VERSION: u16 = 1;

/// Environment variable naming the bundled data directory probed first by
/// [`load_automaton`].
pub const DATA_DIR_ENV: &str = "LEVDICT_DATA_DIR";

/// Errors from reading or writing persisted artifacts.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying I/O failure.
    #[error("I/O error")]
    Io(#[from] io::Error),

    /// The data does not start with the expected magic bytes.
    #[error("not a levdict artifact (bad magic)")]
    BadMagic,

    /// The artifact was written by an unknown format version.
    #[error("unsupported artifact format version {0}")]
    UnsupportedVersion(u16),

    /// The payload failed to decode.
    #[error("malformed artifact payload")]
    Decode(#[from] bincode::Error),

    /// The payload decoded but describes an inconsistent state graph.
    #[error("corrupt artifact: {0}")]
    Corrupt(&'static str),

    /// No persisted automaton exists for the requested distance in any
    /// probed location. Non-fatal: the caller may rebuild.
    #[error("no persisted automaton found for distance {distance}")]
    NotFound {
        /// The distance bound that was requested.
        distance: u8,
    },
}

#[derive(Serialize, Deserialize)]
struct AutomatonImage {
    distance: u8,
    chi: u8,
    state_count: u32,
    sink: u32,
    accepting: Vec<u32>,
    transitions: Vec<(u32, u8, u32, u32)>,
}

#[derive(Serialize, Deserialize)]
struct DictionaryImage {
    words: Vec<String>,
}

/// Conventional file name for a persisted automaton: `dist<NNN>.lev`.
pub fn automaton_file_name(distance: u8) -> String {
    format!("dist{distance:03}.lev")
}

fn write_header<W: Write>(writer: &mut W, magic: &[u8; 4]) -> Result<(), PersistError> {
    writer.write_all(magic)?;
    writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
    Ok(())
}

fn read_header<R: Read>(reader: &mut R, magic: &[u8; 4]) -> Result<(), PersistError> {
    let mut found_magic = [0u8; 4];
    reader.read_exact(&mut found_magic)?;
    if found_magic != *magic {
        return Err(PersistError::BadMagic);
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    let version = u16::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(version));
    }
    Ok(())
}

fn encode_chi(chi: ChiMode) -> u8 {
    match chi {
        ChiMode::Epsilon => 0,
        ChiMode::T => 1,
        ChiMode::Ms => 2,
    }
}

fn decode_chi(raw: u8) -> Result<ChiMode, PersistError> {
    match raw {
        0 => Ok(ChiMode::Epsilon),
        1 => Ok(ChiMode::T),
        2 => Ok(ChiMode::Ms),
        _ => Err(PersistError::Corrupt("unknown distance variant tag")),
    }
}

/// Write an automaton to `writer` in the versioned binary layout.
pub fn write_automaton<W: Write>(
    automaton: &UniversalAutomaton,
    mut writer: W,
) -> Result<(), PersistError> {
    let image = AutomatonImage {
        distance: automaton.distance(),
        chi: encode_chi(automaton.chi()),
        state_count: automaton.state_count() as u32,
        sink: automaton.sink_id().as_u32(),
        accepting: automaton.accepting_ids().map(StateId::as_u32).collect(),
        transitions: automaton
            .transitions()
            .map(|(from, b, to)| (from.as_u32(), b.len() as u8, b.bits(), to.as_u32()))
            .collect(),
    };

    write_header(&mut writer, &AUTOMATON_MAGIC)?;
    bincode::serialize_into(&mut writer, &image)?;
    Ok(())
}

/// Read an automaton back from the versioned binary layout, validating the
/// state graph before handing it out.
pub fn read_automaton<R: Read>(mut reader: R) -> Result<UniversalAutomaton, PersistError> {
    read_header(&mut reader, &AUTOMATON_MAGIC)?;
    let image: AutomatonImage = bincode::deserialize_from(&mut reader)?;

    let chi = decode_chi(image.chi)?;
    if image.state_count == 0 {
        return Err(PersistError::Corrupt("empty state graph"));
    }
    if image.sink >= image.state_count {
        return Err(PersistError::Corrupt("sink state out of range"));
    }

    let mut graph: Automaton<BitVector, ()> = Automaton::new();
    for _ in 1..image.state_count {
        graph.add_state();
    }

    for &(from, len, bits, to) in &image.transitions {
        if from >= image.state_count || to >= image.state_count {
            return Err(PersistError::Corrupt("transition endpoint out of range"));
        }
        if usize::from(len) > MAX_BITS || (usize::from(len) < MAX_BITS && bits >> len != 0) {
            return Err(PersistError::Corrupt("invalid transition label"));
        }
        let label = BitVector::from_bits(usize::from(len), bits);
        let from = StateId::from_u32(from);
        let to = StateId::from_u32(to);
        if graph.link(from, label, to) != to {
            return Err(PersistError::Corrupt("duplicate transition label"));
        }
    }

    for &id in &image.accepting {
        if id >= image.state_count {
            return Err(PersistError::Corrupt("accepting state out of range"));
        }
        graph.set_element(StateId::from_u32(id), ());
    }

    let sink = StateId::from_u32(image.sink);
    if graph.out_degree(sink) != 0 {
        return Err(PersistError::Corrupt("sink state has outgoing transitions"));
    }
    if !graph.is_accept(sink) {
        return Err(PersistError::Corrupt("sink state must be accepting"));
    }
    let sinks = graph.ids().filter(|&id| graph.out_degree(id) == 0).count();
    if sinks != 1 {
        return Err(PersistError::Corrupt("state graph must have exactly one sink"));
    }

    Ok(UniversalAutomaton::from_parts(image.distance, chi, graph, sink))
}

/// Persist an automaton into `dir` under its conventional file name,
/// returning the written path.
pub fn save_automaton<P: AsRef<Path>>(
    automaton: &UniversalAutomaton,
    dir: P,
) -> Result<PathBuf, PersistError> {
    let path = dir.as_ref().join(automaton_file_name(automaton.distance()));
    let file = File::create(&path)?;
    write_automaton(automaton, io::BufWriter::new(file))?;
    Ok(path)
}

/// Load the automaton for `distance` from an explicit directory.
pub fn load_automaton_from<P: AsRef<Path>>(
    dir: P,
    distance: u8,
) -> Result<UniversalAutomaton, PersistError> {
    let path = dir.as_ref().join(automaton_file_name(distance));
    let file = File::open(path)?;
    read_automaton(io::BufReader::new(file))
}

/// Load the automaton for `distance`, probing the bundled data directory
/// (`LEVDICT_DATA_DIR`) first and the working directory second.
///
/// A missing artifact in both locations is [`PersistError::NotFound`];
/// artifacts that exist but fail to parse are hard errors.
pub fn load_automaton(distance: u8) -> Result<UniversalAutomaton, PersistError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        match load_automaton_from(&dir, distance) {
            Err(PersistError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {}
            other => return other,
        }
    }

    match load_automaton_from(".", distance) {
        Err(PersistError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(PersistError::NotFound { distance })
        }
        other => other,
    }
}

/// Write a dictionary to `writer` as a versioned word-list image.
pub fn write_dictionary<W: Write>(
    dictionary: &DictionaryAutomaton,
    mut writer: W,
) -> Result<(), PersistError> {
    let image = DictionaryImage {
        words: dictionary.words(),
    };
    write_header(&mut writer, &DICTIONARY_MAGIC)?;
    bincode::serialize_into(&mut writer, &image)?;
    Ok(())
}

/// Read a dictionary back, rebuilding the trie from the word list.
pub fn read_dictionary<R: Read>(mut reader: R) -> Result<DictionaryAutomaton, PersistError> {
    read_header(&mut reader, &DICTIONARY_MAGIC)?;
    let image: DictionaryImage = bincode::deserialize_from(&mut reader)?;
    Ok(DictionaryAutomaton::from_words(image.words))
}

/// Persist a dictionary to `path`.
pub fn save_dictionary<P: AsRef<Path>>(
    dictionary: &DictionaryAutomaton,
    path: P,
) -> Result<(), PersistError> {
    let file = File::create(path)?;
    write_dictionary(dictionary, io::BufWriter::new(file))
}

/// Load a dictionary from `path`.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<DictionaryAutomaton, PersistError> {
    let file = File::open(path)?;
    read_dictionary(io::BufReader::new(file))
}
