//! Reader for the WordNet 3.0 database files (`index.*`, `data.*`, `*.exc`).
//!
//! Index and exception files are parsed into maps at load time. Data files
//! are kept as raw bytes and synsets are decoded on demand from the byte
//! offsets listed in the index.

use super::morphy;
use super::{Lexicon, LexiconError, PartOfSpeech, Sense};
use std::collections::HashMap;
use std::path::Path;

/// Everything WordNet holds for one part of speech.
#[derive(Default)]
struct PosTables {
    /// lemma -> synset offsets, in index-file order
    index: HashMap<String, Vec<u64>>,
    /// inflected form -> base forms
    exceptions: HashMap<String, Vec<String>>,
    data: Vec<u8>,
}

pub struct WordNet {
    tables: [PosTables; 4],
}

impl WordNet {
    /// Load every part of speech from a WordNet `dict` directory.
    ///
    /// Blocking; call from `spawn_blocking` inside the runtime.
    pub fn load(dir: &Path) -> Result<Self, LexiconError> {
        let mut tables: [PosTables; 4] = Default::default();

        for pos in PartOfSpeech::ALL {
            let table = &mut tables[pos as usize];

            let index_path = dir.join(format!("index.{}", pos.file_suffix()));
            table.index = parse_index(&index_path, &read_text(&index_path)?)?;

            let exc_path = dir.join(format!("{}.exc", pos.file_suffix()));
            table.exceptions = parse_exceptions(&read_text(&exc_path)?);

            let data_path = dir.join(format!("data.{}", pos.file_suffix()));
            table.data = std::fs::read(&data_path).map_err(|e| LexiconError::io(&data_path, e))?;
        }

        tracing::info!(
            dir = ?dir,
            nouns = tables[PartOfSpeech::Noun as usize].index.len(),
            verbs = tables[PartOfSpeech::Verb as usize].index.len(),
            adjectives = tables[PartOfSpeech::Adjective as usize].index.len(),
            adverbs = tables[PartOfSpeech::Adverb as usize].index.len(),
            "WordNet loaded"
        );

        Ok(Self { tables })
    }

    fn table(&self, pos: PartOfSpeech) -> &PosTables {
        &self.tables[pos as usize]
    }

    /// All senses of `word`: nouns, then verbs, adjectives and adverbs; within
    /// a part of speech, by base form and then index order.
    pub fn senses(&self, word: &str) -> Result<Vec<Sense>, LexiconError> {
        let lemma = lemma_key(word);
        let mut senses = Vec::new();

        for pos in PartOfSpeech::ALL {
            let table = self.table(pos);
            let forms = morphy::base_forms(&lemma, pos, &table.exceptions, |f| {
                table.index.contains_key(f)
            });

            for form in forms {
                for &offset in table.index.get(&form).into_iter().flatten() {
                    senses.push(self.sense_at(pos, offset, &form)?);
                }
            }
        }

        Ok(senses)
    }

    fn sense_at(&self, pos: PartOfSpeech, offset: u64, lemma: &str) -> Result<Sense, LexiconError> {
        let data = &self.table(pos).data;
        let file = format!("data.{}", pos.file_suffix());

        let start = usize::try_from(offset)
            .ok()
            .filter(|&s| s < data.len())
            .ok_or_else(|| LexiconError::malformed(&file, format!("offset {} out of range", offset)))?;
        let end = data[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(data.len(), |n| start + n);
        let line = String::from_utf8_lossy(&data[start..end]);

        let (columns, gloss) = line.split_once(" | ").unwrap_or((line.as_ref(), ""));
        let line_offset = columns.split_whitespace().next().unwrap_or_default();
        if line_offset.parse::<u64>().ok() != Some(offset) {
            return Err(LexiconError::malformed(
                &file,
                format!("no synset at offset {}", offset),
            ));
        }

        let (definition, examples) = parse_gloss(gloss);
        Ok(Sense {
            lemma: lemma.replace('_', " "),
            pos,
            definition,
            examples,
        })
    }
}

impl Lexicon for WordNet {
    fn first_sense(&self, word: &str) -> Result<Option<Sense>, LexiconError> {
        Ok(self.senses(word)?.into_iter().next())
    }

    fn is_loaded(&self) -> bool {
        self.tables.iter().any(|t| !t.index.is_empty())
    }
}

/// Index keys use `_` between words of a collocation.
fn lemma_key(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn read_text(path: &Path) -> Result<String, LexiconError> {
    let bytes = std::fs::read(path).map_err(|e| LexiconError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Lines starting with a space are the license header.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(' '))
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...`
fn parse_index(path: &Path, text: &str) -> Result<HashMap<String, Vec<u64>>, LexiconError> {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut index = HashMap::new();

    for (line_no, line) in content_lines(text) {
        let bad = |what: &str| LexiconError::malformed(&file, format!("line {}: {}", line_no + 1, what));
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let lemma = *tokens.first().ok_or_else(|| bad("empty line"))?;
        let synset_cnt: usize = tokens
            .get(2)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| bad("bad synset count"))?;
        let p_cnt: usize = tokens
            .get(3)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| bad("bad pointer count"))?;

        // Skip pointer symbols, sense_cnt and tagsense_cnt.
        let first_offset = 4 + p_cnt + 2;
        let offsets = tokens
            .get(first_offset..first_offset + synset_cnt)
            .ok_or_else(|| bad("missing synset offsets"))?
            .iter()
            .map(|t| t.parse::<u64>().map_err(|_| bad("bad synset offset")))
            .collect::<Result<Vec<_>, _>>()?;

        index.insert(lemma.to_string(), offsets);
    }

    Ok(index)
}

/// `inflected base [base...]`
fn parse_exceptions(text: &str) -> HashMap<String, Vec<String>> {
    content_lines(text)
        .filter_map(|(_, line)| {
            let mut tokens = line.split_whitespace();
            let inflected = tokens.next()?;
            let bases: Vec<String> = tokens.map(String::from).collect();
            (!bases.is_empty()).then(|| (inflected.to_string(), bases))
        })
        .collect()
}

/// Split a gloss into its definition and its quoted example sentences.
///
/// Every `"..."` span is an example, even when it contains `;`. The
/// definition is what remains once those spans are removed, with the
/// leftover separators trimmed. An unmatched quote stays in the definition.
pub fn parse_gloss(gloss: &str) -> (String, Vec<String>) {
    let mut definition = String::new();
    let mut examples = Vec::new();
    let mut rest = gloss.trim();

    while let Some(open) = rest.find('"') {
        let quoted = &rest[open + 1..];
        let Some(close) = quoted.find('"') else {
            break;
        };
        definition.push_str(&rest[..open]);
        examples.push(quoted[..close].to_string());
        rest = &quoted[close + 1..];
    }
    definition.push_str(rest);

    let definition = definition.trim_matches(|c: char| c == ';' || c.is_whitespace());
    (definition.to_string(), examples)
}
