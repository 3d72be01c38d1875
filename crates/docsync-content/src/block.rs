//! Managed block names, parsed blocks, and the block set

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::codec;
use crate::error::Result;
use crate::scanner;

/// The five managed constants in the documentation page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BlockName {
    #[serde(rename = "API_DATA")]
    ApiData,
    #[serde(rename = "EXAMPLES")]
    Examples,
    #[serde(rename = "WELCOME_CONTENT")]
    WelcomeContent,
    #[serde(rename = "ERROR_CODES_CONTENT")]
    ErrorCodesContent,
    #[serde(rename = "RELEASE_NOTES_CONTENT")]
    ReleaseNotesContent,
}

impl BlockName {
    /// All required blocks, in document-convention order.
    pub const ALL: [BlockName; 5] = [
        BlockName::ApiData,
        BlockName::Examples,
        BlockName::WelcomeContent,
        BlockName::ErrorCodesContent,
        BlockName::ReleaseNotesContent,
    ];

    /// The constant identifier as it appears in the page.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockName::ApiData => "API_DATA",
            BlockName::Examples => "EXAMPLES",
            BlockName::WelcomeContent => "WELCOME_CONTENT",
            BlockName::ErrorCodesContent => "ERROR_CODES_CONTENT",
            BlockName::ReleaseNotesContent => "RELEASE_NOTES_CONTENT",
        }
    }
}

impl std::fmt::Display for BlockName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One located and decoded block.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub name: BlockName,
    /// Decoded literal value.
    pub value: Value,
    /// Raw `{ ... }` slice as found in the page.
    pub raw_text: String,
    /// Byte offset of the `c` in `const`; replacement begins here.
    pub replace_start: usize,
    /// Byte offset one past the trailing `;`; replacement ends here.
    pub replace_end: usize,
    /// Leading whitespace of the declaration line, used to indent
    /// re-serialized body lines.
    pub indent: String,
}

/// All five managed blocks of one document, keyed by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockSet {
    blocks: BTreeMap<BlockName, ContentBlock>,
}

impl BlockSet {
    /// Locate and decode all five required blocks.
    ///
    /// `document` must already be newline-normalized (see
    /// [`normalize_newlines`]); the recorded replace offsets refer to the
    /// text passed here.
    pub fn parse(document: &str) -> Result<Self> {
        let mut blocks = BTreeMap::new();
        for name in BlockName::ALL {
            let anchor = scanner::find_anchor(document, name.as_str())?;
            let span = scanner::scan_literal(document, name.as_str(), anchor)?;
            let raw_text = document[span.open..=span.close].to_string();
            let value = codec::parse_literal(name.as_str(), &raw_text)?;
            blocks.insert(
                name,
                ContentBlock {
                    name,
                    value,
                    raw_text,
                    replace_start: span.replace_start,
                    replace_end: span.replace_end,
                    indent: codec::detect_indent(document, span.replace_start),
                },
            );
        }
        Ok(Self { blocks })
    }

    /// Get a block. All five are present on any parsed set.
    pub fn get(&self, name: BlockName) -> Option<&ContentBlock> {
        self.blocks.get(&name)
    }

    /// Decoded value of a block, `Null` if absent.
    pub fn value(&self, name: BlockName) -> &Value {
        self.blocks
            .get(&name)
            .map(|b| &b.value)
            .unwrap_or(&Value::Null)
    }

    /// Iterate blocks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.values()
    }
}

/// Strip a UTF-8 BOM and normalize CRLF / lone CR to LF.
pub fn normalize_newlines(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.replace("\r\n", "\n").replace('\r', "\n")
}
