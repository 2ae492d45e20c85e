//! Supported audio formats

use std::collections::BTreeMap;
use std::fmt;

/// Per-format file counts, ordered by [`AudioFormat::ALL`]
pub type FormatCounts = BTreeMap<AudioFormat, usize>;

/// Audio formats produced by the chat export
///
/// Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AudioFormat {
    Mpga,
    M4a,
    Wav,
    Aiff,
}

impl AudioFormat {
    /// Every supported format, in reporting order
    pub const ALL: [AudioFormat; 4] = [
        AudioFormat::Mpga,
        AudioFormat::M4a,
        AudioFormat::Wav,
        AudioFormat::Aiff,
    ];

    /// Match a file extension (without the leading dot), ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    /// Lowercase extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mpga => "mpga",
            AudioFormat::M4a => "m4a",
            AudioFormat::Wav => "wav",
            AudioFormat::Aiff => "aiff",
        }
    }

    /// Extension written for this format
    ///
    /// MPGA is relabelled as MP3 when requested. The audio data is untouched.
    pub fn output_extension(self, convert_mpga_to_mp3: bool) -> &'static str {
        match self {
            AudioFormat::Mpga if convert_mpga_to_mp3 => "mp3",
            other => other.extension(),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
