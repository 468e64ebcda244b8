use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

/// Download preference conditions appended to every entry.
pub const ENTRY_CONDITIONS: &str = "\"format=mp3; br>180\"  \"br>=320; format=flac\"";

/// How delimiter characters inside artist and album names are written.
///
/// slsk-batchdl reads the unescaped form, so that is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// `\`, `"` and `,` are prefixed with a backslash.
    Backslash,
    /// Names are written as they are.
    #[default]
    Verbatim,
}

/// Escapes one name for use inside a quoted `key=value,...` segment.
pub fn escape_value(value: &str, escaping: Escaping) -> String {
    match escaping {
        Escaping::Verbatim => value.to_string(),
        Escaping::Backslash => {
            let mut escaped = String::with_capacity(value.len());
            for c in value.chars() {
                if matches!(c, '\\' | '"' | ',') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped
        }
    }
}

/// Formats one queue entry, without the trailing newline.
///
/// ```text
/// "artist=Radiohead,album=OK Computer"  "format=mp3; br>180"  "br>=320; format=flac"
/// ```
pub fn format_entry(artist: &str, album: &str, escaping: Escaping) -> String {
    format!(
        "\"artist={},album={}\"  {}",
        escape_value(artist, escaping),
        escape_value(album, escaping),
        ENTRY_CONDITIONS
    )
}

/// Appends entries to a sink, flushing after every line so that an
/// interrupted run keeps everything written so far.
pub struct OutputWriter<W: Write> {
    sink: W,
    escaping: Escaping,
    written: usize,
}

impl OutputWriter<File> {
    /// Creates or truncates the file at `path`.
    pub fn create(path: &Path, escaping: Escaping) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?, escaping))
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn new(sink: W, escaping: Escaping) -> Self {
        Self {
            sink,
            escaping,
            written: 0,
        }
    }

    /// Writes the entry for one artist/album pair and returns it.
    pub fn write_entry(&mut self, artist: &str, album: &str) -> io::Result<String> {
        let entry = format_entry(artist, album, self.escaping);
        writeln!(self.sink, "{}", entry)?;
        self.sink.flush()?;
        self.written += 1;
        Ok(entry)
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
