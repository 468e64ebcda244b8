use std::{
    fs,
    io::{self, Write},
};

use spotsldl::pipeline::{Escaping, OutputWriter, format_entry};

/// Sink that records how many lines each flush covered.
#[derive(Default)]
struct CountingSink {
    buffer: Vec<u8>,
    pending: usize,
    flushed_lines: Vec<usize>,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.pending += buf.iter().filter(|b| **b == b'\n').count();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed_lines.push(self.pending);
        self.pending = 0;
        Ok(())
    }
}

impl CountingSink {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.buffer.clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[test]
fn test_format_entry_exact_line() {
    assert_eq!(
        format_entry("Radiohead", "OK Computer", Escaping::Backslash),
        r#""artist=Radiohead,album=OK Computer"  "format=mp3; br>180"  "br>=320; format=flac""#
    );
}

#[test]
fn test_format_entry_escapes_delimiters() {
    assert_eq!(
        format_entry("Crosby, Stills & Nash", "4 Way \"Street\"", Escaping::Backslash),
        r#""artist=Crosby\, Stills & Nash,album=4 Way \"Street\""  "format=mp3; br>180"  "br>=320; format=flac""#
    );
    assert_eq!(
        format_entry("AC\\DC", "Back in Black", Escaping::Backslash),
        r#""artist=AC\\DC,album=Back in Black"  "format=mp3; br>180"  "br>=320; format=flac""#
    );
}

#[test]
fn test_format_entry_verbatim_keeps_names() {
    assert_eq!(
        format_entry("Crosby, Stills & Nash", "CSN", Escaping::Verbatim),
        r#""artist=Crosby, Stills & Nash,album=CSN"  "format=mp3; br>180"  "br>=320; format=flac""#
    );
}

#[test]
fn test_default_escaping_matches_legacy_format() {
    assert_eq!(Escaping::default(), Escaping::Verbatim);
    assert_eq!(
        format_entry("Crosby, Stills & Nash", "4 Way \"Street\"", Escaping::default()),
        r#""artist=Crosby, Stills & Nash,album=4 Way "Street""  "format=mp3; br>180"  "br>=320; format=flac""#
    );
}

#[test]
fn test_format_entry_keeps_unicode() {
    assert_eq!(
        format_entry("Sigur Rós", "Ágætis byrjun", Escaping::default()),
        r#""artist=Sigur Rós,album=Ágætis byrjun"  "format=mp3; br>180"  "br>=320; format=flac""#
    );
}

#[test]
fn test_writer_flushes_every_entry() {
    let mut writer = OutputWriter::new(CountingSink::default(), Escaping::Backslash);

    writer.write_entry("Radiohead", "OK Computer").unwrap();
    writer.write_entry("Radiohead", "Kid A").unwrap();
    writer.write_entry("Portishead", "Dummy").unwrap();

    assert_eq!(writer.written(), 3);

    let sink = writer.into_inner();
    assert_eq!(sink.flushed_lines, vec![1, 1, 1]);
    assert_eq!(sink.pending, 0);
    assert_eq!(
        sink.lines(),
        vec![
            r#""artist=Radiohead,album=OK Computer"  "format=mp3; br>180"  "br>=320; format=flac""#,
            r#""artist=Radiohead,album=Kid A"  "format=mp3; br>180"  "br>=320; format=flac""#,
            r#""artist=Portishead,album=Dummy"  "format=mp3; br>180"  "br>=320; format=flac""#,
        ]
    );
}

#[test]
fn test_writer_returns_written_entry() {
    let mut writer = OutputWriter::new(Vec::new(), Escaping::Verbatim);

    let entry = writer.write_entry("Low", "Things We Lost in the Fire").unwrap();

    assert_eq!(
        entry,
        format_entry("Low", "Things We Lost in the Fire", Escaping::Verbatim)
    );
    assert_eq!(writer.into_inner(), format!("{}\n", entry).into_bytes());
}

#[test]
fn test_writer_create_truncates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sldl-albums.txt");
    fs::write(&path, "stale content\n").unwrap();

    let mut writer = OutputWriter::create(&path, Escaping::Backslash).unwrap();
    writer.write_entry("Björk", "Homogenic").unwrap();

    // Readable before the writer is dropped
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "\"artist=Björk,album=Homogenic\"  \"format=mp3; br>180\"  \"br>=320; format=flac\"\n"
    );
}
